//! Formatting utilities for terminal output

use crate::core::ScrambledWord;

/// Render a scramble for display
///
/// Verbatim scrambles are spelled out letter by letter (`"N I L T O K"`)
/// so they are not read as a word.
#[must_use]
pub fn spell_out(scramble: &ScrambledWord) -> String {
    if !scramble.is_verbatim() {
        return scramble.text().to_string();
    }

    let mut result = String::with_capacity(scramble.text().len() * 2);
    for (i, ch) in scramble.text().chars().enumerate() {
        if i > 0 {
            result.push(' ');
        }
        result.extend(ch.to_uppercase());
    }
    result
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: u32, max: u32, width: usize) -> String {
    let filled = if max == 0 {
        width
    } else {
        (value as usize * width / max as usize).min(width)
    };

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// "Round 3 of 10"
#[must_use]
pub fn round_label(round: u32, max_rounds: u32) -> String {
    format!("Round {round} of {max_rounds}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spell_out_spaces_letters() {
        let scramble = ScrambledWord::new("niltok");
        assert_eq!(spell_out(&scramble), "N I L T O K");
    }

    #[test]
    fn spell_out_single_letter() {
        assert_eq!(spell_out(&ScrambledWord::new("a")), "A");
    }

    #[test]
    fn spell_out_unicode() {
        assert_eq!(spell_out(&ScrambledWord::new("éfac")), "É F A C");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0, 10, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(10, 10, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_partial() {
        let bar = create_progress_bar(3, 10, 10);
        assert_eq!(bar, "███░░░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(0, 0, 4), "████");
    }

    #[test]
    fn round_label_format() {
        assert_eq!(round_label(3, 10), "Round 3 of 10");
    }
}
