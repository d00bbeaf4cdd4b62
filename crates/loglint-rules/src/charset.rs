//! Character classes shared by the message rules.
//!
//! "Letter" means Unicode general category `L*`. Letter numerals (`Ⅻ`) and
//! enclosed letters (`Ⓐ`) are not letters here.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Codepoint ranges (inclusive) treated as emoji.
pub const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F),
    (0x1F300, 0x1F5FF),
    (0x1F680, 0x1F6FF),
    (0x2600, 0x26FF),
    (0x2700, 0x27BF),
    (0xFE00, 0xFE0F),
    (0x1F900, 0x1F9FF),
];

/// Decorative punctuation forbidden anywhere in a message.
pub const FORBIDDEN_PUNCTUATION: &[char] = &['‼', '⁉', '‽', '…'];

/// Punctuation the English-only scan skips over.
pub const ALLOWED_PUNCTUATION: &[char] = &[
    '.', ',', ':', ';', '-', '_', '/', '\\', '@', '=', '+', '*', '&', '%', '$', '#', '!', '?',
];

/// Returns true for codepoints in the emoji ranges.
#[must_use]
pub fn is_emoji(c: char) -> bool {
    let cp = u32::from(c);
    EMOJI_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

/// Returns true for decorative punctuation.
#[must_use]
pub fn is_forbidden_punctuation(c: char) -> bool {
    FORBIDDEN_PUNCTUATION.contains(&c)
}

/// Returns true for punctuation the English-only scan ignores.
#[must_use]
pub fn is_allowed_punctuation(c: char) -> bool {
    ALLOWED_PUNCTUATION.contains(&c)
}

/// Returns true for codepoints in a letter category (`Lu Ll Lt Lm Lo`).
#[must_use]
pub fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Returns true for category `Ll` only.
#[must_use]
pub fn is_lowercase_letter(c: char) -> bool {
    get_general_category(c) == GeneralCategory::LowercaseLetter
}

/// ASCII `A-Z` / `a-z` only.
#[must_use]
pub fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoji_ranges() {
        assert!(is_emoji('😊'));
        assert!(is_emoji('🚀'));
        assert!(is_emoji('☀'));
        assert!(is_emoji('✅'));
        assert!(is_emoji('\u{FE0F}'));
        assert!(is_emoji('🤖'));
        assert!(!is_emoji('a'));
        assert!(!is_emoji('é'));
    }

    #[test]
    fn punctuation_classes() {
        assert!(is_forbidden_punctuation('…'));
        assert!(!is_forbidden_punctuation('!'));
        assert!(is_allowed_punctuation('\\'));
        assert!(is_allowed_punctuation('?'));
        assert!(!is_allowed_punctuation('('));
    }

    #[test]
    fn letters_are_general_category_l() {
        for c in ['a', 'Z', 'з', '漢', 'ª', 'ʰ', 'ǅ'] {
            assert!(is_letter(c), "{c} should be a letter");
        }
        for c in ['Ⅻ', 'Ⓐ', 'ⓐ', '7', '_', '😊'] {
            assert!(!is_letter(c), "{c} should not be a letter");
        }
    }

    #[test]
    fn lowercase_is_category_ll() {
        assert!(is_lowercase_letter('a'));
        assert!(is_lowercase_letter('ß'));
        assert!(!is_lowercase_letter('ª'));
        assert!(!is_lowercase_letter('ʰ'));
        assert!(!is_lowercase_letter('ⓐ'));
        assert!(!is_lowercase_letter('S'));
    }

    #[test]
    fn latin_is_ascii_only() {
        assert!(is_latin_letter('q'));
        assert!(is_latin_letter('Q'));
        assert!(!is_latin_letter('é'));
        assert!(!is_latin_letter('з'));
    }
}
