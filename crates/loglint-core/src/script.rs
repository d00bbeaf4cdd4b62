//! Writing scripts that can be exempted from the English-only check.

use serde::{Deserialize, Serialize};

/// A named writing script, matched by Unicode block ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Accented and extended Latin letters (beyond ASCII A-Z).
    Latin,
    /// Greek and Coptic.
    Greek,
    /// Cyrillic, including supplements.
    Cyrillic,
    /// Armenian.
    Armenian,
    /// Hebrew.
    Hebrew,
    /// Arabic, including supplements and presentation forms.
    Arabic,
    /// Devanagari.
    Devanagari,
    /// Thai.
    Thai,
    /// Georgian.
    Georgian,
    /// Hangul syllables and jamo.
    Hangul,
    /// Hiragana.
    Hiragana,
    /// Katakana.
    Katakana,
    /// CJK unified ideographs.
    Han,
}

impl Script {
    /// Codepoint ranges (inclusive) belonging to this script.
    #[must_use]
    pub fn ranges(self) -> &'static [(u32, u32)] {
        match self {
            Self::Latin => &[
                (0x00C0, 0x024F),
                (0x1E00, 0x1EFF),
                (0x2C60, 0x2C7F),
                (0xA720, 0xA7FF),
            ],
            Self::Greek => &[(0x0370, 0x03FF), (0x1F00, 0x1FFF)],
            Self::Cyrillic => &[
                (0x0400, 0x04FF),
                (0x0500, 0x052F),
                (0x2DE0, 0x2DFF),
                (0xA640, 0xA69F),
            ],
            Self::Armenian => &[(0x0530, 0x058F)],
            Self::Hebrew => &[(0x0590, 0x05FF)],
            Self::Arabic => &[
                (0x0600, 0x06FF),
                (0x0750, 0x077F),
                (0xFB50, 0xFDFF),
                (0xFE70, 0xFEFF),
            ],
            Self::Devanagari => &[(0x0900, 0x097F)],
            Self::Thai => &[(0x0E00, 0x0E7F)],
            Self::Georgian => &[(0x10A0, 0x10FF)],
            Self::Hangul => &[(0x1100, 0x11FF), (0x3130, 0x318F), (0xAC00, 0xD7AF)],
            Self::Hiragana => &[(0x3040, 0x309F)],
            Self::Katakana => &[(0x30A0, 0x30FF), (0x31F0, 0x31FF)],
            Self::Han => &[(0x3400, 0x4DBF), (0x4E00, 0x9FFF), (0xF900, 0xFAFF)],
        }
    }

    /// Returns true if `c` falls inside this script's ranges.
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        let cp = u32::from(c);
        self.ranges()
            .iter()
            .any(|&(start, end)| (start..=end).contains(&cp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_scripts() {
        assert!(Script::Cyrillic.contains('з'));
        assert!(Script::Greek.contains('λ'));
        assert!(Script::Han.contains('中'));
        assert!(Script::Hiragana.contains('あ'));
        assert!(Script::Latin.contains('é'));
        assert!(!Script::Latin.contains('e'));
        assert!(!Script::Cyrillic.contains('a'));
    }

    #[test]
    fn deserializes_lowercase_names() {
        #[derive(Deserialize)]
        struct Doc {
            scripts: Vec<Script>,
        }
        let doc: Doc = toml::from_str(r#"scripts = ["cyrillic", "han"]"#).unwrap();
        assert_eq!(doc.scripts, vec![Script::Cyrillic, Script::Han]);
        assert!(toml::from_str::<Doc>(r#"scripts = ["klingon"]"#).is_err());
    }
}
