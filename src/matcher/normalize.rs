//! Building the combined header text that the matchers work on.

use regex::Regex;

/// Joins OCR fragments and strips the noise that breaks keyword matching.
///
/// Whitespace (ASCII and full-width) and commas (`,` and `，`) are removed.
/// With a CJK limit, only the first `max_cjk_chars` characters in
/// U+4E00..=U+9FFF are kept and everything else is dropped.
#[derive(Debug, Clone)]
pub struct HeaderNormalizer {
    max_cjk_chars: usize,
    noise_regex: Regex,
    cjk_regex: Regex,
}

impl HeaderNormalizer {
    /// Create a normalizer. `max_cjk_chars == 0` means no CJK limit.
    pub fn new(max_cjk_chars: usize) -> Self {
        Self {
            max_cjk_chars,
            noise_regex: Regex::new(r"[\s\u{3000},，]+").unwrap(),
            cjk_regex: Regex::new(r"[\u{4E00}-\u{9FFF}]").unwrap(),
        }
    }

    /// Configured CJK limit (0 = unlimited).
    pub fn max_cjk_chars(&self) -> usize {
        self.max_cjk_chars
    }

    /// Build the combined text from header fragments.
    pub fn combine<S: AsRef<str>>(&self, fragments: &[S]) -> String {
        let joined: String = fragments.iter().map(|s| s.as_ref()).collect();
        self.normalize(&joined)
    }

    /// Normalize an already-joined string.
    pub fn normalize(&self, text: &str) -> String {
        let stripped = self.noise_regex.replace_all(text, "");
        if self.max_cjk_chars == 0 {
            return stripped.into_owned();
        }

        self.cjk_regex
            .find_iter(&stripped)
            .take(self.max_cjk_chars)
            .map(|m| m.as_str())
            .collect()
    }
}

impl Default for HeaderNormalizer {
    fn default() -> Self {
        Self::new(10)
    }
}
