use regex::Regex;

use crate::error::Result;

const UMLAUTS: [(char, &str); 7] = [
    ('ä', "ae"),
    ('ö', "oe"),
    ('ü', "ue"),
    ('Ä', "ae"),
    ('Ö', "oe"),
    ('Ü', "ue"),
    ('ß', "ss"),
];

/// Canonicalizes raw filename stems before prefix detection.
///
/// Lowercases, folds German umlauts, turns whitespace into `-` and keeps
/// `+` joints tight (`"Architekten + Ingenieure"` becomes
/// `"architekten+ingenieure"`).
#[derive(Debug, Clone)]
pub struct Normalizer {
    re_plus: Regex,
    re_space: Regex,
    re_dashes: Regex,
}

impl Normalizer {
    /// # Errors
    ///
    /// Returns `LogomarkError::RegexError` if a pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_plus: Regex::new(r"\s*\+\s*")?,
            re_space: Regex::new(r"\s+")?,
            re_dashes: Regex::new(r"-{2,}")?,
        })
    }

    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let mut folded = String::with_capacity(raw.len());
        for c in raw.trim().chars() {
            match UMLAUTS.iter().find(|(u, _)| *u == c) {
                Some((_, ascii)) => folded.push_str(ascii),
                None => folded.push(c),
            }
        }

        let tight = self.re_plus.replace_all(&folded, "+");
        let dashed = self.re_space.replace_all(&tight, "-");
        let lowered = dashed.to_lowercase();
        self.re_dashes
            .replace_all(&lowered, "-")
            .trim_matches(|c| c == '-' || c == '_')
            .to_string()
    }

    /// Normalizes `raw` and strips the first matching legacy prefix.
    #[must_use]
    pub fn normalize_stem(&self, raw: &str, strip_prefixes: &[String]) -> String {
        let normalized = self.normalize(raw);
        strip_prefixes
            .iter()
            .find_map(|p| normalized.strip_prefix(p.as_str()))
            .map(str::to_string)
            .unwrap_or(normalized)
    }
}
