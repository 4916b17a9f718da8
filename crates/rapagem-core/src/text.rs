//! Text normalization shared by the scorer, the stance classifier and the store.
//!
//! Everything that compares words (lexicon lookups, name matching, cue phrases)
//! goes through [`normalize`] or [`tokenize`] so that "Não", "nao" and "NÃO"
//! are the same token.

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Remove diacritics via NFKD decomposition, dropping combining marks.
#[must_use]
pub fn strip_accents(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Case-fold, strip accents and collapse whitespace runs into single spaces.
#[must_use]
pub fn normalize(text: &str) -> String {
    strip_accents(text)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split text into normalized word tokens, in reading order.
///
/// Punctuation is dropped; `"Péssimo!"` yields `["pessimo"]`.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let folded = strip_accents(text).to_lowercase();
    WORD_RE
        .find_iter(&folded)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Match tokens derived from a person's display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetNames {
    /// Normalized full name, tokens joined by single spaces.
    pub full: String,
    /// Last token of the normalized name.
    pub surname: String,
}

impl TargetNames {
    /// Derive the full-name and surname tokens for `name`.
    ///
    /// Returns an empty set for blank names, which can never be mentioned.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let parts = tokenize(name);
        let Some(surname) = parts.last().cloned() else {
            return Self::default();
        };
        Self {
            full: parts.join(" "),
            surname,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }

    /// Whether the token stream mentions this target.
    ///
    /// The surname must equal a whole token; the full name must appear as a
    /// run of whole tokens.
    #[must_use]
    pub fn mentioned_in(&self, tokens: &[String]) -> bool {
        if self.is_empty() || tokens.is_empty() {
            return false;
        }
        if tokens.iter().any(|t| *t == self.surname) {
            return true;
        }
        format!(" {} ", tokens.join(" ")).contains(&format!(" {} ", self.full))
    }
}

/// Stable key for a scraped comment.
///
/// Prefers the site's comment id, then the permalink, and falls back to a
/// SHA-256 of the article URL and content.
#[must_use]
pub fn comment_key(
    comment_id: Option<&str>,
    permalink: Option<&str>,
    article_url: &str,
    content: &str,
) -> String {
    if let Some(id) = comment_id.filter(|s| !s.trim().is_empty()) {
        return id.to_string();
    }
    if let Some(link) = permalink.filter(|s| !s.trim().is_empty()) {
        return link.to_string();
    }
    let mut hasher = Sha256::new();
    hasher.update(article_url.as_bytes());
    hasher.update(b"\n");
    hasher.update(content.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
