//! Detects whether a comment talks about the article itself and, if so,
//! whether it agrees with it.
//!
//! Cue phrases match on whole words of the normalized text. When both an
//! agreement and a disagreement cue fire, disagreement wins: "não concordo"
//! contains "concordo", and the negated form is the more specific signal.

use rapagem_core::tokenize;

use crate::types::{Stance, StanceResult};

pub(crate) const ARTICLE_REFERENCE_CUES: &[&str] = &[
    "materia",
    "materias",
    "noticia",
    "noticias",
    "reportagem",
    "reportagens",
    "no farol",
    "do farol",
    "fake news",
];

pub(crate) const AGREEMENT_CUES: &[&str] = &[
    "concordo",
    "concorda",
    "e verdade",
    "isso e verdade",
    "confere",
    "procedente",
    "ta certo",
    "esta certo",
    "correto",
    "isso mesmo",
    "bem dito",
];

pub(crate) const DISAGREEMENT_CUES: &[&str] = &[
    "discordo",
    "nao concordo",
    "mentira",
    "fake news",
    "fake",
    "nao e verdade",
    "falso",
    "nao confere",
    "improcedente",
    "nao procede",
    "nada a ver",
];

/// Classify a comment's reference to, and stance toward, its article.
///
/// Without an article reference the stance is always [`Stance::Indefinido`].
#[must_use]
pub fn classify_stance(comment_text: &str) -> StanceResult {
    let padded = padded_words(comment_text);

    let references_article = any_cue(&padded, ARTICLE_REFERENCE_CUES);
    if !references_article {
        return StanceResult {
            references_article,
            stance: Stance::Indefinido,
        };
    }

    let stance = if any_cue(&padded, DISAGREEMENT_CUES) {
        Stance::Discorda
    } else if any_cue(&padded, AGREEMENT_CUES) {
        Stance::Concorda
    } else {
        Stance::Indefinido
    };

    StanceResult {
        references_article,
        stance,
    }
}

/// Whether `comment_text` explicitly refers to the article.
#[must_use]
pub fn references_article(comment_text: &str) -> bool {
    any_cue(&padded_words(comment_text), ARTICLE_REFERENCE_CUES)
}

/// Normalized words joined by single spaces, with a space on each end so
/// `" cue "` only matches whole words.
fn padded_words(text: &str) -> String {
    format!(" {} ", tokenize(text).join(" "))
}

fn any_cue(padded: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| padded.contains(&format!(" {cue} ")))
}
