//! Lexicon scorer that measures a text's tone toward one named person.
//!
//! Each lexicon hit is scaled by the modifier right before it ("muito bom")
//! and flipped when a negator sits within [`NEGATION_WINDOW`] tokens before
//! it ("não é bom"). The score is the mean of the weighted hits.

use rapagem_core::{tokenize, TargetNames};

use crate::lexicon::Lexicon;
use crate::types::{SentimentLabel, SentimentResult};

/// How many tokens back a negator can reach.
pub const NEGATION_WINDOW: usize = 3;

/// Scores strictly above this are positive, strictly below its negation negative.
pub const LABEL_THRESHOLD: f64 = 0.2;

/// Confidence reported when no lexicon term contributed.
pub const NO_HITS_CONFIDENCE: f64 = 0.3;

/// Added to confidence when the target is named in the text.
pub const MENTION_BONUS: f64 = 0.15;

/// Score `text` toward `target`.
///
/// Empty text and text without lexicon terms score 0.0 with a neutral label.
#[must_use]
pub fn score_targeted(lexicon: &Lexicon, text: &str, target: &TargetNames) -> SentimentResult {
    let tokens = tokenize(text);
    let mentioned = target.mentioned_in(&tokens);

    let mut sum = 0.0_f64;
    let mut hits = 0_usize;
    for (i, token) in tokens.iter().enumerate() {
        let Some(polarity) = lexicon.polarity(token) else {
            continue;
        };

        let mut weighted = polarity * modifier_before(lexicon, &tokens, i);
        if is_negated(lexicon, &tokens, i) {
            weighted = -weighted;
        }
        if weighted.abs() < f64::EPSILON {
            continue;
        }

        sum += weighted;
        hits += 1;
    }

    if hits == 0 {
        return SentimentResult {
            label: SentimentLabel::Neutral,
            score: 0.0,
            confidence: NO_HITS_CONFIDENCE,
            hits: 0,
            mentioned,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let score = sum / hits as f64;

    SentimentResult {
        label: label_for(score),
        score,
        confidence: confidence_for(score, mentioned),
        hits,
        mentioned,
    }
}

/// Map a mean polarity to a label using [`LABEL_THRESHOLD`].
#[must_use]
pub fn label_for(score: f64) -> SentimentLabel {
    if score > LABEL_THRESHOLD {
        SentimentLabel::Positive
    } else if score < -LABEL_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// `0.5 + min(0.5, |score|)`, plus [`MENTION_BONUS`] when mentioned, capped at 1.
#[must_use]
pub fn confidence_for(score: f64, mentioned: bool) -> f64 {
    let base = 0.5 + score.abs().min(0.5);
    let bonus = if mentioned { MENTION_BONUS } else { 0.0 };
    (base + bonus).clamp(0.0, 1.0)
}

/// Multiplier from the token immediately before `i`, or 1.0.
fn modifier_before(lexicon: &Lexicon, tokens: &[String], i: usize) -> f64 {
    i.checked_sub(1)
        .and_then(|prev| lexicon.modifier(&tokens[prev]))
        .unwrap_or(1.0)
}

/// Whether a negator precedes `i` within the window, stopping at scope breakers.
fn is_negated(lexicon: &Lexicon, tokens: &[String], i: usize) -> bool {
    for token in tokens[..i].iter().rev().take(NEGATION_WINDOW) {
        if lexicon.is_negator(token) {
            return true;
        }
        if lexicon.is_scope_breaker(token) {
            return false;
        }
    }
    false
}
