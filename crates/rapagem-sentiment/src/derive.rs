//! Final label derivation for a (comment, person) pair.
//!
//! Rules are tried in a fixed order and the first that applies wins:
//!
//! 1. direct mention: the comment's own sentiment toward the person;
//! 2. explicit stance: the article's sentiment, inverted on disagreement;
//! 3. proxy alignment: the comment's tone read relative to the article's;
//! 4. indefinite: neutral with low confidence.

use crate::types::{
    Derivation, Origin, SentimentLabel, SentimentResult, Stance, StanceResult,
};

/// Confidence assigned when no rule has enough signal.
pub const INDEFINITE_CONFIDENCE: f64 = 0.25;

/// Base and article weight for stance-derived confidence: `0.6 + 0.4 * article`.
const STANCE_BASE: f64 = 0.6;
const STANCE_ARTICLE_WEIGHT: f64 = 0.4;

/// Everything the derivation needs for one pair.
#[derive(Debug, Clone, Copy)]
pub struct PairContext<'a> {
    /// Comment sentiment toward the person.
    pub comment: &'a SentimentResult,
    /// Article sentiment toward the person.
    pub article: &'a SentimentResult,
    pub mentioned: bool,
    pub stance: &'a StanceResult,
}

/// Derive the final label, confidence and origin for one pair.
#[must_use]
pub fn derive_final(ctx: &PairContext<'_>) -> Derivation {
    direct_mention(ctx)
        .or_else(|| explicit_stance(ctx))
        .or_else(|| proxy_alignment(ctx))
        .unwrap_or_else(indefinite)
}

fn direct_mention(ctx: &PairContext<'_>) -> Option<Derivation> {
    if !ctx.mentioned {
        return None;
    }
    Some(Derivation {
        label: ctx.comment.label,
        confidence: ctx.comment.confidence,
        origin: Origin::ComentarioDireto,
    })
}

fn explicit_stance(ctx: &PairContext<'_>) -> Option<Derivation> {
    if !ctx.stance.references_article || ctx.article.label == SentimentLabel::Neutral {
        return None;
    }
    let label = match ctx.stance.stance {
        Stance::Concorda => ctx.article.label,
        Stance::Discorda => ctx.article.label.invert(),
        Stance::Indefinido => return None,
    };
    Some(Derivation {
        label,
        confidence: (STANCE_BASE + STANCE_ARTICLE_WEIGHT * ctx.article.confidence)
            .clamp(0.0, 1.0),
        origin: Origin::AlinhamentoNoticiaStance,
    })
}

fn proxy_alignment(ctx: &PairContext<'_>) -> Option<Derivation> {
    // A comment with no polarity of its own has nothing to align.
    if !ctx.stance.references_article
        || ctx.comment.hits == 0
        || ctx.comment.label == SentimentLabel::Neutral
    {
        return None;
    }
    let label = match ctx.article.label {
        SentimentLabel::Positive => ctx.comment.label,
        SentimentLabel::Negative => ctx.comment.label.invert(),
        SentimentLabel::Neutral => return None,
    };
    Some(Derivation {
        label,
        confidence: ((ctx.comment.confidence + ctx.article.confidence) / 2.0).clamp(0.0, 1.0),
        origin: Origin::AlinhamentoNoticia,
    })
}

fn indefinite() -> Derivation {
    Derivation {
        label: SentimentLabel::Neutral,
        confidence: INDEFINITE_CONFIDENCE,
        origin: Origin::Indefinido,
    }
}
