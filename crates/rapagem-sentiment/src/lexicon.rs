//! PT-BR polarity lexicon with negators and intensity modifiers.
//!
//! All keys are normalized (lowercase, no accents) so they compare directly
//! against [`rapagem_core::tokenize`] output. A [`Lexicon`] is built once per
//! run and only ever read afterwards.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use rapagem_core::{load_lexicon_file, ConfigError, LexiconFile};

/// Seed vocabulary. Positive weights are favourable, negative unfavourable;
/// magnitude is strength.
pub(crate) const SEED_TERMS: &[(&str, f64)] = &[
    // Positive
    ("bom", 1.0),
    ("boa", 1.0),
    ("otimo", 1.5),
    ("otima", 1.5),
    ("excelente", 2.0),
    ("parabens", 1.5),
    ("apoiar", 1.0),
    ("apoio", 1.0),
    ("competente", 1.5),
    ("honesto", 1.5),
    ("lideranca", 1.0),
    ("vitoria", 1.2),
    ("acertou", 1.2),
    ("certo", 0.8),
    ("tranquilo", 0.8),
    ("feliz", 1.2),
    // Negative
    ("ruim", -1.2),
    ("pessimo", -2.0),
    ("horrivel", -2.2),
    ("vergonha", -1.8),
    ("vergonhoso", -1.8),
    ("corrupto", -2.5),
    ("mentiroso", -2.0),
    ("incompetente", -2.0),
    ("fracasso", -1.8),
    ("crime", -1.5),
    ("criminoso", -2.2),
    ("canalha", -2.2),
    ("lixo", -2.0),
    ("odeio", -2.0),
    ("enganou", -1.5),
    ("errado", -1.2),
    ("culpa", -1.0),
    ("golpe", -1.5),
    ("vagabundo", -2.5),
    ("seboso", -1.6),
];

pub(crate) const SEED_NEGATORS: &[&str] = &["nao", "nunca", "jamais", "sem"];

pub(crate) const SEED_INTENSIFIERS: &[(&str, f64)] = &[
    ("muito", 1.5),
    ("mais", 1.2),
    ("super", 1.6),
    ("extremamente", 1.8),
    ("bastante", 1.3),
];

pub(crate) const SEED_ATTENUATORS: &[(&str, f64)] = &[("pouco", 0.6), ("meio", 0.7), ("quase", 0.7)];

/// Conjunctions that close a negation's scope ("não é rico, mas é honesto").
pub(crate) const SCOPE_BREAKERS: &[&str] = &["mas", "porem", "so"];

#[derive(Debug, Clone)]
pub struct Lexicon {
    terms: HashMap<String, f64>,
    negators: HashSet<String>,
    /// Intensifiers and attenuators share one table; only the multiplier differs.
    modifiers: HashMap<String, f64>,
    scope_breakers: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::pt_br()
    }
}

impl Lexicon {
    /// The built-in PT-BR seed lexicon.
    #[must_use]
    pub fn pt_br() -> Self {
        let owned = |pairs: &[(&str, f64)]| -> HashMap<String, f64> {
            pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
        };
        let mut modifiers = owned(SEED_INTENSIFIERS);
        modifiers.extend(owned(SEED_ATTENUATORS));

        Self {
            terms: owned(SEED_TERMS),
            negators: SEED_NEGATORS.iter().map(|s| (*s).to_string()).collect(),
            modifiers,
            scope_breakers: SCOPE_BREAKERS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Merge editorial extensions on top of this lexicon.
    ///
    /// Entries in `file` replace existing weights for the same term.
    #[must_use]
    pub fn with_extensions(mut self, file: &LexiconFile) -> Self {
        self.terms
            .extend(file.terms.iter().map(|(k, v)| (k.clone(), *v)));
        self.negators.extend(file.negators.iter().cloned());
        self.modifiers
            .extend(file.intensifiers.iter().map(|(k, v)| (k.clone(), *v)));
        self.modifiers
            .extend(file.attenuators.iter().map(|(k, v)| (k.clone(), *v)));
        self
    }

    /// Seed lexicon, extended from `path` when one is given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the extension file cannot be loaded or is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let lexicon = Self::pt_br();
        let Some(path) = path else {
            return Ok(lexicon);
        };
        let file = load_lexicon_file(path)?;
        tracing::info!(
            path = %path.display(),
            entries = file.len(),
            "loaded lexicon extensions"
        );
        Ok(lexicon.with_extensions(&file))
    }

    /// Signed weight for `term`, or `None` when the term carries no polarity.
    #[must_use]
    pub fn polarity(&self, term: &str) -> Option<f64> {
        self.terms.get(term).copied()
    }

    #[must_use]
    pub fn is_negator(&self, token: &str) -> bool {
        self.negators.contains(token)
    }

    /// Intensity multiplier for `token`: above 1 intensifies, below 1 attenuates.
    #[must_use]
    pub fn modifier(&self, token: &str) -> Option<f64> {
        self.modifiers.get(token).copied()
    }

    #[must_use]
    pub fn is_scope_breaker(&self, token: &str) -> bool {
        self.scope_breakers.contains(token)
    }

    /// Number of polarity terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
