//! Editorial lexicon extensions loaded from YAML.
//!
//! The file only adds to (or re-weights) the built-in PT-BR seed vocabulary;
//! it never removes entries.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::text::{normalize, tokenize};
use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexiconFile {
    /// Term to signed polarity weight.
    pub terms: BTreeMap<String, f64>,
    pub negators: Vec<String>,
    /// Multipliers greater than 1 ("muito").
    pub intensifiers: BTreeMap<String, f64>,
    /// Multipliers between 0 and 1 ("pouco").
    pub attenuators: BTreeMap<String, f64>,
}

impl LexiconFile {
    /// Total number of entries across all sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len() + self.negators.len() + self.intensifiers.len() + self.attenuators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Case-fold and accent-strip every key so lookups match tokenized text.
    fn normalized(self) -> Self {
        let fold_map = |m: BTreeMap<String, f64>| -> BTreeMap<String, f64> {
            m.into_iter().map(|(k, v)| (normalize(&k), v)).collect()
        };
        Self {
            terms: fold_map(self.terms),
            negators: self.negators.iter().map(|n| normalize(n)).collect(),
            intensifiers: fold_map(self.intensifiers),
            attenuators: fold_map(self.attenuators),
        }
    }
}

/// Load, normalize and validate a lexicon extension file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_lexicon_file(path: &Path) -> Result<LexiconFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LexiconFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_lexicon_file(&content)
}

/// Parse and validate lexicon YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_lexicon_file(content: &str) -> Result<LexiconFile, ConfigError> {
    // An empty document deserializes to unit, not to an empty mapping.
    if content.trim().is_empty() {
        return Ok(LexiconFile::default());
    }
    let file: LexiconFile = serde_yaml::from_str(content)?;
    let file = file.normalized();
    validate_lexicon_file(&file)?;
    Ok(file)
}

fn validate_lexicon_file(file: &LexiconFile) -> Result<(), ConfigError> {
    for (term, weight) in &file.terms {
        check_key("terms", term)?;
        if !weight.is_finite() || *weight == 0.0 {
            return Err(ConfigError::Validation(format!(
                "term '{term}' has weight {weight}; must be finite and non-zero"
            )));
        }
    }

    for negator in &file.negators {
        check_key("negators", negator)?;
    }

    for (term, mult) in &file.intensifiers {
        check_key("intensifiers", term)?;
        if !mult.is_finite() || *mult <= 1.0 {
            return Err(ConfigError::Validation(format!(
                "intensifier '{term}' has multiplier {mult}; must be greater than 1"
            )));
        }
    }

    for (term, mult) in &file.attenuators {
        check_key("attenuators", term)?;
        if !mult.is_finite() || *mult <= 0.0 || *mult >= 1.0 {
            return Err(ConfigError::Validation(format!(
                "attenuator '{term}' has multiplier {mult}; must be between 0 and 1"
            )));
        }
    }

    Ok(())
}

fn check_key(section: &str, key: &str) -> Result<(), ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{section} contains an empty entry"
        )));
    }
    // Lookups are keyed by tokens, so anything that does not tokenize back to
    // itself could never match.
    if tokenize(key) != [key] {
        return Err(ConfigError::Validation(format!(
            "{section} entry '{key}' must be a single word"
        )));
    }
    Ok(())
}
