//! Which checks an assignment runs, and with what parameters.
//!
//! Loaded from TOML; every table and field may be omitted:
//!
//! ```toml
//! [citation_check]
//! authors = ["Jane Smith"]
//! year = "2010"
//!
//! [grammar_check]
//! base_url = "http://localhost:8081"
//!
//! [semantics_check]
//! strategy = "optimal"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use scriba_nlp::{CitationConfig, RunConfig, StageKind};
use scriba_semantics::MatchingStrategy;

use crate::errors::{FeedbackError, FeedbackResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationCheck {
    pub enabled: bool,
    pub authors: Vec<String>,
    pub year: Option<String>,
}

impl Default for CitationCheck {
    fn default() -> Self {
        CitationCheck {
            enabled: true,
            authors: Vec::new(),
            year: None,
        }
    }
}

impl CitationCheck {
    pub fn citation_config(&self) -> CitationConfig {
        CitationConfig {
            authors: self.authors.clone(),
            year: self.year.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticsCheck {
    pub enabled: bool,
    pub strategy: MatchingStrategy,
}

impl Default for SemanticsCheck {
    fn default() -> Self {
        SemanticsCheck {
            enabled: true,
            strategy: MatchingStrategy::Greedy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlagiarismCheck {
    pub enabled: bool,
}

impl Default for PlagiarismCheck {
    fn default() -> Self {
        PlagiarismCheck { enabled: true }
    }
}

/// LanguageTool connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarCheck {
    pub enabled: bool,
    pub base_url: String,
    pub language: String,
    pub disabled_rules: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for GrammarCheck {
    fn default() -> Self {
        GrammarCheck {
            enabled: true,
            base_url: "http://localhost:8081".to_string(),
            language: "en-GB".to_string(),
            disabled_rules: vec!["EN_QUOTES".to_string()],
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleCheck {
    pub enabled: bool,
}

impl Default for StyleCheck {
    fn default() -> Self {
        StyleCheck { enabled: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub citation_check: CitationCheck,
    pub semantics_check: SemanticsCheck,
    pub plagiarism_check: PlagiarismCheck,
    pub grammar_check: GrammarCheck,
    pub academic_style_check: StyleCheck,
}

impl AnalysisConfig {
    /// Load from a TOML file. A missing file gives the defaults.
    pub fn load(path: &Path) -> FeedbackResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| {
                FeedbackError::Config(format!("failed to read {}: {}", path.display(), e))
            })?;

        Self::from_toml(&content)
            .map_err(|e| {
                FeedbackError::Config(format!("failed to parse {}: {}", path.display(), e))
            })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Stage the submission pipeline starts from.
    pub fn root_stage(&self) -> StageKind {
        if self.citation_check.enabled {
            StageKind::CitationRemover
        } else {
            StageKind::TextCleaner
        }
    }

    pub fn run_config(&self) -> RunConfig {
        let run = RunConfig::default();
        if self.citation_check.enabled {
            run.with_citation_check(self.citation_check.citation_config())
        } else {
            run
        }
    }
}
