//! Run-time parameters for one pipeline run.

use serde::{Deserialize, Serialize};

/// Source details of the excerpt whose citations should be stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationConfig {
    /// Author names as written ("Jane Smith"); the last word is the surname.
    pub authors: Vec<String>,
    pub year: Option<String>,
}

impl CitationConfig {
    pub fn new<S: Into<String>>(authors: impl IntoIterator<Item = S>, year: Option<&str>) -> Self {
        CitationConfig {
            authors: authors.into_iter().map(Into::into).collect(),
            year: year.map(str::to_string),
        }
    }

    /// Author surnames, skipping empty entries.
    pub fn surnames(&self) -> Vec<&str> {
        self.authors
            .iter()
            .filter_map(|author| author.split_whitespace().last())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub citation_check: Option<CitationConfig>,
    pub enable_cache: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            citation_check: None,
            enable_cache: true,
        }
    }
}

impl RunConfig {
    pub fn with_citation_check(mut self, citation: CitationConfig) -> Self {
        self.citation_check = Some(citation);
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.enable_cache = false;
        self
    }
}
