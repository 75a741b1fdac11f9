//! Grammar checking through a LanguageTool server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::GrammarCheck;
use crate::errors::{FeedbackError, FeedbackResult};

/// A suggested replacement for a flagged span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarRule {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub issue_type: Option<String>,
}

/// One problem reported by the grammar checker. `offset` and `length` are in
/// characters of the checked text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarMatch {
    pub message: String,
    #[serde(default)]
    pub short_message: String,
    pub offset: usize,
    pub length: usize,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    #[serde(default)]
    pub rule: Option<GrammarRule>,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<GrammarMatch>,
}

/// Anything that can check a text for grammar problems.
pub trait GrammarChecker: Send + Sync {
    fn check(&self, text: &str) -> FeedbackResult<Vec<GrammarMatch>>;
}

/// Blocking client for the LanguageTool `/v2/check` endpoint.
#[derive(Debug)]
pub struct LanguageToolClient {
    base_url: String,
    language: String,
    disabled_rules: Vec<String>,
    timeout_secs: u64,
    client: reqwest::blocking::Client,
}

impl LanguageToolClient {
    pub fn new(base_url: &str) -> FeedbackResult<Self> {
        Self::from_config(&GrammarCheck {
            base_url: base_url.to_string(),
            ..GrammarCheck::default()
        })
    }

    pub fn from_config(config: &GrammarCheck) -> FeedbackResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FeedbackError::Grammar(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            disabled_rules: config.disabled_rules.clone(),
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    /// Local server on port 8081 checking British English.
    pub fn default_local() -> FeedbackResult<Self> {
        Self::from_config(&GrammarCheck::default())
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v2/check", self.base_url)
    }
}

impl GrammarChecker for LanguageToolClient {
    fn check(&self, text: &str) -> FeedbackResult<Vec<GrammarMatch>> {
        let url = self.endpoint();
        let disabled = self.disabled_rules.join(",");
        let form = [
            ("text", text),
            ("language", self.language.as_str()),
            ("disabledRules", disabled.as_str()),
        ];

        let response = self.client.post(&url).form(&form).send().map_err(|e| {
            if e.is_connect() {
                FeedbackError::Grammar(format!("cannot reach {}", self.base_url))
            } else if e.is_timeout() {
                FeedbackError::Grammar(format!("request timed out after {}s", self.timeout_secs))
            } else {
                FeedbackError::Grammar(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = format!("server answered {}: {}", status.as_u16(), body);
            return Err(FeedbackError::Grammar(message));
        }

        let parsed: CheckResponse = response
            .json()
            .map_err(|e| FeedbackError::Grammar(format!("unreadable response: {e}")))?;

        tracing::debug!(url = %url, matches = parsed.matches.len(), "grammar checked");
        Ok(parsed.matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_drops_trailing_slash() {
        let client = LanguageToolClient::new("http://localhost:8081/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8081/v2/check");
        assert_eq!(client.language, "en-GB");
        assert_eq!(client.disabled_rules, vec!["EN_QUOTES"]);
    }

    #[test]
    fn missing_matches_decode_as_empty() {
        let parsed: CheckResponse =
            serde_json::from_str(r#"{"software": {"name": "LanguageTool"}}"#).unwrap();
        assert!(parsed.matches.is_empty());
    }

    #[test]
    fn decodes_languagetool_matches() {
        let body = r#"{
            "matches": [{
                "message": "Possible spelling mistake found.",
                "shortMessage": "Spelling mistake",
                "replacements": [{"value": "ball"}, {"value": "bell"}],
                "offset": 16,
                "length": 4,
                "context": {"text": "John kicked the bal.", "offset": 16, "length": 4},
                "rule": {
                    "id": "MORFOLOGIK_RULE_EN_GB",
                    "description": "Possible spelling mistake",
                    "issueType": "misspelling",
                    "category": {"id": "TYPOS", "name": "Possible Typo"}
                }
            }]
        }"#;
        let parsed: CheckResponse = serde_json::from_str(body).unwrap();
        insta::assert_debug_snapshot!(parsed.matches, @r###"
        [
            GrammarMatch {
                message: "Possible spelling mistake found.",
                short_message: "Spelling mistake",
                offset: 16,
                length: 4,
                replacements: [
                    Replacement {
                        value: "ball",
                    },
                    Replacement {
                        value: "bell",
                    },
                ],
                rule: Some(
                    GrammarRule {
                        id: "MORFOLOGIK_RULE_EN_GB",
                        description: "Possible spelling mistake",
                        issue_type: Some(
                            "misspelling",
                        ),
                    },
                ),
            },
        ]
        "###);
    }
}
