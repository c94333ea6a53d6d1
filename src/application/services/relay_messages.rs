use serde::Deserialize;

/// User-visible texts. Every outcome, failures included, reaches the client
/// only through one of these strings in the `answer` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayMessages {
    pub placeholder: String,
    pub missing_question: String,
    pub not_found: String,
    pub upstream_failure: String,
    pub empty_answer: String,
    pub storage_failure: String,
}

impl Default for RelayMessages {
    fn default() -> Self {
        Self {
            placeholder: "processing, please wait...".to_string(),
            missing_question: "missing question".to_string(),
            not_found: "record not found or expired".to_string(),
            upstream_failure: "service temporarily unavailable, please try again later"
                .to_string(),
            empty_answer: "sorry, I cannot answer this question.".to_string(),
            storage_failure: "service temporarily unavailable, please try again later"
                .to_string(),
        }
    }
}
