use serde::Deserialize;

/// Result set returned by a web search provider.
///
/// Mirrors the provider's `{answerBox?: {...}, organic?: [...]}` shape; any
/// missing key deserializes as absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultSet {
    #[serde(default)]
    pub answer_box: Option<AnswerBox>,
    #[serde(default)]
    pub organic: Vec<OrganicResult>,
}

/// The provider's curated direct answer, ranked above organic results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnswerBox {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl SearchResultSet {
    pub fn is_empty(&self) -> bool {
        self.answer_box.is_none() && self.organic.is_empty()
    }
}

impl OrganicResult {
    pub fn with_snippet(snippet: impl Into<String>) -> Self {
        Self {
            snippet: Some(snippet.into()),
            ..Self::default()
        }
    }
}
