use crate::domain::SearchResultSet;

pub const DEFAULT_MAX_CANDIDATES: usize = 10;

/// Providers mark cut-off snippets with this; such snippets are unusable as spoken answers.
pub const TRUNCATION_MARKER: &str = "...";

/// Flattens a provider result set into ranked answer candidates.
///
/// A direct answer-box answer wins outright, then an answer-box snippet.
/// Only when neither is present are organic snippets considered, skipping
/// truncated ones and keeping at most `max_candidates` in provider order.
/// Text is passed through verbatim.
pub fn extract_snippets(result_set: &SearchResultSet, max_candidates: usize) -> Vec<String> {
    if let Some(answer_box) = &result_set.answer_box {
        if let Some(answer) = non_empty(answer_box.answer.as_deref()) {
            return vec![answer.to_string()];
        }
        if let Some(snippet) = non_empty(answer_box.snippet.as_deref()) {
            return vec![snippet.to_string()];
        }
    }

    result_set
        .organic
        .iter()
        .filter_map(|result| result.snippet.as_deref())
        .filter(|snippet| !snippet.contains(TRUNCATION_MARKER))
        .take(max_candidates)
        .map(str::to_string)
        .collect()
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}
