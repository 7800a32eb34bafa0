use voxanswer::application::services::{RankingError, rank_answers, score_candidates};

#[test]
fn given_query_about_final_when_ranking_then_returns_overlapping_candidate() {
    let candidates = ["The final was won by Team X", "Weather forecast for tomorrow"];

    let best = rank_answers("who won the final", &candidates).unwrap();

    assert_eq!(best, "The final was won by Team X");
}

#[test]
fn given_empty_candidates_when_ranking_then_returns_empty_candidates_error() {
    let candidates: Vec<String> = vec![];

    let result = rank_answers("anything", &candidates);

    assert_eq!(result, Err(RankingError::EmptyCandidates));
}

#[test]
fn given_single_candidate_when_ranking_then_returns_it_regardless_of_query() {
    let candidates = vec!["Completely unrelated".to_string()];

    assert_eq!(
        rank_answers("quantum chromodynamics", &candidates).unwrap(),
        "Completely unrelated"
    );
    assert_eq!(rank_answers("", &candidates).unwrap(), "Completely unrelated");
}

#[test]
fn given_candidates_containing_query_when_ranking_then_returns_exact_match() {
    let query = "stock market closes higher";
    let candidates = [
        "The stock exchange opened this morning",
        "Markets and weather today",
        query,
        "Stock prices fell sharply as the market closes",
    ];

    assert_eq!(rank_answers(query, &candidates).unwrap(), query);
}

#[test]
fn given_query_matching_last_candidate_when_ranking_then_order_does_not_bias_result() {
    let candidates = [
        "Recipes for dinner tonight",
        "Traffic report downtown",
        "Hanoi weather forecast rain tomorrow",
    ];

    assert_eq!(
        rank_answers("weather forecast in Hanoi", &candidates).unwrap(),
        "Hanoi weather forecast rain tomorrow"
    );
}

#[test]
fn given_equally_similar_candidates_when_ranking_then_first_in_order_wins() {
    let candidates = ["Apple banana", "apple BANANA", "cherry"];

    assert_eq!(
        rank_answers("apple banana", &candidates).unwrap(),
        "Apple banana"
    );
}

#[test]
fn given_empty_query_when_ranking_then_first_candidate_is_returned() {
    let candidates = ["first option", "second option"];

    assert_eq!(rank_answers("", &candidates).unwrap(), "first option");
}

#[test]
fn given_query_that_is_truncation_marker_when_ranking_then_does_not_fail() {
    let candidates = ["first option", "second option"];

    assert_eq!(rank_answers("...", &candidates).unwrap(), "first option");
}

#[test]
fn given_case_and_punctuation_differences_when_ranking_then_terms_still_match() {
    let candidates = ["Nothing relevant here", "WHO WON? The FINAL!"];

    assert_eq!(
        rank_answers("who won the final", &candidates).unwrap(),
        "WHO WON? The FINAL!"
    );
}

#[test]
fn given_vietnamese_text_when_ranking_then_unicode_words_are_matched() {
    let candidates = [
        "Dự báo thời tiết Hà Nội ngày mai có mưa",
        "Kết quả bóng đá đêm qua",
    ];

    assert_eq!(
        rank_answers("thời tiết Hà Nội", &candidates).unwrap(),
        "Dự báo thời tiết Hà Nội ngày mai có mưa"
    );
}

#[test]
fn given_decomposed_unicode_query_when_ranking_then_matches_composed_candidate() {
    // "thời tiết" written with combining diacritics
    let decomposed = "tho\u{031b}\u{0300}i tie\u{0302}\u{0301}t";
    let candidates = ["bóng đá hôm nay", "thời tiết hôm nay"];

    assert_eq!(
        rank_answers(decomposed, &candidates).unwrap(),
        "thời tiết hôm nay"
    );
}

#[test]
fn given_single_character_tokens_when_scoring_then_they_are_ignored() {
    let scores = score_candidates("a b c", &["a b c", "x y z"]);

    assert_eq!(scores, vec![0.0, 0.0]);
}

#[test]
fn given_identical_text_when_scoring_then_similarity_is_one() {
    let scores = score_candidates("election results today", &["election results today"]);

    assert_eq!(scores.len(), 1);
    assert!((scores[0] - 1.0).abs() < 1e-9);
}

#[test]
fn given_candidates_when_scoring_then_scores_are_within_unit_interval_and_ordered() {
    let candidates = [
        "football final results",
        "the final score of the football match",
        "cooking pasta at home",
    ];

    let scores = score_candidates("football final", &candidates);

    assert_eq!(scores.len(), 3);
    assert!(scores.iter().all(|s| (0.0..=1.0 + 1e-9).contains(s)));
    assert!(scores[0] > scores[1]);
    assert!(scores[1] > scores[2]);
    assert_eq!(scores[2], 0.0);
}

#[test]
fn given_rare_shared_term_when_scoring_then_it_outweighs_common_term() {
    // "news" appears everywhere, "volcano" only in the second candidate.
    let candidates = [
        "news news today",
        "volcano news",
        "news of the day",
    ];

    let scores = score_candidates("volcano news", &candidates);

    assert!(scores[1] > scores[0]);
    assert!(scores[1] > scores[2]);
}
