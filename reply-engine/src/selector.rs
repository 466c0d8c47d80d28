//! Candidate selection: freshness filter, engagement scoring, ranking,
//! and deduplication against the persisted reply state.

use crate::state::ReplyState;
use chrono::{DateTime, Utc};
use dugout_core::Tweet;

/// A tweet that survived the freshness filter, annotated with its
/// originating account, engagement score, and age at evaluation time.
/// Built fresh each run and discarded at process exit.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: String,
    pub author: String,
    pub text: String,
    pub score: u64,
    pub age_minutes: f64,
}

/// Turn raw timeline tweets into candidates, dropping anything older
/// than the freshness window. Ages are computed against the injected
/// clock so the filter is deterministic under test.
pub fn build_candidates(
    now: DateTime<Utc>,
    tweets: &[Tweet],
    fresh_window_min: i64,
) -> Vec<Candidate> {
    tweets
        .iter()
        .filter_map(|tweet| {
            let age_minutes = tweet.age_minutes(now);
            if age_minutes > fresh_window_min as f64 {
                return None;
            }
            Some(Candidate {
                id: tweet.id.clone(),
                author: tweet.author.clone(),
                text: tweet.text.clone(),
                score: tweet.engagement_score(),
                age_minutes,
            })
        })
        .collect()
}

/// Order candidates by descending score; ties go to the fresher post.
/// `total_cmp` on age keeps the order strict and deterministic.
pub fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.age_minutes.total_cmp(&b.age_minutes))
    });
}

/// Walk ranked candidates and pick the first that clears the engagement
/// threshold and has not been handled in a previous run. Returns at most
/// one candidate; `None` means "no action", which is not an error.
pub fn select<'a>(
    ranked: &'a [Candidate],
    score_threshold: u64,
    state: &ReplyState,
) -> Option<&'a Candidate> {
    ranked
        .iter()
        .find(|candidate| candidate.score >= score_threshold && !state.contains(&candidate.id))
}
