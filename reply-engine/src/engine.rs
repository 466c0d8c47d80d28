//! One run of the reply workflow: fetch timelines, pick at most one
//! target, generate a reply in the house voice, and post it.

use crate::selector::{build_candidates, rank, select};
use crate::state::{PersistOutcome, ReplyState};
use chrono::Utc;
use dugout_core::{BotConfig, CoreError, Tweet};
use llm_client::{style, voice, TextGenerator};
use tracing::{debug, info, warn};
use x_client::SocialApi;

/// What a single invocation did. "No candidate" is an informational
/// outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Replied {
        target_id: String,
        author: String,
        reply_text: String,
        /// Id of the posted reply; `None` on a dry run.
        reply_id: Option<String>,
    },
    NoCandidate,
}

pub struct ReplyEngine<'a, S, G> {
    config: &'a BotConfig,
    social: &'a S,
    generator: &'a G,
}

impl<'a, S: SocialApi, G: TextGenerator> ReplyEngine<'a, S, G> {
    pub fn new(config: &'a BotConfig, social: &'a S, generator: &'a G) -> Self {
        Self {
            config,
            social,
            generator,
        }
    }

    /// Evaluate all monitored accounts and act on at most one candidate.
    ///
    /// The chosen id is marked handled and persisted *before* the remote
    /// reply call, in the live path and the dry-run path alike: a crash
    /// between mark and post can cost one reply, never produce two
    /// replies to the same post.
    pub async fn run_once(&self, state: &mut ReplyState) -> Result<RunOutcome, CoreError> {
        let users = self.social.lookup_users(&self.config.targets).await?;
        if users.is_empty() {
            warn!("None of the configured handles resolved to a user");
            return Ok(RunOutcome::NoCandidate);
        }

        let now = Utc::now();
        let mut tweets: Vec<Tweet> = Vec::new();
        for user in &users {
            match self
                .social
                .recent_tweets(&user.id, &user.handle, self.config.max_tweets_per_user)
                .await
            {
                Ok(mut batch) => tweets.append(&mut batch),
                // One failed account contributes zero candidates but
                // never aborts the others.
                Err(e) => warn!("Skipping @{}: {}", user.handle, e),
            }
        }

        let mut candidates = build_candidates(now, &tweets, self.config.fresh_window_min);
        rank(&mut candidates);
        debug!(
            "{} of {} tweets inside the {}-minute window",
            candidates.len(),
            tweets.len(),
            self.config.fresh_window_min
        );

        let Some(candidate) = select(&candidates, self.config.score_threshold, state) else {
            info!("No suitable high-traffic tweet found this run");
            return Ok(RunOutcome::NoCandidate);
        };

        let raw = self
            .generator
            .complete(voice::reply_request(&candidate.author, &candidate.text))
            .await?;
        let reply_text = style::enforce_house_style(&raw);

        state.mark_handled(&candidate.id);
        match state.save() {
            PersistOutcome::Failed(reason) => {
                warn!("Could not persist reply state: {}", reason);
            }
            outcome => debug!("Reply state save: {:?}", outcome),
        }

        if self.config.dry_run {
            info!(
                "[dry-run] Would reply to @{} (id={}, score={}, age={:.1}m): {}",
                candidate.author, candidate.id, candidate.score, candidate.age_minutes, reply_text
            );
            return Ok(RunOutcome::Replied {
                target_id: candidate.id.clone(),
                author: candidate.author.clone(),
                reply_text,
                reply_id: None,
            });
        }

        let reply_id = self
            .social
            .create_tweet(&reply_text, Some(&candidate.id))
            .await?;
        info!(
            "Replied to @{} id={} score={} age={:.1}m -> {}",
            candidate.author, candidate.id, candidate.score, candidate.age_minutes, reply_id
        );

        Ok(RunOutcome::Replied {
            target_id: candidate.id.clone(),
            author: candidate.author.clone(),
            reply_text,
            reply_id: Some(reply_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use dugout_core::XApiError;
    use llm_client::CompletionRequest;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use x_client::ResolvedUser;

    struct FakeSocial {
        timelines: Vec<(ResolvedUser, Result<Vec<Tweet>, XApiError>)>,
        posted: Mutex<Vec<(String, Option<String>)>>,
    }

    impl FakeSocial {
        fn new(timelines: Vec<(ResolvedUser, Result<Vec<Tweet>, XApiError>)>) -> Self {
            Self {
                timelines,
                posted: Mutex::new(Vec::new()),
            }
        }

        fn posted(&self) -> Vec<(String, Option<String>)> {
            self.posted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SocialApi for FakeSocial {
        async fn lookup_users(
            &self,
            _usernames: &[String],
        ) -> Result<Vec<ResolvedUser>, CoreError> {
            Ok(self.timelines.iter().map(|(u, _)| u.clone()).collect())
        }

        async fn recent_tweets(
            &self,
            user_id: &str,
            _handle: &str,
            _max_results: u32,
        ) -> Result<Vec<Tweet>, CoreError> {
            for (user, timeline) in &self.timelines {
                if user.id == user_id {
                    return timeline.clone().map_err(CoreError::XApi);
                }
            }
            Ok(Vec::new())
        }

        async fn create_tweet(
            &self,
            text: &str,
            in_reply_to: Option<&str>,
        ) -> Result<String, CoreError> {
            self.posted
                .lock()
                .unwrap()
                .push((text.to_string(), in_reply_to.map(|s| s.to_string())));
            Ok("9999".to_string())
        }
    }

    struct FakeGenerator;

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, CoreError> {
            Ok("Deadpan one-liner.".to_string())
        }
    }

    fn user(handle: &str, id: &str) -> ResolvedUser {
        ResolvedUser {
            handle: handle.to_string(),
            id: id.to_string(),
        }
    }

    fn tweet(id: &str, author: &str, age_min: i64, likes: u64) -> Tweet {
        Tweet {
            id: id.to_string(),
            author: author.to_string(),
            text: format!("tweet {id}"),
            created_at: Utc::now() - Duration::minutes(age_min),
            like_count: likes,
            retweet_count: 0,
            reply_count: 0,
        }
    }

    fn test_config(dry_run: bool, state_file: PathBuf) -> BotConfig {
        BotConfig {
            x_access_token: "token".to_string(),
            openrouter_api_key: "key".to_string(),
            llm_model: "openrouter/auto".to_string(),
            targets: vec!["Braves".to_string(), "MLB".to_string()],
            max_tweets_per_user: 5,
            fresh_window_min: 20,
            score_threshold: 300,
            jitter_max_secs: 0,
            post_jitter_max_secs: 0,
            state_file,
            dry_run,
        }
    }

    fn temp_state(tag: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "test_dugout_engine_{}_{}.json",
            tag,
            std::process::id()
        ));
        std::fs::remove_file(&path).ok();
        path
    }

    #[tokio::test]
    async fn test_replies_to_single_best_candidate() {
        let social = FakeSocial::new(vec![(
            user("Braves", "1"),
            Ok(vec![
                tweet("hot", "Braves", 2, 900),
                tweet("warm", "Braves", 5, 400),
            ]),
        )]);
        let path = temp_state("best");
        let config = test_config(false, path.clone());
        let mut state = ReplyState::load(&path);

        let engine = ReplyEngine::new(&config, &social, &FakeGenerator);
        let outcome = engine.run_once(&mut state).await.unwrap();

        // One reply only, to the highest-scoring fresh tweet, with the
        // trailing period stripped by house style.
        assert_eq!(
            outcome,
            RunOutcome::Replied {
                target_id: "hot".to_string(),
                author: "Braves".to_string(),
                reply_text: "Deadpan one-liner".to_string(),
                reply_id: Some("9999".to_string()),
            }
        );
        assert_eq!(
            social.posted(),
            vec![("Deadpan one-liner".to_string(), Some("hot".to_string()))]
        );

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_state_marked_before_posting() {
        let social = FakeSocial::new(vec![(
            user("Braves", "1"),
            Ok(vec![tweet("only", "Braves", 2, 900)]),
        )]);
        let path = temp_state("mark_first");
        let config = test_config(false, path.clone());
        let mut state = ReplyState::load(&path);

        let engine = ReplyEngine::new(&config, &social, &FakeGenerator);
        engine.run_once(&mut state).await.unwrap();

        // The persisted file already contains the id regardless of the
        // post outcome.
        let reloaded = ReplyState::load(&path);
        assert!(reloaded.contains("only"));

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_dry_run_marks_but_does_not_post() {
        let social = FakeSocial::new(vec![(
            user("Braves", "1"),
            Ok(vec![tweet("dry", "Braves", 2, 900)]),
        )]);
        let path = temp_state("dry");
        let config = test_config(true, path.clone());
        let mut state = ReplyState::load(&path);

        let engine = ReplyEngine::new(&config, &social, &FakeGenerator);
        let outcome = engine.run_once(&mut state).await.unwrap();

        assert!(matches!(
            outcome,
            RunOutcome::Replied { reply_id: None, .. }
        ));
        assert!(social.posted().is_empty());
        assert!(ReplyState::load(&path).contains("dry"));

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_failed_account_does_not_abort_others() {
        let social = FakeSocial::new(vec![
            (
                user("MLB", "1"),
                Err(XApiError::ServerError { status_code: 503 }),
            ),
            (
                user("Braves", "2"),
                Ok(vec![tweet("survivor", "Braves", 2, 900)]),
            ),
        ]);
        let path = temp_state("isolation");
        let config = test_config(true, path.clone());
        let mut state = ReplyState::load(&path);

        let engine = ReplyEngine::new(&config, &social, &FakeGenerator);
        let outcome = engine.run_once(&mut state).await.unwrap();

        assert!(matches!(
            outcome,
            RunOutcome::Replied { ref target_id, .. } if target_id == "survivor"
        ));

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_no_candidate_on_second_run() {
        let social = FakeSocial::new(vec![(
            user("Braves", "1"),
            Ok(vec![tweet("once", "Braves", 2, 900)]),
        )]);
        let path = temp_state("second_run");
        let config = test_config(true, path.clone());

        {
            let mut state = ReplyState::load(&path);
            let engine = ReplyEngine::new(&config, &social, &FakeGenerator);
            let first = engine.run_once(&mut state).await.unwrap();
            assert!(matches!(first, RunOutcome::Replied { .. }));
        }

        // A fresh process replaying the same timeline finds nothing new.
        let mut state = ReplyState::load(&path);
        let engine = ReplyEngine::new(&config, &social, &FakeGenerator);
        let second = engine.run_once(&mut state).await.unwrap();
        assert_eq!(second, RunOutcome::NoCandidate);

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_stale_and_quiet_tweets_are_ignored() {
        let social = FakeSocial::new(vec![(
            user("Braves", "1"),
            Ok(vec![
                tweet("stale", "Braves", 25, 900),
                tweet("quiet", "Braves", 2, 50),
            ]),
        )]);
        let path = temp_state("filters");
        let config = test_config(true, path.clone());
        let mut state = ReplyState::load(&path);

        let engine = ReplyEngine::new(&config, &social, &FakeGenerator);
        let outcome = engine.run_once(&mut state).await.unwrap();
        assert_eq!(outcome, RunOutcome::NoCandidate);
        assert!(state.is_empty());

        std::fs::remove_file(&path).ok();
    }
}
