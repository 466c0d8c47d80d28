pub mod api;


pub use api::{
    CreateTweetResponse, PublicMetrics, TimelineResponse, TweetData, UserData, UsersResponse,
    XApiClient,
};

use async_trait::async_trait;
use dugout_core::{CoreError, Tweet};

/// An account handle resolved to its numeric API identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUser {
    pub handle: String,
    pub id: String,
}

/// The slice of the posting API the reply engine depends on. Implemented
/// by [`XApiClient`] against the real service and by in-memory fakes in
/// the engine's tests.
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Resolve handles to user ids. Handles the API does not know are
    /// simply absent from the result.
    async fn lookup_users(&self, usernames: &[String]) -> Result<Vec<ResolvedUser>, CoreError>;

    /// Up to `max_results` most recent tweets of one account, annotated
    /// with the handle they were fetched for.
    async fn recent_tweets(
        &self,
        user_id: &str,
        handle: &str,
        max_results: u32,
    ) -> Result<Vec<Tweet>, CoreError>;

    /// Publish `text`, optionally as a reply, returning the new tweet id.
    async fn create_tweet(
        &self,
        text: &str,
        in_reply_to: Option<&str>,
    ) -> Result<String, CoreError>;
}
