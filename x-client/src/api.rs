use crate::{ResolvedUser, SocialApi};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dugout_core::{CoreError, Tweet, XApiError};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

const X_API_BASE: &str = "https://api.twitter.com/2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub data: Vec<UserData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineResponse {
    #[serde(default)]
    pub data: Vec<TweetData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetData {
    pub id: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub public_metrics: PublicMetrics,
}

/// Engagement counters. Counters missing from the payload count as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub quote_count: u64,
}

#[derive(Debug, Serialize)]
struct CreateTweetRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<ReplySettings<'a>>,
}

#[derive(Debug, Serialize)]
struct ReplySettings<'a> {
    in_reply_to_tweet_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTweetResponse {
    pub data: CreatedTweet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTweet {
    pub id: String,
    pub text: String,
}

impl TweetData {
    /// Normalize an API tweet into the domain type. Tweets without a
    /// `created_at` cannot be aged and are dropped.
    pub fn into_tweet(self, author: &str) -> Option<Tweet> {
        let created_at = self.created_at?;
        Some(Tweet {
            id: self.id,
            author: author.to_string(),
            text: self.text,
            created_at,
            like_count: self.public_metrics.like_count,
            retweet_count: self.public_metrics.retweet_count,
            reply_count: self.public_metrics.reply_count,
        })
    }
}

#[derive(Debug)]
pub struct XApiClient {
    http_client: Client,
    access_token: String,
}

impl XApiClient {
    pub fn new(access_token: String) -> Result<Self, CoreError> {
        let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http_client,
            access_token,
        })
    }

    /// Send a prepared request with bearer auth and map non-2xx statuses
    /// onto the error taxonomy. No retries; a failed call fails the
    /// operation it belongs to.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<Response, CoreError> {
        debug!("X API request: {}", endpoint);
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                error!("Network error for {}: {}", endpoint, e);
                if e.is_timeout() {
                    CoreError::XApi(XApiError::RequestTimeout)
                } else {
                    CoreError::Network(e)
                }
            })?;

        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {} {}", status, endpoint);
            return Ok(response);
        }

        error!("Request failed with status {} for {}", status, endpoint);
        match status.as_u16() {
            401 => Err(CoreError::XApi(XApiError::InvalidToken)),
            403 => Err(CoreError::XApi(XApiError::Forbidden {
                resource: endpoint.to_string(),
            })),
            429 => Err(CoreError::XApi(XApiError::RateLimitExceeded {
                endpoint: endpoint.to_string(),
            })),
            code if status.is_server_error() => {
                Err(CoreError::XApi(XApiError::ServerError { status_code: code }))
            }
            _ => Err(CoreError::XApi(XApiError::InvalidResponse {
                details: format!("Unexpected status {} for {}", status, endpoint),
            })),
        }
    }

    pub async fn lookup_users_raw(&self, usernames: &[String]) -> Result<UsersResponse, CoreError> {
        let endpoint = "/users/by";
        let url = format!("{}{}", X_API_BASE, endpoint);
        let request = self
            .http_client
            .get(&url)
            .query(&[("usernames", usernames.join(","))]);

        let response = self.execute(request, endpoint).await?;
        let users: UsersResponse = response.json().await.map_err(|e| {
            error!("Failed to parse user lookup: {}", e);
            CoreError::XApi(XApiError::InvalidResponse {
                details: "Failed to parse user lookup response".to_string(),
            })
        })?;

        debug!("Resolved {} of {} handles", users.data.len(), usernames.len());
        Ok(users)
    }

    pub async fn recent_tweets_raw(
        &self,
        user_id: &str,
        max_results: u32,
    ) -> Result<TimelineResponse, CoreError> {
        let endpoint = format!("/users/{}/tweets", user_id);
        let url = format!("{}{}", X_API_BASE, endpoint);
        let max_results = max_results.to_string();
        let request = self.http_client.get(&url).query(&[
            ("max_results", max_results.as_str()),
            ("tweet.fields", "public_metrics,created_at"),
        ]);

        let response = self.execute(request, &endpoint).await?;
        let timeline: TimelineResponse = response.json().await.map_err(|e| {
            error!("Failed to parse timeline: {}", e);
            CoreError::XApi(XApiError::InvalidResponse {
                details: format!("Failed to parse timeline for user {}", user_id),
            })
        })?;

        Ok(timeline)
    }
}

#[async_trait]
impl SocialApi for XApiClient {
    async fn lookup_users(&self, usernames: &[String]) -> Result<Vec<ResolvedUser>, CoreError> {
        let users = self.lookup_users_raw(usernames).await?;
        Ok(users
            .data
            .into_iter()
            .map(|u| ResolvedUser {
                handle: u.username,
                id: u.id,
            })
            .collect())
    }

    async fn recent_tweets(
        &self,
        user_id: &str,
        handle: &str,
        max_results: u32,
    ) -> Result<Vec<Tweet>, CoreError> {
        let timeline = self.recent_tweets_raw(user_id, max_results).await?;
        let tweets: Vec<Tweet> = timeline
            .data
            .into_iter()
            .filter_map(|t| t.into_tweet(handle))
            .collect();

        info!("Retrieved {} recent tweets from @{}", tweets.len(), handle);
        Ok(tweets)
    }

    async fn create_tweet(
        &self,
        text: &str,
        in_reply_to: Option<&str>,
    ) -> Result<String, CoreError> {
        let endpoint = "/tweets";
        let url = format!("{}{}", X_API_BASE, endpoint);
        let payload = CreateTweetRequest {
            text,
            reply: in_reply_to.map(|id| ReplySettings {
                in_reply_to_tweet_id: id,
            }),
        };

        let request = self.http_client.post(&url).json(&payload);
        let response = self.execute(request, endpoint).await?;
        let created: CreateTweetResponse = response.json().await.map_err(|e| {
            error!("Failed to parse create tweet response: {}", e);
            CoreError::XApi(XApiError::InvalidResponse {
                details: "Failed to parse create tweet response".to_string(),
            })
        })?;

        info!("Created tweet {}", created.data.id);
        Ok(created.data.id)
    }
}
