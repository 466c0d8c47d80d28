use chrono::{DateTime, Utc};

/// A post pulled from a monitored account's timeline, normalized from the
/// X API v2 tweet payload.
#[derive(Debug, Clone)]
pub struct Tweet {
    pub id: String,
    /// Handle of the account the tweet was fetched from.
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub like_count: u64,
    pub retweet_count: u64,
    pub reply_count: u64,
}

impl Tweet {
    /// Popularity proxy: likes + retweets + replies. Counters the API did
    /// not return are already zero at this point.
    pub fn engagement_score(&self) -> u64 {
        self.like_count + self.retweet_count + self.reply_count
    }

    /// Age in minutes relative to `now`. Negative for clock skew into the
    /// future; callers treat that as fresh.
    pub fn age_minutes(&self, now: DateTime<Utc>) -> f64 {
        (now - self.created_at).num_seconds() as f64 / 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tweet(created_at: DateTime<Utc>, likes: u64, retweets: u64, replies: u64) -> Tweet {
        Tweet {
            id: "1".to_string(),
            author: "Braves".to_string(),
            text: "test".to_string(),
            created_at,
            like_count: likes,
            retweet_count: retweets,
            reply_count: replies,
        }
    }

    #[test]
    fn test_engagement_score_sums_counters() {
        let now = Utc::now();
        assert_eq!(tweet(now, 100, 40, 10).engagement_score(), 150);
        assert_eq!(tweet(now, 0, 0, 0).engagement_score(), 0);
    }

    #[test]
    fn test_age_minutes() {
        let now = Utc::now();
        let t = tweet(now - Duration::minutes(5), 0, 0, 0);
        assert!((t.age_minutes(now) - 5.0).abs() < 0.01);

        let future = tweet(now + Duration::minutes(1), 0, 0, 0);
        assert!(future.age_minutes(now) < 0.0);
    }
}
