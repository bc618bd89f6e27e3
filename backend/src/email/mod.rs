//! Email job queue
//!
//! Registration emails are not sent inline: the request path only pushes
//! a JSON job onto a Redis list that an out-of-process worker drains.
//! The enqueue is fire-and-forget; a failed push is logged and the
//! request succeeds anyway.
//!
//! The queue handle is created once at startup and injected through
//! AppState. When Redis is unavailable the handle degrades to a no-op
//! so the API can still run.

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A queued email job, serialized as JSON onto the Redis list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmailJob {
    Welcome { email: String, username: String },
}

/// Handle to the Redis-backed email queue
#[derive(Clone)]
pub struct EmailQueue {
    conn: Option<ConnectionManager>,
    queue: String,
}

impl EmailQueue {
    /// Connect to the queue broker, degrading to a no-op handle on failure
    pub async fn connect(url: &str, queue: &str) -> Self {
        info!("Connecting to email queue broker...");

        let conn = match redis::Client::open(url) {
            Ok(client) => match ConnectionManager::new(client).await {
                Ok(conn) => {
                    info!(queue = %queue, "Email queue connection established");
                    Some(conn)
                }
                Err(e) => {
                    warn!(
                        "Failed to connect to email queue broker: {}. \
                         Registration emails will be skipped.",
                        e
                    );
                    None
                }
            },
            Err(e) => {
                warn!(
                    "Invalid email queue broker URL: {}. \
                     Registration emails will be skipped.",
                    e
                );
                None
            }
        };

        Self {
            conn,
            queue: queue.to_string(),
        }
    }

    /// A handle that drops every job, for tests and degraded startup
    pub fn disabled() -> Self {
        Self {
            conn: None,
            queue: String::new(),
        }
    }

    /// Enqueue a welcome email for a newly registered user
    ///
    /// Never fails the caller: enqueue errors are logged and dropped.
    pub async fn enqueue_welcome(&self, email: &str, username: &str) {
        self.enqueue(EmailJob::Welcome {
            email: email.to_string(),
            username: username.to_string(),
        })
        .await;
    }

    async fn enqueue(&self, job: EmailJob) {
        let Some(conn) = &self.conn else {
            warn!("Email queue disabled, dropping job: {:?}", job);
            return;
        };

        let payload = match serde_json::to_string(&job) {
            Ok(p) => p,
            Err(e) => {
                warn!("Failed to serialize email job: {}", e);
                return;
            }
        };

        let mut conn = conn.clone();
        if let Err(e) = conn.lpush::<_, _, ()>(&self.queue, payload).await {
            warn!("Failed to enqueue email job: {}", e);
        }
    }
}
