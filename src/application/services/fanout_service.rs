//! Realtime Fan-out Service
//!
//! Bridges resolution results to the realtime transport (an external
//! collaborator). The publisher is an explicit dependency handed in at
//! construction, never process-wide state, and audiences travel as open
//! lists so the transport can push the set down to its own delivery query.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::application::services::visibility_service::VisibilityService;
use crate::domain::entities::{Comment, Post};
use crate::domain::value_objects::OpenList;
use crate::shared::error::AppError;

/// An event to deliver to an audience of users.
#[derive(Debug, Clone, Serialize)]
pub struct RealtimeEvent {
    /// Event name, e.g. `post:new`
    pub event: &'static str,

    pub payload: serde_json::Value,
}

/// Realtime transport port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(
        &self,
        event: &RealtimeEvent,
        audience: &OpenList<Uuid>,
    ) -> Result<(), AppError>;
}

/// Computes audiences and hands events to the publisher.
pub struct AudienceFanout {
    publisher: Arc<dyn EventPublisher>,
    visibility: Arc<VisibilityService>,
}

impl AudienceFanout {
    pub fn new(publisher: Arc<dyn EventPublisher>, visibility: Arc<VisibilityService>) -> Self {
        Self {
            publisher,
            visibility,
        }
    }

    /// Announce a new or updated post to everybody who may see it.
    #[tracing::instrument(skip(self, post), fields(post_id = %post.id), level = "debug")]
    pub async fn post_updated(&self, post: &Post, event: &'static str) -> Result<(), AppError> {
        let audience = self
            .visibility
            .audience_of(post.author_id, &post.destination_feed_ids)
            .await?;

        if audience.is_empty() {
            return Ok(());
        }

        let event = RealtimeEvent {
            event,
            payload: serde_json::json!({ "postId": post.id }),
        };
        self.publisher.publish(&event, &audience).await
    }

    /// Announce a new comment to everybody who may see it.
    #[tracing::instrument(skip(self, comment), fields(comment_id = %comment.id), level = "debug")]
    pub async fn comment_created(&self, comment: &Comment) -> Result<(), AppError> {
        let audience = self
            .visibility
            .audience_of_comment(comment.post_id, comment.author_id)
            .await?;

        if audience.is_empty() {
            return Ok(());
        }

        let event = RealtimeEvent {
            event: "comment:new",
            payload: serde_json::json!({
                "commentId": comment.id,
                "postId": comment.post_id,
            }),
        };
        self.publisher.publish(&event, &audience).await
    }
}
