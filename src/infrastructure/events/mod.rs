//! In-process typed pub/sub for auth, analysis and tracking events.
//!
//! Each [`Topic`] owns one tokio broadcast channel created up front. Delivery
//! is at-most-once: publishing with no live subscriber drops the event, and a
//! subscriber that falls more than the channel capacity behind loses the
//! oldest events.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::analysis::AnalysisState;
use crate::domain::profile::UserProfile;
use crate::domain::session::SessionUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    AuthState,
    AnalysisState,
    Tracking,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::AuthState, Topic::AnalysisState, Topic::Tracking];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::AuthState => "auth",
            Topic::AnalysisState => "analysis",
            Topic::Tracking => "tracking",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DomainEvent {
    #[serde(rename_all = "camelCase")]
    AuthStateChanged {
        user_id: Uuid,
        user: Option<SessionUser>,
        profile: Option<Box<UserProfile>>,
    },
    #[serde(rename_all = "camelCase")]
    AnalysisStateChanged { user_id: Uuid, state: AnalysisState },
    #[serde(rename_all = "camelCase")]
    EventTracked {
        user_id: Option<Uuid>,
        event: String,
        data: serde_json::Value,
    },
}

impl DomainEvent {
    pub fn topic(&self) -> Topic {
        match self {
            DomainEvent::AuthStateChanged { .. } => Topic::AuthState,
            DomainEvent::AnalysisStateChanged { .. } => Topic::AnalysisState,
            DomainEvent::EventTracked { .. } => Topic::Tracking,
        }
    }

    /// Account the event belongs to, if any
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            DomainEvent::AuthStateChanged { user_id, .. } => Some(*user_id),
            DomainEvent::AnalysisStateChanged { user_id, .. } => Some(*user_id),
            DomainEvent::EventTracked { user_id, .. } => *user_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::AuthStateChanged { .. } => "authStateChanged",
            DomainEvent::AnalysisStateChanged { .. } => "analysisStateChanged",
            DomainEvent::EventTracked { .. } => "eventTracked",
        }
    }
}

/// Cloneable handle to the per-topic broadcast channels
#[derive(Clone)]
pub struct EventBus {
    auth: broadcast::Sender<DomainEvent>,
    analysis: broadcast::Sender<DomainEvent>,
    tracking: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            auth: broadcast::channel(capacity).0,
            analysis: broadcast::channel(capacity).0,
            tracking: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<DomainEvent> {
        match topic {
            Topic::AuthState => &self.auth,
            Topic::AnalysisState => &self.analysis,
            Topic::Tracking => &self.tracking,
        }
    }

    /// Publish on the event's topic. Returns how many subscribers received it.
    pub fn publish(&self, event: DomainEvent) -> usize {
        let topic = event.topic();
        match self.sender(topic).send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::trace!(topic = topic.as_str(), "Event dropped, no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<DomainEvent> {
        self.sender(topic).subscribe()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
