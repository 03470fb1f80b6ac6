use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt, StreamMap};

use crate::domain::session::SessionContext;
use crate::error::{AppError, AppResult};
use crate::infrastructure::events::{DomainEvent, EventBus, Topic};

#[derive(Debug, Deserialize)]
pub struct TrackEventRequest {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct TrackEventResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    /// Comma-separated topic names; all topics when absent
    pub topics: Option<String>,
}

pub struct EventsController {
    events: EventBus,
}

impl EventsController {
    pub fn new(events: EventBus) -> Self {
        Self { events }
    }

    /// POST /api/events/track
    pub async fn track(
        State(controller): State<Arc<EventsController>>,
        Extension(session): Extension<SessionContext>,
        Json(request): Json<TrackEventRequest>,
    ) -> AppResult<Json<TrackEventResponse>> {
        let event = request.event.trim();
        if event.is_empty() {
            return Err(AppError::BadRequest("event is required".to_string()));
        }

        let user_id = session.user().map(|user| user.uid);
        tracing::info!(event = %event, user_id = ?user_id, data = %request.data, "Event tracked");

        controller.events.publish(DomainEvent::EventTracked {
            user_id,
            event: event.to_string(),
            data: request.data,
        });

        Ok(Json(TrackEventResponse { success: true }))
    }

    /// GET /api/events/stream - Server-sent events for the caller's account
    pub async fn stream(
        State(controller): State<Arc<EventsController>>,
        Extension(session): Extension<SessionContext>,
        Query(query): Query<StreamQuery>,
    ) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
        let user_id = session.require_user()?.uid;
        let topics = Self::parse_topics(query.topics.as_deref())?;

        let mut streams = StreamMap::new();
        for topic in topics {
            streams.insert(topic.as_str(), BroadcastStream::new(controller.events.subscribe(topic)));
        }

        tracing::debug!(user_id = %user_id, topics = streams.len(), "Event stream opened");

        let stream = streams.filter_map(move |(_, received)| match received {
            Ok(event) if event.user_id() == Some(user_id) => serde_json::to_string(&event)
                .ok()
                .map(|data| Ok(Event::default().event(event.name()).data(data))),
            Ok(_) => None,
            Err(BroadcastStreamRecvError::Lagged(_)) => {
                Some(Ok(Event::default().event("lagged").data("{}")))
            }
        });

        Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
    }

    fn parse_topics(raw: Option<&str>) -> AppResult<Vec<Topic>> {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Ok(Topic::ALL.to_vec());
        };

        raw.split(',')
            .map(|name| {
                Topic::parse(name)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown topic: {}", name.trim())))
            })
            .collect()
    }
}
