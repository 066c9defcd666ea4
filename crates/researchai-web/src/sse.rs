//! Server-Sent Events (SSE) streaming for real-time UI updates.
//! One stream carries app events plus both chat transcripts.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_core::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::state::{AppEvent, ChatChannel, SharedState};

/// SSE endpoint: clients subscribe here for real-time updates.
pub async fn sse_handler(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let dashboard = BroadcastStream::new(state.dashboard_chat.subscribe())
        .map(|r| r.map(|e| AppEvent::from_conversation(ChatChannel::Dashboard, e)));
    let paper = BroadcastStream::new(state.paper_chat.subscribe())
        .map(|r| r.map(|e| AppEvent::from_conversation(ChatChannel::Paper, e)));

    let stream = BroadcastStream::new(state.subscribe())
        .merge(dashboard)
        .merge(paper)
        .filter_map(|result| {
            // Lagged receivers skip what they missed.
            result.ok().and_then(|event| {
                serde_json::to_string(&event).ok().map(|data| {
                    Ok(Event::default().data(data))
                })
            })
        });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}
