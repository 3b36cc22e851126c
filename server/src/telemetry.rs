//! Tracing setup and per-request telemetry.
//!
//! # Design
//! The two log channels are ordinary `tracing` targets. The fmt layer sits
//! behind a per-layer filter that asks the shared `LogRegistry` on every
//! record, so a level change made through `/logs/level` applies to the next
//! record without rebuilding the subscriber. The filter never lets tracing
//! cache a callsite as always/never enabled; a record that was dropped at
//! `INFO` is emitted once the channel is lowered to `DEBUG`, and the reverse.
//! Targets that are not channels (startup messages, dependencies) are shown
//! at `INFO` and above.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use todo_core::{Channel, LogLevel, LogRegistry};
use tracing::{debug, info, info_span, Instrument, Level, Subscriber};
use tracing_subscriber::{filter, fmt, fmt::MakeWriter, prelude::*, registry::LookupSpan, Layer};

use crate::AppState;

pub const TODO_LOGGER: &str = Channel::Todo.name();
pub const REQUEST_LOGGER: &str = Channel::Request.name();

/// Install the global subscriber, gated by `logs`, writing to stdout.
pub fn init(logs: Arc<LogRegistry>) {
    tracing_subscriber::registry()
        .with(channel_layer(logs, std::io::stdout))
        .init();
}

/// A fmt layer writing to `writer` that only lets through what `logs`
/// currently allows.
pub fn channel_layer<S, W>(logs: Arc<LogRegistry>, writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let gate = filter::dynamic_filter_fn::<S, _>(move |meta, _cx| {
        meta.is_span() || allows(&logs, meta.target(), *meta.level())
    });
    fmt::layer().with_writer(writer).with_filter(gate)
}

/// Whether a record at `level` on `target` passes the current thresholds.
pub fn allows(logs: &LogRegistry, target: &str, level: Level) -> bool {
    match LogRegistry::channel_for_target(target) {
        Some(channel) => severity(level).is_some_and(|s| logs.is_enabled(channel, s)),
        None => matches!(level, Level::ERROR | Level::WARN | Level::INFO),
    }
}

/// `WARN` is gated like `INFO`; `TRACE` sits below every threshold.
fn severity(level: Level) -> Option<LogLevel> {
    match level {
        Level::ERROR => Some(LogLevel::Error),
        Level::WARN | Level::INFO => Some(LogLevel::Info),
        Level::DEBUG => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Number each request and announce it on the request channel before the
/// handler runs. The handler runs inside a `request` span; its duration is
/// reported once it returns.
pub async fn track_request(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let number = state.requests.fetch_add(1, Ordering::Relaxed);
    let span = info_span!("request", request_number = number);

    span.in_scope(|| {
        info!(
            target: REQUEST_LOGGER,
            "Incoming request | #{number} | resource: {} | HTTP Verb {}",
            request.uri().path(),
            request.method()
        );
    });
    let response = next.run(request).instrument(span.clone()).await;
    span.in_scope(|| {
        debug!(
            target: REQUEST_LOGGER,
            "request #{number} duration: {} ms",
            start.elapsed().as_millis()
        );
    });
    response
}
