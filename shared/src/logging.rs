//! Shared logging utilities for consistent tracing across all crates

use crate::types::Component;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{Event, Subscriber, error, info};
use tracing_subscriber::layer::Context;

/// Remote trace sink configuration
#[derive(Debug, Clone)]
pub struct TracingEndpoint {
    pub url: String,
    pub batch_size: usize,
    pub flush_interval: Duration,
}

impl TracingEndpoint {
    pub fn new(url: String) -> Self {
        Self {
            url,
            batch_size: 20,
            flush_interval: Duration::from_millis(500),
        }
    }
}

/// Structured trace event shipped to the remote sink
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TraceEvent {
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub target: String,
    pub message: String,
    pub component: String,
    pub fields: HashMap<String, serde_json::Value>,
}

/// Tracing layer that batches component-tagged events to an HTTP endpoint
pub struct HttpTracingLayer {
    sender: mpsc::UnboundedSender<TraceEvent>,
}

impl HttpTracingLayer {
    /// Must be called from within a tokio runtime
    pub fn new(endpoint: TracingEndpoint) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<TraceEvent>();

        let TracingEndpoint { url, batch_size, flush_interval } = endpoint;

        tokio::spawn(async move {
            let client = reqwest::Client::new();
            let mut buffer = Vec::with_capacity(batch_size);
            let mut flush_timer = tokio::time::interval(flush_interval);

            loop {
                tokio::select! {
                    event = rx.recv() => {
                        match event {
                            Some(event) => {
                                buffer.push(event);
                                if buffer.len() >= batch_size {
                                    Self::send_batch(&client, &url, &mut buffer).await;
                                }
                            }
                            None => {
                                if !buffer.is_empty() {
                                    Self::send_batch(&client, &url, &mut buffer).await;
                                }
                                break;
                            }
                        }
                    }
                    _ = flush_timer.tick() => {
                        if !buffer.is_empty() {
                            Self::send_batch(&client, &url, &mut buffer).await;
                        }
                    }
                }
            }
        });

        HttpTracingLayer { sender: tx }
    }

    async fn send_batch(client: &reqwest::Client, url: &str, buffer: &mut Vec<TraceEvent>) {
        let batch = std::mem::take(buffer);

        // Logging through tracing here would feed the layer its own output.
        match client.post(url).json(&batch).send().await {
            Ok(response) if !response.status().is_success() => {
                eprintln!("trace sink rejected batch of {}: HTTP {}", batch.len(), response.status());
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("trace sink unreachable: {e}");
            }
        }
    }
}

impl<S> tracing_subscriber::Layer<S> for HttpTracingLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut fields = HashMap::new();
        let mut message = String::new();

        let mut visitor = TraceVisitor {
            message: &mut message,
            fields: &mut fields,
        };
        event.record(&mut visitor);

        // Only events emitted through the component_* macros are shipped
        let Some(component) = fields.remove("component") else {
            return;
        };

        let trace_event = TraceEvent {
            timestamp: Utc::now(),
            level: metadata.level().to_string(),
            target: metadata.target().to_string(),
            message,
            component: component.as_str().unwrap_or_default().to_string(),
            fields,
        };

        let _ = self.sender.send(trace_event);
    }
}

/// Visitor to extract event fields and message
struct TraceVisitor<'a> {
    message: &'a mut String,
    fields: &'a mut HashMap<String, serde_json::Value>,
}

impl<'a> tracing::field::Visit for TraceVisitor<'a> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message.push_str(&format!("{value:?}"));
        } else {
            self.fields.insert(
                field.name().to_string(),
                serde_json::Value::String(format!("{value:?}")),
            );
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.fields
                .insert(field.name().to_string(), serde_json::Value::String(value.to_string()));
        }
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields.insert(field.name().to_string(), serde_json::Value::Bool(value));
    }
}

/// Default filter directive for the service crates at the given level
pub fn filter_directive(level: &str) -> String {
    format!(
        "webserver={level},orchestrator={level},agents={level},shared={level},tower_http=info,axum=info,reqwest=warn"
    )
}

/// Build the subscriber stack: env filter, optional HTTP shipper, compact stdout.
///
/// Must be called inside a tokio runtime when `endpoint` is set.
pub fn build_subscriber(endpoint: Option<TracingEndpoint>, directive: &str) -> impl Subscriber + Send + Sync + 'static {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(endpoint.map(HttpTracingLayer::new))
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
}

/// Initialize tracing with an optional remote endpoint and log level.
///
/// `RUST_LOG` takes precedence over the computed directive when set.
pub fn init_tracing_with_endpoint_and_level(endpoint: Option<TracingEndpoint>, log_level: Option<&str>) {
    use tracing_subscriber::util::SubscriberInitExt;

    let directive = filter_directive(log_level.unwrap_or("info"));
    let url = endpoint.as_ref().map(|endpoint| endpoint.url.clone());

    build_subscriber(endpoint, &directive).init();

    if let Some(url) = url {
        info!(endpoint = %url, filter = %directive, "📡 Tracing endpoint configured");
    }
}

/// Initialize stdout tracing at the default level
pub fn init_tracing() {
    init_tracing_with_endpoint_and_level(None, None);
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Component-aware info logging
#[macro_export]
macro_rules! component_info {
    ($component:expr, $($arg:tt)*) => {
        tracing::info!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Component-aware warning logging
#[macro_export]
macro_rules! component_warn {
    ($component:expr, $($arg:tt)*) => {
        tracing::warn!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Component-aware error logging
#[macro_export]
macro_rules! component_error {
    ($component:expr, $($arg:tt)*) => {
        tracing::error!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Component-aware debug logging
#[macro_export]
macro_rules! component_debug {
    ($component:expr, $($arg:tt)*) => {
        tracing::debug!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(component: Component, details: &str) {
    info!(
        component = %component,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(component: Component, reason: &str) {
    info!(
        component = %component,
        timestamp = format_timestamp(),
        "🛑 Shutting down: {}",
        reason
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(component: Component, context: &str, error: &dyn std::fmt::Display) {
    error!(
        component = %component,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(component: Component, message: &str) {
    info!(
        component = %component,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_display() {
        assert_eq!(Component::Api.to_string(), "api");
        assert_eq!(Component::Orchestrator.to_string(), "orchestrator");
        assert_eq!(Component::Agents.to_string(), "agents");
    }

    #[test]
    fn test_filter_directive_covers_every_crate() {
        let directive = filter_directive("debug");
        for target in ["webserver=debug", "orchestrator=debug", "agents=debug", "shared=debug"] {
            assert!(directive.contains(target), "missing {target} in {directive}");
        }
    }

    #[test]
    fn test_timestamp_format() {
        let stamp = format_timestamp();
        // HH:MM:SS.mmm
        assert_eq!(stamp.len(), 12);
        assert_eq!(&stamp[2..3], ":");
        assert_eq!(&stamp[8..9], ".");
    }

    #[tokio::test]
    async fn test_subscriber_with_trace_endpoint_accepts_events() {
        // Arrange
        let mut endpoint = TracingEndpoint::new("http://127.0.0.1:9/traces".to_string());
        endpoint.flush_interval = Duration::from_millis(10);
        let subscriber = build_subscriber(Some(endpoint), &filter_directive("debug"));

        // Act / Assert
        tracing::subscriber::with_default(subscriber, || {
            crate::component_info!(Component::Api, session_id = "abc", "shipped event");
            crate::component_debug!(Component::Orchestrator, "second event");
        });
    }

    #[test]
    fn test_subscriber_without_endpoint_needs_no_runtime() {
        let subscriber = build_subscriber(None, &filter_directive("info"));

        tracing::subscriber::with_default(subscriber, || {
            crate::component_warn!(Component::Agents, "stdout only");
        });
    }
}
