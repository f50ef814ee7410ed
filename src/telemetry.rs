//! Tracing setup and per-request correlation ids.
//!
//! Subscriber installation happens once at startup; the output format and
//! default filter come from [`AppConfig`]. Request handlers run inside a
//! task-local [`TraceContext`] so the id a client sees in an error response
//! can be matched against the service logs.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::task_local;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::Layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::AppConfig;

/// Correlation metadata for one in-flight request.
#[derive(Debug, Clone)]
pub struct TraceContext {
    pub trace_id: String,
}

task_local! {
    static ACTIVE_TRACE_CONTEXT: TraceContext;
}

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryInitError {
    #[error("failed to install log bridge: {0}")]
    LogBridge(#[from] log::SetLoggerError),
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] TryInitError),
}

static TELEMETRY_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Installs the global tracing subscriber and the `log` crate bridge.
///
/// Safe to call more than once; only the first call does anything. `RUST_LOG`
/// overrides the configured level, and `log_format` selects json (the
/// default) or pretty output.
pub fn init_tracing(config: &AppConfig) -> Result<(), TelemetryInitError> {
    if TELEMETRY_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Ok(());
    }

    // The sqlx logging in db.rs goes through `log`; bridge it first so those
    // records land in the same pipeline. A pre-existing logger (set by a test
    // harness) is tolerated.
    if LogTracer::builder()
        .with_max_level(log::LevelFilter::Trace)
        .init()
        .is_err()
    {
        eprintln!("log bridge already installed, `log::` records may bypass tracing");
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let fmt_layer = match config.log_format.as_str() {
        "pretty" => fmt::layer().pretty().boxed(),
        _ => fmt::layer().json().boxed(),
    };

    if let Err(err) = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
    {
        // Another subscriber won the race; leave it in place.
        TELEMETRY_INITIALIZED.store(false, Ordering::SeqCst);
        eprintln!("tracing subscriber already set ({}), keeping the existing one", err);
    }

    Ok(())
}

/// Runs `future` with `context` as the task-local trace context.
pub async fn with_trace_context<Fut, R>(context: TraceContext, future: Fut) -> R
where
    Fut: std::future::Future<Output = R>,
{
    ACTIVE_TRACE_CONTEXT.scope(context, future).await
}

/// The trace id of the surrounding request, when called inside one.
pub fn current_trace_id() -> Option<String> {
    ACTIVE_TRACE_CONTEXT
        .try_with(|ctx| ctx.trace_id.clone())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trace_id_is_scoped_to_the_wrapped_future() {
        assert_eq!(current_trace_id(), None);

        let context = TraceContext {
            trace_id: "req-deadbeef".to_string(),
        };
        let seen = with_trace_context(context, async { current_trace_id() }).await;
        assert_eq!(seen.as_deref(), Some("req-deadbeef"));

        assert_eq!(current_trace_id(), None);
    }

    #[tokio::test]
    async fn contexts_do_not_leak_across_tasks() {
        let context = TraceContext {
            trace_id: "req-1".to_string(),
        };
        with_trace_context(context, async {
            let other = tokio::spawn(async { current_trace_id() }).await.unwrap();
            assert_eq!(other, None);
            assert_eq!(current_trace_id().as_deref(), Some("req-1"));
        })
        .await;
    }
}
