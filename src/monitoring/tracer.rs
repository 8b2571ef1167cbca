/*!
 * Operation Tracing
 * Structured tracing for legacy file operations using the tracing crate
 *
 * Features:
 * - JSON-formatted logs for structured parsing
 * - One span per file operation, tagged with the calling process
 * - Slow operation warnings
 */

use crate::core::limits::SLOW_OPERATION_MICROS;
use crate::core::types::Pid;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info, span, warn, Level, Span};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const TRACE_JSON_ENV: &str = "LEGACY_FILES_TRACE_JSON";

static NEXT_OPERATION_ID: AtomicU64 = AtomicU64::new(1);

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - LEGACY_FILES_TRACE_JSON: Enable JSON output (default: false)
///
/// Does nothing if a global subscriber is already installed.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        let installed = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok();
        if installed {
            info!("Structured tracing initialized with JSON output");
        }
    } else {
        let installed = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .is_ok();
        if installed {
            info!("Structured tracing initialized");
        }
    }
}

/// Span covering one file operation
///
/// Logs completion on drop and warns when the operation was slow.
pub struct OperationSpan {
    span: Span,
    start: Instant,
    operation: &'static str,
    id: u64,
}

impl OperationSpan {
    pub fn new(operation: &'static str, pid: Pid) -> Self {
        let id = NEXT_OPERATION_ID.fetch_add(1, Ordering::Relaxed);
        let span = span!(
            Level::DEBUG,
            "file_op",
            op_id = id,
            operation,
            pid,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            operation,
            id,
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Record whether the operation succeeded
    pub fn record_result<T, E: std::fmt::Display>(&self, result: &Result<T, E>) {
        match result {
            Ok(_) => {
                self.span.record("result", "success");
            }
            Err(err) => {
                self.span.record("result", "error");
                self.span.record("error", tracing::field::display(err));
            }
        }
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for OperationSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();

        if duration.as_micros() > SLOW_OPERATION_MICROS {
            warn!(
                op_id = self.id,
                operation = self.operation,
                duration_us = duration.as_micros() as u64,
                slow = true,
                "slow file operation"
            );
        } else {
            debug!(
                op_id = self.id,
                operation = self.operation,
                duration_us = duration.as_micros() as u64,
                "file operation completed"
            );
        }
    }
}

/// Open a span for `operation` on behalf of process `pid`
#[inline]
pub fn span_operation(operation: &'static str, pid: Pid) -> OperationSpan {
    OperationSpan::new(operation, pid)
}
