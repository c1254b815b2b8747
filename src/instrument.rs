//! The facade boundary: every public facade call runs through [`observe`]
//! (or [`observe_sync`]), which times the call, emits metrics, and logs a
//! failure exactly once before handing the unchanged result back.
//!
//! Metrics emitted per call:
//!
//! - `provider_request.duration_seconds` (histogram; `facade`, `operation`)
//! - `provider_request.total` (counter; `facade`, `operation`, `status`)

use crate::error::Result;
use std::future::Future;
use std::time::Instant;

/// Identifies one facade operation in logs and metrics.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Boundary {
    pub facade: &'static str,
    pub operation: &'static str,
    /// Human-readable tag logged with failures, e.g. `"OpenAI API error"`.
    pub tag: &'static str,
}

impl Boundary {
    pub(crate) const fn new(facade: &'static str, operation: &'static str, tag: &'static str) -> Self {
        Self {
            facade,
            operation,
            tag,
        }
    }
}

/// Await `fut` at the facade boundary.
pub(crate) async fn observe<T, Fut>(boundary: Boundary, fut: Fut) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let res = fut.await;
    finish(boundary, start, &res);
    res
}

/// Synchronous counterpart of [`observe`] for local, non-suspending work.
pub(crate) fn observe_sync<T, F>(boundary: Boundary, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let start = Instant::now();
    let res = f();
    finish(boundary, start, &res);
    res
}

fn finish<T>(boundary: Boundary, start: Instant, res: &Result<T>) {
    let status = if res.is_ok() { "success" } else { "failure" };

    metrics::histogram!(
        "provider_request.duration_seconds",
        "facade" => boundary.facade,
        "operation" => boundary.operation
    )
    .record(start.elapsed().as_secs_f64());

    metrics::counter!(
        "provider_request.total",
        "facade" => boundary.facade,
        "operation" => boundary.operation,
        "status" => status
    )
    .increment(1);

    if let Err(e) = res {
        tracing::error!(
            facade = boundary.facade,
            operation = boundary.operation,
            error = %e,
            "{}",
            boundary.tag
        );
    }
}
