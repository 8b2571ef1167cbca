/*!
 * Process Teardown
 * Closes every descriptor a terminating process still holds
 */

use super::context::ProcessContext;
use std::time::Instant;
use tracing::info;

/// What a teardown released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownStats {
    pub handles_closed: usize,
    pub duration_micros: u64,
}

/// Close all outstanding handles of a terminating process
///
/// Called once by the lifecycle owner; calling it again on an emptied
/// table closes nothing.
pub fn close_all_handles(ctx: &mut ProcessContext) -> TeardownStats {
    let start = Instant::now();
    let handles_closed = ctx.handles_mut().close_all();
    let stats = TeardownStats {
        handles_closed,
        duration_micros: start.elapsed().as_micros() as u64,
    };

    if handles_closed > 0 {
        info!(
            pid = ctx.pid(),
            handles_closed,
            duration_us = stats.duration_micros,
            "Closed handles of terminated process"
        );
    }
    stats
}
