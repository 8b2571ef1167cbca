/*!
 * Process Contexts
 * Per-process file state and its teardown
 */

mod context;
mod teardown;

pub use context::ProcessContext;
pub use teardown::{close_all_handles, TeardownStats};
