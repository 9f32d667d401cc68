//! CLI command handlers, one per file.

mod classify;
mod fetch;
mod slim;
mod split;
mod triage;

pub use classify::run_classify;
pub use fetch::{run_fetch, FetchArgs};
pub use slim::run_slim;
pub use split::run_split;
pub use triage::run_triage;

use ltriage_core::config::LtriageConfig;
use ltriage_core::segment::EofPolicy;

/// `--flush-last` forces flushing; otherwise the config decides.
fn eof_policy(cfg: &LtriageConfig, flush_last: bool) -> EofPolicy {
    if flush_last {
        EofPolicy::Flush
    } else {
        cfg.triage.eof_policy()
    }
}
