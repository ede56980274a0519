//! Result persistence and aggregation
//!
//! Two independent sinks: an append-only JSONL log written as results
//! complete (crash-safe, drives resume), and a final JSON snapshot of the
//! whole run written atomically at the end.

mod jsonl;
mod snapshot;
pub mod summary;

pub use jsonl::{load_resume_set, IncrementalLog};
pub use snapshot::write_snapshot;
pub use summary::{print_summary, summarize};
