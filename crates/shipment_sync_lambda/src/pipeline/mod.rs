//! Ping, page, enrich, code: the four steps behind one function invocation.

pub mod enricher;
pub mod orchestrator;
pub mod pager;

pub use enricher::lookup;
pub use orchestrator::{run, PipelineError, RunOptions};
pub use pager::fetch_all;
