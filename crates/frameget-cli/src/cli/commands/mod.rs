//! CLI command handlers, one per file.

mod completions;
mod fetch;
mod plan;
mod urls;

pub use completions::run_completions;
pub use fetch::run_fetch;
pub use plan::run_plan;
pub use urls::run_urls;
