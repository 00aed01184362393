//! trackerhosts Rule Compiler
//!
//! This crate compiles BitTorrent tracker lists into DNS override rule files.

pub mod allowlist;
pub mod builder;
pub mod fetch;
pub mod parser;
pub mod pipeline;
pub mod writer;

pub use allowlist::{is_allowlisted, load_allowlist, AllowList};
pub use builder::{build_rules, render_rules};
pub use fetch::{Fetch, FetchError, SourceFailure};
pub use parser::{parse_tracker_list, ParseStats, ParsedTrackers};
pub use pipeline::{run, OutputKind, OutputSpec, PipelineConfig, PipelineError, RunSummary};
