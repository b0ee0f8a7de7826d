//! Read-only GitHub CLI: list repositories you can push to, browse a
//! repository's file tree, and fetch decoded file contents.
//!
//! Results are printed as pretty JSON on stdout; failures are rendered as
//! `{"error": ...}` objects on stderr.

pub mod cli;
pub mod error;
pub mod github;
