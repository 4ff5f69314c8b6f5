//! CLI command implementations.

pub mod catalog;
pub mod governance;
pub mod shell;
