//! Integration tests for matryoshka
//!
//! These tests write deps directories to disk and drive them through the
//! same entry points the CLI uses, running real shell commands.

pub mod apply;
pub mod list;
pub mod print;
