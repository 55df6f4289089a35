//! Unit tests for the callmap-graph crate.

mod support;
