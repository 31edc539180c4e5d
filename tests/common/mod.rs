//! Shared test utilities for integration tests.
//! Not a test binary of its own; included by the test files via `mod common;`.
#![allow(dead_code)]

pub mod fixtures;
pub mod mock;

use dependency_analyser::{AnalyserConfig, AnalysisRuntime, DependencyAnalyser};

/// Analyser on the current test runtime, reading from the real filesystem.
pub fn analyser() -> DependencyAnalyser {
    DependencyAnalyser::new(
        AnalysisRuntime::current().expect("inside a tokio runtime"),
        AnalyserConfig::default(),
    )
}
