//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use dependency_analyser::adapters::java::TreeSitterJavaParser;
use dependency_analyser::domain::ast::CompilationUnit;
use dependency_analyser::domain::ports::{SourceParser, SourceReader};

/// Reader serving canned contents, refusing selected paths, and falling
/// back to the filesystem for everything else. Optionally slow.
pub struct MockSourceReader {
    files: HashMap<PathBuf, String>,
    denied: HashSet<PathBuf>,
    delay: Duration,
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl MockSourceReader {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            denied: HashSet::new(),
            delay: Duration::ZERO,
            started: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
        }
    }

    /// Every read sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Reads that ran to completion (not cancelled mid-delay)
    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.files
            .insert(path.as_ref().to_path_buf(), content.into());
        self
    }

    pub fn deny(mut self, path: impl AsRef<Path>) -> Self {
        self.denied.insert(path.as_ref().to_path_buf());
        self
    }
}

impl Default for MockSourceReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceReader for MockSourceReader {
    async fn read(&self, path: &Path) -> io::Result<String> {
        self.started.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.finished.fetch_add(1, Ordering::SeqCst);

        if self.denied.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "access denied"));
        }
        match self.files.get(path) {
            Some(content) => Ok(content.clone()),
            None => tokio::fs::read_to_string(path).await,
        }
    }
}

/// Parser delegating to tree-sitter while counting invocations.
#[derive(Default)]
pub struct CountingParser {
    inner: TreeSitterJavaParser,
    calls: AtomicUsize,
}

impl CountingParser {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SourceParser for CountingParser {
    fn parse(&self, source: &str) -> Result<CompilationUnit> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.parse(source)
    }
}
