//! Concurrency substrate for the coordinator: a tokio worker pool plus
//! asynchronous file reads through the [`SourceReader`] port.

use crate::adapters::fs::FileSourceReader;
use crate::adapters::java::JAVA_EXTENSION;
use crate::domain::error::{AnalysisError, AnalysisResult};
use crate::domain::ports::SourceReader;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::{JoinHandle, JoinSet};

/// Runtime knobs for an analyser instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyserConfig {
    /// Compilation-unit file extension, without the dot
    pub extension: String,
    /// Worker pool size of an owned runtime; `None` lets tokio decide
    pub worker_threads: Option<usize>,
    /// Delay inserted after each incremental stream event
    pub stream_throttle: Duration,
    /// Events buffered between the stream producer and its subscriber
    pub stream_buffer: usize,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            extension: JAVA_EXTENSION.to_string(),
            worker_threads: None,
            stream_throttle: Duration::ZERO,
            stream_buffer: 16,
        }
    }
}

impl AnalyserConfig {
    pub fn with_stream_throttle(mut self, throttle: Duration) -> Self {
        self.stream_throttle = throttle;
        self
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads.max(1));
        self
    }
}

/// Build a multi-threaded runtime sized by `config`.
pub fn build_runtime(config: &AnalyserConfig) -> AnalysisResult<Runtime> {
    let mut builder = Builder::new_multi_thread();
    builder.enable_all().thread_name("depanalyser-worker");
    if let Some(threads) = config.worker_threads {
        builder.worker_threads(threads.max(1));
    }
    builder
        .build()
        .map_err(|e| AnalysisError::Runtime(format!("failed to start worker pool: {e}")))
}

/// Handle onto a worker pool plus the reader used for source files.
///
/// Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct AnalysisRuntime {
    handle: Handle,
    reader: Arc<dyn SourceReader>,
}

impl AnalysisRuntime {
    pub fn new(handle: Handle, reader: Arc<dyn SourceReader>) -> Self {
        Self { handle, reader }
    }

    /// Runtime of the calling async context, reading from the filesystem.
    pub fn current() -> AnalysisResult<Self> {
        let handle = Handle::try_current()
            .map_err(|e| AnalysisError::Runtime(format!("no async runtime available: {e}")))?;
        Ok(Self::new(handle, Arc::new(FileSourceReader::new())))
    }

    pub fn for_runtime(runtime: &Runtime) -> Self {
        Self::new(runtime.handle().clone(), Arc::new(FileSourceReader::new()))
    }

    pub fn with_reader(mut self, reader: Arc<dyn SourceReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub async fn read_to_string(&self, path: &Path) -> AnalysisResult<String> {
        self.reader
            .read(path)
            .await
            .map_err(|e| AnalysisError::io(path, e))
    }

    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(future)
    }

    /// Spawn onto the pool as a member of `set`, so dropping the set aborts it.
    pub fn spawn_in<T, F>(&self, set: &mut JoinSet<T>, future: F)
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        set.spawn_on(future, &self.handle);
    }

    pub async fn spawn_blocking<F, R>(&self, f: F) -> AnalysisResult<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        Ok(self.handle.spawn_blocking(f).await?)
    }

    /// Drive `future` to completion from synchronous code.
    ///
    /// Must not be called from inside an async context.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.handle.block_on(future)
    }
}

/// Await every task of `set` in completion order, returning outputs in
/// spawn-index order. The first error wins; remaining tasks are aborted
/// when the set is dropped.
pub async fn join_ordered<T>(
    mut set: JoinSet<(usize, AnalysisResult<T>)>,
) -> AnalysisResult<Vec<T>>
where
    T: Send + 'static,
{
    let mut slots: Vec<Option<T>> = Vec::with_capacity(set.len());
    slots.resize_with(set.len(), || None);

    while let Some(joined) = set.join_next().await {
        let (index, result) = joined?;
        let value = result?;
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(value);
        }
    }

    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Canned;

    #[async_trait]
    impl SourceReader for Canned {
        async fn read(&self, path: &Path) -> std::io::Result<String> {
            if path.ends_with("ok.java") {
                Ok("class Ok {}".to_string())
            } else {
                Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = AnalyserConfig::default();
        assert_eq!(config.extension, "java");
        assert_eq!(config.stream_throttle, Duration::ZERO);
        assert_eq!(config.stream_buffer, 16);
        assert_eq!(config.with_worker_threads(0).worker_threads, Some(1));
    }

    #[test]
    fn test_owned_runtime_block_on() {
        let rt = build_runtime(&AnalyserConfig::default().with_worker_threads(2)).unwrap();
        let runtime = AnalysisRuntime::for_runtime(&rt);
        let value = runtime.block_on(async { runtime.spawn(async { 21 * 2 }).await.unwrap() });
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_read_errors_carry_path() {
        let runtime = AnalysisRuntime::current().unwrap().with_reader(Arc::new(Canned));
        assert_eq!(
            runtime.read_to_string(Path::new("/src/ok.java")).await.unwrap(),
            "class Ok {}"
        );

        let err = runtime
            .read_to_string(Path::new("/src/locked.java"))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Io { ref path, .. } if path.ends_with("locked.java")));
    }

    #[tokio::test]
    async fn test_join_ordered_keeps_spawn_order() {
        let runtime = AnalysisRuntime::current().unwrap();
        let mut set = JoinSet::new();
        for (index, delay) in [30u64, 0, 10].into_iter().enumerate() {
            runtime.spawn_in(&mut set, async move {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                (index, Ok(index))
            });
        }
        assert_eq!(join_ordered(set).await.unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_join_ordered_first_failure_wins() {
        let runtime = AnalysisRuntime::current().unwrap();
        let mut set: JoinSet<(usize, AnalysisResult<usize>)> = JoinSet::new();
        runtime.spawn_in(&mut set, async { (0, Ok(0)) });
        runtime.spawn_in(&mut set, async {
            (1, Err(AnalysisError::Parse { file: "Bad.java".into() }))
        });
        let err = join_ordered(set).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse Bad.java");
    }
}
