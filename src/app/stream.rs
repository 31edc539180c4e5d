//! Incremental per-file event stream.
//!
//! A lightweight path next to the full extractor: each compilation unit is
//! read and line-scanned for its package and imports, and one event per file
//! is pushed to the subscriber in walk order. The stream ends after the last
//! event, or after a single `Err` item when the walk or a read fails.

use crate::adapters::fs::{SourceDiscovery, scan_class_name, scan_imports};
use crate::app::runtime::{AnalyserConfig, AnalysisRuntime};
use crate::domain::error::{AnalysisError, AnalysisResult};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

/// One analysed compilation unit: its class name and verbatim imports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassEvent {
    pub class_name: String,
    pub imports: Vec<String>,
}

impl ClassEvent {
    /// Class name followed by each import.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.class_name.as_str()).chain(self.imports.iter().map(String::as_str))
    }
}

impl fmt::Display for ClassEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        f.write_str(&fields.join(", "))
    }
}

/// Cold event source: every [`subscribe`](Self::subscribe) call walks the
/// tree afresh on the runtime's worker pool.
#[derive(Clone)]
pub struct DependencyStream {
    root: PathBuf,
    runtime: AnalysisRuntime,
    discovery: SourceDiscovery,
    throttle: Duration,
    buffer: usize,
}

impl DependencyStream {
    pub fn new(
        root: PathBuf,
        runtime: AnalysisRuntime,
        discovery: SourceDiscovery,
        config: &AnalyserConfig,
    ) -> Self {
        Self {
            root,
            runtime,
            discovery,
            throttle: config.stream_throttle,
            buffer: config.stream_buffer.max(1),
        }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Start the walk and return the receiving end. Dropping the returned
    /// stream stops the producer at its next send.
    ///
    /// A producer that panics ends the stream with an
    /// [`AnalysisError::Runtime`] item rather than a bare close.
    pub fn subscribe(&self) -> ReceiverStream<AnalysisResult<ClassEvent>> {
        let (tx, rx) = mpsc::channel(self.buffer);
        let supervisor = tx.clone();
        let producer = self.clone();
        let handle = self.runtime.spawn(async move { producer.produce(tx).await });

        let root = self.root.clone();
        self.runtime.spawn(async move {
            if let Err(err) = handle.await {
                warn!(root = %root.display(), error = %err, "stream producer failed");
                let _ = supervisor.send(Err(AnalysisError::from(err))).await;
            }
        });
        ReceiverStream::new(rx)
    }

    async fn produce(self, tx: mpsc::Sender<AnalysisResult<ClassEvent>>) {
        info!(root = %self.root.display(), "streaming dependencies");

        let discovery = self.discovery.clone();
        let root = self.root.clone();
        let listing = self
            .runtime
            .spawn_blocking(move || discovery.list_compilation_units(&root))
            .await;
        let units = match listing.and_then(|units| units) {
            Ok(units) if units.is_empty() => {
                let _ = tx
                    .send(Err(AnalysisError::NoSources {
                        path: self.root.clone(),
                    }))
                    .await;
                return;
            }
            Ok(units) => units,
            Err(err) => {
                let _ = tx.send(Err(err)).await;
                return;
            }
        };

        let total = units.len();
        for unit in units {
            let source = match self.runtime.read_to_string(&unit).await {
                Ok(source) => source,
                Err(err) => {
                    let _ = tx.send(Err(err)).await;
                    return;
                }
            };

            let event = ClassEvent {
                class_name: scan_class_name(&unit, &source),
                imports: scan_imports(&source),
            };
            debug!(file = %unit.display(), class = event.class_name.as_str(), "stream event");
            if tx.send(Ok(event)).await.is_err() {
                debug!(root = %self.root.display(), "stream subscriber went away");
                return;
            }

            if !self.throttle.is_zero() {
                tokio::time::sleep(self.throttle).await;
            }
        }

        info!(root = %self.root.display(), files = total, "stream complete");
    }
}
