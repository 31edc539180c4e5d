//! dependency-analyser library: typed dependency reports for Java source trees
//! at class, package and project granularity, plus an incremental event stream.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod graph;
pub mod server;

pub use app::coordinator::{AnalysisChain, DependencyAnalyser};
pub use app::runtime::{AnalyserConfig, AnalysisRuntime};
pub use app::stream::{ClassEvent, DependencyStream};
pub use domain::dependency::{Dependency, DependencyKind};
pub use domain::error::{AnalysisError, AnalysisResult, ErrorKind};
pub use domain::report::{ClassReport, PackageReport, ProjectReport};
