use crate::adapters::fs::{SourceDiscovery, dir_name};
use crate::adapters::java::TreeSitterJavaParser;
use crate::adapters::solver::{CombinedTypeSolver, JdkTypeSolver, SourceRootTypeSolver};
use crate::app::runtime::{AnalyserConfig, AnalysisRuntime, join_ordered};
use crate::app::stream::DependencyStream;
use crate::domain::error::{AnalysisError, AnalysisResult};
use crate::domain::extractor::DependencyExtractor;
use crate::domain::ports::SourceParser;
use crate::domain::report::{ClassReport, PackageReport, ProjectReport};
use crate::domain::resolver::SymbolResolver;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Entry point of the analysis API.
///
/// Cheap to clone; clones share the parser, the runtime, and the JDK solver.
/// Every `project_dependencies` call builds its own resolver, so concurrent
/// project analyses never observe each other's source roots.
#[derive(Clone)]
pub struct DependencyAnalyser {
    inner: Arc<AnalyserInner>,
}

struct AnalyserInner {
    runtime: AnalysisRuntime,
    parser: Arc<dyn SourceParser>,
    discovery: SourceDiscovery,
    jdk: Arc<JdkTypeSolver>,
    config: AnalyserConfig,
}

/// Reports produced by [`DependencyAnalyser::chain`], one per granularity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisChain {
    pub class: ClassReport,
    pub package: PackageReport,
    pub project: ProjectReport,
}

impl DependencyAnalyser {
    pub fn new(runtime: AnalysisRuntime, config: AnalyserConfig) -> Self {
        Self::with_parser(runtime, config, Arc::new(TreeSitterJavaParser::new()))
    }

    pub fn with_parser(
        runtime: AnalysisRuntime,
        config: AnalyserConfig,
        parser: Arc<dyn SourceParser>,
    ) -> Self {
        Self {
            inner: Arc::new(AnalyserInner {
                runtime,
                parser,
                discovery: SourceDiscovery::new(config.extension.clone()),
                jdk: Arc::new(JdkTypeSolver::new()),
                config,
            }),
        }
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.inner.config
    }

    pub fn runtime(&self) -> &AnalysisRuntime {
        &self.inner.runtime
    }

    pub fn discovery(&self) -> &SourceDiscovery {
        &self.inner.discovery
    }

    /// Report for a single compilation unit, resolved against the JDK only.
    pub async fn class_dependencies(&self, path: impl AsRef<Path>) -> AnalysisResult<ClassReport> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AnalysisError::invalid_path(path));
        }
        self.analyse_class(path.to_path_buf(), self.jdk_resolver())
            .await
    }

    /// Report for the compilation units directly inside `dir`.
    pub async fn package_dependencies(
        &self,
        dir: impl AsRef<Path>,
    ) -> AnalysisResult<PackageReport> {
        self.analyse_package(dir.as_ref().to_path_buf(), self.jdk_resolver())
            .await
    }

    /// Report for every package directory under `root`, resolving names
    /// against the JDK and the project's own sources.
    pub async fn project_dependencies(
        &self,
        root: impl AsRef<Path>,
    ) -> AnalysisResult<ProjectReport> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(AnalysisError::invalid_path(root));
        }
        info!(root = %root.display(), "analysing project");

        let discovery = self.inner.discovery.clone();
        let index_root = root.clone();
        let (packages, source_index) = self
            .inner
            .runtime
            .spawn_blocking(move || -> AnalysisResult<_> {
                let packages = discovery.list_package_directories(&index_root)?;
                let index = SourceRootTypeSolver::index(&index_root, &discovery)?;
                Ok((packages, index))
            })
            .await??;

        let mut solver = CombinedTypeSolver::new();
        solver.add(self.inner.jdk.clone());
        solver.add(Arc::new(source_index));
        let resolver = SymbolResolver::new(Arc::new(solver));

        let mut set = JoinSet::new();
        for (index, dir) in packages.into_iter().enumerate() {
            let this = self.clone();
            let resolver = resolver.clone();
            self.inner.runtime.spawn_in(&mut set, async move {
                (index, this.analyse_package(dir, resolver).await)
            });
        }

        let mut report = ProjectReport::new(dir_name(&root));
        for package in join_ordered(set).await? {
            if !package.is_empty() {
                report.add_package_report(package);
            }
        }

        info!(
            project = report.project_name(),
            packages = report.package_reports().len(),
            dependencies = report.dependency_count(),
            "project analysed"
        );
        Ok(report)
    }

    /// Incremental per-file event stream over `root`. Nothing runs until
    /// the stream is subscribed.
    pub fn analyze_dependencies_stream(&self, root: impl AsRef<Path>) -> DependencyStream {
        DependencyStream::new(
            root.as_ref().to_path_buf(),
            self.inner.runtime.clone(),
            self.inner.discovery.clone(),
            &self.inner.config,
        )
    }

    /// Class, then package, then project, each started only after the
    /// previous one succeeded.
    pub async fn chain(
        &self,
        class_path: impl AsRef<Path>,
        package_dir: impl AsRef<Path>,
        project_root: impl AsRef<Path>,
    ) -> AnalysisResult<AnalysisChain> {
        let class = self.class_dependencies(class_path).await?;
        debug!(class = class.class_name(), "chain: class stage done");
        let package = self.package_dependencies(package_dir).await?;
        debug!(package = package.package_name(), "chain: package stage done");
        let project = self.project_dependencies(project_root).await?;
        Ok(AnalysisChain {
            class,
            package,
            project,
        })
    }

    fn jdk_resolver(&self) -> SymbolResolver {
        SymbolResolver::new(self.inner.jdk.clone())
    }

    async fn analyse_class(
        &self,
        path: PathBuf,
        resolver: SymbolResolver,
    ) -> AnalysisResult<ClassReport> {
        let source = self.inner.runtime.read_to_string(&path).await?;
        let unit = self.inner.parser.parse(&source).map_err(|err| {
            debug!(file = %path.display(), error = %err, "parse failed");
            AnalysisError::parse(&path)
        })?;

        let report = DependencyExtractor::new(&resolver).extract(&unit);
        debug!(
            file = %path.display(),
            class = report.class_name(),
            dependencies = report.len(),
            "class analysed"
        );
        Ok(report)
    }

    async fn analyse_package(
        &self,
        dir: PathBuf,
        resolver: SymbolResolver,
    ) -> AnalysisResult<PackageReport> {
        if !dir.is_dir() {
            return Err(AnalysisError::invalid_path(dir));
        }

        let discovery = self.inner.discovery.clone();
        let parser = self.inner.parser.clone();
        let listing_dir = dir.clone();
        let (units, package_name) = self
            .inner
            .runtime
            .spawn_blocking(move || -> AnalysisResult<_> {
                let units = discovery.list_direct_compilation_units(&listing_dir)?;
                let name = if units.is_empty() {
                    dir_name(&listing_dir)
                } else {
                    discovery.infer_package_name(&listing_dir, parser.as_ref())
                };
                Ok((units, name))
            })
            .await??;

        let mut report = PackageReport::new(package_name);
        if units.is_empty() {
            debug!(dir = %dir.display(), "no compilation units in directory");
            return Ok(report);
        }

        let mut set = JoinSet::new();
        for (index, unit) in units.into_iter().enumerate() {
            let this = self.clone();
            let resolver = resolver.clone();
            self.inner.runtime.spawn_in(&mut set, async move {
                (index, this.analyse_class(unit, resolver).await)
            });
        }

        for class in join_ordered(set).await? {
            if !class.is_empty() {
                report.add_class_report(class);
            }
        }

        debug!(
            dir = %dir.display(),
            package = report.package_name(),
            classes = report.class_reports().len(),
            "package analysed"
        );
        Ok(report)
    }
}
