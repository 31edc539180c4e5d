use crate::domain::ast::CompilationUnit;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// Source parser port (implemented by Infrastructure)
///
/// An error means the text is not a well-formed compilation unit.
pub trait SourceParser: Send + Sync {
    fn parse(&self, source: &str) -> Result<CompilationUnit>;
}

/// Type solver port: knows whether a fully-qualified type exists
pub trait TypeSolver: Send + Sync {
    fn solve(&self, qualified_name: &str) -> Result<bool>;

    fn name(&self) -> &str;
}

/// Source code reader port
#[async_trait]
pub trait SourceReader: Send + Sync {
    async fn read(&self, path: &Path) -> std::io::Result<String>;
}
