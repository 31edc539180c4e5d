//! Type solvers backing the symbol resolver
//!
//! A solver only answers whether a fully-qualified type exists. The JDK
//! solver knows the platform, the source-root solver knows one project, and
//! the combined solver asks each in turn.

mod jdk;
mod source_root;

pub use jdk::JdkTypeSolver;
pub use source_root::SourceRootTypeSolver;

use crate::domain::ports::TypeSolver;
use anyhow::Result;
use std::sync::Arc;

/// Chain of solvers; a type is known when any member knows it
#[derive(Clone, Default)]
pub struct CombinedTypeSolver {
    solvers: Vec<Arc<dyn TypeSolver>>,
}

impl CombinedTypeSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, solver: impl TypeSolver + 'static) -> Self {
        self.add(Arc::new(solver));
        self
    }

    pub fn add(&mut self, solver: Arc<dyn TypeSolver>) {
        self.solvers.push(solver);
    }

    pub fn len(&self) -> usize {
        self.solvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }
}

impl TypeSolver for CombinedTypeSolver {
    /// A failing member does not hide an answer from the others; its error
    /// is returned only when nobody knows the type.
    fn solve(&self, qualified_name: &str) -> Result<bool> {
        let mut first_error = None;
        for solver in &self.solvers {
            match solver.solve(qualified_name) {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(err) => {
                    first_error.get_or_insert(err.context(format!("{} solver", solver.name())));
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "combined"
    }
}
