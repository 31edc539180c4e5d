use serde::{Deserialize, Serialize};
use std::fmt;

/// Dependency kind - the syntactic role a target type plays in the source unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DependencyKind {
    // ============ Declarations ============
    Import,

    // ============ Type Hierarchy ============
    Extends,
    Implements,

    // ============ Expressions ============
    Instantiation,

    // ============ Members ============
    Field,
    MethodParameter,
    MethodReturn,
}

impl DependencyKind {
    pub const ALL: [DependencyKind; 7] = [
        DependencyKind::Import,
        DependencyKind::Extends,
        DependencyKind::Implements,
        DependencyKind::Instantiation,
        DependencyKind::Field,
        DependencyKind::MethodParameter,
        DependencyKind::MethodReturn,
    ];

    /// Label used in the text rendering of reports
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Import => "IMPORT",
            DependencyKind::Extends => "EXTENDS",
            DependencyKind::Implements => "IMPLEMENTS",
            DependencyKind::Instantiation => "INSTANTIATION",
            DependencyKind::Field => "FIELD",
            DependencyKind::MethodParameter => "METHOD_PARAMETER",
            DependencyKind::MethodReturn => "METHOD_RETURN",
        }
    }

    /// Prefix of the code snippet recorded for this kind (`extends Foo`, `new Foo`, ...)
    pub fn snippet_prefix(&self) -> &'static str {
        match self {
            DependencyKind::Import => "import",
            DependencyKind::Extends => "extends",
            DependencyKind::Implements => "implements",
            DependencyKind::Instantiation => "new",
            DependencyKind::Field => "field",
            DependencyKind::MethodParameter => "parameter",
            DependencyKind::MethodReturn => "return type",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed edge from one compilation unit to a type it depends on.
///
/// Equality and hashing cover all five fields, so two edges that differ only
/// in their line or snippet are distinct entries of a [`ClassReport`].
///
/// [`ClassReport`]: crate::domain::report::ClassReport
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub source_type: String,
    pub target_type: String,
    pub kind: DependencyKind,
    pub snippet: String,
    /// 1-based source line, 0 when unknown
    pub line: u32,
}

impl Dependency {
    pub fn new(
        source_type: impl Into<String>,
        target_type: impl Into<String>,
        kind: DependencyKind,
        snippet: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            source_type: source_type.into(),
            target_type: target_type.into(),
            kind,
            snippet: snippet.into(),
            line,
        }
    }

    pub fn has_line(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({}", self.source_type, self.target_type, self.kind)?;
        if self.has_line() && !self.snippet.is_empty() {
            write!(f, ": {} at line: {}", self.snippet, self.line)?;
        }
        f.write_str(")")
    }
}
