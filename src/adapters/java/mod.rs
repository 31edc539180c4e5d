//! Java language adapters

mod parser;

pub use parser::TreeSitterJavaParser;

/// File extension of Java compilation units
pub const JAVA_EXTENSION: &str = "java";
