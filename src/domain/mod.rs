pub mod ast;
pub mod dependency;
pub mod error;
pub mod exclusion;
pub mod extractor;
pub mod ports;
pub mod report;
pub mod resolver;
