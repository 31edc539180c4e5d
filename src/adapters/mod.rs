//! Infrastructure adapters implementing the domain ports

pub mod fs;
pub mod java;
pub mod solver;
