pub mod coordinator;
pub mod dto;
pub mod runtime;
pub mod stream;
