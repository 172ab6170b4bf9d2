//! Pagination engine and the adapters around it.

pub mod engine;
pub mod renderer;
pub mod source;
