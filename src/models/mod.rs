//! Value types shared between the engine and its adapters.

pub mod pagination;
