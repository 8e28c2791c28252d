// src/internal/bridge/mod.rs

pub mod layer;

pub use layer::{init_tracing, init_tracing_with_filter, MinoriLayer};
