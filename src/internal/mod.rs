// src/internal/mod.rs

pub mod bridge;
pub mod config;
pub mod error;
pub mod logger;
pub mod output;
pub mod severity;
