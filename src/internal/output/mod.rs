// src/internal/output/mod.rs

pub mod capture;
pub mod stream;

pub use capture::CaptureBuffer;
pub use stream::{
    default_stream, default_threshold, set_default_stream, set_default_threshold, SharedStream,
};
