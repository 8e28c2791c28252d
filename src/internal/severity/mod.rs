// src/internal/severity/mod.rs

pub mod severity;

pub use severity::{
    color_code_of, color_code_of_raw, label_of, label_of_raw, Severity, ANSI_CYAN, ANSI_GREEN,
    ANSI_RED, ANSI_YELLOW,
};
