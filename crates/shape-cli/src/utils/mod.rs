//! Utility helpers for the CLI

pub mod file_utils;

pub use file_utils::FileUtils;
