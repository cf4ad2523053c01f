//! Shared utilities: file decoding and string handling.

pub mod file_reader;
pub mod string;
