// src/io/mod.rs

pub mod loader;
pub mod reporting;
pub mod synthetic;
