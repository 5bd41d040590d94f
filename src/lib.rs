// Quill - generate, critique, and refine text artifacts via self-reflection
// Library exports

// Core modules
pub mod config;
pub mod errors;
pub mod export;
pub mod groq;
pub mod reflection;

pub use errors::{Error, Result};
