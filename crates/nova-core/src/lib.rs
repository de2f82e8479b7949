//! # nova-core
//!
//! Core types, traits, and abstractions for NoteNova.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other NoteNova crates depend on.

pub mod defaults;
pub mod error;
pub mod file_safety;
pub mod models;
pub mod tags;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use file_safety::{is_supported_mime, sanitize_filename, title_from_filename};
pub use models::*;
pub use tags::infer_tags;
pub use traits::*;
