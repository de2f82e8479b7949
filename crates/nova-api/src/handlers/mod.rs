//! Request handlers, grouped by API area.

pub mod auth;
pub mod flashcards;
pub mod notes;
pub mod system;
pub mod tags;
pub mod upload;
