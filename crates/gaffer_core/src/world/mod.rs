//! World generation and shared player factories.

pub mod gen;
pub mod init;
pub mod names;

pub use init::{build_calendar, generate_world};
