//! Configuration management for lookout.
//!
//! Provides XDG-compliant paths and application settings. Catalog tables
//! are overridden from `<config>/catalog/`, see [`crate::catalog`].

mod settings;

pub use settings::{AppSettings, Paths};
