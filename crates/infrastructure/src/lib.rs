//! Tandem Infrastructure - Adapters and implementations
//!
//! This crate provides the concrete in-process server the scenario engine
//! drives, router-backed handler modules, and the settings loader.

pub mod adapters;
pub mod settings;

pub use adapters::{AxumTestServer, RouterModule};
pub use settings::{ENV_PREFIX, SettingsError, load_settings, load_settings_with_env};
