//! Configuration module.
//!
//! Handles the lexicon source, render options and environment variables.

mod settings;

pub use settings::{expand_env_vars, LexiconSettings, RenderSettings, Settings, SettingsError};
