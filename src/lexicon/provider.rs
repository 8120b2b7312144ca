//! LexiconProvider trait definition.
//!
//! The lexicon is owned by an external service. The core only ever asks for
//! it once per load; providers own their own retry and timeout policy.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;

use super::Lexicon;
use crate::config::{Settings, SettingsError};
use crate::error::{LexiconError, LexiconResult};

/// Source of the lexicon describing the available verticals.
///
/// # Example
///
/// ```ignore
/// use vertiquery::lexicon::{FileLexiconProvider, LexiconProvider};
///
/// let provider = FileLexiconProvider::new("./lexicon.json");
/// let lexicon = provider.fetch_lexicon().await?;
/// ```
#[async_trait]
pub trait LexiconProvider: Send + Sync {
    /// Fetch the current lexicon. Single completion, no streaming.
    async fn fetch_lexicon(&self) -> LexiconResult<Lexicon>;
}

/// Provider that hands out a lexicon already held in memory.
#[derive(Debug, Clone)]
pub struct StaticLexiconProvider {
    lexicon: Lexicon,
}

impl StaticLexiconProvider {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }
}

#[async_trait]
impl LexiconProvider for StaticLexiconProvider {
    async fn fetch_lexicon(&self) -> LexiconResult<Lexicon> {
        Ok(self.lexicon.clone())
    }
}

/// Provider that reads the lexicon service's JSON payload from disk.
#[derive(Debug, Clone)]
pub struct FileLexiconProvider {
    path: PathBuf,
}

impl FileLexiconProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Build a provider from the `[lexicon]` settings section.
    ///
    /// Returns `None` when no path is configured.
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>, SettingsError> {
        Ok(settings.lexicon.resolved_path()?.map(Self::new))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LexiconProvider for FileLexiconProvider {
    async fn fetch_lexicon(&self) -> LexiconResult<Lexicon> {
        debug!("reading lexicon from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LexiconError::Read {
                path: self.path.clone(),
                source,
            })?;
        Lexicon::from_json_str(&content)
    }
}
