//! Lexicon and document held together for one analyst.
//!
//! A fresh lexicon invalidates every column reference built against the old
//! one, so a successful load always starts over from the initial document.

use log::{debug, warn};

use crate::error::{BuildError, BuildResult};
use crate::lexicon::{Lexicon, LexiconProvider};
use crate::model::QueryDocument;
use crate::render::{to_canonical_form, to_display_expression, CanonicalQuery};

/// Current lexicon and the document being edited against it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: Option<(Lexicon, QueryDocument)>,
}

impl Session {
    /// A session with no lexicon loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that starts from an already fetched lexicon.
    pub fn with_lexicon(lexicon: Lexicon) -> BuildResult<Self> {
        let document = QueryDocument::new(&lexicon)?;
        Ok(Self {
            state: Some((lexicon, document)),
        })
    }

    /// Fetch a lexicon and reset the document against it.
    ///
    /// On failure the previous lexicon and document are kept.
    pub async fn load_lexicon<P>(&mut self, provider: &P) -> BuildResult<()>
    where
        P: LexiconProvider + ?Sized,
    {
        let lexicon = match provider.fetch_lexicon().await {
            Ok(lexicon) => lexicon,
            Err(err) => {
                warn!("lexicon fetch failed, keeping previous state: {}", err);
                return Err(err.into());
            }
        };
        let document = QueryDocument::new(&lexicon)?;
        debug!("loaded lexicon with {} vertical(s)", lexicon.len());
        self.state = Some((lexicon, document));
        Ok(())
    }

    pub fn lexicon(&self) -> Option<&Lexicon> {
        self.state.as_ref().map(|(lexicon, _)| lexicon)
    }

    pub fn document(&self) -> Option<&QueryDocument> {
        self.state.as_ref().map(|(_, document)| document)
    }

    /// Run a builder operation against the current document.
    ///
    /// The document is replaced only when the operation succeeds.
    ///
    /// ```ignore
    /// session.apply(|doc, lexicon| doc.add_vertical(lexicon))?;
    /// ```
    pub fn apply<F>(&mut self, op: F) -> BuildResult<&QueryDocument>
    where
        F: FnOnce(&QueryDocument, &Lexicon) -> BuildResult<QueryDocument>,
    {
        let (lexicon, document) = self.state.as_mut().ok_or_else(not_loaded)?;
        *document = op(document, lexicon)?;
        Ok(&*document)
    }

    /// Reset the document to its initial state.
    pub fn clear(&mut self) -> BuildResult<&QueryDocument> {
        self.apply(|document, lexicon| document.clear(lexicon))
    }

    pub fn display_expression(&self) -> BuildResult<String> {
        let (lexicon, document) = self.state.as_ref().ok_or_else(not_loaded)?;
        Ok(to_display_expression(document, lexicon))
    }

    pub fn canonical_form(&self) -> BuildResult<CanonicalQuery> {
        let (_, document) = self.state.as_ref().ok_or_else(not_loaded)?;
        Ok(to_canonical_form(document))
    }
}

fn not_loaded() -> BuildError {
    BuildError::LexiconUnavailable("no lexicon has been loaded".to_string())
}
