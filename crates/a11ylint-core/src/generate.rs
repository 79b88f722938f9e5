//! Seams for the external AI-backed generators and the language detector.
//!
//! The engine never calls these itself; checkers invoke them inline from
//! their finalize step and branch on the returned `Result` rather than
//! relying on a broad catch. A failed call leaves the corresponding issue
//! unfixed and the run continues.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Failure from an external generator or detector call.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The backing service rejected or failed the request.
    #[error("generator call failed: {0}")]
    Call(String),
    /// The generator could not access the referenced resource
    /// (e.g. an image file or URL).
    #[error("could not resolve resource {resource}: {message}")]
    Resource {
        /// The unreachable resource.
        resource: String,
        /// Underlying failure message.
        message: String,
    },
}

/// W3C WAI image classification categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageClassification {
    /// Visual flourish with no informational value; alt must be empty.
    Decorative,
    /// Photograph, illustration, or icon conveying information.
    Informative,
    /// Image serving as a link or button; alt describes the action.
    Functional,
    /// Chart, diagram, or visualization needing a long description.
    Complex,
    /// Image primarily containing readable text.
    Text,
}

/// Request for alt-text generation on one image.
#[derive(Debug, Clone)]
pub struct AltTextRequest {
    /// Image source URL or path as written in the document.
    pub url: String,
    /// Directory for resolving relative local paths.
    pub base_dir: PathBuf,
    /// Surrounding document text, including any enclosing section heading.
    pub context: String,
    /// Whether the image is the sole content of a link.
    pub is_functional: bool,
    /// Link destination when `is_functional` is set, empty otherwise.
    pub link_target: String,
}

/// Outcome of alt-text generation.
#[derive(Debug, Clone)]
pub struct AltTextOutcome {
    /// How the generator classified the image.
    pub classification: ImageClassification,
    /// Generated alt text (empty for decorative images).
    pub alt_text: String,
    /// Long description, present only for complex images.
    pub long_description: Option<String>,
}

/// Generates classification and alt text for images.
pub trait AltTextGenerator: Send + Sync {
    /// Classifies the image and produces alt text (and a long description
    /// for complex images).
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] when the image cannot be resolved or the
    /// backing service fails.
    fn generate(&self, request: &AltTextRequest) -> Result<AltTextOutcome, GeneratorError>;
}

/// Generates one-sentence captions for tables.
pub trait CaptionGenerator: Send + Sync {
    /// Produces a caption from the table's flattened text.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] when the backing service fails.
    fn caption(&self, table_text: &str) -> Result<String, GeneratorError>;
}

/// One link in a batched rewrite request.
#[derive(Debug, Clone)]
pub struct LinkRewrite {
    /// Link destination.
    pub url: String,
    /// Current link text (possibly empty).
    pub current_text: String,
    /// Why the text was flagged: "empty", "short", "generic", or "bare_url".
    pub reason: &'static str,
    /// Surrounding sibling text for context.
    pub context: String,
}

/// Generates descriptive replacement text for flagged links.
pub trait LinkTextGenerator: Send + Sync {
    /// Rewrites a whole batch in one call; the result is positionally
    /// aligned with the request slice.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] when the backing service fails.
    fn rewrite(&self, batch: &[LinkRewrite]) -> Result<Vec<String>, GeneratorError>;
}

/// Detects the dominant natural language of a text sample.
pub trait LanguageDetector: Send + Sync {
    /// Returns an ISO language code (e.g. "en").
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] when detection fails.
    fn detect(&self, text: &str) -> Result<String, GeneratorError>;
}

/// The optional external collaborators a run may be configured with.
///
/// `Default` configures none of them; checkers that need an absent
/// generator report their issues unfixed.
#[derive(Clone, Default)]
pub struct GeneratorSet {
    /// Image classification and alt-text generation.
    pub alt_text: Option<Arc<dyn AltTextGenerator>>,
    /// Table caption generation.
    pub captions: Option<Arc<dyn CaptionGenerator>>,
    /// Batched link-text rewriting.
    pub link_text: Option<Arc<dyn LinkTextGenerator>>,
    /// Document language detection.
    pub language: Option<Arc<dyn LanguageDetector>>,
}

impl std::fmt::Debug for GeneratorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorSet")
            .field("alt_text", &self.alt_text.is_some())
            .field("captions", &self.captions.is_some())
            .field("link_text", &self.link_text.is_some())
            .field("language", &self.language.is_some())
            .finish()
    }
}
