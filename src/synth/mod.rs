// src/synth/mod.rs
//! Synthesis: payload -> prompt -> one chat completion -> digest.

pub mod generator;
pub mod prompt;
pub mod validate;

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{error, info};

use crate::aggregate::CompositePayload;
use crate::error::BriefError;
pub use generator::{ChatCompletionsClient, TextGenerator};

/// Markdown newsletter body as returned by the service. Opaque downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestDocument(String);

impl DigestDocument {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self(markdown.into())
    }

    pub fn as_markdown(&self) -> &str {
        &self.0
    }
}

pub struct Synthesizer {
    generator: Arc<dyn TextGenerator>,
}

impl Synthesizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Single request, no retry. Any failure is fatal for the run.
    pub async fn synthesize(&self, payload: &CompositePayload) -> Result<DigestDocument, BriefError> {
        let prompt = prompt::build_prompt(payload);
        info!(
            model = self.generator.model(),
            prompt_version = prompt::PROMPT_VERSION,
            prompt_id = %fingerprint(&prompt),
            prompt_chars = prompt.chars().count(),
            "summarizing with LLM"
        );

        match self.generator.complete(prompt::SYSTEM_ROLE, &prompt).await {
            Ok(markdown) => {
                info!(digest_chars = markdown.chars().count(), "digest generated");
                Ok(DigestDocument::new(markdown))
            }
            Err(e) => {
                error!(error = ?e, "digest generation failed");
                Err(BriefError::Synthesis(e))
            }
        }
    }
}

// Short SHA-256 prefix; prompt text itself is never logged.
fn fingerprint(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
