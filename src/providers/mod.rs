//! Remote generation services

use async_trait::async_trait;

pub mod gemini;

// Re-export for convenience
pub use gemini::GeminiClient;

/// The remote model as seen by the generator.
///
/// Implementations issue exactly one call per invocation. `Ok(None)`
/// means the call succeeded but the response carried no text.
#[async_trait]
pub trait GenerationService: Send + Sync
{   async fn generate_content(
      &self
    , request: &crate::request::ContentRequest
    ) -> Result<Option<String>, crate::error::Error>;
}

#[async_trait]
impl<S> GenerationService for std::sync::Arc<S>
where
  S: GenerationService + ?Sized
{   async fn generate_content(
      &self
    , request: &crate::request::ContentRequest
    ) -> Result<Option<String>, crate::error::Error>
    {   (**self).generate_content(request).await
    }
}
