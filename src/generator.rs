//! Turns an instruction and optional file into an HTML artifact

use log::{debug, error, info};

use crate::config::GeneratorConfig;
use crate::providers::{GeminiClient, GenerationService};
use crate::request::{
  Attachment, ContentRequest, GeneratedArtifact, GenerationRequest,
  PromptPayload
};

/// Per-call settings sent alongside every payload
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings
{   pub model: String
  , pub system_instruction: String
  , pub temperature: f32
}

impl Default for GenerationSettings
{   fn default() -> Self
    {   GenerationSettings
        {   model: crate::config::DEFAULT_MODEL.to_string()
          , system_instruction
              : crate::prompts::SYSTEM_INSTRUCTION.to_string()
          , temperature: crate::config::DEFAULT_TEMPERATURE
        }
    }
}

impl From<&GeneratorConfig> for GenerationSettings
{   fn from(config: &GeneratorConfig) -> Self
    {   GenerationSettings
        {   model: config.model.clone()
          , temperature: config.temperature
          , ..GenerationSettings::default()
        }
    }
}

/// Single-shot generator over an injectable remote service
pub struct Generator<S>
{   service: S
  , settings: GenerationSettings
}

impl Generator<GeminiClient>
{   /// Generator backed by Gemini; the client connects lazily
    pub fn from_config(config: GeneratorConfig)
      -> Result<Self, crate::error::Error>
    {   config.validate()?;
        let settings = GenerationSettings::from(&config);
        Ok(Generator::new(GeminiClient::new(config), settings))
    }
}

impl<S: GenerationService> Generator<S>
{   pub fn new(service: S, settings: GenerationSettings) -> Self
    {   debug!("Creating Generator for model: {}", settings.model);
        Generator
        {   service
          , settings
        }
    }

    pub fn settings(&self) -> &GenerationSettings
    {   &self.settings
    }

    pub fn service(&self) -> &S
    {   &self.service
    }

    /// The exact request `generate` would send
    pub fn content_request(
      &self
    , instruction: &str
    , attachment: Option<&Attachment>
    ) -> ContentRequest
    {   ContentRequest
        {   model: self.settings.model.clone()
          , system_instruction: self.settings.system_instruction.clone()
          , temperature: self.settings.temperature
          , payload: PromptPayload::build(instruction, attachment)
        }
    }

    /// Issue one call and return the cleaned document.
    ///
    /// Service errors are logged and returned unchanged. A response
    /// without text yields the empty-response sentinel.
    pub async fn generate(
      &self
    , instruction: &str
    , attachment: Option<&Attachment>
    ) -> Result<GeneratedArtifact, crate::error::Error>
    {   let request = self.content_request(instruction, attachment);
        debug!(
          "Generating with {} prompt parts (file: {})",
          request.payload.parts.len(),
          attachment.map(|a| a.media_type.as_str()).unwrap_or("none")
        );

        let text = self.service
          .generate_content(&request)
          .await
          .map_err(|e| {
            error!("Generation failed: {}", e);
            e
          })?;

        let html = text
          .map(|raw| crate::sanitize::strip_code_fences(&raw))
          .filter(|html| !html.is_empty())
          .unwrap_or_else(|| {
            info!("Model returned no text, using sentinel");
            crate::prompts::EMPTY_RESPONSE_SENTINEL.to_string()
          });

        debug!("Generated {} bytes of HTML", html.len());
        Ok(GeneratedArtifact::new(html))
    }

    pub async fn generate_request(
      &self
    , request: &GenerationRequest
    ) -> Result<GeneratedArtifact, crate::error::Error>
    {   self.generate(&request.instruction, request.attachment.as_ref())
          .await
    }
}
