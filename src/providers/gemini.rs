use async_trait::async_trait;
use base64::Engine as _;
use log::{debug, error, trace};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::config::GeneratorConfig;
use crate::request::{ContentRequest, PromptPart};

// ===== Wire Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData
{   pub mime_type: String
  , /// Base64 encoded bytes
    pub data: String
}

/// Variant order matters for untagged decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeminiPart
{   Text
    {   text: String
    }
  , InlineData
    {   #[serde(rename = "inlineData")]
        inline_data: InlineData
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiContent
{   #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>
  , #[serde(default)]
    pub parts: Vec<GeminiPart>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationConfig
{   pub temperature: f32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest
{   pub system_instruction: GeminiContent
  , pub contents: Vec<GeminiContent>
  , pub generation_config: GenerationConfig
}

impl GeminiRequest
{   /// Translate a content request into the wire body.
    /// Inline bytes are base64 encoded here.
    pub fn from_content_request(request: &ContentRequest) -> Self
    {   let parts = request.payload.parts
          .iter()
          .map(|part| match part
          {   PromptPart::Text(text) => GeminiPart::Text
              {   text: text.clone()
              }
            , PromptPart::Inline { data, media_type } => {
                GeminiPart::InlineData
                {   inline_data: InlineData
                    {   mime_type: media_type.clone()
                      , data: base64::engine::general_purpose::STANDARD
                          .encode(data)
                    }
                }
              }
          })
          .collect();

        GeminiRequest
        {   system_instruction: GeminiContent
            {   role: None
              , parts: vec![
                  GeminiPart::Text
                  {   text: request.system_instruction.clone()
                  }
                ]
            }
          , contents: vec![
              GeminiContent
              {   role: Some("user".to_string())
                , parts
              }
            ]
          , generation_config: GenerationConfig
            {   temperature: request.temperature
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse
{   #[serde(default)]
    pub candidates: Vec<Candidate>
  , #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate
{   #[serde(default)]
    pub content: Option<GeminiContent>
  , #[serde(default)]
    pub finish_reason: Option<String>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback
{   #[serde(default)]
    pub block_reason: Option<String>
}

impl GeminiResponse
{   /// All text parts of the first candidate, joined.
    /// `None` when there is no candidate or no text.
    pub fn text(&self) -> Option<String>
    {   let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts
          .iter()
          .filter_map(|part| match part
          {   GeminiPart::Text { text } => Some(text.as_str())
            , GeminiPart::InlineData { .. } => None
          })
          .collect();
        if text.is_empty()
        {   None
        } else
        {   Some(text)
        }
    }
}

// ===== Gemini Client =====

/// HTTP client and credential, built on first use
struct Transport
{   http_client: reqwest::Client
  , api_key: String
}

/// Gemini `generateContent` client
pub struct GeminiClient
{   config: GeneratorConfig
  , transport: OnceCell<Transport>
}

impl GeminiClient
{   /// Nothing is validated here; a missing key surfaces when the
    /// first request is made.
    pub fn new(config: GeneratorConfig) -> Self
    {   debug!("Creating GeminiClient for model: {}", config.model);
        GeminiClient
        {   config
          , transport: OnceCell::new()
        }
    }

    pub fn config(&self) -> &GeneratorConfig
    {   &self.config
    }

    pub fn endpoint(&self, model: &str) -> String
    {   format!(
          "{}/models/{}:generateContent",
          self.config.api_base.trim_end_matches('/'),
          model
        )
    }

    async fn transport(&self)
      -> Result<&Transport, crate::error::Error>
    {   self.transport
          .get_or_try_init(|| async {
            debug!("Initializing Gemini transport");
            let api_key = self.config.resolve_api_key()?;
            let mut builder = reqwest::Client::builder();
            if let Some(secs) = self.config.timeout_secs
            {   builder = builder.timeout(Duration::from_secs(secs));
            }
            let http_client = builder.build().map_err(|e| {
              error!("Failed to build HTTP client: {}", e);
              crate::error::Error::HttpError(e.to_string())
            })?;
            Ok::<_, crate::error::Error>(Transport
            {   http_client
              , api_key
            })
          })
          .await
    }
}

#[async_trait]
impl crate::providers::GenerationService for GeminiClient
{   async fn generate_content(
      &self
    , request: &ContentRequest
    ) -> Result<Option<String>, crate::error::Error>
    {   let transport = self.transport().await?;
        let body = GeminiRequest::from_content_request(request);
        let url = self.endpoint(&request.model);

        debug!(
          "Sending generateContent to {} with {} parts",
          request.model,
          request.payload.parts.len()
        );
        if self.config.verbose
        {   trace!("Gemini request payload: {:?}", request.payload);
        }

        let response = transport.http_client
          .post(&url)
          .header("x-goog-api-key", &transport.api_key)
          .header("Content-Type", "application/json")
          .json(&body)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::HttpError(e.to_string())
          })?;

        let status = response.status();
        trace!("Gemini response status: {}", status);

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("Gemini API error {}: {}", status, error_text);
            return Err(map_status(status.as_u16(), error_text));
        }

        let gemini_response: GeminiResponse
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::ParseError(e.to_string())
          })?;

        if let Some(reason) = gemini_response.prompt_feedback
          .as_ref()
          .and_then(|f| f.block_reason.as_deref())
        {   debug!("Prompt blocked: {}", reason);
        }

        Ok(gemini_response.text())
    }
}

/// Map a non-success HTTP status to an error
pub fn map_status(status: u16, body: String) -> crate::error::Error
{   match status
    {   429 => crate::error::Error::RateLimitExceeded
      , 401 | 403 => crate::error::Error::Unauthorized(body)
      , _ => crate::error::Error::ApiError(
          format!("Gemini {}: {}", status, body)
        )
    }
}
