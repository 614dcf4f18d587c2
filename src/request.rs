//! Request and response types for one generation cycle

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::prompts::{
  DEFAULT_PROMPT, FILE_ANALYSIS_DIRECTIVE, USER_INSTRUCTIONS_LABEL
};

/// A single attached file: raw bytes plus declared media type
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment
{   pub bytes: Vec<u8>
  , pub media_type: String
}

impl Attachment
{   pub fn new(
      bytes: Vec<u8>
    , media_type: impl Into<String>
    ) -> Self
    {   Attachment
        {   bytes
          , media_type: media_type.into()
        }
    }
}

// File contents can be megabytes; keep them out of logs.
impl fmt::Debug for Attachment
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("Attachment")
          .field("media_type", &self.media_type)
          .field("len", &self.bytes.len())
          .finish()
    }
}

/// What the user submitted
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationRequest
{   /// Free text, may be empty
    pub instruction: String
  , /// At most one file
    pub attachment: Option<Attachment>
}

impl GenerationRequest
{   pub fn new(
      instruction: impl Into<String>
    , attachment: Option<Attachment>
    ) -> Self
    {   GenerationRequest
        {   instruction: instruction.into()
          , attachment
        }
    }

    /// True when there is nothing to send
    pub fn is_empty(&self) -> bool
    {   self.instruction.trim().is_empty()
          && self.attachment.is_none()
    }
}

/// One element of the prompt sent to the model
#[derive(Clone, PartialEq, Eq)]
pub enum PromptPart
{   Text(String)
  , Inline
    {   data: Vec<u8>
      , media_type: String
    }
}

impl fmt::Debug for PromptPart
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   match self
        {   PromptPart::Text(text) => {
              f.debug_tuple("Text").field(text).finish()
            }
          , PromptPart::Inline { data, media_type } => {
              f.debug_struct("Inline")
                .field("media_type", media_type)
                .field("len", &data.len())
                .finish()
            }
        }
    }
}

/// Ordered prompt parts: task text first, inline file second
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PromptPayload
{   pub parts: Vec<PromptPart>
}

impl PromptPayload
{   /// Build the payload for an instruction and optional file.
    ///
    /// With a file, the text part is the analysis directive, followed
    /// by the user's instruction under a label when there is one. The
    /// inline part comes last. Without a file, the instruction is used
    /// verbatim, or [`DEFAULT_PROMPT`] when it is blank.
    pub fn build(
      instruction: &str
    , attachment: Option<&Attachment>
    ) -> Self
    {   let has_text = !instruction.trim().is_empty();
        match attachment
        {   Some(file) => {
              let mut text = FILE_ANALYSIS_DIRECTIVE.to_string();
              if has_text
              {   text.push_str("\n\n");
                  text.push_str(USER_INSTRUCTIONS_LABEL);
                  text.push_str(instruction);
              }
              PromptPayload
              {   parts: vec![
                    PromptPart::Text(text)
                  , PromptPart::Inline
                    {   data: file.bytes.clone()
                      , media_type: file.media_type.clone()
                    }
                  ]
              }
            }
          , None => {
              let text = if has_text
              {   instruction.to_string()
              } else
              {   DEFAULT_PROMPT.to_string()
              };
              PromptPayload
              {   parts: vec![PromptPart::Text(text)]
              }
            }
        }
    }

    pub fn from_request(request: &GenerationRequest) -> Self
    {   Self::build(&request.instruction, request.attachment.as_ref())
    }

    /// The leading text part, if any
    pub fn task_text(&self) -> Option<&str>
    {   match self.parts.first()
        {   Some(PromptPart::Text(text)) => Some(text.as_str())
          , _ => None
        }
    }
}

/// Everything the remote service needs for one call
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRequest
{   pub model: String
  , pub system_instruction: String
  , pub temperature: f32
  , pub payload: PromptPayload
}

/// Generated HTML document, never fenced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact(String);

impl GeneratedArtifact
{   pub(crate) fn new(html: String) -> Self
    {   GeneratedArtifact(html)
    }

    pub fn as_str(&self) -> &str
    {   &self.0
    }

    pub fn into_string(self) -> String
    {   self.0
    }
}

impl fmt::Display for GeneratedArtifact
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.write_str(&self.0)
    }
}

impl AsRef<str> for GeneratedArtifact
{   fn as_ref(&self) -> &str
    {   &self.0
    }
}
