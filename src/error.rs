use std::fmt;

/// Custom error type for sketchforge operations
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// No API credential available when the remote call is made
    MissingApiKey(String)
  , /// HTTP transport error
    HttpError(String)
  , /// API returned an error response
    ApiError(String)
  , /// Credential rejected by the service
    Unauthorized(String)
  , /// Failed to parse API response
    ParseError(String)
  , /// Rate limit or quota exceeded
    RateLimitExceeded
  , /// Attached file type is not an image or PDF
    InvalidAttachment(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Filesystem error
    Io(String)
  , /// Generic error
    Other(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingApiKey(source) => {
              write!(f, "Missing API key: {}", source)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ApiError(msg) => {
              write!(f, "API error: {}", msg)
            }
          , Error::Unauthorized(msg) => {
              write!(f, "API key rejected: {}", msg)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::RateLimitExceeded => {
              write!(f, "API rate limit or quota exceeded")
            }
          , Error::InvalidAttachment(media_type) => {
              write!(f,
                "Unsupported file type '{}'. \
                 Please attach an image or a PDF.",
                media_type
              )
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Io(msg) => {
              write!(f, "I/O error: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}

impl From<std::io::Error> for Error
{   fn from(e: std::io::Error) -> Self
    {   Error::Io(e.to_string())
    }
}
