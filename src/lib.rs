pub mod error;
pub mod config;
pub mod prompts;
pub mod request;
pub mod sanitize;
pub mod providers;
pub mod generator;
pub mod capture;
pub mod client;

/*

sketchforge turns a prompt, a sketch, a photo or a PDF into a single
self-contained HTML app using a multimodal model.

sketchforge/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and backend channel types
│   ├── main.rs         # Command-line front end
│   ├── error.rs        # Error type
│   ├── config.rs       # Model, endpoint, key and temperature
│   ├── prompts.rs      # System instruction and fixed prompt text
│   ├── request.rs      # Request, payload and artifact types
│   ├── sanitize.rs     # Code-fence stripping
│   ├── providers/      # Remote services
│   │   ├── mod.rs      # GenerationService trait
│   │   └── gemini.rs   # Gemini generateContent client
│   ├── generator.rs    # Prompt assembly + one remote call
│   ├── capture.rs      # Form state, file intake, submit
│   └── client.rs       # Background backend task
└── tests/

*/

pub use capture::{CaptureSession, FileSource, Intake};
pub use config::GeneratorConfig;
pub use error::Error;
pub use generator::{GenerationSettings, Generator};
pub use providers::{GeminiClient, GenerationService};
pub use request::{
  Attachment, ContentRequest, GeneratedArtifact, GenerationRequest,
  PromptPart, PromptPayload
};
pub use client::SketchBackend;

/// BACKEND API INTERFACE:

// ===== Generate =====

pub type GenerateReply
  = Result<crate::request::GeneratedArtifact, crate::error::Error>;
pub type GenerateReplySender
  = tokio::sync::mpsc::UnboundedSender<GenerateReply>;

pub struct GenerateArgs
{   pub request: crate::request::GenerationRequest
  , pub reply: GenerateReplySender
}

// ===== Shutdown =====

pub type ShutdownReply = Result<(), crate::error::Error>;
pub type ShutdownReplySender
  = tokio::sync::mpsc::UnboundedSender<ShutdownReply>;

pub struct ShutdownArgs
{   pub reply: ShutdownReplySender
}

// ===== BackendHand (sender side) =====

pub struct BackendHand
{   pub generate_tx
      : tokio::sync::mpsc::UnboundedSender<GenerateArgs>
  , pub shutdown_tx
      : tokio::sync::mpsc::UnboundedSender<ShutdownArgs>
}

// ===== BackendFoot (receiver side) =====

pub struct BackendFoot
{   pub generate_rx
      : tokio::sync::mpsc::UnboundedReceiver<GenerateArgs>
  , pub shutdown_rx
      : tokio::sync::mpsc::UnboundedReceiver<ShutdownArgs>
}
