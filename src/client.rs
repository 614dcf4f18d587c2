use tokio::sync::mpsc;
use log::{debug, error, info};

use crate::generator::Generator;
use crate::providers::{GeminiClient, GenerationService};
use crate::BackendFoot;

/// Public API for the generation backend - owns the task
pub struct SketchBackend
{   hand: crate::BackendHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl SketchBackend
{   /// Spawn a backend over the Gemini client.
    /// Returns immediately; the client connects on first request.
    pub fn new(
      config: crate::config::GeneratorConfig
    ) -> Result<Self, crate::error::Error>
    {   let generator = Generator::<GeminiClient>::from_config(config)?;
        Ok(Self::with_generator(generator))
    }

    /// Spawn a backend around any generator
    pub fn with_generator<S>(generator: Generator<S>) -> Self
    where
      S: GenerationService + 'static
    {   debug!("Creating SketchBackend with task ownership");

        let (generate_tx, generate_rx)
          = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx)
          = mpsc::unbounded_channel();

        let hand = crate::BackendHand
        {   generate_tx
          , shutdown_tx
        };

        let foot = crate::BackendFoot
        {   generate_rx
          , shutdown_rx
        };

        let _task_handle = tokio::spawn(async move {
          run_backend_loop(foot, generator).await
        });

        SketchBackend
        {   hand
          , _task_handle
        }
    }

    /// Queue a generation - returns almost immediately
    pub async fn generate(
      &self
    , request: crate::request::GenerationRequest
    ) -> Result<
        mpsc::UnboundedReceiver<crate::GenerateReply>,
        crate::error::Error
      >
    {   debug!("generate queuing command");
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::GenerateArgs
        {   request
          , reply: reply_tx
        };

        self.hand.generate_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel closed");
            crate::error::Error::from("Backend disconnected")
          })?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the backend
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down SketchBackend");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::ShutdownArgs
        {   reply: reply_tx
        };

        self.hand.shutdown_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel already closed");
            crate::error::Error::from("Backend already shutdown")
          })?;

        if let Some(result) = reply_rx.recv().await
        {   debug!("Backend shutdown confirmed");
            result
        } else
        {   error!("Backend exited before confirming shutdown");
            Err("Backend exited".into())
        }
    }
}

/// Main backend event loop
///
/// Generations run one at a time, inline in this task.
async fn run_backend_loop<S: GenerationService>(
  foot: crate::BackendFoot
, generator: Generator<S>
)
{   debug!("Starting SketchBackend event loop");
    let BackendFoot
    {   mut generate_rx
      , mut shutdown_rx
    } = foot;

    loop
    { tokio::select!
      { Some(cmd) = generate_rx.recv() => {
          debug!("Received Generate");
          let result = generator
            .generate_request(&cmd.request)
            .await;
          let _ = cmd.reply.send(result);
        }
      , Some(cmd) = shutdown_rx.recv() => {
          debug!("Received Shutdown");
          let _ = cmd.reply.send(Ok(()));
          info!("SketchBackend shutting down");
          break;
        }
      , else => {
          debug!("All backend channels closed");
          break;
        }
      }
    }
}
