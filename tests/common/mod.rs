#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;

use sketchforge::{ContentRequest, Error, GenerationService};

pub const PAGE: &str
  = "<!DOCTYPE html><html><body>ok</body></html>";

/// Records every request and replays scripted replies
pub struct FakeService
{   replies: Mutex<VecDeque<Result<Option<String>, Error>>>
  , calls: Mutex<Vec<ContentRequest>>
  , gate: Option<Notify>
}

impl FakeService
{   pub fn new() -> Self
    {   FakeService
        {   replies: Mutex::new(VecDeque::new())
          , calls: Mutex::new(vec![])
          , gate: None
        }
    }

    /// Calls block until `release` is called
    pub fn gated() -> Self
    {   FakeService
        {   gate: Some(Notify::new())
          , ..FakeService::new()
        }
    }

    pub fn reply(self, reply: Result<Option<String>, Error>) -> Self
    {   self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn release(&self)
    {   if let Some(gate) = &self.gate
        {   gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<ContentRequest>
    {   self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize
    {   self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationService for FakeService
{   async fn generate_content(
      &self
    , request: &ContentRequest
    ) -> Result<Option<String>, Error>
    {   self.calls.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate
        {   gate.notified().await;
        }
        self.replies
          .lock()
          .unwrap()
          .pop_front()
          .unwrap_or_else(|| Ok(Some(PAGE.to_string())))
    }
}
