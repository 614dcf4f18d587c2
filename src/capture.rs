//! Form state and file intake in front of the generator
//!
//! A `CaptureSession` collects an instruction and at most one file,
//! validates files coming from the picker, drag and drop or the
//! clipboard, and submits to a [`Generator`]. While a generation is in
//! flight, or while the session is disabled, file events and submits
//! are dropped rather than queued.

use log::{debug, info, warn};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::generator::Generator;
use crate::providers::GenerationService;
use crate::request::{Attachment, GeneratedArtifact, GenerationRequest};

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
const IMAGE_MEDIA_PREFIX: &str = "image/";

/// Where a candidate file came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource
{   Picker
  , Drop
  , Paste
}

/// One entry of a clipboard paste
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardItem
{   Text(String)
  , File(Attachment)
}

/// Result of offering a file to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intake
{   /// File accepted; `replaced` is true if it displaced another
    Attached
    {   replaced: bool
    }
  , /// Session busy or disabled, or nothing to take
    Ignored
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key
{   Enter
  , Char(char)
  , Other
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers
{   pub shift: bool
  , pub ctrl: bool
  , pub alt: bool
  , pub meta: bool
}

impl Modifiers
{   pub const NONE: Modifiers = Modifiers
    {   shift: false
      , ctrl: false
      , alt: false
      , meta: false
    };

    pub fn is_empty(&self) -> bool
    {   !(self.shift || self.ctrl || self.alt || self.meta)
    }
}

/// What the text field should do with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction
{   /// Submit, and suppress the default newline
    Submit
  , /// Let the field handle the key
    Default
}

/// Enter with no modifier submits; anything else is left alone
pub fn key_action(key: Key, modifiers: Modifiers) -> KeyAction
{   match key
    {   Key::Enter if modifiers.is_empty() => KeyAction::Submit
      , _ => KeyAction::Default
    }
}

/// Allow-list: any `image/*` type, or exactly `application/pdf`
pub fn is_accepted_media_type(media_type: &str) -> bool
{   media_type.starts_with(IMAGE_MEDIA_PREFIX)
      || media_type == PDF_MEDIA_TYPE
}

/// Guess a media type from a file extension
pub fn media_type_for_path(path: &Path) -> &'static str
{   let ext = path.extension()
      .and_then(|e| e.to_str())
      .map(|e| e.to_ascii_lowercase());
    match ext.as_deref()
    {   Some("png") => "image/png"
      , Some("jpg") | Some("jpeg") => "image/jpeg"
      , Some("gif") => "image/gif"
      , Some("webp") => "image/webp"
      , Some("bmp") => "image/bmp"
      , Some("svg") => "image/svg+xml"
      , Some("heic") => "image/heic"
      , Some("heif") => "image/heif"
      , Some("pdf") => PDF_MEDIA_TYPE
      , Some("txt") => "text/plain"
      , Some("html") | Some("htm") => "text/html"
      , Some("json") => "application/json"
      , _ => "application/octet-stream"
    }
}

#[derive(Debug, Default)]
struct FormState
{   instruction: String
  , attachment: Option<Attachment>
}

/// Clears the in-flight flag however the submit ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_>
{   fn drop(&mut self)
    {   self.0.store(false, Ordering::SeqCst);
    }
}

/// Transient form state for one user
#[derive(Debug, Default)]
pub struct CaptureSession
{   form: Mutex<FormState>
  , in_flight: AtomicBool
  , disabled: AtomicBool
}

impl CaptureSession
{   pub fn new() -> Self
    {   CaptureSession::default()
    }

    fn form(&self) -> MutexGuard<'_, FormState>
    {   self.form.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_in_flight(&self) -> bool
    {   self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_disabled(&self) -> bool
    {   self.disabled.load(Ordering::SeqCst)
    }

    pub fn set_disabled(&self, disabled: bool)
    {   debug!("Capture disabled: {}", disabled);
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// True when input should be dropped
    pub fn is_busy(&self) -> bool
    {   self.is_in_flight() || self.is_disabled()
    }

    pub fn instruction(&self) -> String
    {   self.form().instruction.clone()
    }

    /// Returns false, leaving the text as it was, while busy
    pub fn set_instruction(&self, text: impl Into<String>) -> bool
    {   if self.is_busy()
        {   debug!("Ignoring text edit while busy");
            return false;
        }
        self.form().instruction = text.into();
        true
    }

    pub fn attachment(&self) -> Option<Attachment>
    {   self.form().attachment.clone()
    }

    /// Returns false, keeping the attachment, while busy
    pub fn clear_attachment(&self) -> bool
    {   if self.is_busy()
        {   debug!("Ignoring attachment removal while busy");
            return false;
        }
        self.form().attachment = None;
        true
    }

    /// Snapshot of what a submit would send
    pub fn request(&self) -> GenerationRequest
    {   let form = self.form();
        GenerationRequest::new(
          form.instruction.clone(),
          form.attachment.clone()
        )
    }

    /// Validate and attach a file from any source.
    ///
    /// Rejected files leave the current attachment untouched.
    pub fn offer_file(
      &self
    , source: FileSource
    , file: Attachment
    ) -> Result<Intake, crate::error::Error>
    {   if self.is_busy()
        {   debug!("Ignoring {:?} file while busy", source);
            return Ok(Intake::Ignored);
        }

        if !is_accepted_media_type(&file.media_type)
        {   warn!(
              "Rejected {:?} file with type {}",
              source, file.media_type
            );
            return Err(crate::error::Error::InvalidAttachment(
              file.media_type
            ));
        }

        debug!(
          "Attaching {:?} file: {} ({} bytes)",
          source, file.media_type, file.bytes.len()
        );
        let replaced = self.form().attachment.replace(file).is_some();
        Ok(Intake::Attached { replaced })
    }

    /// Take the first file among pasted items.
    /// Text-only pastes are left to the text field.
    pub fn offer_paste(
      &self
    , items: Vec<ClipboardItem>
    ) -> Result<Intake, crate::error::Error>
    {   if self.is_busy()
        {   debug!("Ignoring paste while busy");
            return Ok(Intake::Ignored);
        }
        let file = items.into_iter().find_map(|item| match item
        {   ClipboardItem::File(file) => Some(file)
          , ClipboardItem::Text(_) => None
        });
        match file
        {   Some(file) => self.offer_file(FileSource::Paste, file)
          , None => Ok(Intake::Ignored)
        }
    }

    /// Route a key press from the text field; submits on a bare Enter
    pub async fn handle_key<S: GenerationService>(
      &self
    , key: Key
    , modifiers: Modifiers
    , generator: &Generator<S>
    ) -> (KeyAction, Option<Result<GeneratedArtifact, crate::error::Error>>)
    {   match key_action(key, modifiers)
        {   KeyAction::Submit => {
              (KeyAction::Submit, self.submit(generator).await)
            }
          , KeyAction::Default => (KeyAction::Default, None)
        }
    }

    /// Submit the current form.
    ///
    /// Returns `None` without calling the generator when busy or when
    /// there is neither text nor a file. On success the form is
    /// cleared; on failure it is kept for another attempt.
    pub async fn submit<S: GenerationService>(
      &self
    , generator: &Generator<S>
    ) -> Option<Result<GeneratedArtifact, crate::error::Error>>
    {   if self.is_disabled()
        {   debug!("Submit ignored: disabled");
            return None;
        }

        let request = self.request();
        if request.is_empty()
        {   debug!("Submit ignored: nothing to send");
            return None;
        }

        if self.in_flight
          .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
          .is_err()
        {   debug!("Submit ignored: generation in flight");
            return None;
        }
        let _guard = InFlightGuard(&self.in_flight);

        info!("Submitting generation request");
        let result = generator.generate_request(&request).await;

        if result.is_ok()
        {   let mut form = self.form();
            form.instruction.clear();
            form.attachment = None;
        }
        Some(result)
    }
}
