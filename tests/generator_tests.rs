mod common;

use common::{FakeService, PAGE};
use sketchforge::prompts::{
  DEFAULT_PROMPT, EMPTY_RESPONSE_SENTINEL, FILE_ANALYSIS_DIRECTIVE,
  SYSTEM_INSTRUCTION
};
use sketchforge::{
  Attachment, Error, GenerationRequest, GenerationSettings, Generator,
  PromptPart, PromptPayload
};

fn generator(service: FakeService) -> Generator<FakeService>
{   Generator::new(service, GenerationSettings::default())
}

fn png() -> Attachment
{   Attachment::new(vec![0x89, 0x50, 0x4E, 0x47], "image/png")
}

#[test]
fn test_payload_text_only()
{   let payload = PromptPayload::build("Create a demo app", None);
    assert_eq!(
      payload.parts,
      vec![PromptPart::Text("Create a demo app".to_string())]
    );
}

#[test]
fn test_payload_empty_uses_fallback()
{   let payload = PromptPayload::build("", None);
    assert_eq!(
      payload.parts,
      vec![PromptPart::Text(
        "Create a demo app that shows off your capabilities.".to_string()
      )]
    );
    assert_eq!(payload.task_text(), Some(DEFAULT_PROMPT));

    let blank = PromptPayload::build("   \n", None);
    assert_eq!(blank.task_text(), Some(DEFAULT_PROMPT));
}

#[test]
fn test_payload_with_file_and_text()
{   let file = png();
    let payload = PromptPayload::build("Make it dark mode", Some(&file));
    assert_eq!(
      payload.parts,
      vec![
        PromptPart::Text(format!(
          "{}\n\nUSER INSTRUCTIONS: Make it dark mode",
          FILE_ANALYSIS_DIRECTIVE
        ))
      , PromptPart::Inline
        {   data: file.bytes.clone()
          , media_type: "image/png".to_string()
        }
      ]
    );
}

#[test]
fn test_payload_with_file_only()
{   let file = Attachment::new(b"%PDF-1.7".to_vec(), "application/pdf");
    let payload = PromptPayload::build("", Some(&file));
    assert_eq!(payload.parts.len(), 2);
    assert_eq!(payload.task_text(), Some(FILE_ANALYSIS_DIRECTIVE));
    assert!(matches!(
      &payload.parts[1],
      PromptPart::Inline { media_type, .. } if media_type == "application/pdf"
    ));
}

#[test]
fn test_payload_file_always_leads_with_directive()
{   let file = png();
    for text in ["", "x", "Build a calculator", "USER INSTRUCTIONS: twice"]
    {   let payload = PromptPayload::build(text, Some(&file));
        let first = payload.task_text().unwrap();
        assert!(first.starts_with(FILE_ANALYSIS_DIRECTIVE), "{}", text);
    }
}

#[tokio::test]
async fn test_generate_sends_single_call()
{   let generator = generator(FakeService::new());
    let artifact = generator
      .generate("Create a demo app", None)
      .await
      .unwrap();

    assert_eq!(artifact.as_str(), PAGE);
    let calls = generator.service().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].temperature, 0.5);
    assert_eq!(calls[0].system_instruction, SYSTEM_INSTRUCTION);
    assert_eq!(calls[0].model, "gemini-2.5-flash");
    assert_eq!(
      calls[0].payload.parts,
      vec![PromptPart::Text("Create a demo app".to_string())]
    );
}

#[tokio::test]
async fn test_generate_strips_fences()
{   let service = FakeService::new().reply(Ok(Some(
      "```html\n<!DOCTYPE html>...\n```".to_string()
    )));
    let artifact = generator(service)
      .generate("anything", None)
      .await
      .unwrap();
    assert_eq!(artifact.as_str(), "<!DOCTYPE html>...");
}

#[tokio::test]
async fn test_generate_missing_text_yields_sentinel()
{   let service = FakeService::new()
      .reply(Ok(None))
      .reply(Ok(Some("```html\n```".to_string())));
    let generator = generator(service);

    let first = generator.generate("a", None).await.unwrap();
    assert_eq!(first.as_str(), EMPTY_RESPONSE_SENTINEL);

    let second = generator.generate("b", None).await.unwrap();
    assert_eq!(second.as_str(), EMPTY_RESPONSE_SENTINEL);
}

#[tokio::test]
async fn test_generate_propagates_service_error()
{   let service = FakeService::new().reply(Err(Error::HttpError(
      "connection reset".to_string()
    )));
    let generator = generator(service);

    let result = generator.generate("a", Some(&png())).await;
    assert_eq!(
      result,
      Err(Error::HttpError("connection reset".to_string()))
    );
    // No retry
    assert_eq!(generator.service().call_count(), 1);
}

#[tokio::test]
async fn test_generate_request_matches_generate()
{   let generator = generator(FakeService::new());
    let request = GenerationRequest::new("Make it dark mode", Some(png()));
    generator.generate_request(&request).await.unwrap();

    let calls = generator.service().calls();
    assert_eq!(calls[0].payload, PromptPayload::from_request(&request));
    assert_eq!(
      calls[0],
      generator.content_request("Make it dark mode", Some(&png()))
    );
}

#[test]
fn test_settings_from_config()
{   let config = sketchforge::GeneratorConfig
    {   model: "gemini-2.0-flash".to_string()
      , temperature: 0.2
      , ..Default::default()
    };
    let settings = GenerationSettings::from(&config);
    assert_eq!(settings.model, "gemini-2.0-flash");
    assert_eq!(settings.temperature, 0.2);
    assert_eq!(settings.system_instruction, SYSTEM_INSTRUCTION);
}

#[test]
fn test_from_config_rejects_bad_temperature()
{   let config = sketchforge::GeneratorConfig
    {   temperature: 3.5
      , ..Default::default()
    };
    assert!(matches!(
      Generator::from_config(config),
      Err(Error::InvalidConfiguration(_))
    ));
}
