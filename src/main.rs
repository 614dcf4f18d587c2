use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

use sketchforge::capture::{media_type_for_path, CaptureSession, FileSource};
use sketchforge::{Attachment, Generator, GeneratorConfig};

/// Generate a self-contained HTML app from a prompt and/or a file
#[derive(Parser, Debug)]
#[command(name = "sketchforge", version)]
struct Cli
{   /// What to build
    prompt: Option<String>

  , /// Image or PDF to build from
    #[arg(short, long)]
    file: Option<PathBuf>

  , /// Write the HTML here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>

  , /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>

  , /// Model identifier
    #[arg(short, long)]
    model: Option<String>
}

#[tokio::main]
async fn main() -> Result<()>
{   env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config
    {   Some(path) => GeneratorConfig::from_json_file(path)?
      , None => GeneratorConfig::default()
    };
    config = config.apply_env();
    if let Some(model) = cli.model
    {   config.model = model;
    }
    debug!("Using model {}", config.model);

    let generator = Generator::from_config(config)?;
    let session = CaptureSession::new();
    session.set_instruction(cli.prompt.unwrap_or_default());

    if let Some(path) = &cli.file
    {   let bytes = tokio::fs::read(path)
          .await
          .with_context(|| format!("reading {}", path.display()))?;
        let media_type = media_type_for_path(path);
        session.offer_file(
          FileSource::Picker,
          Attachment::new(bytes, media_type)
        )?;
    }

    let artifact = match session.submit(&generator).await
    {   Some(result) => result?
      , None => {
          info!("Nothing to generate: pass a prompt or --file");
          return Ok(());
        }
    };

    match &cli.out
    {   Some(path) => {
          tokio::fs::write(path, artifact.as_str())
            .await
            .with_context(|| format!("writing {}", path.display()))?;
          info!("Wrote {}", path.display());
        }
      , None => println!("{}", artifact)
    }
    Ok(())
}
