//! Replays recorded model completions through the full pipeline.
//!
//! Usage: swatch-replay <request.json> <completion.txt>...
//! Set SWATCH_CONFIG to a YAML config file to override defaults.
use anyhow::{bail, Context, Result};
use serde_json::json;
use std::sync::Arc;
use swatch_in::RequestOptions;
use swatch_stages::{GeneratorConfig, PaletteGenerator, ReplayCompletion};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: swatch-replay <request.json> <completion.txt>...");
    }

    let request = std::fs::read_to_string(&args[0]).with_context(|| format!("reading {}", args[0]))?;
    let options: RequestOptions =
        serde_json::from_str(&request).with_context(|| format!("parsing request {}", args[0]))?;

    let completions = args[1..]
        .iter()
        .map(|path| std::fs::read_to_string(path).with_context(|| format!("reading {}", path)))
        .collect::<Result<Vec<_>>>()?;

    let config = match std::env::var("SWATCH_CONFIG") {
        Ok(path) => GeneratorConfig::load(&path)?,
        Err(_) => GeneratorConfig::from_env()?,
    };

    let generator = PaletteGenerator::new(Arc::new(ReplayCompletion::new(completions)), config)?;
    let outcome = generator.generate_with_report(&options).await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "artifact": outcome.artifact, "report": outcome.report }))?
    );
    Ok(())
}
