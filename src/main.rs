use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dialoguer::Input;
use tracing_subscriber::EnvFilter;

use doppel::context::PersonaContext;
use doppel::llm::GroqClient;
use doppel::session::Session;
use doppel::transcript::TranscriptParser;
use doppel::{Config, Error};

/// Doppel - chat with a clone of a friend
#[derive(Parser)]
#[command(name = "doppel", version, about)]
struct Cli {
    /// Path to the exported chat text file (prompted for when omitted)
    transcript: Option<PathBuf>,

    /// Friend to clone, exactly as named in the export (prompted for when omitted)
    #[arg(short, long)]
    persona: Option<String>,

    /// Chat model identifier
    #[arg(long, env = "DOPPEL_MODEL")]
    model: Option<String>,

    /// Maximum style exemplars included in the prompt
    #[arg(long, env = "DOPPEL_MAX_EXEMPLARS")]
    exemplars: Option<usize>,

    /// Maximum conversation turns kept as model context
    #[arg(long, env = "DOPPEL_WINDOW_TURNS")]
    window: Option<usize>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn,doppel=warn",
        1 => "info,doppel=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(exemplars) = cli.exemplars {
        config.max_exemplars = exemplars;
    }
    if let Some(window) = cli.window {
        config.max_window_turns = window;
    }

    let transcript_path = match cli.transcript {
        Some(path) => path,
        None => prompt_for_transcript()?,
    };
    if !transcript_path.exists() {
        anyhow::bail!("transcript file not found: {}", transcript_path.display());
    }

    let raw_text = std::fs::read_to_string(&transcript_path)?;
    let messages = TranscriptParser::new().parse(&raw_text).map_err(|e| {
        if matches!(e, Error::EmptyTranscript) {
            anyhow::anyhow!(
                "unrecognized transcript format: {}",
                transcript_path.display()
            )
        } else {
            anyhow::Error::from(e)
        }
    })?;
    println!("Parsed {} messages from the export.", messages.len());

    let persona_name = match cli.persona {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Friend to clone (exactly as named in the export)")
            .interact_text()?,
    };

    let context = PersonaContext::build(
        &messages,
        persona_name.trim(),
        config.max_exemplars,
        config.max_window_turns,
    )?;

    let provider = GroqClient::new(config.api_key, config.model);
    let mut session = Session::new(context, provider);
    session.run().await
}

/// Prompt for the transcript path until an existing file is given
fn prompt_for_transcript() -> anyhow::Result<PathBuf> {
    loop {
        let input: String = Input::new()
            .with_prompt("Path to the exported chat text file")
            .interact_text()?;
        let path = PathBuf::from(input.trim());
        if path.is_file() {
            return Ok(path);
        }
        println!("File not found: {}. Please try again.", path.display());
    }
}
