// Shifa backend entry point
// Medical Q&A, CBT coaching and Islamic healing guidance over HTTP or an interactive shell

mod assembler;
mod brain;
mod cli;
mod config;
mod content;
mod engines;
mod error;
mod llm;
mod models;
mod server;
mod session;

#[cfg(test)]
mod tests;

use anyhow::Context;
use assembler::ResponseAssembler;
use clap::{Args, Parser, Subcommand};
use cli::DemoShell;
use config::{LogFormat, Settings};
use content::ContentLibrary;
use engines::KnowledgeBase;
use llm::OpenAiClient;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shifa")]
#[command(about = "Shifa AI - health companion with CBT and Islamic healing guidance", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Interface to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Interactive demo in the terminal
    Demo {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// FAQ cache file (overrides FAQ_CACHE_PATH)
    #[arg(long)]
    faq_cache: Option<PathBuf>,
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.effective_log_level()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match settings.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.with_target(false).init(),
    }
}

/// Content tables, FAQ knowledge base and the model-backed assembler.
fn build_core(settings: &Settings) -> anyhow::Result<(ResponseAssembler<OpenAiClient>, KnowledgeBase)> {
    let library = Arc::new(ContentLibrary::load().context("content tables failed validation")?);
    let (knowledge, origin) = KnowledgeBase::initialize(&settings.faq_cache_path);
    info!(faqs = knowledge.len(), origin = ?origin, "Knowledge base ready");

    let client = Arc::new(OpenAiClient::from_settings(settings));
    let assembler = ResponseAssembler::new(client, library)
        .with_max_input_length(settings.max_input_length);
    Ok((assembler, knowledge))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().context("invalid configuration")?;
    init_tracing(&settings);

    info!("Shifa AI v{} starting", env!("CARGO_PKG_VERSION"));
    if !settings.model_configured() {
        info!("OPENAI_API_KEY not set, medical answers will use the fallback text");
    }

    match cli.command {
        Command::Serve { host, port, common } => {
            if let Some(host) = host {
                settings.host = host;
            }
            if let Some(port) = port {
                settings.port = port;
            }
            if let Some(path) = common.faq_cache {
                settings.faq_cache_path = path;
            }

            let (assembler, knowledge) = build_core(&settings)?;
            let state = server::AppState::new(settings, assembler, knowledge);
            server::run(state).await.context("HTTP server failed")?;
        }
        Command::Demo { common } => {
            if let Some(path) = common.faq_cache {
                settings.faq_cache_path = path;
            }

            let (assembler, knowledge) = build_core(&settings)?;
            let stdin = std::io::stdin();
            let mut shell = DemoShell::new(
                assembler,
                knowledge,
                StdRng::from_entropy(),
                stdin.lock(),
                std::io::stdout(),
            );
            shell.run().await.context("demo shell failed")?;
            info!(activities = shell.session().len(), "Demo session ended");
        }
    }

    Ok(())
}
