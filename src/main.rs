use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio::cache::MemoryCache;
use folio::config::{ConfigError, SiteConfig};
use folio::context::SiteContext;
use folio::features::compose::{ComposeAssist, ComposeOutcome};
use folio::features::contact::{ContactError, ContactForm, ContactSubmission, FormBackend, HttpFormBackend};
use folio::features::insight::{InsightFeature, InsightOutcome};
use folio::generate::prompts::ProjectCard;
use folio::generate::{GenerateError, GenerationClient};
use folio::llm::LlmError;
use folio::notify::Notifier;
use folio::theme::Theme;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Contact(#[from] ContactError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser)]
#[command(name = "folio", about = "Portfolio backend: generation proxy and assistant tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP proxy.
    Serve {
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },
    /// Generate a technical deep dive for one project.
    Insight {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Rewrite a contact message to be professional and concise.
    Polish { message: String },
    /// Send a contact form submission.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "folio failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<ExitCode, CliError> {
    let config = SiteConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");
    let ctx = SiteContext::new(Notifier::new(config.notice_ttl), Theme::default());

    let code = match command {
        Command::Serve { port } => {
            serve(&config, port.unwrap_or(config.port)).await?;
            ExitCode::SUCCESS
        }
        Command::Insight { title, description, tags } => {
            let generator = Arc::new(GenerationClient::from_config(&config)?);
            let feature = InsightFeature::new(generator, Arc::new(MemoryCache::new()), ctx.clone());
            let tag_refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            let card = ProjectCard::new(title.clone(), title, description, &tag_refs);
            match feature.trigger(&card).await {
                InsightOutcome::Shown(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                _ => ExitCode::FAILURE,
            }
        }
        Command::Polish { message } => {
            let generator = Arc::new(GenerationClient::from_config(&config)?);
            let assist = ComposeAssist::new(generator, ctx.clone(), config.site_owner.clone());
            assist.set_draft(message);
            match assist.polish().await {
                ComposeOutcome::Replaced(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                _ => ExitCode::FAILURE,
            }
        }
        Command::Contact { name, email, message } => {
            let backend = match config.form_endpoint.as_deref() {
                Some(endpoint) => {
                    Some(Arc::new(HttpFormBackend::new(endpoint, config.llm.timeouts)?) as Arc<dyn FormBackend>)
                }
                None => None,
            };
            let form = ContactForm::new(backend, ctx.clone());
            let submission = ContactSubmission { name, email, message };
            if form.submit(&submission).await.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
    };

    for notice in ctx.notifier.snapshot() {
        eprintln!("[{}] {}", notice.kind.as_str(), notice.message);
    }
    Ok(code)
}

async fn serve(config: &SiteConfig, port: u16) -> Result<(), CliError> {
    let state = folio::state::AppState::from_config(config)?;
    let app = folio::routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "folio listening");
    axum::serve(listener, app).await?;
    Ok(())
}
