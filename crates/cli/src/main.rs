use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use retroscope_core::{AppConfig, DEFAULT_CHAT_BASE_URL, HistoryScope};
use retroscope_docs::DocsClient;
use retroscope_http::{AppState, create_router};
use retroscope_llm::LlmClient;
use retroscope_service::{AnalysisOutcome, AnalysisService, HistoryService, SessionService};
use retroscope_sheets::SheetsClient;

#[derive(Parser)]
#[command(name = "retroscope")]
#[command(about = "Meeting minutes analyzer for student project teams", long_about = None)]
struct Cli {
    /// Config file path; falls back to RETROSCOPE_CONFIG, then the user config dir.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Analyze one document for a team and print the feedback.
    Analyze {
        #[arg(short, long)]
        team: String,
        /// Id of the meeting document to analyze.
        #[arg(short, long)]
        document: String,
    },
    /// List the documents in a team's folder, oldest first.
    Documents {
        #[arg(short, long)]
        team: String,
    },
    /// Print a team's stored meeting history.
    History {
        #[arg(short, long)]
        team: String,
        /// Print structured records as JSON instead of the rendered block.
        #[arg(long)]
        records: bool,
    },
}

fn get_api_key() -> Result<String> {
    std::env::var("RETROSCOPE_LLM_API_KEY")
        .or_else(|_| std::env::var("OPENAI_API_KEY"))
        .map_err(|_| {
            anyhow::anyhow!(
                "RETROSCOPE_LLM_API_KEY or OPENAI_API_KEY environment variable must be set"
            )
        })
}

fn get_chat_base_url() -> String {
    std::env::var("RETROSCOPE_LLM_API_URL").unwrap_or_else(|_| DEFAULT_CHAT_BASE_URL.to_owned())
}

fn get_google_token() -> Result<String> {
    std::env::var("RETROSCOPE_GOOGLE_TOKEN")
        .map_err(|_| anyhow::anyhow!("RETROSCOPE_GOOGLE_TOKEN environment variable must be set"))
}

struct Services {
    sessions: Arc<SessionService>,
    analysis: Arc<AnalysisService>,
    history: Arc<HistoryService>,
}

fn build_services(config: AppConfig) -> Result<Services> {
    let config = Arc::new(config);
    let google_token = get_google_token()?;

    let mut docs = DocsClient::new(google_token.clone())?;
    if let Some(url) = config.drive_base_url.as_deref() {
        docs = docs.with_drive_base_url(url);
    }
    if let Some(url) = config.docs_base_url.as_deref() {
        docs = docs.with_docs_base_url(url);
    }

    let mut sheets = SheetsClient::new(
        google_token,
        config.spreadsheet_id.clone(),
        config.sheet_range.clone(),
    )?;
    if let Some(url) = config.sheets_base_url.as_deref() {
        sheets = sheets.with_base_url(url);
    }

    let llm = LlmClient::new(get_api_key()?, get_chat_base_url())?;

    let sessions = Arc::new(SessionService::new(Arc::clone(&config)));
    let sheets = Arc::new(sheets);
    let analysis = Arc::new(AnalysisService::new(
        Arc::clone(&config),
        Arc::clone(&sessions),
        Arc::new(docs),
        Arc::clone(&sheets),
        Arc::new(llm),
    ));
    let history =
        Arc::new(HistoryService::new(Arc::clone(&config), Arc::clone(&sessions), sheets));

    Ok(Services { sessions, analysis, history })
}

fn print_outcome(outcome: &AnalysisOutcome) {
    println!("# {}", outcome.document_title);
    println!();
    println!("{}", outcome.analysis);
    if outcome.skipped_duplicate {
        println!();
        println!("(already stored for this team, append skipped)");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config_path = AppConfig::resolve_path(cli.config.as_deref())?;
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    let services = build_services(config)?;

    match cli.command {
        Commands::Serve { port, host } => {
            let state = Arc::new(AppState {
                sessions: services.sessions,
                analysis: services.analysis,
                history: services.history,
            });
            let router = create_router(state);
            let addr = format!("{host}:{port}");
            tracing::info!("Starting HTTP server on {addr}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, router).await?;
        }
        Commands::Analyze { team, document } => {
            let outcome = services.analysis.analyze_for_team(&team, &document).await?;
            print_outcome(&outcome);
        }
        Commands::Documents { team } => {
            let documents = services.analysis.list_documents_for_team(&team).await?;
            println!("{}", serde_json::to_string_pretty(&documents)?);
        }
        Commands::History { team, records } => {
            if records {
                let rows = services.history.records_for_team(&team).await?;
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{}", services.history.block_for_team(&team, HistoryScope::Full).await?);
            }
        }
    }

    Ok(())
}
