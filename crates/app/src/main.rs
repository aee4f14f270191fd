use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock, JourneyService, JourneyState};
use storage::http::{ApiConfig, DEFAULT_API_URL};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    journey: Arc<JourneyService>,
    api_label: String,
}

impl UiApp for DesktopApp {
    fn journey(&self) -> Arc<JourneyService> {
        Arc::clone(&self.journey)
    }

    fn api_label(&self) -> String {
        self.api_label.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Backend {
    Http(ApiConfig),
    InMemory,
}

impl Backend {
    fn label(&self) -> String {
        match self {
            Backend::Http(config) => config.base_url.clone(),
            Backend::InMemory => "in-memory (offline)".to_string(),
        }
    }

    fn services(&self, clock: Clock) -> Result<AppServices, Box<dyn std::error::Error>> {
        match self {
            Backend::Http(config) => Ok(AppServices::new_http(config, clock)?),
            Backend::InMemory => Ok(AppServices::new_in_memory(clock)),
        }
    }
}

struct Args {
    backend: Backend,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui     [--api-url <url>] [--token <token>] [--in-memory]");
    eprintln!("  cargo run -p app -- status [--api-url <url>] [--token <token>] [--in-memory]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {DEFAULT_API_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  JOURNEY_API_URL, JOURNEY_API_TOKEN, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Status,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut config = ApiConfig::from_env();
        let mut in_memory = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    config.base_url = value;
                }
                "--token" => {
                    let value = require_value(args, "--token")?;
                    config = config.with_token(Some(value));
                }
                "--in-memory" => in_memory = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let backend = if in_memory {
            Backend::InMemory
        } else {
            Backend::Http(config)
        };
        Ok(Self { backend })
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Print the server-side journey state as JSON.
async fn print_status(journey: &JourneyService, backend: &Backend) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = journey.load_snapshot().await?;
    let mut state = JourneyState::new();
    state.resume_from(&snapshot.progress);

    let report = serde_json::json!({
        "api": backend.label(),
        "view": snapshot.view(&state),
        "progress": snapshot.progress_summary(),
        "percentComplete": snapshot.progress_summary().percent_rounded(),
        "snapshot": snapshot,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    let clock = Clock::default_clock();
    let services = parsed.backend.services(clock)?;
    info!(api = %parsed.backend.label(), command = ?cmd, "journey backend ready");

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                journey: services.journey(),
                api_label: parsed.backend.label(),
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Bible in a Day")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Status => print_status(&services.journey(), &parsed.backend).await,
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
