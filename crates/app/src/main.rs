mod logging;

use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    ApiConfig, AppServices, ClearProgressService, Clock, DashboardService, LearningProgressStore,
    PageLoading, StaticProgressApi,
};
use storage::repository::Storage;
use ui::{App, Translations, UiApp, build_app_context};

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_DB_URL: &str = "sqlite:progress.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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
    clock: Clock,
    translations: Arc<Translations>,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn clock(&self) -> Clock {
        self.clock
    }

    fn translations(&self) -> Arc<Translations> {
        Arc::clone(&self.translations)
    }

    fn clear_progress(&self) -> Arc<ClearProgressService> {
        self.services.clear_progress()
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        self.services.dashboard()
    }

    fn learning_store(&self) -> Arc<dyn LearningProgressStore> {
        self.services.learning_store()
    }

    fn page_loading(&self) -> Arc<dyn PageLoading> {
        self.services.page_loading()
    }
}

#[derive(Debug)]
struct Args {
    api_url: String,
    token: Option<String>,
    db_url: String,
    locale: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- ui   [--api-url <url>] [--token <token>] [--db <sqlite_url>] [--locale <path>]"
    );
    eprintln!("  cargo run -p app -- demo [--locale <path>]");
    eprintln!();
    eprintln!("Defaults for ui:");
    eprintln!("  --api-url {DEFAULT_API_URL}");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PROGRESS_API_URL, PROGRESS_API_TOKEN, PROGRESS_DB_URL, PROGRESS_LOCALE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Demo,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "demo" => Some(Self::Demo),
            _ => None,
        }
    }
}

impl Args {
    fn from_env() -> Self {
        Self {
            api_url: std::env::var("PROGRESS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
            token: std::env::var("PROGRESS_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            db_url: std::env::var("PROGRESS_DB_URL")
                .ok()
                .map_or_else(default_db_url, normalize_sqlite_url),
            locale: std::env::var("PROGRESS_LOCALE").ok(),
        }
    }

    fn parse(
        args: &mut impl Iterator<Item = String>,
        defaults: Self,
    ) -> Result<Self, ArgsError> {
        let mut parsed = defaults;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    if !value.starts_with("http://") && !value.starts_with("https://") {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    parsed.api_url = value;
                }
                "--token" => {
                    parsed.token = Some(require_value(args, "--token")?);
                }
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--locale" => {
                    parsed.locale = Some(require_value(args, "--locale")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api_url.clone()).with_token(self.token.clone())
    }
}

/// `progress.sqlite3` in the working directory.
fn default_db_url() -> String {
    normalize_sqlite_url(DEFAULT_DB_URL.into())
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn load_translations(locale: Option<&str>) -> Result<Translations, Box<dyn std::error::Error>> {
    let Some(path) = locale else {
        return Ok(Translations::english());
    };
    let json = std::fs::read_to_string(path)?;
    let translations = Translations::english_with_overrides(&json)?;
    tracing::info!(path, "loaded translation overrides");
    Ok(translations)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Launch the UI when no subcommand is given.
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
    let parsed = Args::parse(&mut iter, Args::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let clock = Clock::system();
    let translations = Arc::new(load_translations(parsed.locale.as_deref())?);

    let services = match cmd {
        Command::Ui => {
            prepare_sqlite_file(&parsed.db_url)?;
            tracing::info!(api = %parsed.api_url, db = %parsed.db_url, "starting progress ui");
            AppServices::new_sqlite(&parsed.db_url, parsed.api_config()).await?
        }
        Command::Demo => {
            tracing::info!("starting progress ui with sample data");
            let api = StaticProgressApi::demo(clock.now())?;
            AppServices::from_parts(&Storage::in_memory(), Arc::new(api))
        }
    };

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        clock,
        translations,
        services,
    });
    let context = build_app_context(&app);

    // Some dev setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Progress")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    logging::init();
    if let Err(err) = run().await {
        tracing::error!(error = %err, "progress app failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
