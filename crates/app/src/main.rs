use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, Clock, FlashcardService, FlashcardsModeService, NewUser, StudySetService,
    UserServiceError,
};
use storage::repository::Storage;
use study_core::model::UserId;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://dev.sqlite3";

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "demo-password";
const DEMO_SET_TITLE: &str = "Spanish basics";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidViewer { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidViewer { raw } => write!(f, "invalid --viewer value: {raw}"),
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
    viewer: Option<UserId>,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn viewer(&self) -> Option<UserId> {
        self.viewer
    }

    fn study_sets(&self) -> Arc<StudySetService> {
        self.services.study_sets()
    }

    fn flashcards(&self) -> Arc<FlashcardService> {
        self.services.flashcards()
    }

    fn flashcards_mode(&self) -> Arc<FlashcardsModeService> {
        self.services.flashcards_mode()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--db <sqlite_url>] [--viewer <user_id>]");
    eprintln!("  cargo run -p app -- seed [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --viewer (none: browse anonymously)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_DB_URL, STUDY_VIEWER_ID, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

/// Values taken from the environment before flags are applied.
#[derive(Debug, Clone, Default)]
struct EnvDefaults {
    db_url: Option<String>,
    viewer: Option<String>,
}

impl EnvDefaults {
    fn from_env() -> Self {
        Self {
            db_url: std::env::var("STUDY_DB_URL").ok(),
            viewer: std::env::var("STUDY_VIEWER_ID").ok(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(Args),
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    viewer: Option<UserId>,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        defaults: EnvDefaults,
    ) -> Result<Parsed, ArgsError> {
        let mut db_url = defaults
            .db_url
            .map_or_else(|| DEFAULT_DB_URL.to_string(), normalize_sqlite_url);
        let mut viewer = match defaults.viewer {
            Some(raw) if !raw.trim().is_empty() => Some(parse_viewer(raw)?),
            _ => None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--viewer" => {
                    let value = require_value(args, "--viewer")?;
                    viewer = Some(parse_viewer(value)?);
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self { db_url, viewer }))
    }
}

fn parse_viewer(raw: String) -> Result<UserId, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidViewer { raw })
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

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Creates (or reuses) the demo account and gives it a small study set.
async fn seed(services: &AppServices) -> Result<UserId, Box<dyn std::error::Error>> {
    let users = services.users();
    let owner = match users
        .create(NewUser {
            name: "Demo Learner".to_string(),
            email: DEMO_EMAIL.to_string(),
            birthday: NaiveDate::from_ymd_opt(2000, 1, 1).ok_or("invalid demo birthday")?,
            password: DEMO_PASSWORD.to_string(),
        })
        .await
    {
        Ok(profile) => profile,
        Err(UserServiceError::EmailTaken) => {
            users.verify_password(DEMO_EMAIL, DEMO_PASSWORD).await?
        }
        Err(err) => return Err(err.into()),
    };

    let existing = services.study_sets().list_for_owner(owner.id, 100).await?;
    if let Some(set) = existing.iter().find(|set| set.title() == DEMO_SET_TITLE) {
        info!(user = %owner.id, study_set = %set.id(), "demo data already present");
        return Ok(owner.id);
    }

    let set = services
        .study_sets()
        .create(
            owner.id,
            DEMO_SET_TITLE.to_string(),
            Some("Everyday words to get started.".to_string()),
        )
        .await?;
    let cards = [
        ("hola", "hello"),
        ("gracias", "thank you"),
        ("por favor", "please"),
        ("agua", "water"),
        ("casa", "house"),
    ];
    for (term, definition) in cards {
        services
            .flashcards()
            .create(owner.id, set.id(), term, definition)
            .await?;
    }
    info!(user = %owner.id, study_set = %set.id(), cards = cards.len(), "seeded demo data");
    Ok(owner.id)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

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
    let parsed = match Args::parse(&mut iter, EnvDefaults::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })? {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    init_tracing();

    // Open + migrate SQLite before the UI starts. The desktop launcher runs its
    // own runtime, so this one must not be entered while launching.
    prepare_sqlite_file(&parsed.db_url)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let storage = runtime.block_on(Storage::sqlite(&parsed.db_url))?;
    let services = AppServices::from_storage(&storage, Clock::system());
    info!(db = %parsed.db_url, "storage ready");

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                viewer: parsed.viewer,
                services,
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Study")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            let viewer = runtime.block_on(seed(&services))?;
            println!("{viewer}");
            eprintln!("Start the app as this user with: --viewer {viewer}");
            Ok(())
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
