//! `fraudshield` -- command-line Fraud Shield dashboard.
//!
//! Talks to the backend at `API_URL`; when it cannot be reached every
//! command keeps working against a local simulation (demo mode).
//!
//! # Environment variables
//!
//! | Variable               | Default                 | Description                          |
//! |------------------------|-------------------------|--------------------------------------|
//! | `API_URL`              | `http://localhost:8000` | Backend base URL                     |
//! | `REQUEST_TIMEOUT_SECS` | `30`                    | Per-call timeout                     |
//! | `PROBE_TIMEOUT_MS`     | `1500`                  | Connectivity probe timeout           |
//! | `SESSION_DIR`          | `.fraudshield`          | Where the signed-in user is stored   |
//! | `DEMO_PAY_DELAY_MS`    | `1000`                  | Simulated payment latency            |
//! | `DEMO_UPLOAD_DELAY_MS` | `1500`                  | Simulated upload latency             |
//! | `ANIMATION_MS`         | `1000`                  | Counter animation length             |

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fraudshield_client::backend::BackendSelector;
use fraudshield_client::config::ClientConfig;
use fraudshield_client::flow::payment::PaymentController;
use fraudshield_client::flow::{self, FlowError};
use fraudshield_client::render;
use fraudshield_client::session::SessionStore;
use fraudshield_core::auth::{LoginRequest, RegisterRequest, ResetPasswordRequest};
use fraudshield_core::format::format_inr;
use fraudshield_core::transaction::TransactionForm;
use fraudshield_core::types::Mode;

const DEMO_NOTICE: &str = "⚠️ Backend Disconnected. Entering Demo Mode.";
const SIGNUP_NOTICE: &str = "Account Created! Please Login.";
const RESET_NOTICE: &str = "Password Reset Successful! Please Login.";

#[derive(Parser)]
#[command(name = "fraudshield")]
#[command(about = "Fraud Shield payment dashboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Set a new password
    ResetPassword {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user's balance
    Balance,
    /// Send a payment and show the fraud verdict
    Pay {
        #[arg(long)]
        merchant: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        category: String,
        /// Local time as `YYYY-MM-DDTHH:MM`; defaults to now
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Dashboard counters, recent alerts and hourly volume
    Stats,
    /// Analyse a CSV of transactions
    Upload { file: PathBuf },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fraudshield=info,fraudshield_client=info".into());
    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt.json())
            .init();
    } else {
        tracing_subscriber::registry().with(env_filter).with(fmt).init();
    }

    if let Err(e) = run(cli.command).await {
        let message = match e.downcast_ref::<FlowError>() {
            Some(flow_error) => flow_error.user_message(),
            None => format!("{e:#}"),
        };
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

async fn run(command: Command) -> anyhow::Result<()> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(api_url = %config.api_url, session_dir = %config.session_dir.display(), "Loaded configuration");

    let selector = BackendSelector::from_config(&config)?;
    let store = SessionStore::new(&config.session_dir);
    let mut out = std::io::stdout();

    match command {
        Command::Login { username, password } => {
            let request = LoginRequest { username, password };
            let outcome = flow::auth::login(&selector, store, &request).await?;
            notify_demo(&mut out, outcome.mode)?;
            let user = outcome.value.snapshot().await;
            writeln!(out, "Welcome, {}", user.full_name)?;
            writeln!(out, "Balance: {}", format_inr(user.balance))?;
        }
        Command::Signup {
            full_name,
            username,
            password,
        } => {
            let request = RegisterRequest {
                full_name,
                username,
                password,
            };
            let outcome = flow::auth::signup(&selector, &request).await?;
            notify_demo(&mut out, outcome.mode)?;
            writeln!(out, "{SIGNUP_NOTICE}")?;
        }
        Command::ResetPassword { username, password } => {
            let request = ResetPasswordRequest { username, password };
            let outcome = flow::auth::reset_password(&selector, &request).await?;
            notify_demo(&mut out, outcome.mode)?;
            writeln!(out, "{RESET_NOTICE}")?;
        }
        Command::Logout => {
            if flow::auth::logout(store).await? {
                writeln!(out, "Logged out.")?;
            } else {
                writeln!(out, "No active session.")?;
            }
        }
        Command::Balance => {
            let session = flow::auth::require_session(store).await?;
            let user = session.snapshot().await;
            writeln!(out, "{} ({})", user.full_name, user.username)?;
            writeln!(out, "Balance: {}", format_inr(user.balance))?;
        }
        Command::Pay {
            merchant,
            amount,
            category,
            timestamp,
        } => {
            let session = Arc::new(flow::auth::require_session(store).await?);
            let controller = PaymentController::new(session, selector);
            let form = TransactionForm {
                merchant,
                amount,
                category,
                timestamp,
            };
            let receipt = controller.submit(&form).await?;
            render::print_receipt(&mut out, &receipt, config.animation).await?;
        }
        Command::Stats => {
            flow::auth::require_session(store).await?;
            let outcome = flow::stats::load_dashboard(&selector).await?;
            render::print_dashboard(&mut out, &outcome.value, outcome.mode, config.animation)
                .await?;
        }
        Command::Upload { file } => {
            flow::auth::require_session(store).await?;
            writeln!(out, "Analyzing...")?;
            let outcome = flow::upload::upload_file(&selector, &file).await?;
            writeln!(out, "{}", render::upload_line(&outcome.value, outcome.mode))?;
            for row in &outcome.value.preview {
                writeln!(out, "  {} | {} | {}", row.merchant, format_inr(row.amount), row.risk)?;
            }
        }
    }
    Ok(())
}

fn notify_demo(out: &mut impl Write, mode: Mode) -> std::io::Result<()> {
    if mode.is_demo() {
        writeln!(out, "{DEMO_NOTICE}")?;
    }
    Ok(())
}
