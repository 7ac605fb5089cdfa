//! Account CLI - Drive the e-commerce account flows from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Where would the app start?
//! account-cli session
//!
//! # Create an account, then confirm it with the emailed code
//! account-cli signup --name "Asha Rao" --email asha@example.in --phone 9876543210 \
//!     --password 'Abcdef1!' --confirm-password 'Abcdef1!'
//! account-cli verify 482913
//!
//! # Log in (password may also come from ACCOUNT_PASSWORD)
//! account-cli login -e asha@example.in -p 'Abcdef1!'
//!
//! # Show or edit the profile
//! account-cli profile show
//! account-cli profile edit --country US --state Texas --postcode 73301
//!
//! account-cli logout
//! ```
//!
//! Configuration comes from the environment (see `ecom_account_client::config`).
//! Notifications and navigation are reported through the log.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecom_account_client::ClientConfig;

mod commands;
mod terminal;

use commands::CommandError;
use commands::profile::ProfileChanges;

#[derive(Parser)]
#[command(name = "account-cli")]
#[command(author, version, about = "E-commerce account CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check for a saved session and report the starting screen
    Session,
    /// Log in and save the session token
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "ACCOUNT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a new account
    Signup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Ten-digit phone number
        #[arg(long)]
        phone: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },
    /// Confirm a new account with its verification code
    Verify {
        /// Code from the signup response
        code: String,
    },
    /// View or edit the signed-in profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Clear the saved session
    Logout,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the current profile
    Show,
    /// Change profile fields and save
    Edit(ProfileChanges),
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ecom_account_client=info,ecom_account_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = run(cli, &config).await {
        // Notified failures were already logged by the terminal notifier.
        if e.is_notified() {
            tracing::debug!(error = ?e, "Command failed");
        } else {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ClientConfig) -> Result<(), CommandError> {
    let app = commands::app(config)?;

    match cli.command {
        Commands::Session => commands::auth::session(&app),
        Commands::Login { email, password } => {
            commands::auth::login(&app, &email, &password).await?;
        }
        Commands::Signup {
            name,
            email,
            phone,
            password,
            confirm_password,
        } => {
            let form = ecom_account_core::SignUpForm {
                name,
                email,
                phone,
                password,
                confirm_password,
            };
            commands::auth::sign_up(&app, &form).await?;
        }
        Commands::Verify { code } => commands::auth::verify(&app, &code).await?,
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(&app).await?,
            ProfileAction::Edit(changes) => commands::profile::edit(&app, &changes).await?,
        },
        Commands::Logout => commands::auth::logout(&app)?,
    }
    Ok(())
}
