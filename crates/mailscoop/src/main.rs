//! `MailScoop` - download Gmail attachments from the last N days.
//!
//! One batch operation: authenticate, enumerate messages received within
//! the window, skip messages already in the ledger, save each attachment
//! to the download directory, and record the processed slugs.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mailscoop_core::{Ledger, download_recent_attachments, load_or_refresh_token};
use mailscoop_gmail::GmailClient;
use mailscoop_oauth::{InstalledCredentials, OAuthClient, Token, TokenStore};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// How many days back to search.
    #[arg(long, short = 'n', env = "MAILSCOOP_DAYS", default_value_t = 2)]
    days: u32,

    /// Directory attachment files are written into.
    #[arg(
        long,
        short = 'd',
        env = "MAILSCOOP_DOWNLOAD_DIR",
        default_value = "attachments"
    )]
    download_dir: PathBuf,

    /// Google installed-app credentials file.
    #[arg(long, env = "MAILSCOOP_CREDENTIALS", default_value = "credentials.json")]
    credentials: PathBuf,

    /// Where the OAuth token is persisted between runs.
    #[arg(long, env = "MAILSCOOP_TOKEN_FILE", default_value = "token.json")]
    token_file: PathBuf,

    /// Ledger file recording already-processed messages.
    #[arg(
        long,
        env = "MAILSCOOP_LEDGER",
        default_value = mailscoop_core::DEFAULT_LEDGER_FILE
    )]
    ledger: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailscoop=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    info!("Starting MailScoop");

    let credentials = InstalledCredentials::load(&args.credentials)
        .with_context(|| format!("load credentials from {}", args.credentials.display()))?;
    let client = OAuthClient::new(credentials).with_pkce();
    let store = TokenStore::new(&args.token_file);

    let token = match load_or_refresh_token(&client, &store).await? {
        Some(token) => token,
        None => authorize_interactively(&client, &store).await?,
    };

    let mailbox = GmailClient::new(token.access_token);
    let ledger = Ledger::new(&args.ledger);

    let report =
        download_recent_attachments(&mailbox, &ledger, args.days, &args.download_dir).await?;

    println!(
        "OK fetched={} skipped={} attachments_saved={} dir={}",
        report.fetched,
        report.skipped,
        report.attachments_saved,
        args.download_dir.display()
    );
    Ok(())
}

/// Walks the user through the one-time browser consent step.
///
/// Prints the authorization URL, reads the redirected code from stdin,
/// exchanges it, and persists the resulting token for future runs.
async fn authorize_interactively(client: &OAuthClient, store: &TokenStore) -> Result<Token> {
    let state = format!("mailscoop-{}", chrono::Utc::now().timestamp());
    let auth_url = client.authorization_url(Some(&state))?;

    println!("Visit this URL to authorize MailScoop:");
    println!("\n{auth_url}\n");
    print!("Enter the authorization code from the redirect URL: ");
    io::stdout().flush()?;

    let mut code = String::new();
    io::stdin().read_line(&mut code)?;
    let code = code.trim();
    if code.is_empty() {
        bail!("no authorization code entered");
    }

    let token = client
        .exchange_code(code)
        .await
        .context("exchange authorization code")?;
    store.save(&token).context("store token")?;
    info!("authorization complete");
    Ok(token)
}
