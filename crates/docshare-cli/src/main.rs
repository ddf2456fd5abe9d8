//! Docshare CLI - search, read and rate shared documents from a terminal.
//!
//! Commands:
//!   login [email]          sign in with email and password
//!   otp <email>            sign in with a one-time code
//!   logout                 forget the stored session
//!   search [query] [-p N]  search documents
//!   show <id>              show one document
//!   rate <id> <stars>      rate a document from 1 to 5
//!   get <path>             print any API resource as JSON

mod hooks;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use docshare_core::auth::KeyringCredentialStore;
use docshare_core::models::Document;
use docshare_core::session::SessionHooks;
use docshare_core::{ApiClient, Config};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hooks::{ConsoleAlerts, ConsoleNavigator, ConsoleNotifier};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn build_client(config: &Config) -> Result<ApiClient> {
    let client_config = config.client_config()?;
    let hooks = SessionHooks::new(
        Arc::new(ConsoleNotifier),
        Arc::new(ConsoleNavigator),
        Arc::new(ConsoleAlerts),
    );
    let client = ApiClient::new(
        &client_config,
        Arc::new(KeyringCredentialStore::new()),
        hooks,
    )?;
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    let mut config = Config::load()?;
    let client = build_client(&config)?;
    info!(command = %command, "docshare starting");

    match command.as_str() {
        "login" => {
            let email = match args.get(1).or(config.last_email.as_ref()) {
                Some(email) => email.clone(),
                None => prompt("Email: ")?,
            };
            let password =
                rpassword::prompt_password("Password: ").context("Failed to read password")?;
            let auth = client.login(&email, &password).await?;
            println!("Signed in as {}", auth.user.display_name());
            remember_email(&mut config, &email)?;
        }
        "otp" => {
            let email = args.get(1).context("Usage: docshare otp <email>")?;
            client.request_otp(email).await?;
            let code = prompt("Code sent. Enter the code: ")?;
            let auth = client.verify_otp(email, &code).await?;
            println!("Signed in as {}", auth.user.display_name());
            remember_email(&mut config, email)?;
        }
        "logout" => {
            client.logout().await?;
            println!("Signed out");
        }
        "search" => {
            let (query, page) = parse_search_args(&args[1..])?;
            let results = client.search_documents(&query, page).await?;
            for doc in &results.items {
                print_row(doc);
            }
            println!(
                "Page {} - {} of {} documents",
                results.page,
                results.items.len(),
                results.total
            );
        }
        "show" => {
            let id = parse_id(args.get(1))?;
            let doc = client.fetch_document(id).await?;
            print_document(&doc);
        }
        "rate" => {
            let id = parse_id(args.get(1))?;
            let stars: u8 = args
                .get(2)
                .context("Usage: docshare rate <id> <stars>")?
                .parse()
                .context("Stars must be a number from 1 to 5")?;
            let summary = client.rate_document(id, stars).await?;
            println!(
                "Thanks! Average rating is now {:.1} ({} ratings)",
                summary.average_rating, summary.rating_count
            );
        }
        "get" => {
            let path = args.get(1).context("Usage: docshare get <path>")?;
            let value: serde_json::Value = client.get(path).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        other => {
            print_usage();
            bail!("Unknown command: {}", other);
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!(
        "Usage: docshare <command>\n\n\
         Commands:\n  \
         login [email]          sign in with email and password\n  \
         otp <email>            sign in with a one-time code\n  \
         logout                 forget the stored session\n  \
         search [query] [-p N]  search documents\n  \
         show <id>              show one document\n  \
         rate <id> <stars>      rate a document from 1 to 5\n  \
         get <path>             print any API resource as JSON"
    );
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn remember_email(config: &mut Config, email: &str) -> Result<()> {
    if config.last_email.as_deref() != Some(email) {
        config.last_email = Some(email.to_string());
        config.save()?;
    }
    Ok(())
}

fn parse_id(arg: Option<&String>) -> Result<i64> {
    arg.context("Missing document id")?
        .parse()
        .context("Document id must be a number")
}

fn parse_search_args(args: &[String]) -> Result<(String, u32)> {
    let mut words = Vec::new();
    let mut page = 1;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "-p" || arg == "--page" {
            page = iter
                .next()
                .context("Missing page number")?
                .parse()
                .context("Page must be a number")?;
        } else {
            words.push(arg.as_str());
        }
    }
    Ok((words.join(" "), page))
}

fn print_row(doc: &Document) {
    println!(
        "{:>6}  {:<50}  {:>10}  {}",
        doc.id,
        doc.title,
        doc.rating_display(),
        doc.subject.as_deref().unwrap_or("")
    );
}

fn print_document(doc: &Document) {
    println!("{}", doc.title);
    if let Some(ref author) = doc.author_name {
        println!("By {}", author);
    }
    if let Some(ref subject) = doc.subject {
        println!("Subject: {}", subject);
    }
    println!("Rating: {}", doc.rating_display());
    println!("Downloads: {}", doc.download_count);
    if let Some(created) = doc.created_at {
        println!("Uploaded: {}", created.format("%Y-%m-%d"));
    }
    if let Some(ref description) = doc.description {
        println!("\n{}", description);
    }
    if let Some(ref url) = doc.file_url {
        println!("\nFile: {}", url);
    }
}
