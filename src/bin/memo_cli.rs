use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;

use memos::{
    config::Config,
    db::MemoRepository,
    models::ViewResponse,
    services::CouchDbClient,
};

/// Search, list, save and remove memos in the configured database
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Overrides MEMO_DB_NAME
    #[arg(long)]
    database: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all memos, newest first
    List,
    /// Full-text search
    Search {
        query: String,
    },
    /// Save a memo given as a JSON object
    Save {
        document: String,
    },
    /// Remove a memo revision
    Remove {
        id: String,
        rev: String,
    },
}

fn print_rows(response: &ViewResponse) -> Result<()> {
    for row in &response.rows {
        println!("{}", serde_json::to_string(row)?);
    }
    println!("{} memo(s)", response.rows.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,memos=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(database) = args.database {
        config.memo_db_name = database;
    }

    let client = CouchDbClient::new(config.couchdb())?;
    let memos = MemoRepository::new(Arc::new(client));

    match args.command {
        Command::List => print_rows(&memos.list().await?)?,
        Command::Search { query } => print_rows(&memos.search(&query).await?)?,
        Command::Save { document } => {
            let doc: serde_json::Value =
                serde_json::from_str(&document).context("Memo must be valid JSON")?;
            if !doc.is_object() {
                return Err(anyhow!("Memo must be a JSON object"));
            }
            let saved = memos.save(&doc).await?;
            println!("Saved {} at revision {}", saved.id, saved.rev);
        }
        Command::Remove { id, rev } => {
            let removed = memos.remove(&id, &rev).await?;
            println!("Removed {} (revision {})", removed.id, removed.rev);
        }
    }

    Ok(())
}
