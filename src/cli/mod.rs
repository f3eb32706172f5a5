//! Command-line interface parsing and the interactive session loop.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::api::reply::ReplyClient;
use crate::api::sentiment::SentimentClient;
use crate::core::config::Config;
use crate::core::handoff;
use crate::core::history::TranscriptStore;
use crate::core::session::SessionOrchestrator;
use crate::ui::TerminalSink;

#[derive(Parser)]
#[command(name = "kaiwa")]
#[command(about = "A visual-novel style chat client with a sentiment-driven portrait")]
#[command(
    long_about = "Kaiwa is a terminal chat client in the style of a visual novel: a character \
portrait reacts to the sentiment of each message while a backend service generates the \
character's replies. Conversations can be saved to timestamped history files and resumed \
later.\n\n\
Commands:\n\
  /save             Save the current conversation\n\
  /load <file>      Restore a saved conversation\n\
  /sessions         List saved history files\n\
  /clear            Discard the current conversation\n\
  /quit             Exit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Chat history file to resume on startup
    #[arg(short = 'l', long, value_name = "FILE")]
    pub load: Option<PathBuf>,

    /// Path to an alternate config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the sentiment endpoint URL
    #[arg(long, value_name = "URL")]
    pub sentiment_url: Option<String>,

    /// Override the chat endpoint URL
    #[arg(long, value_name = "URL")]
    pub chat_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List saved chat history files
    Sessions,
}

pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(url) = args.sentiment_url {
        config.sentiment_url = url;
    }
    if let Some(url) = args.chat_url {
        config.chat_url = url;
    }

    let store = TranscriptStore::new(config.history_dir());

    if let Some(Commands::Sessions) = args.command {
        let files = store.list();
        if files.is_empty() {
            println!("No saved chat histories in {}", store.dir().display());
        } else {
            for path in files {
                println!("{}", path.display());
            }
        }
        return Ok(());
    }

    // The --load flag is a producer for the same handoff slot a title
    // screen would use; the session consumes it once on startup.
    if let Some(path) = args.load {
        handoff::set(path);
    }

    let client = reqwest::Client::new();
    let sentiment = SentimentClient::new(client.clone(), config.sentiment_url.clone());
    let reply = ReplyClient::new(client, config.chat_url.clone());
    let sink = TerminalSink::new(config.show_timestamps);

    let mut session = SessionOrchestrator::new(
        Box::new(sentiment),
        Box::new(reply),
        store,
        Box::new(sink),
        config.clear_on_load,
    );

    session.resume_pending_selection();

    run_loop(&mut session).await
}

async fn run_loop(session: &mut SessionOrchestrator) -> Result<(), Box<dyn Error>> {
    println!("Type a message and press Enter. /quit to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => session.clear(),
            "/save" => {
                session.save();
            }
            "/sessions" => {
                for path in session.store().list() {
                    println!("{}", path.display());
                }
            }
            "/load" => println!("Usage: /load <file>"),
            _ if input.starts_with("/load ") => {
                let path = input["/load ".len()..].trim();
                session.load(Path::new(path));
            }
            _ if input.starts_with('/') => {
                println!("Unknown command: {input}");
            }
            _ => session.submit_turn(input).await,
        }
    }

    Ok(())
}
