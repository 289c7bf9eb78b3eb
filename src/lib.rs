pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod providers;
pub mod repl;
pub mod session;

use anyhow::{Context, Result};
use reqwest::Client;
use std::env;
use std::io;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::info;

use config::Config;
use repl::{GOODBYE, print_banner, run_repl};
use session::ConversationSession;

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cfg = Config::from_env();
    info!(
        region = %cfg.region,
        model = %cfg.model_id,
        endpoint = %cfg.endpoint_base(),
        token_present = cfg.bearer_token.is_some(),
        timeout_secs = ?cfg.timeout_secs,
        "loaded runtime configuration"
    );
    let client = build_client(&cfg)?;

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        run_interactive(client, &cfg).await
    } else {
        let mut session = new_session(client, &cfg)?;
        let prompt = args.join(" ");
        let answer = session.send_turn(&prompt).await?;
        println!("{}", answer.trim());
        Ok(())
    }
}

fn build_client(cfg: &Config) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = cfg.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().context("Failed to initialize HTTP client")
}

fn new_session(client: Client, cfg: &Config) -> Result<ConversationSession> {
    ConversationSession::new(client, cfg)
        .context("Error initializing chatbot; check your API key and AWS configuration")
}

async fn run_interactive(client: Client, cfg: &Config) -> Result<()> {
    let mut stdout = io::stdout();
    print_banner(&mut stdout, &cfg.model_id)?;

    let mut session = new_session(client, cfg)?;
    println!("Connected to AWS Bedrock successfully!\n");

    let stdin = BufReader::new(tokio::io::stdin());
    tokio::select! {
        result = run_repl(&mut session, stdin, &mut stdout) => result,
        _ = tokio::signal::ctrl_c() => {
            println!("\n\n{GOODBYE}\n");
            // The pending stdin read would otherwise hold the runtime open.
            std::process::exit(0);
        }
    }
}
