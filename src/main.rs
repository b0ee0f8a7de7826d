use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use github_tools::cli::{self, Cli, Command};
use github_tools::github::GithubClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        eprintln!("{}", Cli::command().render_help());
        return Ok(());
    };

    dotenvy::dotenv().ok();

    // Resolve token: --token > --token-env > GITHUB_TOKEN
    let env_name = cli.token_env.as_deref().unwrap_or("GITHUB_TOKEN");
    let token = match cli.token {
        Some(t) => Some(t),
        None => match std::env::var(env_name) {
            Ok(t) if !t.is_empty() => {
                tracing::info!(env = env_name, "Read GitHub token from environment variable");
                Some(t)
            }
            _ => None,
        },
    };

    let Some(token) = token else {
        tracing::error!(env = env_name, "GitHub token not found in environment variables");
        return Ok(());
    };

    let github = octocrab::OctocrabBuilder::new()
        .personal_token(token)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create GitHub client: {}", e))?;
    let client = GithubClient::new(github);

    if let Err(err) = execute(command, &client).await {
        let body = serde_json::json!({
            "error": format!("An unexpected error occurred: {}", err),
        });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".to_string())
        );
    }

    Ok(())
}

/// Dispatch the command and render the result: pretty-printed JSON on stdout
/// for success, a `{"error": ...}` object on stderr for client failures.
async fn execute(command: Command, client: &GithubClient) -> Result<()> {
    match cli::run(command, client).await {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(err) => {
            let body = serde_json::json!({ "error": err.to_string() });
            eprintln!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}
