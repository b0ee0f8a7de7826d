use clap::{Parser, Subcommand};

use crate::error::Error;
use crate::github::GithubClient;

/// Read-only GitHub client: list repositories you can push to, browse a
/// repository's file tree, and fetch decoded file contents
#[derive(Debug, Parser)]
#[command(name = "github-tools", version, about)]
pub struct Cli {
    /// GitHub personal access token.
    /// Can also be set via GITHUB_TOKEN environment variable.
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Read GitHub token from an environment variable.
    /// Default: GITHUB_TOKEN
    #[arg(long = "token-env", global = true)]
    pub token_env: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List repositories the authenticated user can push to
    ListRepos,

    /// List all files in a repository's default branch
    ListFiles {
        /// Repository full name, e.g. `octocat/hello-world`
        repo: String,
    },

    /// Print the decoded content of a single file from the default branch
    GetFileContent {
        /// Repository full name, e.g. `octocat/hello-world`
        repo: String,

        /// File path within the repository, e.g. `src/main.rs`
        path: String,
    },
}

/// Map a command to its client operation and convert the result to JSON.
pub async fn run(command: Command, client: &GithubClient) -> Result<serde_json::Value, Error> {
    let value = match command {
        Command::ListRepos => serde_json::to_value(client.pushable_repositories().await?)?,
        Command::ListFiles { repo } => serde_json::to_value(client.list_files(&repo).await?)?,
        Command::GetFileContent { repo, path } => {
            serde_json::to_value(client.file_content(&repo, &path).await?)?
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_repos() {
        let cli = Cli::try_parse_from(["github-tools", "list-repos"]).expect("should parse");
        assert!(matches!(cli.command, Some(Command::ListRepos)));
    }

    #[test]
    fn test_parse_list_files() {
        let cli = Cli::try_parse_from(["github-tools", "list-files", "acme/repo"])
            .expect("should parse");
        match cli.command {
            Some(Command::ListFiles { repo }) => assert_eq!(repo, "acme/repo"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_files_requires_repo() {
        assert!(Cli::try_parse_from(["github-tools", "list-files"]).is_err());
    }

    #[test]
    fn test_parse_get_file_content() {
        let cli = Cli::try_parse_from([
            "github-tools",
            "get-file-content",
            "acme/repo",
            "src/main.rs",
        ])
        .expect("should parse");
        match cli.command {
            Some(Command::GetFileContent { repo, path }) => {
                assert_eq!(repo, "acme/repo");
                assert_eq!(path, "src/main.rs");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_get_file_content_requires_path() {
        assert!(Cli::try_parse_from(["github-tools", "get-file-content", "acme/repo"]).is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(Cli::try_parse_from(["github-tools", "delete-repo", "acme/repo"]).is_err());
    }

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["github-tools"]).expect("should parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_token_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["github-tools", "list-repos", "--token", "t0ken"])
            .expect("should parse");
        assert_eq!(cli.token.as_deref(), Some("t0ken"));
    }
}
