use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Minimal view of a `GET /user/repos` element. Unknown upstream fields are
/// ignored; `permissions.push` drives the listing filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "fallback_branch")]
    pub default_branch: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub permissions: Permissions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub push: bool,
}

/// Minimal view of `GET /repos/{full_name}`, used to resolve the default branch.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub full_name: String,
    #[serde(default = "fallback_branch")]
    pub default_branch: String,
}

/// Recursive tree listing. A payload without a `tree` field decodes as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeResponse {
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: String,
}

/// One file or directory in a repository listing.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub path: String,
}

impl From<TreeEntry> for FileEntry {
    fn from(entry: TreeEntry) -> Self {
        Self {
            name: basename(&entry.path).to_string(),
            entry_type: entry.entry_type,
            path: entry.path,
        }
    }
}

/// Minimal view of `GET /repos/{full_name}/contents/{path}`. The `content`
/// field is absent when the path does not resolve to a file on the ref.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentResponse {
    pub path: String,
    #[serde(default)]
    pub content: Option<String>,
    pub url: String,
}

/// A file with its content decoded to UTF-8 text.
#[derive(Debug, Clone, Serialize)]
pub struct FileContent {
    pub path: String,
    pub content: String,
    pub url: String,
}

/// Authenticated GitHub client exposing the read operations of this tool.
pub struct GithubClient {
    github: octocrab::Octocrab,
}

impl GithubClient {
    pub fn new(github: octocrab::Octocrab) -> Self {
        Self { github }
    }

    /// Fetch repository metadata via `GET /repos/{full_name}`.
    pub async fn repository_details(&self, full_name: &str) -> Result<Repository, Error> {
        sanitize_repo_name(full_name)?;

        let route = format!("/repos/{}", full_name);
        let repo: Repository = self.github.get(route, None::<&()>).await?;

        tracing::debug!(
            repo = %repo.full_name,
            branch = %repo.default_branch,
            "Fetched repository details"
        );
        Ok(repo)
    }

    /// Repositories of the authenticated user, filtered to those it can push to.
    pub async fn pushable_repositories(&self) -> Result<Vec<RepositorySummary>, Error> {
        let repos: Vec<RepositorySummary> = self.github.get("/user/repos", None::<&()>).await?;
        Ok(retain_pushable(repos))
    }

    /// Every blob and tree reachable from the default branch, flattened and in
    /// the order the API returns them.
    pub async fn list_files(&self, full_name: &str) -> Result<Vec<FileEntry>, Error> {
        let details = match self.repository_details(full_name).await {
            Ok(details) => details,
            Err(err @ Error::InvalidParam(_)) => return Err(err),
            Err(_) => return Err(Error::RepoNotFound),
        };

        let route = format!(
            "/repos/{}/git/trees/{}?recursive=1",
            full_name, details.default_branch
        );
        let listing: TreeResponse = self
            .github
            .get(route, None::<&()>)
            .await
            .map_err(Error::ListFiles)?;

        Ok(listing.tree.into_iter().map(FileEntry::from).collect())
    }

    /// Fetch one file from the default branch and decode its content.
    pub async fn file_content(&self, full_name: &str, file_path: &str) -> Result<FileContent, Error> {
        sanitize_file_path(file_path)?;

        let details = match self.repository_details(full_name).await {
            Ok(details) => details,
            Err(err @ Error::InvalidParam(_)) => return Err(err),
            Err(_) => return Err(Error::RepoNotFound),
        };
        let branch = details.default_branch;

        let route = format!("/repos/{}/contents/{}?ref={}", full_name, file_path, branch);
        let data: ContentResponse = self
            .github
            .get(route, None::<&()>)
            .await
            .map_err(Error::FetchFile)?;

        let encoded = data.content.ok_or_else(|| Error::FileNotFound {
            path: file_path.to_string(),
            branch,
        })?;

        Ok(FileContent {
            path: data.path,
            content: decode_content(&encoded)?,
            url: data.url,
        })
    }
}

fn fallback_branch() -> String {
    "main".to_string()
}

fn retain_pushable(repos: Vec<RepositorySummary>) -> Vec<RepositorySummary> {
    repos
        .into_iter()
        .filter(|repo| repo.permissions.push)
        .collect()
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Decode base64 file content to UTF-8 text. GitHub wraps base64 at 60
/// columns with embedded newlines, so all whitespace is stripped first.
fn decode_content(encoded: &str) -> Result<String, Error> {
    let cleaned: String = encoded.chars().filter(|ch| !ch.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(cleaned)
        .map_err(|_| Error::DecodeContent)?;
    String::from_utf8(bytes).map_err(|_| Error::DecodeContent)
}

/// Validate an `owner/repo` full name before it is spliced into an API route.
fn sanitize_repo_name(full_name: &str) -> Result<(), Error> {
    let (owner, name) = full_name.split_once('/').ok_or_else(|| {
        Error::InvalidParam(format!(
            "repository must be a full 'owner/repo' name, got '{}'",
            full_name
        ))
    })?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return Err(Error::InvalidParam(format!(
            "repository must be a full 'owner/repo' name, got '{}'",
            full_name
        )));
    }
    for part in [owner, name] {
        for ch in ['?', '#', '%', '\0', ' ', '\n', '\t'] {
            if part.contains(ch) {
                return Err(Error::InvalidParam(format!(
                    "repository name contains invalid character '{}'",
                    ch
                )));
            }
        }
    }
    Ok(())
}

/// Validate a file path for use in a contents route. Unlike repository names,
/// slashes are allowed (`src/main.rs`); query, fragment, and control
/// characters are not.
fn sanitize_file_path(path: &str) -> Result<(), Error> {
    if path.is_empty() {
        return Err(Error::InvalidParam("file path must not be empty".to_string()));
    }
    for ch in ['?', '#', '&', '\0', '\n', '\r', '\t'] {
        if path.contains(ch) {
            return Err(Error::InvalidParam(
                "file path contains invalid character".to_string(),
            ));
        }
    }
    Ok(())
}
