/// Error type for the whole client boundary. Every operation returns
/// `Result<_, Error>` and the CLI renders any variant as a `{"error": ...}`
/// JSON object, so the message on each variant is user-visible text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport or HTTP failure while fetching repository details.
    #[error("Error fetching data from GitHub: {0}")]
    Request(#[from] octocrab::Error),

    /// Transport or HTTP failure while listing a repository tree.
    #[error("Error listing files: {0}")]
    ListFiles(#[source] octocrab::Error),

    /// Transport or HTTP failure while fetching file contents.
    #[error("Error fetching file: {0}")]
    FetchFile(#[source] octocrab::Error),

    #[error("Repository not found")]
    RepoNotFound,

    #[error("File '{path}' not found on branch '{branch}'")]
    FileNotFound { path: String, branch: String },

    /// Content that is not valid base64, or decodes to non-UTF-8 bytes.
    #[error("Failed to decode file content")]
    DecodeContent,

    #[error("{0}")]
    InvalidParam(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_message() {
        let err = Error::FileNotFound {
            path: "src/lib.rs".to_string(),
            branch: "main".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "File 'src/lib.rs' not found on branch 'main'"
        );
    }

    #[test]
    fn test_repo_not_found_message() {
        assert_eq!(Error::RepoNotFound.to_string(), "Repository not found");
    }

    #[test]
    fn test_decode_message() {
        assert_eq!(
            Error::DecodeContent.to_string(),
            "Failed to decode file content"
        );
    }

    #[test]
    fn test_invalid_param_is_bare_message() {
        let err = Error::InvalidParam("repo must not be empty".to_string());
        assert_eq!(err.to_string(), "repo must not be empty");
    }
}
