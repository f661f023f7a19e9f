use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrowseError {
    #[error("can't find git repository for {}", .0.display())]
    NoGitRepository(PathBuf),
    #[error("can't find gitlab remote")]
    NoRemoteConfigured,
    #[error("invalid remote gitlab url: {0}")]
    UnsupportedRemoteFormat(String),
    #[error("can't obtain url for remote {0}")]
    RemoteUrlMissing(String),
    #[error("file is not under repository root")]
    PathNotUnderRoot { root: PathBuf, path: PathBuf },
    #[error("can't open the file on gitlab when repository is on detached HEAD; please checkout a branch")]
    DetachedHead,
    #[error("can't open the file on gitlab when current branch doesn't have a tracked branch")]
    NoTrackedBranch { branch: String },
    #[error("can't find the merge commit of {commit} on {upstream}")]
    MergeCommitNotFound { commit: String, upstream: String },
    #[error("can't open the merge request page on gitlab when the merge commit doesn't reference one")]
    MergeRequestIdNotFound { commit: String },
    #[error("can't annotate file: {0}")]
    AnnotationUnavailable(String),
    #[error("git {command} failed: {message}")]
    ExternalToolError { command: String, message: String },
    #[error("git {command} timed out after {}", humantime::format_duration(*.timeout))]
    ExternalToolTimeout { command: String, timeout: Duration },
    #[error("git error: {0}")]
    Git(#[from] git2::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrowseError {
    /// Extra context worth logging but too noisy for the user-facing message.
    pub fn debug_detail(&self) -> Option<String> {
        match self {
            BrowseError::PathNotUnderRoot { root, path } => Some(format!(
                "root: {}, file: {}",
                root.display(),
                path.display()
            )),
            BrowseError::NoTrackedBranch { branch } => Some(format!("current branch: {branch}")),
            BrowseError::MergeRequestIdNotFound { commit } => Some(format!("commit id: {commit}")),
            BrowseError::ExternalToolError { command, message } => {
                Some(format!("command: git {command}; output: {message}"))
            }
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid duration '{value}': {source}")]
    InvalidDuration {
        value: String,
        source: humantime::DurationError,
    },
    #[error("invalid ssh_scheme '{0}': expected http or https")]
    InvalidScheme(String),
    #[error("invalid browser command '{value}': {source}")]
    InvalidBrowser {
        value: String,
        source: shell_words::ParseError,
    },
}
