use git_url_parse::GitUrl;

use crate::internal::errors::BrowseError;

pub const DEFAULT_SSH_SCHEME: &str = "http";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Scheme used for base URLs derived from SSH remotes.
    pub ssh_scheme: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            ssh_scheme: DEFAULT_SSH_SCHEME.to_string(),
        }
    }
}

/// Host and project path of an SSH remote, as seen by the web frontend.
#[derive(Debug, Clone)]
struct SshRemote {
    host: String,
    project: String,
}

impl SshRemote {
    fn parse(input: &str) -> Option<Self> {
        let url = GitUrl::parse(input).ok()?;
        let host = url.host()?.to_string();

        // Keep every path segment so subgroups survive.
        let full_path = url.path().to_string();
        let path = full_path.trim_start_matches(['/', ':']).trim_end_matches('/');
        let project = path.strip_suffix(".git").unwrap_or(path);

        let segments: Vec<&str> = project.split('/').collect();
        if host.is_empty() || segments.len() < 2 || segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        Some(Self {
            host,
            project: project.to_string(),
        })
    }
}

fn is_ssh_like(url: &str) -> bool {
    if url.starts_with("ssh://") || url.starts_with("git+ssh://") {
        return true;
    }
    if url.contains("://") {
        return false;
    }
    // scp-like `user@host:path`
    match (url.find('@'), url.find(':')) {
        (Some(at), Some(colon)) => at < colon && !url[..colon].contains('/'),
        _ => false,
    }
}

/// Turns a git remote URL into the HTTP base URL of the repository on GitLab.
pub fn normalize(remote_url: &str) -> Result<String, BrowseError> {
    normalize_with(remote_url, &NormalizeOptions::default())
}

pub fn normalize_with(remote_url: &str, options: &NormalizeOptions) -> Result<String, BrowseError> {
    let trimmed = remote_url.trim();
    let cleaned = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    if cleaned.starts_with("http://") || cleaned.starts_with("https://") {
        return Ok(cleaned.to_string());
    }

    if let Some(rest) = cleaned.strip_prefix("git@") {
        return match rest.split_once(':') {
            Some((host, path)) if !host.is_empty() && !path.is_empty() => {
                Ok(format!("{}://{}/{}", options.ssh_scheme, host, path))
            }
            _ => Err(BrowseError::UnsupportedRemoteFormat(remote_url.to_string())),
        };
    }

    if is_ssh_like(cleaned) {
        if let Some(remote) = SshRemote::parse(cleaned) {
            return Ok(format!(
                "{}://{}/{}",
                options.ssh_scheme, remote.host, remote.project
            ));
        }
    }

    Err(BrowseError::UnsupportedRemoteFormat(remote_url.to_string()))
}

#[cfg(test)]
#[path = "remote_url_test.rs"]
mod tests;
