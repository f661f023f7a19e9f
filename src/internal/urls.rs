use std::path::Path;

use crate::internal::errors::BrowseError;
use crate::internal::selection::SelectionRange;

/// Path of `path` relative to `root`, with a leading `/`, as used in GitLab blob URLs.
pub fn relative_path(root: &Path, path: &Path) -> Result<String, BrowseError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| BrowseError::PathNotUnderRoot {
            root: root.to_path_buf(),
            path: path.to_path_buf(),
        })?;

    let parts: Vec<_> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect();

    Ok(format!("/{}", parts.join("/")))
}

pub fn build_blob_url(
    repo_base_url: &str,
    branch: &str,
    relative_path: &str,
    selection: Option<SelectionRange>,
) -> String {
    let mut url = format!("{repo_base_url}/blob/{branch}{relative_path}");
    if let Some(selection) = selection {
        url.push('#');
        url.push_str(&selection.to_string());
    }
    url
}

pub fn build_commit_url(repo_base_url: &str, commit_hash: &str) -> String {
    format!("{repo_base_url}/commit/{commit_hash}")
}

pub fn build_merge_request_url(repo_base_url: &str, merge_request_id: &str) -> String {
    format!("{repo_base_url}/merge_requests/{merge_request_id}")
}

#[cfg(test)]
#[path = "urls_test.rs"]
mod tests;
