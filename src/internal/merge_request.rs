use std::collections::HashSet;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::internal::errors::BrowseError;
use crate::internal::git::GitQueryRunner;
use crate::internal::urls::build_merge_request_url;

lazy_static! {
    // GitLab writes `See merge request !42`, or `See merge request group/proj!42`
    // on newer instances.
    static ref MERGE_REQUEST_PATTERN: Regex =
        Regex::new(r"See merge request (?:[^\s!]+)?!([0-9]+)").expect("valid regex");
}

/// Finds the merge request that brought a commit into the tracked branch.
///
/// This relies on the message GitLab writes on merge commits, so squashed or
/// rebased merge requests cannot be found.
pub struct MergeRequestResolver<'a> {
    git: &'a dyn GitQueryRunner,
    root: &'a Path,
}

impl<'a> MergeRequestResolver<'a> {
    pub fn new(git: &'a dyn GitQueryRunner, root: &'a Path) -> Self {
        Self { git, root }
    }

    pub fn resolve_url(
        &self,
        repo_base_url: &str,
        upstream: &str,
        commit_id: &str,
    ) -> Result<String, BrowseError> {
        let merge_commit = self.find_merge_commit(commit_id, upstream)?;
        log::debug!("merge commit of {commit_id} on {upstream} is {merge_commit}");
        let merge_request_id = self.merge_request_id(&merge_commit)?;
        Ok(build_merge_request_url(repo_base_url, &merge_request_id))
    }

    /// Last commit of `commit..upstream` that is both on the ancestry path of
    /// `commit` and on the first-parent chain of `upstream`.
    pub fn find_merge_commit(&self, commit_id: &str, upstream: &str) -> Result<String, BrowseError> {
        let range = format!("{commit_id}..{upstream}");
        let ancestry_path = self.rev_list("--ancestry-path", &range)?;
        let first_parent: HashSet<String> =
            self.rev_list("--first-parent", &range)?.into_iter().collect();

        ancestry_path
            .into_iter()
            .filter(|commit| first_parent.contains(commit))
            .last()
            .ok_or_else(|| BrowseError::MergeCommitNotFound {
                commit: commit_id.to_string(),
                upstream: upstream.to_string(),
            })
    }

    pub fn merge_request_id(&self, merge_commit: &str) -> Result<String, BrowseError> {
        let body = self.git.run(
            self.root,
            "log",
            &[
                "-1".to_string(),
                "--format=%B".to_string(),
                merge_commit.to_string(),
            ],
        )?;

        parse_merge_request_id(&body).ok_or_else(|| BrowseError::MergeRequestIdNotFound {
            commit: merge_commit.to_string(),
        })
    }

    fn rev_list(&self, mode: &str, range: &str) -> Result<Vec<String>, BrowseError> {
        let lines = self
            .git
            .run(self.root, "rev-list", &[mode.to_string(), range.to_string()])?;
        Ok(lines
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }
}

pub fn parse_merge_request_id<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    lines.iter().find_map(|line| {
        MERGE_REQUEST_PATTERN
            .captures(line.as_ref())
            .map(|captures| captures[1].to_string())
    })
}

#[cfg(test)]
#[path = "merge_request_test.rs"]
mod tests;
