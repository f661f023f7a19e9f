use std::path::Path;
use std::path::PathBuf;

use crate::internal::errors::BrowseError;
use crate::internal::git::abs_path;
use crate::internal::git::normalize_with;
use crate::internal::git::BlameProvider;
use crate::internal::git::ChangeKind;
use crate::internal::git::GitQueryRunner;
use crate::internal::git::NormalizeOptions;
use crate::internal::git::RemoteDescriptor;
use crate::internal::git::RepositoryContext;
use crate::internal::git::RepositoryProvider;
use crate::internal::git::TrackedBranch;
use crate::internal::git::VcsStateProvider;
use crate::internal::merge_request::MergeRequestResolver;
use crate::internal::selection::SelectionRange;
use crate::internal::urls::build_blob_url;
use crate::internal::urls::build_commit_url;
use crate::internal::urls::relative_path;
use crate::internal::user_interface::BrowserLauncher;
use crate::internal::user_interface::RemoteChooser;
use crate::internal::user_interface::UserNotifier;

pub const CANNOT_OPEN_IN_BROWSER: &str = "Cannot open in browser";

/// What the user asked to see on GitLab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseTarget {
    File {
        path: PathBuf,
        selection: Option<SelectionRange>,
    },
    Commit {
        /// Any path inside the repository.
        path: PathBuf,
        hash: String,
    },
    MergeRequest {
        path: PathBuf,
        /// 1-based line whose last commit is looked up; defaults to the first line.
        line: Option<u32>,
        /// Skips the line lookup when given.
        commit: Option<String>,
    },
}

impl BrowseTarget {
    pub fn path(&self) -> &Path {
        match self {
            BrowseTarget::File { path, .. }
            | BrowseTarget::Commit { path, .. }
            | BrowseTarget::MergeRequest { path, .. } => path,
        }
    }

    fn needs_branch(&self) -> bool {
        !matches!(self, BrowseTarget::Commit { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Opened(String),
    Abandoned,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Not in a repository at all.
    Hidden,
    /// In a repository, but GitLab can't know about the file yet.
    Disabled,
    Enabled,
}

pub struct Collaborators<'a> {
    pub repositories: &'a dyn RepositoryProvider,
    pub vcs_state: &'a dyn VcsStateProvider,
    pub blame: &'a dyn BlameProvider,
    pub git: &'a dyn GitQueryRunner,
    pub chooser: &'a dyn RemoteChooser,
    pub launcher: &'a dyn BrowserLauncher,
    pub notifier: &'a dyn UserNotifier,
}

pub struct RemoteSelectionCoordinator<'a> {
    collaborators: Collaborators<'a>,
    normalize_options: NormalizeOptions,
    remote_filter: Option<String>,
}

impl<'a> RemoteSelectionCoordinator<'a> {
    pub fn new(collaborators: Collaborators<'a>, normalize_options: NormalizeOptions) -> Self {
        Self {
            collaborators,
            normalize_options,
            remote_filter: None,
        }
    }

    /// Only consider the remote with this name.
    pub fn with_remote_filter(mut self, remote: Option<String>) -> Self {
        self.remote_filter = remote;
        self
    }

    /// Resolves the target and opens it, reporting any failure to the user.
    pub fn run(&self, target: &BrowseTarget) -> ActionOutcome {
        match self.resolve(target) {
            Ok(Some(url)) => {
                self.collaborators.launcher.open(&url);
                ActionOutcome::Opened(url)
            }
            Ok(None) => {
                log::debug!("remote selection abandoned");
                ActionOutcome::Abandoned
            }
            Err(err) => {
                let detail = err.debug_detail();
                log::warn!("{CANNOT_OPEN_IN_BROWSER}; {err}");
                if let Some(detail) = &detail {
                    log::debug!("{detail}");
                }
                self.collaborators.notifier.report_error(
                    CANNOT_OPEN_IN_BROWSER,
                    &err.to_string(),
                    detail.as_deref(),
                );
                ActionOutcome::Failed
            }
        }
    }

    /// URL of the target, or `None` when the remote choice was abandoned.
    pub fn resolve(&self, target: &BrowseTarget) -> Result<Option<String>, BrowseError> {
        let repository = self
            .collaborators
            .repositories
            .repository_for_file(target.path())?
            .ok_or_else(|| BrowseError::NoGitRepository(target.path().to_path_buf()))?;

        let remote = match self.select_remote(&repository)? {
            Some(remote) => remote,
            None => return Ok(None),
        };

        let tracked = if target.needs_branch() {
            Some(Self::tracked_branch(&repository)?)
        } else {
            None
        };

        self.build_url(target, &repository, &remote, tracked.as_ref())
            .map(Some)
    }

    pub fn availability(&self, path: &Path) -> Availability {
        match self.collaborators.repositories.repository_for_file(path) {
            Ok(Some(_)) => {}
            _ => return Availability::Hidden,
        }

        match self.collaborators.vcs_state.change_kind_for(path) {
            ChangeKind::Unversioned | ChangeKind::New => Availability::Disabled,
            _ => Availability::Enabled,
        }
    }

    fn select_remote(
        &self,
        repository: &RepositoryContext,
    ) -> Result<Option<RemoteDescriptor>, BrowseError> {
        let candidates: Vec<RemoteDescriptor> = repository
            .remotes
            .iter()
            .filter(|remote| match &self.remote_filter {
                Some(name) => &remote.name == name,
                None => true,
            })
            .cloned()
            .collect();

        match candidates.len() {
            0 => Err(BrowseError::NoRemoteConfigured),
            1 => Ok(candidates.into_iter().next()),
            _ => Ok(self.collaborators.chooser.choose(&candidates)),
        }
    }

    fn tracked_branch(repository: &RepositoryContext) -> Result<TrackedBranch, BrowseError> {
        let current = repository
            .current_branch
            .as_ref()
            .ok_or(BrowseError::DetachedHead)?;

        repository
            .tracked_branch
            .clone()
            .ok_or_else(|| BrowseError::NoTrackedBranch {
                branch: current.clone(),
            })
    }

    fn build_url(
        &self,
        target: &BrowseTarget,
        repository: &RepositoryContext,
        remote: &RemoteDescriptor,
        tracked: Option<&TrackedBranch>,
    ) -> Result<String, BrowseError> {
        let remote_url = remote
            .first_url()
            .ok_or_else(|| BrowseError::RemoteUrlMissing(remote.name.clone()))?;
        let base_url = normalize_with(remote_url, &self.normalize_options)?;

        match (target, tracked) {
            (BrowseTarget::File { path, selection }, Some(tracked)) => {
                let relative = relative_path(&repository.root_path, &abs_path(path))?;
                Ok(build_blob_url(&base_url, &tracked.name, &relative, *selection))
            }
            (BrowseTarget::Commit { hash, .. }, _) => Ok(build_commit_url(&base_url, hash)),
            (BrowseTarget::MergeRequest { path, line, commit }, Some(tracked)) => {
                let path = abs_path(path);
                relative_path(&repository.root_path, &path)?;

                let commit_id = match commit {
                    Some(commit) => commit.clone(),
                    None => self.line_revision(&path, line.unwrap_or(1))?,
                };

                MergeRequestResolver::new(self.collaborators.git, &repository.root_path)
                    .resolve_url(&base_url, &tracked.upstream_ref(), &commit_id)
            }
            (_, None) => Err(BrowseError::DetachedHead),
        }
    }

    fn line_revision(&self, path: &Path, line: u32) -> Result<String, BrowseError> {
        let revisions = self.collaborators.blame.annotate(path)?;
        revisions
            .revision_for_line(line)
            .map(str::to_string)
            .ok_or_else(|| {
                BrowseError::AnnotationUnavailable(format!(
                    "line {line} of {} is not committed",
                    path.display()
                ))
            })
    }
}

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod tests;
