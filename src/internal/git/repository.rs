use std::path::Path;
use std::path::PathBuf;

use git2::ErrorCode;
use git2::Repository;
use git2::Status;

use crate::internal::errors::BrowseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDescriptor {
    pub name: String,
    /// Configured URLs, the fetch URL first.
    pub urls: Vec<String>,
}

impl RemoteDescriptor {
    pub fn new(name: &str, urls: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            urls: urls.iter().map(|url| url.to_string()).collect(),
        }
    }

    pub fn first_url(&self) -> Option<&str> {
        self.urls.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedBranch {
    pub remote: String,
    /// Name of the branch on the remote, e.g. `main`.
    pub name: String,
}

impl TrackedBranch {
    pub fn upstream_ref(&self) -> String {
        format!("{}/{}", self.remote, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryContext {
    pub root_path: PathBuf,
    pub remotes: Vec<RemoteDescriptor>,
    pub current_branch: Option<String>,
    pub tracked_branch: Option<TrackedBranch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Unmodified,
    New,
    Modified,
    Deleted,
    Renamed,
    Ignored,
    Unversioned,
}

/// Commit that last touched each line of a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineRevisions {
    revisions: Vec<Option<String>>,
}

impl LineRevisions {
    pub fn new(revisions: Vec<Option<String>>) -> Self {
        Self { revisions }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    /// `line` is 1-based; uncommitted lines have no revision.
    pub fn revision_for_line(&self, line: u32) -> Option<&str> {
        let index = (line as usize).checked_sub(1)?;
        self.revisions.get(index)?.as_deref()
    }
}

pub trait RepositoryProvider {
    fn repository_for_file(&self, path: &Path) -> Result<Option<RepositoryContext>, BrowseError>;
    fn repository_for_root(&self, root: &Path) -> Result<Option<RepositoryContext>, BrowseError>;
}

pub trait VcsStateProvider {
    fn change_kind_for(&self, path: &Path) -> ChangeKind;

    fn is_unversioned(&self, path: &Path) -> bool {
        self.change_kind_for(path) == ChangeKind::Unversioned
    }
}

pub trait BlameProvider {
    fn annotate(&self, path: &Path) -> Result<LineRevisions, BrowseError>;
}

pub fn abs_path<T: AsRef<Path>>(path: T) -> PathBuf {
    let path = path.as_ref();
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// Reads repository state through libgit2.
#[derive(Debug, Clone, Default)]
pub struct Git2RepositoryProvider;

impl Git2RepositoryProvider {
    pub fn new() -> Self {
        Self
    }

    fn discover(path: &Path) -> Result<Option<Repository>, git2::Error> {
        let search_dir = if path.is_dir() {
            path.to_path_buf()
        } else {
            match path.parent() {
                Some(parent) => parent.to_path_buf(),
                None => return Ok(None),
            }
        };

        match Repository::discover(search_dir) {
            Ok(repo) => Ok(Some(repo)),
            Err(err) if err.code() == ErrorCode::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn workdir(repo: &Repository) -> Option<PathBuf> {
        repo.workdir().map(abs_path)
    }

    fn repo_relative(repo: &Repository, path: &Path) -> Option<PathBuf> {
        let workdir = Self::workdir(repo)?;
        path.strip_prefix(&workdir).ok().map(Path::to_path_buf)
    }

    fn context(repo: &Repository) -> Result<Option<RepositoryContext>, BrowseError> {
        let root_path = match Self::workdir(repo) {
            Some(root) => root,
            None => return Ok(None),
        };

        let mut remotes = vec![];
        for name in repo.remotes()?.iter().flatten() {
            let remote = repo.find_remote(name)?;
            let mut urls = vec![];
            if let Some(url) = remote.url() {
                urls.push(url.to_string());
            }
            if let Some(push_url) = remote.pushurl() {
                if !urls.iter().any(|url| url == push_url) {
                    urls.push(push_url.to_string());
                }
            }
            remotes.push(RemoteDescriptor {
                name: name.to_string(),
                urls,
            });
        }

        let (current_branch, tracked_branch) = Self::branches(repo);

        Ok(Some(RepositoryContext {
            root_path,
            remotes,
            current_branch,
            tracked_branch,
        }))
    }

    fn branches(repo: &Repository) -> (Option<String>, Option<TrackedBranch>) {
        if repo.head_detached().unwrap_or(false) {
            return (None, None);
        }
        let head = match repo.head() {
            Ok(head) if head.is_branch() => head,
            _ => return (None, None),
        };
        let (refname, current) = match (head.name(), head.shorthand()) {
            (Some(refname), Some(current)) => (refname.to_string(), current.to_string()),
            _ => return (None, None),
        };

        let remote = repo
            .branch_upstream_remote(&refname)
            .ok()
            .and_then(|buf| buf.as_str().map(str::to_string));
        let merge = repo
            .branch_upstream_merge(&refname)
            .ok()
            .and_then(|buf| buf.as_str().map(str::to_string));

        let tracked = match (remote, merge) {
            (Some(remote), Some(merge)) => Some(TrackedBranch {
                remote,
                name: merge
                    .strip_prefix("refs/heads/")
                    .unwrap_or(&merge)
                    .to_string(),
            }),
            _ => None,
        };

        (Some(current), tracked)
    }
}

impl RepositoryProvider for Git2RepositoryProvider {
    fn repository_for_file(&self, path: &Path) -> Result<Option<RepositoryContext>, BrowseError> {
        match Self::discover(&abs_path(path))? {
            Some(repo) => Self::context(&repo),
            None => Ok(None),
        }
    }

    fn repository_for_root(&self, root: &Path) -> Result<Option<RepositoryContext>, BrowseError> {
        match Repository::open(abs_path(root)) {
            Ok(repo) => Self::context(&repo),
            Err(err) if err.code() == ErrorCode::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl VcsStateProvider for Git2RepositoryProvider {
    fn change_kind_for(&self, path: &Path) -> ChangeKind {
        let path = abs_path(path);
        let repo = match Self::discover(&path) {
            Ok(Some(repo)) => repo,
            _ => return ChangeKind::Unversioned,
        };
        let relative = match Self::repo_relative(&repo, &path) {
            Some(relative) => relative,
            None => return ChangeKind::Unversioned,
        };

        let status = match repo.status_file(&relative) {
            Ok(status) => status,
            Err(err) => {
                log::debug!("no status for {}: {}", relative.display(), err.message());
                return ChangeKind::Unversioned;
            }
        };

        if status.contains(Status::IGNORED) {
            ChangeKind::Ignored
        } else if status.contains(Status::WT_NEW) {
            ChangeKind::Unversioned
        } else if status.contains(Status::INDEX_NEW) {
            ChangeKind::New
        } else if status.intersects(Status::INDEX_DELETED | Status::WT_DELETED) {
            ChangeKind::Deleted
        } else if status.intersects(Status::INDEX_RENAMED | Status::WT_RENAMED) {
            ChangeKind::Renamed
        } else if status.intersects(
            Status::INDEX_MODIFIED
                | Status::WT_MODIFIED
                | Status::INDEX_TYPECHANGE
                | Status::WT_TYPECHANGE,
        ) {
            ChangeKind::Modified
        } else {
            ChangeKind::Unmodified
        }
    }
}

impl BlameProvider for Git2RepositoryProvider {
    fn annotate(&self, path: &Path) -> Result<LineRevisions, BrowseError> {
        let path = abs_path(path);
        let unavailable = |reason: String| BrowseError::AnnotationUnavailable(reason);

        let repo = Self::discover(&path)
            .map_err(|err| unavailable(err.message().to_string()))?
            .ok_or_else(|| unavailable(format!("{} is not in a repository", path.display())))?;
        let relative = Self::repo_relative(&repo, &path).ok_or_else(|| {
            unavailable(format!("{} is not in the work tree", path.display()))
        })?;

        let blame = repo
            .blame_file(&relative, None)
            .map_err(|err| unavailable(err.message().to_string()))?;

        let mut revisions = vec![];
        for hunk in blame.iter() {
            let commit_id = hunk.final_commit_id();
            let revision = if commit_id.is_zero() {
                None
            } else {
                Some(commit_id.to_string())
            };
            for _ in 0..hunk.lines_in_hunk() {
                revisions.push(revision.clone());
            }
        }

        Ok(LineRevisions::new(revisions))
    }
}

#[cfg(test)]
#[path = "repository_test.rs"]
mod tests;
