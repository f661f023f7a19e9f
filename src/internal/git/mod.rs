pub(crate) mod remote_url;
pub(crate) use remote_url::normalize;
pub(crate) use remote_url::normalize_with;
pub(crate) use remote_url::NormalizeOptions;

pub(crate) mod repository;
pub(crate) use repository::abs_path;
pub(crate) use repository::BlameProvider;
pub(crate) use repository::ChangeKind;
pub(crate) use repository::Git2RepositoryProvider;
pub(crate) use repository::LineRevisions;
pub(crate) use repository::RemoteDescriptor;
pub(crate) use repository::RepositoryContext;
pub(crate) use repository::RepositoryProvider;
pub(crate) use repository::TrackedBranch;
pub(crate) use repository::VcsStateProvider;

pub(crate) mod runner;
pub(crate) use runner::CliGitRunner;
pub(crate) use runner::GitQueryRunner;
