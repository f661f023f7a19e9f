use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use git2::Oid;
use git2::Repository;
use git2::RepositoryInitOptions;
use git2::Signature;
use tempfile::TempDir;

use crate::internal::errors::BrowseError;
use crate::internal::git::GitQueryRunner;

/// Runs `closure` with the given environment, clearing the variables the tool reads.
pub fn run_with_env<F, R>(envs: &[(&str, Option<&str>)], closure: F) -> R
where
    F: FnOnce() -> R,
{
    let mut vars: Vec<(String, Option<String>)> = [
        "GITLAB_BROWSE_CONFIG",
        "GITLAB_BROWSE_GIT_TIMEOUT",
        "GITLAB_BROWSE_SSH_SCHEME",
        "GITLAB_BROWSE_BROWSER",
        "XDG_CONFIG_HOME",
    ]
    .iter()
    .map(|key| (key.to_string(), None))
    .collect();

    for (key, value) in envs {
        vars.retain(|(existing, _)| existing != key);
        vars.push((key.to_string(), value.map(str::to_string)));
    }

    temp_env::with_vars(vars, closure)
}

/// Repository in a temporary directory, on a `main` branch.
pub struct TestRepo {
    _dir: TempDir,
    pub root: PathBuf,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        // Canonicalize the path to resolve any symlinks (e.g., /var -> /private/var on macOS)
        let root = dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp directory path");

        let mut options = RepositoryInitOptions::new();
        options.initial_head("main");
        let repo = Repository::init_opts(&root, &options).expect("Failed to init git repo");

        Self {
            _dir: dir,
            root,
            repo,
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, contents).expect("Failed to write file");
        path
    }

    pub fn stage(&self, relative: &str) {
        let mut index = self.repo.index().expect("Failed to open index");
        index
            .add_path(Path::new(relative))
            .expect("Failed to add path to index");
        index.write().expect("Failed to write index");
    }

    pub fn commit_file(&self, relative: &str, contents: &str, message: &str) -> Oid {
        self.write(relative, contents);
        self.stage(relative);
        self.commit(message)
    }

    pub fn commit(&self, message: &str) -> Oid {
        let mut index = self.repo.index().expect("Failed to open index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let signature =
            Signature::now("Test User", "test@example.com").expect("Failed to create signature");

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();

        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &parents,
            )
            .expect("Failed to commit")
    }

    pub fn add_remote(&self, name: &str, url: &str) {
        self.repo
            .remote(name, url)
            .expect("Failed to add remote");
    }

    pub fn track(&self, branch: &str, remote: &str, remote_branch: &str) {
        let mut config = self.repo.config().expect("Failed to open config");
        config
            .set_str(&format!("branch.{branch}.remote"), remote)
            .expect("Failed to set branch remote");
        config
            .set_str(
                &format!("branch.{branch}.merge"),
                &format!("refs/heads/{remote_branch}"),
            )
            .expect("Failed to set branch merge");
    }

    pub fn detach_head(&self) {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .expect("Failed to resolve HEAD");
        self.repo
            .set_head_detached(head.id())
            .expect("Failed to detach HEAD");
    }
}

/// Canned answers for git queries, keyed by the full command line.
#[derive(Default)]
pub struct FakeGitRunner {
    responses: HashMap<String, Vec<String>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeGitRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command_line: &str, lines: &[&str]) -> Self {
        self.responses.insert(
            command_line.to_string(),
            lines.iter().map(|line| line.to_string()).collect(),
        );
        self
    }
}

impl GitQueryRunner for FakeGitRunner {
    fn run(
        &self,
        _root: &Path,
        command: &str,
        args: &[String],
    ) -> Result<Vec<String>, BrowseError> {
        let command_line = std::iter::once(command.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.borrow_mut().push(command_line.clone());

        match self.responses.get(&command_line) {
            Some(lines) => Ok(lines.clone()),
            None => Err(BrowseError::ExternalToolError {
                command: command_line,
                message: "unexpected command".to_string(),
            }),
        }
    }
}
