use anyhow::{Context, Result};
use git2::{Cred, CredentialType, PushOptions, RemoteCallbacks, Repository, Signature};
use log::{debug, info, warn};
use std::cell::Cell;
use std::path::{Path, PathBuf};

use crate::arguments::GitMode;

pub struct GitTracker {
    pub repository: Repository,
}

impl GitTracker {
    /// Opens the repository containing the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repository = Repository::discover(path)
            .with_context(|| format!("Failed to find git repository at {:?}", path))?;

        debug!("Opened repository at {:?}", repository.path());

        Ok(GitTracker { repository })
    }

    /// Creates authentication callbacks that use local git credentials
    fn create_auth_callbacks() -> RemoteCallbacks<'static> {
        let mut callbacks = RemoteCallbacks::new();
        let attempts = Cell::new(0u32);

        callbacks.credentials(move |url, username_from_url, allowed_types| {
            let attempt = attempts.get() + 1;
            attempts.set(attempt);
            debug!(
                "Credentials callback attempt {}: url={}, username_from_url={:?}, allowed_types={:?}",
                attempt, url, username_from_url, allowed_types
            );

            if attempt > 5 {
                warn!("Too many credential attempts, authentication likely failing");
                return Err(git2::Error::from_str("authentication failed after multiple attempts"));
            }

            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(CredentialType::SSH_KEY) {
                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
                if let Some(cred) = Self::ssh_key_from_home(username) {
                    return Ok(cred);
                }
            }

            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                debug!("Trying credential helper");
                if let Ok(cred) =
                    Cred::credential_helper(&git2::Config::open_default()?, url, username_from_url)
                {
                    return Ok(cred);
                }
            }

            if allowed_types.contains(CredentialType::DEFAULT) {
                debug!("Trying default credentials");
                return Cred::default();
            }

            Err(git2::Error::from_str("no suitable credentials found"))
        });

        callbacks
    }

    fn ssh_key_from_home(username: &str) -> Option<Cred> {
        let ssh_dir = dirs::home_dir()?.join(".ssh");

        for key_name in ["id_ed25519", "id_rsa", "id_ecdsa"] {
            let private_key = ssh_dir.join(key_name);
            if !private_key.exists() {
                continue;
            }
            let public_key = ssh_dir.join(format!("{}.pub", key_name));
            debug!("Trying SSH key: {:?}", private_key);
            let public_key = public_key.exists().then_some(public_key.as_path());
            if let Ok(cred) = Cred::ssh_key(username, public_key, &private_key, None) {
                return Some(cred);
            }
        }
        None
    }

    fn get_signature(&self) -> Result<Signature<'_>> {
        self.repository.signature()
            .context("Failed to get git signature. Please configure user.name and user.email in git config")
    }

    /// Converts a path on disk into a path relative to the work tree
    fn relative_to_workdir(&self, file: &Path) -> Result<PathBuf> {
        let workdir = self
            .repository
            .workdir()
            .context("Repository has no working directory")?
            .canonicalize()?;
        let file = file
            .canonicalize()
            .with_context(|| format!("Failed to resolve {:?}", file))?;
        let relative = file
            .strip_prefix(&workdir)
            .with_context(|| format!("{:?} is outside the repository at {:?}", file, workdir))?;
        Ok(relative.to_path_buf())
    }

    /// Stages the given files and returns their work-tree relative paths
    pub fn stage_files(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut index = self.repository.index()?;
        let mut staged = Vec::with_capacity(files.len());

        for file in files {
            let relative = self.relative_to_workdir(file)?;
            debug!("Staging {:?}", relative);
            index.add_path(&relative)?;
            staged.push(relative);
        }
        index.write()?;

        Ok(staged)
    }

    /// Builds a tree from HEAD's tree with only `paths` taken from the index.
    ///
    /// Anything else staged in the repository index stays out of the tree.
    pub fn build_commit_tree(&self, paths: &[PathBuf]) -> Result<git2::Oid> {
        let repo_index = self.repository.index()?;
        let mut commit_index = git2::Index::new()?;
        if let Some(head_tree) = self.head_tree()? {
            commit_index.read_tree(&head_tree)?;
        }

        for path in paths {
            let entry = repo_index
                .get_path(path, 0)
                .with_context(|| format!("{:?} is not in the index", path))?;
            commit_index.add(&entry)?;
        }

        Ok(commit_index.write_tree_to(&self.repository)?)
    }

    fn head_tree(&self) -> Result<Option<git2::Tree<'_>>> {
        match self.repository.head() {
            Ok(head) => Ok(Some(head.peel_to_tree()?)),
            Err(_) => Ok(None),
        }
    }

    /// Creates a commit of the given tree on top of HEAD
    pub fn create_commit(&self, message: &str, tree_id: git2::Oid) -> Result<git2::Oid> {
        info!("Creating commit: {}", message);

        let tree = self.repository.find_tree(tree_id)?;
        let sig = self.get_signature()?;

        let parent_commit = match self.repository.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => {
                warn!("No parent commit found - this will be the initial commit");
                None
            }
        };

        let parents: Vec<&git2::Commit> = parent_commit.iter().collect();

        let commit_id = self
            .repository
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

        info!("Created commit: {}", commit_id);
        Ok(commit_id)
    }

    /// Pushes a branch to the remote
    pub fn push_branch(&self, remote_name: &str, branch: &str) -> Result<()> {
        info!("Pushing commits to {}/{}", remote_name, branch);

        let mut remote = self
            .repository
            .find_remote(remote_name)
            .with_context(|| format!("Remote '{}' not found", remote_name))?;

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(Self::create_auth_callbacks());

        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);
        remote.push(&[&refspec], Some(&mut push_options))?;

        info!("Pushed commits to {}/{}", remote_name, branch);
        Ok(())
    }

    /// Gets the current branch name
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repository.head()?;
        let branch_name = head
            .shorthand()
            .ok_or_else(|| anyhow::anyhow!("Could not determine current branch"))?;
        Ok(branch_name.to_string())
    }

    /// Commits the touched files and optionally pushes, according to `mode`
    pub fn execute_git_mode(
        &self,
        mode: GitMode,
        version: &str,
        files: &[PathBuf],
        remote_name: &str,
    ) -> Result<()> {
        if mode == GitMode::None {
            debug!("GitMode::None - skipping git operations");
            return Ok(());
        }

        let paths = self.stage_files(files)?;
        let tree_id = self.build_commit_tree(&paths)?;

        let head_tree_id = self.head_tree()?.map(|tree| tree.id());
        if head_tree_id == Some(tree_id) {
            warn!("No changes to commit");
            return Ok(());
        }

        self.create_commit(&format!("Update version to {}", version), tree_id)?;

        if mode == GitMode::CommitPush {
            let branch = self.current_branch()?;
            self.push_branch(remote_name, &branch)?;
        }

        Ok(())
    }
}
