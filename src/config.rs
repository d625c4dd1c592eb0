use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_REMOTE_PATH: &str = "gastos.db";
const DEFAULT_BRANCH: &str = "main";
const DEFAULT_COMMIT_MESSAGE: &str = "Update gastos.db";

/// Settings resolved once at startup and passed down by reference.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    /// `None` runs local-only.
    pub(crate) remote: Option<RemoteConfig>,
}

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct RemoteConfig {
    pub(crate) api_base: String,
    pub(crate) owner: String,
    pub(crate) repo: String,
    pub(crate) path: String,
    pub(crate) branch: String,
    pub(crate) token: String,
    pub(crate) commit_message: String,
}

impl RemoteConfig {
    pub(crate) fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.path.trim_start_matches('/')
        )
    }
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("api_base", &self.api_base)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("path", &self.path)
            .field("branch", &self.branch)
            .field("token", &"<redacted>")
            .field("commit_message", &self.commit_message)
            .finish()
    }
}

impl Config {
    /// Reads `.env` (if present) and the process environment.
    pub(crate) fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        let data_dir = default_data_dir()?;
        let config = Self::from_lookup(|key| std::env::var(key).ok(), &data_dir)?;
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }
        Ok(config)
    }

    pub(crate) fn from_lookup<F>(lookup: F, data_dir: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let db_path = var("GASTUI_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("gastos.db"));

        let remote = match var("GASTUI_GITHUB_REPO") {
            None => None,
            Some(repo_spec) => {
                let (owner, repo) = repo_spec
                    .split_once('/')
                    .filter(|(o, r)| !o.is_empty() && !r.is_empty() && !r.contains('/'))
                    .with_context(|| {
                        format!("GASTUI_GITHUB_REPO must look like owner/repo, got '{repo_spec}'")
                    })?;
                let token = var("GASTUI_GITHUB_TOKEN")
                    .context("GASTUI_GITHUB_TOKEN must be set when GASTUI_GITHUB_REPO is")?;
                Some(RemoteConfig {
                    api_base: var("GASTUI_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    path: var("GASTUI_REMOTE_PATH").unwrap_or_else(|| DEFAULT_REMOTE_PATH.into()),
                    branch: var("GASTUI_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.into()),
                    token,
                    commit_message: var("GASTUI_COMMIT_MESSAGE")
                        .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.into()),
                })
            }
        };

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            db_path,
            remote,
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "gastui", "gastui")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
