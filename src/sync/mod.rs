//! Mirrors the local database file to a single file in a remote repository.
//!
//! Replication is best-effort and last-writer-wins. `push` reads the remote
//! `sha` and then writes with it in a second round trip, so two instances
//! pushing at once can still overwrite each other; nothing here locks.

mod github;

#[cfg(test)]
pub(crate) mod fake;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::RemoteConfig;

pub(crate) use github::{ContentApi, GithubContents, PutContent, RemoteContent};

#[derive(thiserror::Error, Debug)]
pub(crate) enum SyncError {
    #[error("local snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request to the content API failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("content API answered {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FetchOutcome {
    AlreadyPresent,
    Downloaded { bytes: usize },
    /// Nothing was written; the store will start from an empty schema.
    Unavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PushOutcome {
    pub(crate) bytes: usize,
    /// `None` when no prior remote version was found.
    pub(crate) replaced_sha: Option<String>,
}

pub(crate) fn encode_snapshot(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// The contents API wraps base64 at 60 columns, so whitespace is ignored.
pub(crate) fn decode_snapshot(content: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD.decode(compact)
}

pub(crate) struct SnapshotSync {
    local_path: PathBuf,
    branch: String,
    message: String,
    api: Box<dyn ContentApi>,
}

impl SnapshotSync {
    pub(crate) fn new(
        local_path: PathBuf,
        branch: String,
        message: String,
        api: Box<dyn ContentApi>,
    ) -> Self {
        Self {
            local_path,
            branch,
            message,
            api,
        }
    }

    pub(crate) fn github(remote: &RemoteConfig, local_path: &Path) -> Result<Self, SyncError> {
        let api = GithubContents::new(remote)?;
        Ok(Self::new(
            local_path.to_path_buf(),
            remote.branch.clone(),
            remote.commit_message.clone(),
            Box::new(api),
        ))
    }

    /// Downloads the snapshot when the local file does not exist yet.
    ///
    /// Remote trouble (non-200, transport failure, bad content) is logged
    /// and reported as `Unavailable`; only a failed local write is an error.
    pub(crate) fn fetch_if_absent(&self) -> Result<FetchOutcome, SyncError> {
        if self.local_path.exists() {
            return Ok(FetchOutcome::AlreadyPresent);
        }

        let unavailable = |reason: String| -> Result<FetchOutcome, SyncError> {
            log::warn!("remote snapshot not fetched: {reason}");
            Ok(FetchOutcome::Unavailable { reason })
        };

        let (content, sha) = match self.api.get() {
            Ok(RemoteContent::Found { content, sha }) => (content, sha),
            Ok(RemoteContent::Missing { status }) => {
                return unavailable(format!("remote answered {status}"))
            }
            Err(e) => return unavailable(e.to_string()),
        };

        let bytes = match decode_snapshot(&content) {
            Ok(bytes) => bytes,
            Err(e) => return unavailable(format!("undecodable content: {e}")),
        };
        // Files too large for the contents API come back with empty content.
        // Writing that would later be pushed over the real snapshot.
        if bytes.is_empty() {
            return unavailable("remote content is empty".into());
        }

        if let Some(parent) = self.local_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| SyncError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        fs::write(&self.local_path, &bytes).map_err(|source| SyncError::Io {
            path: self.local_path.clone(),
            source,
        })?;

        log::info!(
            "downloaded remote snapshot ({} bytes, sha {sha}) to {}",
            bytes.len(),
            self.local_path.display()
        );
        Ok(FetchOutcome::Downloaded { bytes: bytes.len() })
    }

    /// Replaces the remote snapshot with the local file.
    ///
    /// A failed `sha` lookup is treated as "no prior version". A failed
    /// write is returned.
    pub(crate) fn push(&self) -> Result<PushOutcome, SyncError> {
        let bytes = fs::read(&self.local_path).map_err(|source| SyncError::Io {
            path: self.local_path.clone(),
            source,
        })?;

        let sha = match self.api.get() {
            Ok(RemoteContent::Found { sha, .. }) => Some(sha),
            Ok(RemoteContent::Missing { status }) => {
                log::warn!("no remote snapshot found (status {status}); pushing without sha");
                None
            }
            Err(e) => {
                log::warn!("could not read remote sha ({e}); pushing without sha");
                None
            }
        };

        let body = PutContent {
            message: self.message.clone(),
            content: encode_snapshot(&bytes),
            branch: self.branch.clone(),
            sha: sha.clone(),
        };
        self.api.put(&body)?;

        log::info!("pushed snapshot ({} bytes) to branch {}", bytes.len(), self.branch);
        Ok(PushOutcome {
            bytes: bytes.len(),
            replaced_sha: sha,
        })
    }
}

#[cfg(test)]
mod tests;
