use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::SyncError;
use crate::config::RemoteConfig;

/// What a GET against the contents endpoint produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RemoteContent {
    Found { content: String, sha: String },
    /// Any answer other than 200.
    Missing { status: u16 },
}

/// Body of the PUT that replaces the remote file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct PutContent {
    pub(crate) message: String,
    pub(crate) content: String,
    pub(crate) branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sha: Option<String>,
}

/// The hosted file-content API holding the snapshot.
pub(crate) trait ContentApi {
    fn get(&self) -> Result<RemoteContent, SyncError>;
    fn put(&self, body: &PutContent) -> Result<(), SyncError>;
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    content: String,
    sha: String,
}

/// GitHub's repository contents API for one fixed file.
pub(crate) struct GithubContents {
    client: Client,
    url: String,
    branch: String,
    token: String,
}

impl GithubContents {
    pub(crate) fn new(remote: &RemoteConfig) -> Result<Self, SyncError> {
        let client = Client::builder()
            .user_agent(concat!("gastui/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: remote.contents_url(),
            branch: remote.branch.clone(),
            token: remote.token.clone(),
        })
    }

    fn auth_header(&self) -> String {
        format!("token {}", self.token)
    }
}

impl ContentApi for GithubContents {
    fn get(&self) -> Result<RemoteContent, SyncError> {
        let resp = self
            .client
            .get(&self.url)
            .query(&[("ref", self.branch.as_str())])
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/vnd.github+json")
            .send()?;

        if resp.status() != StatusCode::OK {
            log::debug!("GET {} -> {}", self.url, resp.status());
            return Ok(RemoteContent::Missing {
                status: resp.status().as_u16(),
            });
        }

        let body: ContentResponse = resp.json()?;
        Ok(RemoteContent::Found {
            content: body.content,
            sha: body.sha,
        })
    }

    fn put(&self, body: &PutContent) -> Result<(), SyncError> {
        let resp = self
            .client
            .put(&self.url)
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/vnd.github+json")
            .json(body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            return Err(SyncError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        log::debug!("PUT {} -> {}", self.url, status);
        Ok(())
    }
}
