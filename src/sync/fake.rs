//! In-memory `ContentApi` for tests.

use std::cell::RefCell;
use std::rc::Rc;

use super::{encode_snapshot, ContentApi, PutContent, RemoteContent, SyncError};

#[derive(Default)]
pub(crate) struct FakeContentApi {
    /// (base64 content, sha) of the remote file, if any.
    pub(crate) remote: RefCell<Option<(String, String)>>,
    /// When set, GET answers with this status instead of the file.
    pub(crate) get_status: RefCell<Option<u16>>,
    /// When set, PUT fails with this status.
    pub(crate) put_status: RefCell<Option<u16>>,
    pub(crate) puts: RefCell<Vec<PutContent>>,
    pub(crate) gets: RefCell<usize>,
}

impl FakeContentApi {
    pub(crate) fn with_remote(bytes: &[u8], sha: &str) -> Rc<Self> {
        let fake = Self::default();
        *fake.remote.borrow_mut() = Some((encode_snapshot(bytes), sha.to_string()));
        Rc::new(fake)
    }

    pub(crate) fn empty() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl ContentApi for Rc<FakeContentApi> {
    fn get(&self) -> Result<RemoteContent, SyncError> {
        *self.gets.borrow_mut() += 1;
        if let Some(status) = *self.get_status.borrow() {
            return Ok(RemoteContent::Missing { status });
        }
        Ok(match self.remote.borrow().as_ref() {
            Some((content, sha)) => RemoteContent::Found {
                content: content.clone(),
                sha: sha.clone(),
            },
            None => RemoteContent::Missing { status: 404 },
        })
    }

    fn put(&self, body: &PutContent) -> Result<(), SyncError> {
        if let Some(status) = *self.put_status.borrow() {
            return Err(SyncError::Status {
                status,
                body: "rejected".into(),
            });
        }
        self.puts.borrow_mut().push(body.clone());
        let next_sha = format!("sha-{}", self.puts.borrow().len());
        *self.remote.borrow_mut() = Some((body.content.clone(), next_sha));
        Ok(())
    }
}
