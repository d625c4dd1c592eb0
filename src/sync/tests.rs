#![allow(clippy::unwrap_used)]

use std::rc::Rc;

use super::fake::FakeContentApi;
use super::*;

fn sync_at(path: PathBuf, api: &Rc<FakeContentApi>) -> SnapshotSync {
    SnapshotSync::new(
        path,
        "main".into(),
        "Update gastos.db".into(),
        Box::new(api.clone()),
    )
}

// ── Encoding ──────────────────────────────────────────────────

#[test]
fn test_encode_decode_is_byte_identical() {
    let bytes: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    assert_eq!(decode_snapshot(&encode_snapshot(&bytes)).unwrap(), bytes);
}

#[test]
fn test_decode_ignores_line_wrapping() {
    let bytes = b"SQLite format 3\0 and then some more bytes to wrap".to_vec();
    let encoded = encode_snapshot(&bytes);
    let wrapped: String = encoded
        .as_bytes()
        .chunks(10)
        .map(|c| std::str::from_utf8(c).unwrap())
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(decode_snapshot(&wrapped).unwrap(), bytes);
}

#[test]
fn test_decode_rejects_garbage() {
    assert!(decode_snapshot("not*base64!").is_err());
}

// ── fetch_if_absent ───────────────────────────────────────────

#[test]
fn test_fetch_skips_network_when_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gastos.db");
    std::fs::write(&path, b"local").unwrap();
    let api = FakeContentApi::with_remote(b"remote", "abc");

    let outcome = sync_at(path.clone(), &api).fetch_if_absent().unwrap();
    assert_eq!(outcome, FetchOutcome::AlreadyPresent);
    assert_eq!(*api.gets.borrow(), 0);
    assert_eq!(std::fs::read(&path).unwrap(), b"local");
}

#[test]
fn test_fetch_downloads_when_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("gastos.db");
    let api = FakeContentApi::with_remote(b"remote bytes", "abc");

    let outcome = sync_at(path.clone(), &api).fetch_if_absent().unwrap();
    assert_eq!(outcome, FetchOutcome::Downloaded { bytes: 12 });
    assert_eq!(std::fs::read(&path).unwrap(), b"remote bytes");
}

#[test]
fn test_fetch_404_creates_nothing_and_does_not_fail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gastos.db");
    let api = FakeContentApi::empty();

    let outcome = sync_at(path.clone(), &api).fetch_if_absent().unwrap();
    assert!(matches!(outcome, FetchOutcome::Unavailable { .. }));
    assert!(!path.exists());
}

#[test]
fn test_fetch_server_error_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gastos.db");
    let api = FakeContentApi::with_remote(b"remote", "abc");
    *api.get_status.borrow_mut() = Some(500);

    let outcome = sync_at(path.clone(), &api).fetch_if_absent().unwrap();
    assert!(matches!(outcome, FetchOutcome::Unavailable { .. }));
    assert!(!path.exists());
}

#[test]
fn test_fetch_empty_content_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gastos.db");
    let api = FakeContentApi::with_remote(b"", "abc");

    let outcome = sync_at(path.clone(), &api).fetch_if_absent().unwrap();
    assert!(matches!(outcome, FetchOutcome::Unavailable { .. }));
    assert!(!path.exists());
}

#[test]
fn test_fetch_undecodable_content_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gastos.db");
    let api = FakeContentApi::empty();
    *api.remote.borrow_mut() = Some(("%%% not base64 %%%".into(), "abc".into()));

    let outcome = sync_at(path.clone(), &api).fetch_if_absent().unwrap();
    match outcome {
        FetchOutcome::Unavailable { reason } => assert!(reason.starts_with("undecodable")),
        other => panic!("expected Unavailable, got {other:?}"),
    }
    assert!(!path.exists());
}

// ── push ──────────────────────────────────────────────────────

#[test]
fn test_push_without_remote_sends_no_sha() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gastos.db");
    std::fs::write(&path, b"local db").unwrap();
    let api = FakeContentApi::empty();

    let outcome = sync_at(path, &api).push().unwrap();
    assert_eq!(outcome.bytes, 8);
    assert!(outcome.replaced_sha.is_none());

    let puts = api.puts.borrow();
    assert_eq!(puts.len(), 1);
    assert!(puts[0].sha.is_none());
    assert_eq!(puts[0].branch, "main");
    assert_eq!(puts[0].message, "Update gastos.db");
    assert_eq!(decode_snapshot(&puts[0].content).unwrap(), b"local db");
}

#[test]
fn test_push_sends_current_sha() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gastos.db");
    std::fs::write(&path, b"new").unwrap();
    let api = FakeContentApi::with_remote(b"old", "sha-old");

    let outcome = sync_at(path, &api).push().unwrap();
    assert_eq!(outcome.replaced_sha.as_deref(), Some("sha-old"));
    assert_eq!(api.puts.borrow()[0].sha.as_deref(), Some("sha-old"));
}

#[test]
fn test_push_after_failed_sha_lookup_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gastos.db");
    std::fs::write(&path, b"new").unwrap();
    let api = FakeContentApi::with_remote(b"old", "sha-old");
    *api.get_status.borrow_mut() = Some(502);

    let outcome = sync_at(path, &api).push().unwrap();
    assert!(outcome.replaced_sha.is_none());
    assert!(api.puts.borrow()[0].sha.is_none());
}

#[test]
fn test_push_surfaces_rejected_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gastos.db");
    std::fs::write(&path, b"new").unwrap();
    let api = FakeContentApi::with_remote(b"old", "sha-old");
    *api.put_status.borrow_mut() = Some(409);

    let err = sync_at(path, &api).push().unwrap_err();
    assert!(matches!(err, SyncError::Status { status: 409, .. }));
}

#[test]
fn test_push_missing_local_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let api = FakeContentApi::empty();
    let err = sync_at(dir.path().join("absent.db"), &api).push().unwrap_err();
    assert!(matches!(err, SyncError::Io { .. }));
    assert!(api.puts.borrow().is_empty());
}

#[test]
fn test_push_then_fetch_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("a.db");
    let target = dir.path().join("b.db");
    std::fs::write(&source, b"\x00\x01binary\xff").unwrap();
    let api = FakeContentApi::empty();

    sync_at(source, &api).push().unwrap();
    sync_at(target.clone(), &api).fetch_if_absent().unwrap();
    assert_eq!(std::fs::read(&target).unwrap(), b"\x00\x01binary\xff");
}

// ── PutContent wire shape ─────────────────────────────────────

#[test]
fn test_put_body_omits_absent_sha() {
    let body = PutContent {
        message: "m".into(),
        content: "Yw==".into(),
        branch: "main".into(),
        sha: None,
    };
    let json = serde_json::to_value(&body).unwrap();
    assert!(json.get("sha").is_none());
    assert_eq!(json["branch"], "main");

    let with_sha = PutContent {
        sha: Some("abc".into()),
        ..body
    };
    assert_eq!(serde_json::to_value(&with_sha).unwrap()["sha"], "abc");
}
