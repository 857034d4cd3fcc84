//! tests/hint_tests.rs
//! Hint record: append, query, idempotent truncation.

use cryptonite_rs::hint::{append_hint, find_hint, truncate_hint};
use cryptonite_rs::hint_for;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fake_container(dir: &TempDir, body: &[u8]) -> PathBuf {
    let path = dir.path().join("sample.cryptonite");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn hint_roundtrip() {
    let dir = TempDir::new().unwrap();
    let body = vec![0x5au8; 200];
    let path = fake_container(&dir, &body);

    append_hint(&path, "my favourite color").unwrap();
    assert_eq!(hint_for(&path).unwrap().as_deref(), Some("my favourite color"));

    // The record sits immediately after the original bytes.
    let on_disk = fs::read(&path).unwrap();
    assert_eq!(&on_disk[..200], &body[..]);
    assert_eq!(&on_disk[200..], b"HINT=my favourite color");
}

#[test]
fn no_hint_reports_absent() {
    let dir = TempDir::new().unwrap();
    let path = fake_container(&dir, &[0x11u8; 100]);
    assert_eq!(hint_for(&path).unwrap(), None);
    assert_eq!(find_hint(&path).unwrap(), None);
}

#[test]
fn truncate_restores_exact_envelope_bytes() {
    let dir = TempDir::new().unwrap();
    let body = vec![0x33u8; 500];
    let path = fake_container(&dir, &body);

    append_hint(&path, "short hint").unwrap();
    truncate_hint(&path).unwrap();
    assert_eq!(fs::read(&path).unwrap(), body);
}

#[test]
fn truncate_is_idempotent_and_tolerates_absence() {
    let dir = TempDir::new().unwrap();
    let body = vec![0x44u8; 128];
    let path = fake_container(&dir, &body);

    // No hint present: a no-op, not an error.
    truncate_hint(&path).unwrap();
    assert_eq!(fs::read(&path).unwrap(), body);

    append_hint(&path, "once").unwrap();
    truncate_hint(&path).unwrap();
    truncate_hint(&path).unwrap();
    assert_eq!(fs::read(&path).unwrap(), body);
}

#[test]
fn unicode_hints_survive() {
    let dir = TempDir::new().unwrap();
    let path = fake_container(&dir, &[0u8; 64]);
    append_hint(&path, "пароль — 日本語 hél").unwrap();
    assert_eq!(
        hint_for(&path).unwrap().as_deref(),
        Some("пароль — 日本語 hél")
    );
}

#[test]
fn empty_hint_record_reads_back_empty() {
    let dir = TempDir::new().unwrap();
    let path = fake_container(&dir, &[0u8; 64]);
    append_hint(&path, "").unwrap();
    assert_eq!(hint_for(&path).unwrap().as_deref(), Some(""));
}
