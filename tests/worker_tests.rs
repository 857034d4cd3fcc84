//! tests/worker_tests.rs
//! Background queue: asynchronous completion, strict job ordering.

mod common;
use common::{TEST_PASSWORD, TEST_ROUNDS};

use cryptonite_rs::{Job, Pipeline, Worker};
use std::fs;
use std::sync::mpsc;
use std::time::Duration;
use tempfile::TempDir;

const RECV_TIMEOUT: Duration = Duration::from_secs(60);

#[test]
fn encrypt_then_decrypt_through_the_queue() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("doc.txt");
    fs::write(&source, b"queued payload").unwrap();
    let output_dir = root.path().join("out");
    let restore_dir = root.path().join("restored");

    let pipeline = Pipeline::new(root.path().join("scratch")).with_rounds(TEST_ROUNDS);
    let worker = Worker::spawn(pipeline).unwrap();

    let (tx, rx) = mpsc::channel();
    worker
        .submit(
            Job::Encrypt {
                password: TEST_PASSWORD.to_string(),
                hint: Some("queued".to_string()),
                sources: vec![source],
                output_dir: output_dir.clone(),
                multiple: false,
            },
            move |result| tx.send(result).unwrap(),
        )
        .unwrap();
    let containers = rx.recv_timeout(RECV_TIMEOUT).unwrap().unwrap();
    assert_eq!(containers.len(), 1);

    let (tx, rx) = mpsc::channel();
    worker
        .submit(
            Job::Decrypt {
                password: TEST_PASSWORD.to_string(),
                sources: containers,
                output_dir: restore_dir,
                multiple: false,
            },
            move |result| tx.send(result).unwrap(),
        )
        .unwrap();
    let produced = rx.recv_timeout(RECV_TIMEOUT).unwrap().unwrap();
    assert_eq!(fs::read(&produced[0]).unwrap(), b"queued payload");
}

#[test]
fn jobs_complete_in_submission_order() {
    let root = TempDir::new().unwrap();
    let output_dir = root.path().join("out");
    let pipeline = Pipeline::new(root.path().join("scratch")).with_rounds(TEST_ROUNDS);
    let worker = Worker::spawn(pipeline).unwrap();

    let (tx, rx) = mpsc::channel();
    for index in 0..3u8 {
        let source = root.path().join(format!("file{index}.txt"));
        fs::write(&source, [index; 10]).unwrap();
        let tx = tx.clone();
        worker
            .submit(
                Job::Encrypt {
                    password: TEST_PASSWORD.to_string(),
                    hint: None,
                    sources: vec![source],
                    output_dir: output_dir.clone(),
                    multiple: false,
                },
                move |result| tx.send((index, result.is_ok())).unwrap(),
            )
            .unwrap();
    }
    drop(tx);

    let completions: Vec<_> = rx.iter().collect();
    assert_eq!(completions, [(0, true), (1, true), (2, true)]);
}

#[test]
fn failures_are_reported_not_swallowed() {
    let root = TempDir::new().unwrap();
    let pipeline = Pipeline::new(root.path().join("scratch")).with_rounds(TEST_ROUNDS);
    let worker = Worker::spawn(pipeline).unwrap();

    let (tx, rx) = mpsc::channel();
    worker
        .submit(
            Job::Encrypt {
                password: TEST_PASSWORD.to_string(),
                hint: None,
                sources: vec![root.path().join("does-not-exist.txt")],
                output_dir: root.path().join("out"),
                multiple: false,
            },
            move |result| tx.send(result).unwrap(),
        )
        .unwrap();
    assert!(rx.recv_timeout(RECV_TIMEOUT).unwrap().is_err());
}
