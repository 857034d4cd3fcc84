//! # Worker Queue
//!
//! Serialized background execution: one thread, one job at a time, in
//! submission order. Completion is delivered through a caller-supplied
//! callback on the worker thread; callers that need results elsewhere hand
//! in a channel sender. Cancellation mid-stream is not supported — a
//! started job runs to completion or failure.

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use tracing::{info, warn};

use crate::error::CryptoniteError;
use crate::pipeline::Pipeline;

/// A queued container operation.
///
/// `multiple` selects batch mode: one full pipeline run per source,
/// strictly sequential, first failure aborting the remainder.
pub enum Job {
    Encrypt {
        password: String,
        hint: Option<String>,
        sources: Vec<PathBuf>,
        output_dir: PathBuf,
        multiple: bool,
    },
    Decrypt {
        password: String,
        sources: Vec<PathBuf>,
        output_dir: PathBuf,
        multiple: bool,
    },
}

type Completion = Box<dyn FnOnce(Result<Vec<PathBuf>, CryptoniteError>) + Send + 'static>;

enum Command {
    Run(Box<Job>, Completion),
    Shutdown,
}

/// Handle to the background worker thread.
///
/// Dropping the handle drains the queue and joins the thread.
pub struct Worker {
    sender: mpsc::Sender<Command>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Worker {
    /// Spawn a worker that owns `pipeline`. All file and cipher state for
    /// a job is exclusive to the worker thread; nothing is shared across
    /// jobs except the pipeline's scratch directory, which each job clears
    /// on entry.
    pub fn spawn(pipeline: Pipeline) -> Result<Self, CryptoniteError> {
        let (sender, receiver) = mpsc::channel::<Command>();
        let handle = thread::Builder::new()
            .name("cryptonite-worker".to_string())
            .spawn(move || {
                info!("worker started");
                for command in receiver {
                    match command {
                        Command::Run(job, completion) => {
                            let result = run_job(&pipeline, *job);
                            if let Err(e) = &result {
                                warn!(error = %e, "job failed");
                            }
                            completion(result);
                        }
                        Command::Shutdown => break,
                    }
                }
                info!("worker stopped");
            })?;

        Ok(Self {
            sender,
            handle: Some(handle),
        })
    }

    /// Enqueue a job. `completion` runs on the worker thread after the job
    /// finishes, in submission order relative to other jobs.
    pub fn submit(
        &self,
        job: Job,
        completion: impl FnOnce(Result<Vec<PathBuf>, CryptoniteError>) + Send + 'static,
    ) -> Result<(), CryptoniteError> {
        self.sender
            .send(Command::Run(Box::new(job), Box::new(completion)))
            .map_err(|_| CryptoniteError::Crypto("worker queue is closed".to_string()))
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        let _ = self.sender.send(Command::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_job(pipeline: &Pipeline, job: Job) -> Result<Vec<PathBuf>, CryptoniteError> {
    match job {
        Job::Encrypt {
            password,
            hint,
            sources,
            output_dir,
            multiple,
        } => {
            if multiple {
                pipeline.encrypt_batch(&password, hint.as_deref(), &sources, &output_dir)
            } else {
                pipeline.encrypt(&password, hint.as_deref(), &sources, &output_dir)
            }
        }
        Job::Decrypt {
            password,
            sources,
            output_dir,
            multiple,
        } => {
            if multiple {
                pipeline.decrypt_batch(&password, &sources, &output_dir)
            } else {
                pipeline.decrypt(&password, &sources, &output_dir)
            }
        }
    }
}
