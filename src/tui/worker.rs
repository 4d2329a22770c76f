//! Background worker for the prediction request.
//!
//! The HTTP call blocks, so it runs on its own thread and reports back over
//! a channel the UI loop polls every frame.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use zeroize::Zeroize;

use crate::application::AssessmentService;
use crate::domain::{Assessment, RawInput};
use crate::ports::Predictor;

/// Progress updates from the assessment worker.
#[derive(Debug, Clone)]
pub enum AssessmentProgress {
    /// Request sent, waiting for the service
    Submitting,
    /// Assessment complete
    Complete(Assessment),
    /// Request failed; message is safe to show to the user
    Failed(String),
}

/// Handle to a running assessment worker.
pub struct AssessmentWorkerHandle {
    progress_rx: Receiver<AssessmentProgress>,
    handle: JoinHandle<()>,
}

impl AssessmentWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<AssessmentProgress> {
        self.progress_rx.try_recv().ok()
    }

    /// True once the worker thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Runs one assessment off the UI thread.
pub struct AssessmentWorker;

impl AssessmentWorker {
    /// Spawn a background assessment for `raw`.
    pub fn spawn<P>(service: Arc<AssessmentService<P>>, raw: RawInput) -> AssessmentWorkerHandle
    where
        P: Predictor + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let mut raw = raw;
            Self::run(&service, &raw, &tx);
            raw.zeroize();
        });

        AssessmentWorkerHandle {
            progress_rx: rx,
            handle,
        }
    }

    fn run<P: Predictor>(
        service: &AssessmentService<P>,
        raw: &RawInput,
        tx: &Sender<AssessmentProgress>,
    ) {
        let _ = tx.send(AssessmentProgress::Submitting);

        let update = match service.assess(raw) {
            Ok(assessment) => AssessmentProgress::Complete(assessment),
            Err(e) => AssessmentProgress::Failed(e.to_string()),
        };
        let _ = tx.send(update);
    }
}
