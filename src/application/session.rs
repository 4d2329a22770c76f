//! Form session state: in-flight flag and the most recent outcome.

use crate::domain::Assessment;
use crate::CardioError;

/// Per-session submission state.
///
/// Only one submission may be outstanding. Starting a new one discards the
/// previous result and error.
#[derive(Debug, Default)]
pub struct FormSession {
    in_flight: bool,
    last_assessment: Option<Assessment>,
    last_error: Option<String>,
}

impl FormSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a submission as started.
    ///
    /// # Errors
    /// Returns `CardioError::SubmissionInFlight` if one is already outstanding.
    pub fn begin_submission(&mut self) -> Result<(), CardioError> {
        if self.in_flight {
            return Err(CardioError::SubmissionInFlight);
        }
        self.in_flight = true;
        self.last_assessment = None;
        self.last_error = None;
        Ok(())
    }

    /// Record the outcome of the outstanding submission.
    pub fn complete(&mut self, outcome: Result<Assessment, String>) {
        self.in_flight = false;
        match outcome {
            Ok(assessment) => {
                self.last_assessment = Some(assessment);
                self.last_error = None;
            }
            Err(message) => {
                self.last_assessment = None;
                self.last_error = Some(message);
            }
        }
    }

    /// Drop the displayed result.
    pub fn dismiss(&mut self) {
        self.last_assessment = None;
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub fn last_assessment(&self) -> Option<&Assessment> {
        self.last_assessment.as_ref()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
