use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::contact::{validate, ContactField, ContactFormFields, ContactSubmission, FieldErrors};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormUiState {
    #[default]
    Idle,
    Submitting,
    Success,
}

impl FormUiState {
    /// Whether a new submission may be started in this state.
    pub fn accepts_submit(self) -> bool {
        !matches!(self, Self::Submitting)
    }
}

/// Identifies one submission attempt that made it past validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubmissionRound(u64);

/// Complete presentation state of the contact form.
///
/// All transitions are plain methods so they can be applied atomically by
/// whoever owns the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub fields: ContactFormFields,
    pub errors: FieldErrors,
    pub state: FormUiState,
    round: SubmissionRound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BeginSubmitError {
    #[error("A submission is already in progress.")]
    InProgress,
    #[error("The contact form contains invalid fields: {0}")]
    Invalid(FieldErrors),
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent submission round that was started.
    pub fn round(&self) -> SubmissionRound {
        self.round
    }

    /// Replaces the value of `field` and forgets its validation error.
    pub fn edit(&mut self, field: ContactField, value: String) {
        self.fields.set(field, value);
        self.errors.clear(field);
    }

    /// Validates the current fields and, if they are valid, enters
    /// [`FormUiState::Submitting`].
    ///
    /// Validation failures replace the recorded field errors but leave the
    /// state untouched. While a submission is in flight nothing is changed.
    pub fn begin_submit(
        &mut self,
    ) -> Result<(SubmissionRound, ContactSubmission), BeginSubmitError> {
        if !self.state.accepts_submit() {
            return Err(BeginSubmitError::InProgress);
        }

        match validate(&self.fields) {
            Ok(submission) => {
                self.errors = FieldErrors::new();
                self.state = FormUiState::Submitting;
                self.round = SubmissionRound(self.round.0 + 1);
                Ok((self.round, submission))
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(BeginSubmitError::Invalid(errors))
            }
        }
    }

    /// The store acknowledged the submission: the fields are emptied.
    pub fn finish_success(&mut self, round: SubmissionRound) -> bool {
        if !self.is_in_flight(round) {
            return false;
        }
        self.fields = ContactFormFields::default();
        self.state = FormUiState::Success;
        true
    }

    /// The submission failed: the form is idle again and the fields are kept
    /// for another attempt.
    pub fn finish_failure(&mut self, round: SubmissionRound) -> bool {
        if !self.is_in_flight(round) {
            return false;
        }
        self.state = FormUiState::Idle;
        true
    }

    /// Leaves [`FormUiState::Success`] once its display time is over, unless a
    /// newer submission has been started in the meantime.
    pub fn expire_success(&mut self, round: SubmissionRound) -> bool {
        if self.state != FormUiState::Success || self.round != round {
            return false;
        }
        self.state = FormUiState::Idle;
        true
    }

    fn is_in_flight(&self, round: SubmissionRound) -> bool {
        self.state == FormUiState::Submitting && self.round == round
    }
}
