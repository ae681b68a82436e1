//! Waitlist form model
//!
//! Holds the two field values and the submission status, and owns every
//! status transition. The DOM layer reads labels/visibility from here and
//! hands the network result back via [`FormModel::complete`].

use serde::Serialize;
use thiserror::Error;

use crate::consts::SOURCE_TAG;

/// Submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl SubmitStatus {
    /// Label shown on the submit button
    pub fn button_label(&self) -> &'static str {
        match self {
            SubmitStatus::Idle | SubmitStatus::Error => "Join the Waitlist",
            SubmitStatus::Submitting => "Joining…",
            SubmitStatus::Success => "Joined!",
        }
    }

    /// Whether the inline error message is visible
    pub fn shows_error(&self) -> bool {
        *self == SubmitStatus::Error
    }

    pub fn is_in_flight(&self) -> bool {
        *self == SubmitStatus::Submitting
    }
}

/// What went wrong with a submission. Both variants collapse to
/// [`SubmitStatus::Error`]; the split exists for logging.
#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned status {0}")]
    Status(u16),
}

/// JSON payload posted to the form-collection endpoint
#[derive(Debug, Clone, Serialize)]
pub struct WaitlistEntry {
    pub email: String,
    pub name: String,
    pub source: &'static str,
}

impl WaitlistEntry {
    pub fn new(email: String, name: String) -> Self {
        Self {
            email,
            name,
            source: SOURCE_TAG,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The form's state: field values plus submission status
#[derive(Debug, Clone, Default)]
pub struct FormModel {
    pub email: String,
    pub name: String,
    status: SubmitStatus,
}

impl FormModel {
    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    /// Start a submission with the given field values.
    ///
    /// Returns the payload to send, or `None` while a previous submission is
    /// still in flight (at most one outstanding request).
    pub fn begin_submit(&mut self, email: String, name: String) -> Option<WaitlistEntry> {
        if self.status.is_in_flight() {
            return None;
        }
        self.email = email;
        self.name = name;
        self.status = SubmitStatus::Submitting;
        Some(WaitlistEntry::new(self.email.clone(), self.name.clone()))
    }

    /// Record the outcome of the in-flight submission. Field values are left
    /// untouched so a failed submission can be retried as-is.
    pub fn complete(&mut self, result: Result<(), SubmitError>) {
        self.status = match result {
            Ok(()) => SubmitStatus::Success,
            Err(ref err) => {
                log::warn!("waitlist submission failed: {err}");
                SubmitStatus::Error
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_submission_flow() {
        let mut form = FormModel::default();
        assert_eq!(form.status(), SubmitStatus::Idle);

        let entry = form
            .begin_submit("ada@example.com".into(), "Ada".into())
            .expect("idle form accepts a submission");
        assert_eq!(form.status(), SubmitStatus::Submitting);
        assert_eq!(entry.email, "ada@example.com");

        form.complete(Ok(()));
        assert_eq!(form.status(), SubmitStatus::Success);
    }

    #[test]
    fn test_non_success_response_keeps_fields() {
        let mut form = FormModel::default();
        form.begin_submit("ada@example.com".into(), "Ada".into())
            .unwrap();
        form.complete(Err(SubmitError::Status(422)));

        assert_eq!(form.status(), SubmitStatus::Error);
        assert!(form.status().shows_error());
        assert_eq!(form.email, "ada@example.com");
        assert_eq!(form.name, "Ada");
    }

    #[test]
    fn test_transport_failure_matches_status_failure() {
        let mut form = FormModel::default();
        form.begin_submit("ada@example.com".into(), String::new())
            .unwrap();
        form.complete(Err(SubmitError::Transport("connection reset".into())));
        assert_eq!(form.status(), SubmitStatus::Error);
        assert_eq!(form.email, "ada@example.com");
    }

    #[test]
    fn test_error_state_allows_resubmit() {
        let mut form = FormModel::default();
        form.begin_submit("ada@example.com".into(), String::new())
            .unwrap();
        form.complete(Err(SubmitError::Status(500)));

        assert!(
            form.begin_submit(form.email.clone(), form.name.clone())
                .is_some()
        );
        assert_eq!(form.status(), SubmitStatus::Submitting);
    }

    #[test]
    fn test_duplicate_in_flight_submission_refused() {
        let mut form = FormModel::default();
        form.begin_submit("ada@example.com".into(), String::new())
            .unwrap();
        assert!(
            form.begin_submit("eve@example.com".into(), String::new())
                .is_none()
        );
        // The in-flight values are untouched by the refused attempt
        assert_eq!(form.email, "ada@example.com");
    }

    #[test]
    fn test_payload_shape() {
        let entry = WaitlistEntry::new("ada@example.com".into(), "Ada".into());
        let json = entry.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["email"], "ada@example.com");
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["source"], crate::consts::SOURCE_TAG);
    }

    #[test]
    fn test_button_labels() {
        assert_eq!(SubmitStatus::Idle.button_label(), "Join the Waitlist");
        assert_eq!(SubmitStatus::Submitting.button_label(), "Joining…");
        assert_eq!(SubmitStatus::Success.button_label(), "Joined!");
        assert_eq!(SubmitStatus::Error.button_label(), "Join the Waitlist");
    }
}
