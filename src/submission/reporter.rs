use crate::submission::error::SubmitError;
use crate::task::id::SubmissionId;
use tracing::error;

/// Hook that decides where failed submissions are surfaced.
///
/// The default [`LogReporter`] writes to the diagnostic log only and shows
/// the user nothing. Front ends that want inline feedback supply their own.
pub trait FailureReporter {
    fn report_failure(&mut self, id: SubmissionId, error: &SubmitError);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl FailureReporter for LogReporter {
    fn report_failure(&mut self, id: SubmissionId, error: &SubmitError) {
        match error {
            SubmitError::Status { status } => {
                error!(submission = %id, status, "error creating workout: {error}");
            }
            _ => error!(submission = %id, "error creating workout: {error}"),
        }
    }
}

impl<R: FailureReporter + ?Sized> FailureReporter for Box<R> {
    fn report_failure(&mut self, id: SubmissionId, error: &SubmitError) {
        (**self).report_failure(id, error);
    }
}
