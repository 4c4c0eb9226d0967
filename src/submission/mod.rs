pub mod error;
pub mod handler;
pub mod reporter;

pub use error::SubmitError;
pub use handler::{SubmissionHandler, SubmissionOutcome};
pub use reporter::{FailureReporter, LogReporter};
