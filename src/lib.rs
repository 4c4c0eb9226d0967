pub mod config;
pub mod core;
pub mod form;
pub mod logging;
pub mod runtime;
pub mod submission;
pub mod task;
pub mod terminal;
pub mod transport;
pub mod ui;
pub mod widgets;

pub use config::{ClientConfig, ConfigError};
pub use form::{Form, FormField, FormPayload, FormState};
pub use submission::{FailureReporter, LogReporter, SubmissionHandler, SubmissionOutcome, SubmitError};
pub use task::{ConcurrencyPolicy, SubmitExecutor};
pub use transport::{HttpTransport, Transport, TransportError};
