pub mod execution;
pub mod executor;
pub mod id;
pub mod policy;
pub mod run_state;

pub use execution::{SubmitCompletion, SubmitInvocation};
pub use executor::{ExecutionMode, SubmitExecutor};
pub use id::{DEFAULT_ENDPOINT, SubmissionId};
pub use policy::ConcurrencyPolicy;
pub use run_state::SubmitRunState;
