pub mod command;
pub mod event;
pub mod event_loop;
pub mod key_bindings;
pub mod runner;

pub use event::{ActivationEvent, ActivationSource, AppEvent, DispatchOutcome};
pub use event_loop::{EventLoop, Listener};
pub use runner::{FormSession, Runtime};
