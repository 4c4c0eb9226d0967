pub mod multipart;
pub mod payload;
pub mod state;

pub use multipart::EncodedBody;
pub use payload::FormPayload;
pub use state::{FormField, FormState};

use crate::core::ControlId;
use std::cell::RefCell;
use std::rc::Rc;

/// A form container the submission handler reads from and resets.
pub trait Form {
    fn id(&self) -> ControlId;

    /// Snapshot of every named field as it is right now.
    fn payload(&self) -> FormPayload;

    /// Restores every field to its initial value.
    fn reset(&mut self);
}

/// Form shared between the UI that edits it and the handler that submits it.
/// Both live on the event-loop thread.
pub type SharedForm<F> = Rc<RefCell<F>>;

pub fn shared<F: Form>(form: F) -> SharedForm<F> {
    Rc::new(RefCell::new(form))
}

impl<F: Form> Form for Rc<RefCell<F>> {
    fn id(&self) -> ControlId {
        self.borrow().id()
    }

    fn payload(&self) -> FormPayload {
        self.borrow().payload()
    }

    fn reset(&mut self) {
        self.borrow_mut().reset();
    }
}
