use crate::runtime::event::ActivationSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionResult {
    Ignored,
    Handled,
    /// The widget asks for the form's submit control to be activated.
    Activate(ActivationSource),
}

impl InteractionResult {
    pub fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}
