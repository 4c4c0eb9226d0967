use crate::core::ControlId;
use crate::terminal::TerminalEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationSource {
    Pointer,
    /// Enter or Space on the control itself.
    Keyboard,
    /// Enter inside one of the form's text fields.
    ImplicitSubmission,
    Programmatic,
}

/// A user-initiated trigger of a control, dispatched to its listeners.
///
/// Unless a listener calls [`ActivationEvent::prevent_default`], the event
/// loop performs the control's default action (form navigation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationEvent {
    target: ControlId,
    source: ActivationSource,
    default_prevented: bool,
}

impl ActivationEvent {
    pub fn new(target: impl Into<ControlId>, source: ActivationSource) -> Self {
        Self {
            target: target.into(),
            source,
            default_prevented: false,
        }
    }

    pub fn target(&self) -> &ControlId {
        &self.target
    }

    pub fn source(&self) -> ActivationSource {
        self.source
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub listeners: usize,
    pub default_prevented: bool,
}

impl DispatchOutcome {
    pub fn navigated(&self) -> bool {
        !self.default_prevented
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Terminal(TerminalEvent),
    Activate(ActivationEvent),
}
