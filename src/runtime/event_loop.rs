use crate::core::ControlId;
use crate::runtime::event::{ActivationEvent, ActivationSource, DispatchOutcome};
use tracing::{trace, warn};

/// Something bound to a control on the event loop.
pub trait Listener {
    fn on_activate(&mut self, event: &mut ActivationEvent);

    /// Called on every loop turn to apply work that finished off-loop.
    /// Returns how many items were applied.
    fn poll(&mut self) -> usize {
        0
    }
}

struct Binding {
    control: ControlId,
    listener: Box<dyn Listener>,
}

/// Single-threaded UI event source: dispatches activations to the listeners
/// bound to a control and polls them for completed work.
#[derive(Default)]
pub struct EventLoop {
    bindings: Vec<Binding>,
    navigations: usize,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, control: impl Into<ControlId>, listener: Box<dyn Listener>) {
        self.bindings.push(Binding {
            control: control.into(),
            listener,
        });
    }

    pub fn is_bound(&self, control: &str) -> bool {
        self.bindings.iter().any(|binding| binding.control == control)
    }

    pub fn activate(&mut self, target: impl Into<ControlId>, source: ActivationSource) -> DispatchOutcome {
        self.dispatch(ActivationEvent::new(target, source))
    }

    pub fn dispatch(&mut self, mut event: ActivationEvent) -> DispatchOutcome {
        let mut listeners = 0usize;
        for binding in &mut self.bindings {
            if binding.control != *event.target() {
                continue;
            }
            listeners += 1;
            binding.listener.on_activate(&mut event);
        }

        let outcome = DispatchOutcome {
            listeners,
            default_prevented: event.is_default_prevented(),
        };

        if outcome.navigated() {
            self.navigations = self.navigations.saturating_add(1);
            warn!(
                control = %event.target(),
                source = ?event.source(),
                "activation not intercepted, default navigation performed"
            );
        } else {
            trace!(control = %event.target(), listeners, "activation intercepted");
        }

        outcome
    }

    pub fn poll(&mut self) -> usize {
        self.bindings
            .iter_mut()
            .map(|binding| binding.listener.poll())
            .sum()
    }

    /// How many activations fell through to their default action.
    pub fn navigations(&self) -> usize {
        self.navigations
    }
}
