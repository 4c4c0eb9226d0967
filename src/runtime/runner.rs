use crate::core::ControlId;
use crate::form::{FormState, SharedForm};
use crate::runtime::command::Command;
use crate::runtime::event::{ActivationEvent, AppEvent};
use crate::runtime::event_loop::EventLoop;
use crate::runtime::key_bindings::KeyBindings;
use crate::terminal::{KeyEvent, Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use crate::widgets::{FormView, InteractionResult};
use std::io;
use std::time::Duration;
use tracing::debug;

const POLL_TIMEOUT: Duration = Duration::from_millis(120);

/// Everything the interactive loop does that does not touch the terminal.
pub struct FormSession {
    form: SharedForm<FormState>,
    view: FormView,
    events: EventLoop,
    key_bindings: KeyBindings,
    should_exit: bool,
}

impl FormSession {
    pub fn new(form: SharedForm<FormState>, view: FormView, events: EventLoop) -> Self {
        Self {
            form,
            view,
            events,
            key_bindings: KeyBindings::new(),
            should_exit: false,
        }
    }

    pub fn form(&self) -> &SharedForm<FormState> {
        &self.form
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn events(&self) -> &EventLoop {
        &self.events
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn submit_control(&self) -> &ControlId {
        self.view.button().id()
    }

    /// Applies one event. Returns whether the screen needs redrawing.
    pub fn dispatch(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Terminal(TerminalEvent::Key(key)) => self.handle_key(key),
            AppEvent::Terminal(TerminalEvent::Resize(_)) => true,
            AppEvent::Terminal(TerminalEvent::Tick) => false,
            AppEvent::Activate(activation) => {
                self.events.dispatch(activation);
                true
            }
        }
    }

    /// Applies finished submissions. Returns whether the screen needs redrawing.
    pub fn poll(&mut self) -> bool {
        self.events.poll() > 0
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.key_bindings.resolve(key) {
            Command::Exit => {
                self.should_exit = true;
                false
            }
            Command::NextFocus => {
                self.view.focus_next();
                true
            }
            Command::PrevFocus => {
                self.view.focus_prev();
                true
            }
            Command::InputKey(key) => {
                // The form borrow must end before listeners read it.
                let result = {
                    let mut form = self.form.borrow_mut();
                    self.view.handle_key(&mut form, key)
                };
                match result {
                    InteractionResult::Activate(source) => {
                        let target = self.submit_control().clone();
                        debug!(control = %target, ?source, "activating submit control");
                        self.dispatch(AppEvent::Activate(ActivationEvent::new(target, source)))
                    }
                    other => other.is_handled(),
                }
            }
        }
    }
}

pub struct Runtime {
    session: FormSession,
    terminal: Terminal,
    renderer: Renderer,
}

impl Runtime {
    pub fn new(session: FormSession, terminal: Terminal) -> Self {
        Self {
            session,
            terminal,
            renderer: Renderer::default(),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.render()?;

            while !self.session.should_exit() {
                let mut render_requested = self.session.poll();

                let event = self.terminal.poll_event(POLL_TIMEOUT)?;
                if let TerminalEvent::Resize(size) = event {
                    self.terminal.set_size(size);
                }
                render_requested |= self.session.dispatch(AppEvent::Terminal(event));

                if render_requested && !self.session.should_exit() {
                    self.render()?;
                }
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        run_result.and(exit_result)
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = {
            let form = self.session.form().borrow();
            self.renderer
                .render(&form, self.session.view(), self.terminal.size())
        };
        self.terminal.render_frame(&frame)
    }
}
