use crate::core::ControlId;
use crate::runtime::event::ActivationSource;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widgets::traits::InteractionResult;

/// The form's submit control.
#[derive(Debug, Clone)]
pub struct ButtonInput {
    id: ControlId,
    text: String,
}

impl ButtonInput {
    pub fn new(id: impl Into<ControlId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    pub fn id(&self) -> &ControlId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                InteractionResult::Activate(ActivationSource::Keyboard)
            }
            _ => InteractionResult::Ignored,
        }
    }

    pub fn draw(&self, focused: bool) -> SpanLine {
        let label = if self.text.is_empty() { " " } else { &self.text };
        let style = if focused {
            Style::new()
                .color(Color::White)
                .background(Color::Blue)
                .bold()
        } else {
            Style::new().color(Color::DarkGrey)
        };
        vec![Span::new("  "), Span::styled(format!("[ {label} ]"), style)]
    }
}
