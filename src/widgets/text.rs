use crate::runtime::event::ActivationSource;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widgets::text_edit;
use crate::widgets::traits::InteractionResult;

/// Editing state for one text field. The text itself lives in the form.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self, value: &str) -> usize {
        text_edit::clamp_cursor(self.cursor, value)
    }

    pub fn on_key(&mut self, value: &mut String, key: KeyEvent) -> InteractionResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('w') | KeyCode::Backspace => {
                    text_edit::delete_word_left(value, &mut self.cursor);
                    InteractionResult::Handled
                }
                _ => InteractionResult::Ignored,
            };
        }

        match key.code {
            // Enter inside a text field submits the enclosing form.
            KeyCode::Enter => InteractionResult::Activate(ActivationSource::ImplicitSubmission),
            KeyCode::Char(ch) => {
                text_edit::insert_char(value, &mut self.cursor, ch);
                InteractionResult::Handled
            }
            KeyCode::Backspace => {
                text_edit::backspace_char(value, &mut self.cursor);
                InteractionResult::Handled
            }
            KeyCode::Delete => {
                text_edit::delete_char(value, &mut self.cursor);
                InteractionResult::Handled
            }
            KeyCode::Left => {
                text_edit::move_left(&mut self.cursor, value);
                InteractionResult::Handled
            }
            KeyCode::Right => {
                text_edit::move_right(&mut self.cursor, value);
                InteractionResult::Handled
            }
            KeyCode::Home => {
                self.cursor = 0;
                InteractionResult::Handled
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(value);
                InteractionResult::Handled
            }
            _ => InteractionResult::Ignored,
        }
    }

    pub fn draw(&self, label: &str, value: &str, focused: bool) -> SpanLine {
        let marker = if focused { "› " } else { "  " };
        let label_style = if focused {
            Style::new().color(Color::Cyan).bold()
        } else {
            Style::new().color(Color::White)
        };
        vec![
            Span::styled(marker, Style::new().color(Color::Cyan)),
            Span::styled(format!("{label}: "), label_style),
            Span::new(value),
        ]
    }
}
