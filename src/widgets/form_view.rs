use crate::core::value::FieldValue;
use crate::form::FormState;
use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widgets::button::ButtonInput;
use crate::widgets::text::TextInput;
use crate::widgets::traits::InteractionResult;
use unicode_width::UnicodeWidthStr;

/// Focus and cursor state for drawing a [`FormState`] with a trailing
/// submit button. Focus index `fields.len()` is the button.
#[derive(Debug, Clone)]
pub struct FormView {
    focus: usize,
    inputs: Vec<TextInput>,
    button: ButtonInput,
}

impl FormView {
    pub fn new(form: &FormState, button: ButtonInput) -> Self {
        Self {
            focus: 0,
            inputs: vec![TextInput::new(); form.len()],
            button,
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn button(&self) -> &ButtonInput {
        &self.button
    }

    pub fn is_button_focused(&self) -> bool {
        self.focus == self.inputs.len()
    }

    pub fn focus_next(&mut self) {
        let slots = self.inputs.len() + 1;
        self.focus = (self.focus + 1) % slots;
    }

    pub fn focus_prev(&mut self) {
        let slots = self.inputs.len() + 1;
        self.focus = (self.focus + slots - 1) % slots;
    }

    pub fn handle_key(&mut self, form: &mut FormState, key: KeyEvent) -> InteractionResult {
        if self.is_button_focused() {
            return self.button.on_key(key);
        }
        let Some(input) = self.inputs.get_mut(self.focus) else {
            return InteractionResult::Ignored;
        };
        let Some(text) = form.field_at_mut(self.focus).and_then(|field| field.text_mut()) else {
            return InteractionResult::Ignored;
        };
        input.on_key(text, key)
    }

    pub fn draw(&self, form: &FormState, title: &str) -> (Vec<SpanLine>, Option<CursorPos>) {
        let mut lines = vec![
            vec![Span::styled(title, Style::new().color(Color::Green).bold())],
            Vec::new(),
        ];
        let mut cursor = None;

        for (idx, (field, input)) in form.fields().iter().zip(&self.inputs).enumerate() {
            let focused = idx == self.focus;
            let line = match field.value() {
                FieldValue::Text(text) => {
                    let line = input.draw(field.label(), text, focused);
                    if focused {
                        let prefix: usize = line[..line.len() - 1].iter().map(Span::width).sum();
                        let before: String = text.chars().take(input.cursor(text)).collect();
                        let col = prefix + UnicodeWidthStr::width(before.as_str());
                        cursor = Some(CursorPos {
                            col: u16::try_from(col).unwrap_or(u16::MAX),
                            row: u16::try_from(lines.len()).unwrap_or(u16::MAX),
                        });
                    }
                    line
                }
                FieldValue::Binary(file) => vec![
                    Span::new(if focused { "› " } else { "  " }),
                    Span::styled(
                        format!("{}: ", field.label()),
                        Style::new().color(Color::White),
                    ),
                    Span::styled(
                        format!("{} ({} bytes)", file.filename, file.bytes.len()),
                        Style::new().color(Color::DarkGrey),
                    ),
                ],
            };
            lines.push(line);
        }

        lines.push(Vec::new());
        lines.push(self.button.draw(self.is_button_focused()));
        lines.push(Vec::new());
        lines.push(vec![Span::styled(
            "tab next · shift+tab prev · enter submit · esc quit",
            Style::new().color(Color::DarkGrey),
        )]);
        (lines, cursor)
    }
}
