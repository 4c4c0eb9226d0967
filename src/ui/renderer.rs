use crate::form::FormState;
use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::span::SpanLine;
use crate::widgets::FormView;

/// A fully laid out screen, ready for the terminal backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub title: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            title: "New workout".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, form: &FormState, view: &FormView, size: TerminalSize) -> RenderFrame {
        let (mut lines, mut cursor) = view.draw(form, &self.config.title);
        let height = usize::from(size.height);
        lines.truncate(height);
        if cursor.is_some_and(|pos| usize::from(pos.row) >= height) {
            cursor = None;
        }
        RenderFrame { lines, cursor }
    }
}
