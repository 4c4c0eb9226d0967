use crate::terminal::KeyEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    NextFocus,
    PrevFocus,
    InputKey(KeyEvent),
}
