pub mod button;
pub mod form_view;
pub mod text;
pub mod text_edit;
pub mod traits;

pub use button::ButtonInput;
pub use form_view::FormView;
pub use text::TextInput;
pub use traits::InteractionResult;
