//! Domain model types (pure).
//!
//! Configuration enums and the error taxonomy shared by the engine and the shell.

pub mod code;
pub mod error;
pub mod key_action;
pub mod settings;
pub mod view_mode;

// Re-export for convenience
pub use code::{CodeCharactersCase, CodeType};
pub use error::{AppError, InputError, LayoutError};
pub use key_action::KeyAction;
pub use settings::{
    EditOperation, HorizontalScrollUnit, ScrollBarVisibility, TextEncoding, VerticalScrollUnit,
    DEFAULT_MAX_BYTES_PER_CHAR,
};
pub use view_mode::{RowWrapping, Section, ViewMode};
