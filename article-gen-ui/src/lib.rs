//! Desktop front-end of the article generator.
//!
//! The window logic is split in two:
//! - toolkit-independent state (`form`, `viewer`) holding every transition
//! - the egui application (`app`) rendering that state and running dialogs

/// egui/eframe application and entry point.
pub mod app;

/// Input fields, their Text/File modes, and form validation.
pub mod form;

/// Pagination through the generated samples.
pub mod viewer;

pub use app::{ArticleGeneratorApp, run};
pub use eframe::Error as GuiError;
pub use form::{Form, FormError, InputField, InputMode};
pub use viewer::{Notice, Viewer};
