use std::path::Path;

use article_gen_core::io;
use article_gen_core::{CONTEXT_LIMIT, GenerationRequest};

/// Largest number of samples offered by the form.
pub const MAX_SAMPLES: usize = 99;

/// How a field gets its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Typed by the user.
    Text,
    /// First line of a file; the field is read-only.
    File,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            InputMode::Text => "Text",
            InputMode::File => "File",
        }
    }
}

/// One input area of the form (title or initial content).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    mode: InputMode,
    pub value: String,
}

impl Default for InputField {
    fn default() -> Self {
        Self { mode: InputMode::Text, value: String::new() }
    }
}

impl InputField {
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_read_only(&self) -> bool {
        self.mode == InputMode::File
    }

    /// Whether loading a file would discard something the user typed.
    pub fn requires_overwrite_confirmation(&self) -> bool {
        !self.value.is_empty()
    }

    /// Back to typed text. The current value is kept and becomes editable.
    pub fn use_text(&mut self) {
        self.mode = InputMode::Text;
    }

    /// Replaces the value with the first line of `path` and locks the field.
    ///
    /// On error the field is left in text mode with its value untouched.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> std::io::Result<()> {
        match io::first_line(&path) {
            Ok(line) => {
                self.value = line;
                self.mode = InputMode::File;
                log::debug!("loaded field from {}", path.as_ref().display());
                Ok(())
            }
            Err(e) => {
                self.mode = InputMode::Text;
                Err(e)
            }
        }
    }
}

/// Why the form was refused; the message is shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub title: &'static str,
    pub message: &'static str,
}

/// Everything the main window collects before a generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub title: InputField,
    pub content: InputField,
    pub sample_count: usize,
    pub max_words: usize,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            title: InputField::default(),
            content: InputField::default(),
            sample_count: 1,
            max_words: CONTEXT_LIMIT,
        }
    }
}

impl Form {
    /// Checks the fields and builds the request to submit.
    ///
    /// Trailing whitespace is stripped from the title. Content newlines are
    /// left alone; the prompt encoder flattens them.
    pub fn validate(&self) -> Result<GenerationRequest, FormError> {
        if self.sample_count == 0 {
            return Err(FormError {
                title: "Invalid Value",
                message: "Number of samples must be a positive number.",
            });
        }
        if self.sample_count > MAX_SAMPLES {
            return Err(FormError {
                title: "Invalid Value",
                message: "Number of samples must be at most 99.",
            });
        }
        if !(1..=CONTEXT_LIMIT).contains(&self.max_words) {
            return Err(FormError {
                title: "Invalid Value",
                message: "Words per sample must be a whole number between 1 and 1023.",
            });
        }

        let title = self.title.value.trim_end();
        if title.is_empty() {
            return Err(FormError { title: "Invalid Title", message: "Title must not be blank." });
        }

        GenerationRequest::new(title, self.content.value.as_str(), self.sample_count, self.max_words).map_err(|_| {
            FormError { title: "Invalid Value", message: "The request could not be built from these values." }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Form {
        let mut form = Form::default();
        form.title.value = "A Title  \n".to_owned();
        form.content.value = "line one\nline two".to_owned();
        form.sample_count = 2;
        form.max_words = 300;
        form
    }

    #[test]
    fn valid_form_builds_request() {
        let request = filled().validate().unwrap();
        assert_eq!(request.title(), "A Title");
        assert_eq!(request.initial_content(), "line one\nline two");
        assert_eq!(request.sample_count(), 2);
        assert_eq!(request.max_words(), 300);
    }

    #[test]
    fn blank_title_is_refused() {
        let mut form = filled();
        form.title.value = "   ".to_owned();
        assert_eq!(form.validate().unwrap_err().message, "Title must not be blank.");
    }

    #[test]
    fn counts_out_of_range_are_refused() {
        let mut form = filled();
        form.sample_count = 0;
        assert_eq!(form.validate().unwrap_err().message, "Number of samples must be a positive number.");

        let mut form = filled();
        form.sample_count = MAX_SAMPLES + 1;
        assert_eq!(form.validate().unwrap_err().message, "Number of samples must be at most 99.");

        let mut form = filled();
        form.max_words = 1024;
        assert_eq!(
            form.validate().unwrap_err().message,
            "Words per sample must be a whole number between 1 and 1023."
        );
    }

    #[test]
    fn loading_a_file_locks_the_field_until_text_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("title.txt");
        std::fs::write(&path, "From File \nsecond line\n").unwrap();

        let mut field = InputField::default();
        field.value = "typed".to_owned();
        assert!(field.requires_overwrite_confirmation());

        field.load_file(&path).unwrap();
        assert_eq!(field.value, "From File");
        assert_eq!(field.mode(), InputMode::File);
        assert!(field.is_read_only());

        field.use_text();
        assert!(!field.is_read_only());
        assert_eq!(field.value, "From File");
    }

    #[test]
    fn failed_load_keeps_text_mode_and_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut field = InputField::default();
        field.value = "typed".to_owned();

        assert!(field.load_file(dir.path().join("missing.txt")).is_err());
        assert_eq!(field.mode(), InputMode::Text);
        assert_eq!(field.value, "typed");
    }

    #[test]
    fn empty_field_needs_no_confirmation() {
        assert!(!InputField::default().requires_overwrite_confirmation());
    }
}
