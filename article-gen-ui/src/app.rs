use std::path::PathBuf;

use eframe::{egui, Frame};
use egui::Context;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use article_gen_core::{CONTEXT_LIMIT, Engine, Generator};

use crate::form::{Form, InputField, InputMode, MAX_SAMPLES};
use crate::viewer::Viewer;

const MIN_WINDOW_WIDTH: f32 = 600.0;
const MIN_WINDOW_HEIGHT: f32 = 300.0;
const FIELD_WIDTH: f32 = 400.0;

/// Shows a blocking error dialog.
fn show_error(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Asks before a file replaces what the user typed.
fn confirm_overwrite(field_name: &str) -> bool {
    let answer = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Continue?")
        .set_description(format!(
            "This will overwrite the contents of the {field_name} field.\nWould you like to continue?"
        ))
        .set_buttons(MessageButtons::YesNo)
        .show();
    matches!(answer, MessageDialogResult::Yes)
}

fn pick_text_file() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Open")
        .add_filter("Text Files (*.txt)", &["txt"])
        .add_filter("All Files (*.*)", &["*"])
        .pick_file()
}

/// Handles a Text/File selection change on one field.
///
/// Switching to File asks for confirmation if the field holds text, then
/// for a file; declining either leaves the field in text mode.
fn switch_mode(field: &mut InputField, field_name: &str, requested: InputMode) {
    match requested {
        InputMode::Text => field.use_text(),
        InputMode::File => {
            if field.requires_overwrite_confirmation() && !confirm_overwrite(field_name) {
                field.use_text();
                return;
            }
            let Some(path) = pick_text_file() else {
                field.use_text();
                return;
            };
            if let Err(e) = field.load_file(&path) {
                log::warn!("cannot load {}: {e}", path.display());
                show_error("Invalid File", &format!("Cannot read '{}': {e}", path.display()));
            }
        }
    }
}

/// Mode selector for one field. Returns the newly chosen mode, if any.
fn mode_selector(ui: &mut egui::Ui, id: &str, current: InputMode) -> Option<InputMode> {
    let mut selected = current;
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.label())
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, InputMode::Text, InputMode::Text.label());
            ui.selectable_value(&mut selected, InputMode::File, InputMode::File.label());
        });
    (selected != current).then_some(selected)
}

/// Main window state (MUST persist between frames in egui).
pub struct ArticleGeneratorApp<E> {
    generator: Generator<E>,
    form: Form,
    viewer: Option<Viewer>,
}

impl<E: Engine> ArticleGeneratorApp<E> {
    pub fn new(generator: Generator<E>) -> Self {
        Self { generator, form: Form::default(), viewer: None }
    }

    /// Validates the form, generates synchronously and opens the viewer.
    fn submit(&mut self) {
        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                show_error(e.title, e.message);
                return;
            }
        };

        match self.generator.generate_samples(&request) {
            Ok(samples) => match Viewer::new(samples) {
                Some(viewer) => self.viewer = Some(viewer),
                None => show_error("Error", "The engine returned no samples."),
            },
            Err(e) => {
                log::error!("generation failed: {e}");
                show_error("Error", &e.to_string());
            }
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let mut title_mode = None;
        let mut content_mode = None;
        let mut submitted = false;

        egui::Grid::new("form_grid")
            .num_columns(3)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                // Title
                ui.label("Title:");
                title_mode = mode_selector(ui, "title_mode", self.form.title.mode());
                let title_read_only = self.form.title.is_read_only();
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.title.value)
                        .interactive(!title_read_only)
                        .desired_width(FIELD_WIDTH),
                );
                ui.end_row();

                // Initial content
                ui.label("Initial Content:");
                content_mode = mode_selector(ui, "content_mode", self.form.content.mode());
                let content_read_only = self.form.content.is_read_only();
                ui.add(
                    egui::TextEdit::multiline(&mut self.form.content.value)
                        .interactive(!content_read_only)
                        .desired_rows(10)
                        .desired_width(FIELD_WIDTH),
                );
                ui.end_row();

                ui.label("Number of Samples:");
                ui.add(egui::DragValue::new(&mut self.form.sample_count).range(1..=MAX_SAMPLES).speed(1));
                ui.end_row();

                ui.label("Max Words Per Sample:");
                ui.add(egui::DragValue::new(&mut self.form.max_words).range(1..=CONTEXT_LIMIT).speed(1));
                ui.end_row();

                ui.label("");
                submitted = ui.add_sized([120.0, 30.0], egui::Button::new("Generate")).clicked();
                ui.end_row();
            });

        // Dialogs run outside the grid so the borrow of the form is released.
        if let Some(mode) = title_mode {
            switch_mode(&mut self.form.title, "title", mode);
        }
        if let Some(mode) = content_mode {
            switch_mode(&mut self.form.content, "initial content", mode);
        }
        if submitted {
            self.submit();
        }
    }

    fn show_viewer(&mut self, ctx: &Context) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };

        let mut open = true;
        let mut notice = None;
        egui::Window::new(viewer.window_title().to_owned())
            .id(egui::Id::new("sample_viewer"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let sample = viewer.current();
                ui.add(egui::TextEdit::singleline(&mut sample.title()).interactive(false).desired_width(700.0));
                egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut sample.content())
                            .interactive(false)
                            .desired_rows(20)
                            .desired_width(700.0),
                    );
                });

                ui.horizontal(|ui| {
                    if ui.add_enabled(viewer.has_previous(), egui::Button::new("<")).clicked() {
                        notice = viewer.previous().err();
                    }
                    ui.label(format!("{} / {}", viewer.index() + 1, viewer.len()));
                    if ui.add_enabled(viewer.has_next(), egui::Button::new(">")).clicked() {
                        notice = viewer.next().err();
                    }
                });
            });

        if let Some(notice) = notice {
            show_error("Error", notice.message());
        }
        if !open {
            self.viewer = None;
        }
    }
}

impl<E: Engine> eframe::App for ArticleGeneratorApp<E> {
    /// UI update loop (called every frame).
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            // The form stays inert while the viewer is open.
            ui.add_enabled_ui(self.viewer.is_none(), |ui| self.show_form(ui));
        });
        self.show_viewer(ctx);
    }
}

/// Opens the main window and blocks until it is closed.
///
/// Nothing is generated and no file is touched until the user submits.
pub fn run<E: Engine + 'static>(generator: Generator<E>) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Article Generator")
            .with_inner_size([MIN_WINDOW_WIDTH + 40.0, MIN_WINDOW_HEIGHT + 160.0])
            .with_min_inner_size([MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Article Generator",
        options,
        Box::new(|_| Ok(Box::new(ArticleGeneratorApp::new(generator)))),
    )
}
