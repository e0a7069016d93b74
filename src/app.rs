use std::path::{Path, PathBuf};

use crate::command::{Command, CommandResult};
use crate::error::{ExportError, LoadError};
use crate::export::{self, ExportFormat};
use crate::file_handler::{FileHandler, PendingDecode, SourceFile};
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::{EditorConfig, EditorStore};
use crate::texture_manager::TextureManager;
use crate::tools::{RectSelectTool, Tool};

/// One line of feedback shown at the bottom of the tools panel
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

pub struct RedactApp {
    pub(crate) store: EditorStore,
    pub(crate) renderer: Renderer,
    pub(crate) select_tool: RectSelectTool,
    pub(crate) textures: TextureManager,
    pub(crate) open_path: String,
    file_handler: FileHandler,
    pending: Option<(PendingDecode, Option<PathBuf>)>,
    source_path: Option<PathBuf>,
    status: Option<StatusMessage>,
}

impl RedactApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            file_handler: FileHandler::new(config.max_source_bytes),
            store: EditorStore::new(config),
            renderer: Renderer::new(),
            select_tool: RectSelectTool::new(),
            textures: TextureManager::new(),
            open_path: String::new(),
            pending: None,
            source_path: None,
            status: None,
        }
    }

    pub fn store(&self) -> &EditorStore {
        &self.store
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn dispatch(&mut self, command: Command) -> CommandResult {
        self.store.dispatch(command)
    }

    /// Start decoding `file`. The current source is dropped right away.
    pub fn begin_load(&mut self, file: SourceFile) {
        self.unload();
        self.status = Some(StatusMessage::info(format!("Loading {}…", file.name)));
        let path = file.path.clone();
        let pending = PendingDecode::spawn(file, self.store.config().max_source_bytes);
        self.pending = Some((pending, path));
    }

    /// Load whatever path is typed into the open field
    pub fn open_typed_path(&mut self) {
        let path = self.open_path.trim().to_owned();
        if path.is_empty() {
            return;
        }
        match self.file_handler.read_path(Path::new(&path)) {
            Ok(file) => self.begin_load(file),
            Err(err) => self.report_load_error(&err),
        }
    }

    /// "Change Image": forget the source and its edits
    pub fn unload(&mut self) {
        self.select_tool.cancel();
        self.textures.clear();
        self.source_path = None;
        if self.store.source().is_some() {
            let _ = self.dispatch(Command::UnloadSource);
        }
    }

    /// Render without the live selection and write it next to the source
    pub fn export_result(&self) -> Result<PathBuf, ExportError> {
        let source = self.store.source().ok_or(ExportError::NoSource)?;
        let output = self.renderer.render(source, self.store.history(), None);

        let config = self.store.config();
        let format = ExportFormat::Jpeg {
            quality: config.jpeg_quality,
        };
        let path = export::destination(self.source_path.as_deref(), &config.export_file_name);
        export::export_to(&output, format, &path)?;
        Ok(path)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn download(&mut self) {
        self.status = Some(match self.export_result() {
            Ok(path) => StatusMessage::info(format!("Saved {}", path.display())),
            Err(err) => {
                log::error!("Export failed: {}", err);
                StatusMessage::error(err.to_string())
            }
        });
    }

    pub(crate) fn copy_replay_log(&mut self, ctx: &egui::Context) {
        match self.store.history().to_replay_log() {
            Ok(json) => {
                ctx.copy_text(json);
                self.status = Some(StatusMessage::info("Replay log copied to clipboard"));
            }
            Err(err) => {
                log::error!("Failed to write replay log: {}", err);
                self.status = Some(StatusMessage::error(err.to_string()));
            }
        }
    }

    fn report_load_error(&mut self, err: &LoadError) {
        log::warn!("Failed to load image: {}", err);
        self.status = Some(StatusMessage::error(err.to_string()));
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        match self.file_handler.take_dropped_file(ctx) {
            Some(Ok(file)) => self.begin_load(file),
            Some(Err(err)) => self.report_load_error(&err),
            None => {}
        }
    }

    fn poll_decode(&mut self, ctx: &egui::Context) {
        let Some((pending, _)) = &mut self.pending else {
            return;
        };
        let Some(result) = pending.poll() else {
            ctx.request_repaint();
            return;
        };

        let name = pending.name().to_owned();
        let path = self.pending.take().and_then(|(_, path)| path);
        match result {
            Ok(bitmap) => {
                let (width, height) = bitmap.dimensions();
                let _ = self.dispatch(Command::LoadSource(bitmap));
                self.source_path = path;
                self.status = Some(StatusMessage::info(format!("{} ({}x{})", name, width, height)));
            }
            Err(err) => self.report_load_error(&err),
        }
    }
}

impl eframe::App for RedactApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_decode(ctx);
        self.handle_dropped_files(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);

        self.file_handler.preview_files_being_dropped(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;

    #[test]
    fn test_export_without_source_fails() {
        let app = RedactApp::with_config(EditorConfig::default());
        assert!(matches!(app.export_result(), Err(ExportError::NoSource)));
    }

    #[test]
    fn test_unload_clears_history() {
        let mut app = RedactApp::with_config(EditorConfig::default());
        app.dispatch(Command::LoadSource(Bitmap::new(20, 20))).unwrap();
        app.dispatch(Command::CommitSelection(crate::geometry::Rectangle::new(0.0, 0.0, 10.0, 10.0)))
            .unwrap();

        app.unload();
        assert!(app.store().source().is_none());
        assert!(app.store().history().is_empty());
    }

    #[test]
    fn test_typed_path_must_be_an_image() {
        let mut app = RedactApp::with_config(EditorConfig::default());
        app.open_path = "  /tmp/not-a-picture.txt ".to_owned();
        app.open_typed_path();

        assert!(!app.is_loading());
        assert!(app.status().is_some_and(|status| status.is_error));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_download_reports_failure_in_status() {
        let mut app = RedactApp::with_config(EditorConfig::default());
        app.download();

        let status = app.status().unwrap();
        assert!(status.is_error);
        assert_eq!(status.text, ExportError::NoSource.to_string());
    }
}
