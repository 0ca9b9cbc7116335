mod state;
mod ui;

use crate::upload::{StagedFile, UploadSession};
use eframe::{egui, App};
pub use state::{
    ActionButton, Banner, DropTarget, ShellView, ACTIVE_TARGET_TITLE, EMPTY_TARGET_HINT,
    EMPTY_TARGET_TITLE, ERROR_BANNER, SUCCESS_BANNER,
};
use std::path::Path;
use tracing::{info, warn};

pub struct FileImporter {
    session: UploadSession,
    drag_active: bool,
    stage_error: Option<String>,
}

impl FileImporter {
    pub fn new(_cc: &eframe::CreationContext<'_>, session: UploadSession) -> Self {
        info!("Initializing File Import Service");
        Self::with_session(session)
    }

    fn with_session(session: UploadSession) -> Self {
        Self {
            session,
            drag_active: false,
            stage_error: None,
        }
    }

    pub fn view(&self) -> ShellView {
        ShellView::from_machine(self.session.machine(), self.drag_active)
            .with_notice(self.stage_error.clone())
    }

    fn stage(&mut self, file: StagedFile) {
        self.stage_error = None;
        self.session.drop_files(vec![file]);
    }

    fn stage_path(&mut self, path: &Path) {
        match StagedFile::from_path(path) {
            Ok(file) => self.stage(file),
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                self.stage_error = Some(format!("Could not read {}", name));
            }
        }
    }

    /// A drop of several files is rejected as a whole.
    fn stage_dropped(&mut self, dropped: Vec<egui::DroppedFile>) {
        if dropped.len() > 1 {
            warn!("Rejected drop of {} files, only one is accepted", dropped.len());
            return;
        }
        let Some(file) = dropped.into_iter().next() else {
            return;
        };

        if let Some(path) = &file.path {
            self.stage_path(path);
        } else if let Some(bytes) = file.bytes {
            self.stage(StagedFile::from_bytes(file.name, bytes.to_vec()));
        } else {
            warn!("Dropped file '{}' has neither a path nor contents", file.name);
            self.stage_error = Some(format!("Could not read {}", file.name));
        }
    }

    pub fn browse_for_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new().pick_file() {
            self.stage_path(&path);
        }
    }

    pub fn start_upload(&mut self) {
        self.session.start_upload();
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        ctx.request_repaint();
        self.session.poll();

        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });
        self.drag_active = hovering;

        if !dropped.is_empty() {
            if self.session.status().is_uploading() {
                info!("Ignoring drop while an upload is running");
            } else {
                self.stage_dropped(dropped);
            }
        }
    }
}

impl App for FileImporter {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
