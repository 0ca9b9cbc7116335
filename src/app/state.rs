use crate::upload::{UploadMachine, UploadStatus};
use crate::utils::file_size::FileSizeUtils;

pub const EMPTY_TARGET_TITLE: &str = "Drag & drop files here, or click to select";
pub const EMPTY_TARGET_HINT: &str = "Supports all file types up to 5GB";
pub const ACTIVE_TARGET_TITLE: &str = "Drop the file here";
pub const SUCCESS_BANNER: &str = "File uploaded successfully!";
pub const ERROR_BANNER: &str = "Upload failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Empty,
    DragActive,
    Staged { name: String, size: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub label: String,
    pub enabled: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Success,
    Error,
}

impl Banner {
    pub fn text(self) -> &'static str {
        match self {
            Self::Success => SUCCESS_BANNER,
            Self::Error => ERROR_BANNER,
        }
    }
}

/// Everything the window shows, derived from the upload state alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellView {
    pub target: DropTarget,
    /// The drop target ignores clicks and drops while an upload runs.
    pub target_enabled: bool,
    pub button: Option<ActionButton>,
    pub banner: Option<Banner>,
    /// Short message about a file that could not be staged.
    pub notice: Option<String>,
}

impl ShellView {
    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }

    pub fn from_machine(machine: &UploadMachine, drag_active: bool) -> Self {
        let status = machine.status();
        let target_enabled = !status.is_uploading();

        let target = match machine.file() {
            _ if drag_active && target_enabled => DropTarget::DragActive,
            Some(file) => DropTarget::Staged {
                name: file.name.clone(),
                size: FileSizeUtils::format_megabytes(file.size),
            },
            None => DropTarget::Empty,
        };

        let button = match (machine.file(), status) {
            (None, _) | (_, UploadStatus::Success) => None,
            (Some(_), UploadStatus::Idle) => Some(ActionButton {
                label: "Upload File".to_string(),
                enabled: true,
                busy: false,
            }),
            (Some(_), UploadStatus::Uploading { progress }) => Some(ActionButton {
                label: format!("Uploading... {}%", progress),
                enabled: false,
                busy: true,
            }),
            (Some(_), UploadStatus::Error { .. }) => Some(ActionButton {
                label: "Retry Upload".to_string(),
                enabled: true,
                busy: false,
            }),
        };

        let banner = match status {
            UploadStatus::Success => Some(Banner::Success),
            UploadStatus::Error { .. } => Some(Banner::Error),
            _ => None,
        };

        Self {
            target,
            target_enabled,
            button,
            banner,
            notice: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::{StagedFile, UploadEvent};
    use bytes::Bytes;

    fn staged_machine() -> UploadMachine {
        let mut machine = UploadMachine::new();
        machine.drop_files(vec![StagedFile::new(
            "hello.png",
            "image/png",
            Bytes::from_static(b"hello"),
        )]);
        machine
    }

    #[test]
    fn empty_state_has_no_button() {
        let view = ShellView::from_machine(&UploadMachine::new(), false);
        assert_eq!(view.target, DropTarget::Empty);
        assert!(view.button.is_none());
        assert!(view.banner.is_none());
    }

    #[test]
    fn hovering_files_shows_active_target() {
        let view = ShellView::from_machine(&UploadMachine::new(), true);
        assert_eq!(view.target, DropTarget::DragActive);
    }

    #[test]
    fn staged_file_offers_upload() {
        let view = ShellView::from_machine(&staged_machine(), false);
        assert_eq!(
            view.target,
            DropTarget::Staged {
                name: "hello.png".to_string(),
                size: "0.00 MB".to_string(),
            }
        );
        let button = view.button.unwrap();
        assert_eq!(button.label, "Upload File");
        assert!(button.enabled);
    }

    #[test]
    fn uploading_disables_button_and_target() {
        let mut machine = staged_machine();
        let ticket = machine.start().unwrap();
        machine.apply(UploadEvent::UrlIssued(ticket.id));

        let view = ShellView::from_machine(&machine, true);
        let button = view.button.unwrap();
        assert_eq!(button.label, "Uploading... 40%");
        assert!(!button.enabled);
        assert!(!view.target_enabled);
        assert!(matches!(view.target, DropTarget::Staged { .. }));
    }

    #[test]
    fn error_offers_retry_and_banner() {
        let mut machine = staged_machine();
        let ticket = machine.start().unwrap();
        machine.apply(UploadEvent::Failed {
            id: ticket.id,
            message: "Failed".to_string(),
        });

        let view = ShellView::from_machine(&machine, false);
        assert_eq!(view.button.unwrap().label, "Retry Upload");
        assert_eq!(view.banner.map(Banner::text), Some(ERROR_BANNER));
    }

    #[test]
    fn success_hides_button() {
        let mut machine = staged_machine();
        let ticket = machine.start().unwrap();
        machine.apply(UploadEvent::Completed(ticket.id));

        let view = ShellView::from_machine(&machine, false);
        assert!(view.button.is_none());
        assert_eq!(view.banner.map(Banner::text), Some(SUCCESS_BANNER));
    }
}
