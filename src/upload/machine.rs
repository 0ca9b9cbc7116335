use super::types::{StagedFile, UploadEvent, UploadId, UploadStatus};
use tracing::{debug, error, info, warn};

/// Progress shown as soon as an upload starts.
pub const PROGRESS_STARTED: u8 = 10;
/// Progress once the broker has issued an upload URL.
pub const PROGRESS_URL_ISSUED: u8 = 40;

/// Work order for one upload attempt.
#[derive(Debug, Clone)]
pub struct UploadTicket {
    pub id: UploadId,
    pub file: StagedFile,
}

/// What the driver has to do after an event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    None,
    ScheduleReset(UploadId),
}

/// Tracks at most one file and its upload status.
///
/// Every asynchronous outcome carries the [`UploadId`] of the attempt it
/// belongs to; outcomes of any other attempt are dropped.
#[derive(Debug, Default)]
pub struct UploadMachine {
    file: Option<StagedFile>,
    status: UploadStatus,
    active: Option<UploadId>,
    last_id: u64,
}

impl UploadMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&StagedFile> {
        self.file.as_ref()
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    pub fn progress(&self) -> u8 {
        self.status.progress()
    }

    pub fn active_upload(&self) -> Option<UploadId> {
        self.active
    }

    /// Stages a dropped file, replacing whatever was staged before.
    ///
    /// Only single-file drops are accepted: an empty drop or a drop of
    /// several files changes nothing. Returns whether a file was staged.
    pub fn drop_files(&mut self, files: Vec<StagedFile>) -> bool {
        if files.len() > 1 {
            warn!("Rejected drop of {} files, only one is accepted", files.len());
            return false;
        }
        let Some(file) = files.into_iter().next() else {
            return false;
        };

        debug!("Staged '{}' ({} bytes, {})", file.name, file.size, file.content_type);
        self.file = Some(file);
        self.status = UploadStatus::Idle;
        self.active = None;
        true
    }

    /// Moves a staged file into `Uploading`, from `Idle` or as a retry from
    /// `Error`. Returns the ticket the driver should run.
    pub fn start(&mut self) -> Option<UploadTicket> {
        if !matches!(self.status, UploadStatus::Idle | UploadStatus::Error { .. }) {
            return None;
        }
        let file = self.file.clone()?;

        self.last_id += 1;
        let id = UploadId(self.last_id);
        self.active = Some(id);
        self.status = UploadStatus::Uploading {
            progress: PROGRESS_STARTED,
        };
        info!("Starting upload #{} of '{}'", id.0, file.name);

        Some(UploadTicket { id, file })
    }

    pub fn apply(&mut self, event: UploadEvent) -> FollowUp {
        if self.active != Some(event.id()) {
            debug!("Ignoring stale event {:?}", event);
            return FollowUp::None;
        }

        let uploading = self.status.is_uploading();
        match event {
            UploadEvent::UrlIssued(_) if uploading => {
                self.status = UploadStatus::Uploading {
                    progress: PROGRESS_URL_ISSUED,
                };
                FollowUp::None
            }
            UploadEvent::Completed(id) if uploading => {
                info!("Upload #{} finished", id.0);
                self.status = UploadStatus::Success;
                FollowUp::ScheduleReset(id)
            }
            UploadEvent::Failed { id, message } if uploading => {
                error!("Upload #{} failed: {}", id.0, message);
                self.status = UploadStatus::Error { message };
                FollowUp::None
            }
            UploadEvent::ResetElapsed(_) if self.status == UploadStatus::Success => {
                self.reset();
                FollowUp::None
            }
            event => {
                debug!("Event {:?} does not apply in state {:?}", event, self.status);
                FollowUp::None
            }
        }
    }

    /// Clears the staged file and returns to an empty `Idle`.
    pub fn reset(&mut self) {
        self.file = None;
        self.status = UploadStatus::Idle;
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn hello_png() -> StagedFile {
        StagedFile::new("hello.png", "image/png", Bytes::from_static(b"hello"))
    }

    fn other_file() -> StagedFile {
        StagedFile::new("notes.txt", "text/plain", Bytes::from_static(b"notes"))
    }

    #[test]
    fn empty_drop_is_ignored() {
        let mut machine = UploadMachine::new();
        assert!(!machine.drop_files(vec![]));
        assert_eq!(machine.status(), &UploadStatus::Idle);
        assert!(machine.file().is_none());
    }

    #[test]
    fn drop_replaces_staged_file() {
        let mut machine = UploadMachine::new();
        machine.drop_files(vec![hello_png()]);
        assert!(machine.drop_files(vec![other_file()]));

        assert_eq!(machine.file().map(|f| f.name.as_str()), Some("notes.txt"));
        assert_eq!(machine.progress(), 0);
    }

    #[test]
    fn multi_file_drop_is_rejected() {
        let mut machine = UploadMachine::new();
        machine.drop_files(vec![hello_png()]);
        let ticket = machine.start().unwrap();
        machine.apply(UploadEvent::Failed {
            id: ticket.id,
            message: "Failed".to_string(),
        });

        assert!(!machine.drop_files(vec![other_file(), hello_png()]));

        assert_eq!(machine.file().map(|f| f.name.as_str()), Some("hello.png"));
        assert!(matches!(machine.status(), UploadStatus::Error { .. }));
        assert_eq!(machine.active_upload(), Some(ticket.id));
    }

    #[test]
    fn multi_file_drop_on_empty_machine_stages_nothing() {
        let mut machine = UploadMachine::new();
        assert!(!machine.drop_files(vec![other_file(), hello_png()]));
        assert!(machine.file().is_none());
        assert_eq!(machine.status(), &UploadStatus::Idle);
    }

    #[test]
    fn start_without_file_does_nothing() {
        let mut machine = UploadMachine::new();
        assert!(machine.start().is_none());
        assert_eq!(machine.status(), &UploadStatus::Idle);
    }

    #[test]
    fn happy_path_walks_through_checkpoints() {
        let mut machine = UploadMachine::new();
        machine.drop_files(vec![hello_png()]);

        let ticket = machine.start().unwrap();
        assert_eq!(ticket.file.name, "hello.png");
        assert_eq!(machine.progress(), PROGRESS_STARTED);

        assert_eq!(machine.apply(UploadEvent::UrlIssued(ticket.id)), FollowUp::None);
        assert_eq!(machine.progress(), PROGRESS_URL_ISSUED);

        assert_eq!(
            machine.apply(UploadEvent::Completed(ticket.id)),
            FollowUp::ScheduleReset(ticket.id)
        );
        assert_eq!(machine.status(), &UploadStatus::Success);
        assert_eq!(machine.progress(), 100);

        machine.apply(UploadEvent::ResetElapsed(ticket.id));
        assert_eq!(machine.status(), &UploadStatus::Idle);
        assert!(machine.file().is_none());
    }

    #[test]
    fn start_is_ignored_while_uploading() {
        let mut machine = UploadMachine::new();
        machine.drop_files(vec![hello_png()]);
        machine.start().unwrap();
        assert!(machine.start().is_none());
    }

    #[test]
    fn failure_then_retry_uses_new_attempt() {
        let mut machine = UploadMachine::new();
        machine.drop_files(vec![hello_png()]);
        let first = machine.start().unwrap();
        machine.apply(UploadEvent::Failed {
            id: first.id,
            message: "Failed".to_string(),
        });
        assert_eq!(
            machine.status(),
            &UploadStatus::Error {
                message: "Failed".to_string()
            }
        );

        let retry = machine.start().unwrap();
        assert_ne!(retry.id, first.id);
        assert_eq!(retry.file, first.file);
        assert_eq!(machine.progress(), PROGRESS_STARTED);

        // Late news from the first attempt must not leak into the retry.
        machine.apply(UploadEvent::Completed(first.id));
        assert!(machine.status().is_uploading());
    }

    #[test]
    fn stale_reset_does_not_clear_new_file() {
        let mut machine = UploadMachine::new();
        machine.drop_files(vec![hello_png()]);
        let ticket = machine.start().unwrap();
        machine.apply(UploadEvent::UrlIssued(ticket.id));
        machine.apply(UploadEvent::Completed(ticket.id));

        machine.drop_files(vec![other_file()]);
        machine.apply(UploadEvent::ResetElapsed(ticket.id));

        assert_eq!(machine.file().map(|f| f.name.as_str()), Some("notes.txt"));
        assert_eq!(machine.status(), &UploadStatus::Idle);
    }

    #[test]
    fn drop_during_upload_supersedes_attempt() {
        let mut machine = UploadMachine::new();
        machine.drop_files(vec![hello_png()]);
        let ticket = machine.start().unwrap();

        machine.drop_files(vec![other_file()]);
        machine.apply(UploadEvent::Completed(ticket.id));

        assert_eq!(machine.status(), &UploadStatus::Idle);
        assert!(machine.active_upload().is_none());
    }
}
