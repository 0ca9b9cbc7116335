use crate::error::UploadError;
use bytes::Bytes;
use derivative::Derivative;
use std::io;
use std::path::{Path, PathBuf};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Where the payload of a staged file lives.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub enum FileSource {
    /// Contents handed over by the window system, already in memory.
    Memory(#[derivative(Debug = "ignore")] Bytes),
    /// A file on disk, opened and streamed only when the transfer runs.
    Disk(PathBuf),
}

/// The single file the uploader is working on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub size: u64,
    pub content_type: String,
    pub source: FileSource,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            content_type: content_type.into(),
            source: FileSource::Memory(bytes),
        }
    }

    /// Builds a staged file whose content type is guessed from its name.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let content_type = guess_content_type(&name);
        Self::new(name, content_type, bytes.into())
    }

    /// Stages a file on disk from its metadata alone; the contents are not
    /// read here.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(UploadError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            content_type: guess_content_type(&name),
            name,
            size: metadata.len(),
            source: FileSource::Disk(path.to_path_buf()),
        })
    }
}

fn guess_content_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first()
        .map(|m| m.to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}

/// Identifies one upload attempt. Every retry gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UploadId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Uploading { progress: u8 },
    Success,
    Error { message: String },
}

impl Default for UploadStatus {
    fn default() -> Self {
        Self::Idle
    }
}

impl UploadStatus {
    /// Progress checkpoint shown to the user, in percent.
    pub fn progress(&self) -> u8 {
        match self {
            Self::Idle | Self::Error { .. } => 0,
            Self::Uploading { progress } => *progress,
            Self::Success => 100,
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, Self::Uploading { .. })
    }
}

/// Outcomes reported back to the state machine by background work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    UrlIssued(UploadId),
    Completed(UploadId),
    Failed { id: UploadId, message: String },
    ResetElapsed(UploadId),
}

impl UploadEvent {
    pub fn id(&self) -> UploadId {
        match self {
            Self::UrlIssued(id) | Self::Completed(id) | Self::ResetElapsed(id) => *id,
            Self::Failed { id, .. } => *id,
        }
    }
}
