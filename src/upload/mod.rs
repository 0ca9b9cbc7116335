mod machine;
mod session;
mod transfer;
mod types;

pub use machine::{FollowUp, UploadMachine, UploadTicket};
pub use session::{run_upload, UploadSession};
pub use transfer::{HttpTransfer, Transfer};
pub use types::{FileSource, StagedFile, UploadEvent, UploadId, UploadStatus};
