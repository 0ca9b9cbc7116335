use super::machine::{FollowUp, UploadMachine, UploadTicket};
use super::transfer::Transfer;
use super::types::{StagedFile, UploadEvent, UploadStatus};
use crate::broker::CredentialBroker;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Drives an [`UploadMachine`] from the UI thread.
///
/// Network work and the post-success timer run on the tokio runtime and
/// report back over a channel that [`UploadSession::poll`] drains.
pub struct UploadSession {
    machine: UploadMachine,
    broker: Arc<dyn CredentialBroker>,
    transfer: Arc<dyn Transfer>,
    runtime: Handle,
    reset_delay: Duration,
    events_tx: Sender<UploadEvent>,
    events_rx: Receiver<UploadEvent>,
    reset_task: Option<JoinHandle<()>>,
}

impl UploadSession {
    pub fn new(
        broker: Arc<dyn CredentialBroker>,
        transfer: Arc<dyn Transfer>,
        runtime: Handle,
        reset_delay: Duration,
    ) -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            machine: UploadMachine::new(),
            broker,
            transfer,
            runtime,
            reset_delay,
            events_tx,
            events_rx,
            reset_task: None,
        }
    }

    pub fn machine(&self) -> &UploadMachine {
        &self.machine
    }

    pub fn status(&self) -> &UploadStatus {
        self.machine.status()
    }

    pub fn drop_files(&mut self, files: Vec<StagedFile>) {
        if self.machine.drop_files(files) {
            self.cancel_reset();
        }
    }

    pub fn start_upload(&mut self) {
        let Some(ticket) = self.machine.start() else {
            return;
        };

        let broker = Arc::clone(&self.broker);
        let transfer = Arc::clone(&self.transfer);
        let events = self.events_tx.clone();
        self.runtime.spawn(async move {
            run_upload(broker.as_ref(), transfer.as_ref(), ticket, events).await;
        });
    }

    /// Applies every outcome received since the last call. Returns whether
    /// anything changed.
    pub fn poll(&mut self) -> bool {
        let mut had_updates = false;
        while let Ok(event) = self.events_rx.try_recv() {
            had_updates = true;
            if let FollowUp::ScheduleReset(id) = self.machine.apply(event) {
                self.cancel_reset();
                let events = self.events_tx.clone();
                let delay = self.reset_delay;
                debug!("Clearing upload #{} in {:?}", id.0, delay);
                self.reset_task = Some(self.runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    events.send(UploadEvent::ResetElapsed(id)).unwrap_or_default();
                }));
            }
        }
        had_updates
    }

    fn cancel_reset(&mut self) {
        if let Some(task) = self.reset_task.take() {
            task.abort();
        }
    }
}

impl Drop for UploadSession {
    fn drop(&mut self) {
        self.cancel_reset();
    }
}

/// Requests a signed URL, then PUTs the file to it. Both steps are awaited in
/// order; the first failure ends the attempt.
pub async fn run_upload(
    broker: &dyn CredentialBroker,
    transfer: &dyn Transfer,
    ticket: UploadTicket,
    events: Sender<UploadEvent>,
) {
    let UploadTicket { id, file } = ticket;

    let outcome = async {
        let url = broker
            .presign_upload(&file.name, &file.content_type)
            .await
            .into_url()?;
        events.send(UploadEvent::UrlIssued(id)).unwrap_or_default();
        transfer.put(&url, &file).await
    }
    .await;

    let event = match outcome {
        Ok(()) => UploadEvent::Completed(id),
        Err(e) => UploadEvent::Failed {
            id,
            message: e.to_string(),
        },
    };
    events.send(event).unwrap_or_default();
}
