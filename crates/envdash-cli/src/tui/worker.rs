//! Background worker for device requests.
//!
//! The [`DashboardWorker`] receives [`Command`]s from the UI loop and runs
//! each fetch in its own task, so overlapping requests for the same resource
//! all complete. Results come back as [`DashboardEvent`]s; the UI applies
//! them in arrival order.
//!
//! The worker never touches view state. On shutdown, in-flight requests are
//! cancelled and awaited before [`DashboardWorker::run`] returns.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info};

use envdash_core::{Command, DashboardEvent, DeviceApi, FetchRequest, fetch};

/// Background worker that performs device requests.
pub struct DashboardWorker<A> {
    /// Device the requests go to.
    api: Arc<A>,
    /// Receiver for commands from the UI loop.
    command_rx: mpsc::Receiver<Command>,
    /// Sender for events back to the UI loop.
    event_tx: mpsc::Sender<DashboardEvent>,
    /// Cancels in-flight requests at shutdown.
    cancel_token: CancellationToken,
    /// In-flight request tasks.
    tasks: TaskTracker,
}

impl<A: DeviceApi + 'static> DashboardWorker<A> {
    pub fn new(
        api: Arc<A>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: mpsc::Sender<DashboardEvent>,
    ) -> Self {
        Self {
            api,
            command_rx,
            event_tx,
            cancel_token: CancellationToken::new(),
            tasks: TaskTracker::new(),
        }
    }

    /// Run the worker's main loop.
    ///
    /// Runs until a [`Command::Shutdown`] is received or the command channel
    /// is closed.
    pub async fn run(mut self) {
        info!("DashboardWorker started");

        loop {
            match self.command_rx.recv().await {
                Some(Command::Fetch(request)) => self.spawn_fetch(request),
                Some(Command::Shutdown) => {
                    info!("DashboardWorker received shutdown command");
                    break;
                }
                None => {
                    info!("Command channel closed, shutting down worker");
                    break;
                }
            }
        }

        self.cancel_token.cancel();
        self.tasks.close();
        self.tasks.wait().await;

        info!("DashboardWorker stopped");
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        debug!(?request, "Spawning fetch");

        let api = Arc::clone(&self.api);
        let event_tx = self.event_tx.clone();
        let cancel = self.cancel_token.clone();

        self.tasks.spawn(async move {
            let event = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(resource = %request.resource(), "Fetch cancelled");
                    return;
                }
                result = fetch(api.as_ref(), &request) => match result {
                    Ok(payload) => DashboardEvent::Loaded(payload),
                    Err(e) => DashboardEvent::Failed {
                        request,
                        error: e.to_string(),
                    },
                },
            };
            // The UI may already be gone during shutdown
            let _ = event_tx.send(event).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use envdash_core::{MockDevice, Payload, Resource};

    fn spawn_worker(
        device: Arc<MockDevice>,
    ) -> (
        mpsc::Sender<Command>,
        mpsc::Receiver<DashboardEvent>,
        tokio::task::JoinHandle<()>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let (event_tx, event_rx) = mpsc::channel(32);
        let worker = DashboardWorker::new(device, cmd_rx, event_tx);
        (cmd_tx, event_rx, tokio::spawn(worker.run()))
    }

    #[tokio::test]
    async fn test_fetch_produces_loaded_event() {
        let device = Arc::new(MockDevice::builder().temp(19.5).build());
        let (cmd_tx, mut event_rx, handle) = spawn_worker(Arc::clone(&device));

        cmd_tx.send(Command::Fetch(FetchRequest::Env)).await.unwrap();
        match event_rx.recv().await.unwrap() {
            DashboardEvent::Loaded(Payload::Env(reading)) => assert_eq!(reading.temp, 19.5),
            other => panic!("unexpected event: {:?}", other),
        }

        cmd_tx.send(Command::Shutdown).await.unwrap();
        handle.await.unwrap();
        assert_eq!(device.request_count(Resource::Env), 1);
    }

    #[tokio::test]
    async fn test_failure_produces_failed_event() {
        let device = Arc::new(MockDevice::builder().fail(Resource::History, 500).build());
        let (cmd_tx, mut event_rx, handle) = spawn_worker(device);

        cmd_tx
            .send(Command::Fetch(FetchRequest::History))
            .await
            .unwrap();
        let event = event_rx.recv().await.unwrap();
        assert!(matches!(
            event,
            DashboardEvent::Failed {
                request: FetchRequest::History,
                ..
            }
        ));

        drop(cmd_tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_overlapping_fetches_all_complete() {
        let device = Arc::new(MockDevice::new());
        let (cmd_tx, mut event_rx, handle) = spawn_worker(Arc::clone(&device));

        cmd_tx.send(Command::Fetch(FetchRequest::Status)).await.unwrap();
        cmd_tx.send(Command::Fetch(FetchRequest::Status)).await.unwrap();

        for _ in 0..2 {
            let event = event_rx.recv().await.unwrap();
            assert_eq!(event.resource(), Resource::Status);
        }

        cmd_tx.send(Command::Shutdown).await.unwrap();
        handle.await.unwrap();
        assert_eq!(device.request_count(Resource::Status), 2);
    }

    #[tokio::test]
    async fn test_shutdown_cancels_in_flight_requests() {
        let device = Arc::new(
            MockDevice::builder()
                .latency(Duration::from_secs(30))
                .build(),
        );
        let (cmd_tx, mut event_rx, handle) = spawn_worker(device);

        cmd_tx.send(Command::Fetch(FetchRequest::Config)).await.unwrap();
        cmd_tx.send(Command::Shutdown).await.unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("worker should stop promptly")
            .unwrap();
        assert!(event_rx.recv().await.is_none());
    }
}
