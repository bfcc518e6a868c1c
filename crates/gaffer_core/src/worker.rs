//! Background worker for weekly resolution.
//!
//! The host calls from its UI thread; the simulation runs on a named worker
//! thread and talks over channels. The worker keeps no state between
//! requests: every request carries the full world snapshot, so a timeout or
//! crash leaves the caller's copy authoritative.

use crate::config::SimParams;
use crate::error::{EngineError, Result};
use crate::weekly::{simulate_week, WeekOutcome, WeekRequest};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long `advance` waits for the worker before giving up.
pub const DEFAULT_WORKER_TIMEOUT: Duration = Duration::from_secs(30);

/// Messages into the worker thread.
enum WorkerRequest {
    Advance { job_id: Uuid, request: Box<WeekRequest> },
    Shutdown,
}

/// Messages out of the worker thread. The job id is for correlation and
/// logging only.
struct WorkerReply {
    job_id: Uuid,
    outcome: Result<WeekOutcome>,
}

/// Caller-side handle. One request in flight at a time; an `advance` while
/// the worker is still busy returns [`EngineError::Busy`].
pub struct WorkerHandle {
    request_tx: Sender<WorkerRequest>,
    reply_rx: Receiver<WorkerReply>,
    thread: Option<JoinHandle<()>>,
    pending: Option<Uuid>,
    timeout: Duration,
}

impl WorkerHandle {
    /// Resolve one week on the worker thread, blocking up to the timeout.
    ///
    /// A timeout leaves the job pending: later calls return `Busy` until the
    /// late reply drains, and the timed-out outcome is discarded.
    pub fn advance(&mut self, request: WeekRequest) -> Result<WeekOutcome> {
        self.drain_stale();
        if self.pending.is_some() {
            return Err(EngineError::Busy);
        }

        let job_id = Uuid::new_v4();
        log::debug!("job {}: advancing week {}", job_id, request.world.week);
        self.request_tx
            .send(WorkerRequest::Advance { job_id, request: Box::new(request) })
            .map_err(|_| EngineError::WorkerGone)?;
        self.pending = Some(job_id);

        let deadline = Instant::now() + self.timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.reply_rx.recv_timeout(remaining) {
                Ok(reply) if reply.job_id == job_id => {
                    self.pending = None;
                    return reply.outcome;
                }
                Ok(stale) => {
                    log::warn!("discarding stale reply for job {}", stale.job_id);
                }
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!("job {} timed out after {:?}", job_id, self.timeout);
                    return Err(EngineError::WorkerTimeout {
                        seconds: self.timeout.as_secs(),
                    });
                }
                Err(RecvTimeoutError::Disconnected) => {
                    self.pending = None;
                    return Err(EngineError::WorkerGone);
                }
            }
        }
    }

    /// Ask the worker to exit and wait for it.
    pub fn shutdown(mut self) {
        let _ = self.request_tx.send(WorkerRequest::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Clear replies from jobs the caller already gave up on.
    fn drain_stale(&mut self) {
        while let Ok(reply) = self.reply_rx.try_recv() {
            if self.pending == Some(reply.job_id) {
                self.pending = None;
            }
            log::debug!("dropping late reply for job {}", reply.job_id);
        }
    }
}

/// Spawn the weekly worker thread.
pub fn spawn_worker(params: SimParams) -> WorkerHandle {
    let (request_tx, request_rx) = mpsc::channel::<WorkerRequest>();
    let (reply_tx, reply_rx) = mpsc::channel::<WorkerReply>();

    let thread = thread::Builder::new()
        .name("weekly-sim".to_string())
        .spawn(move || worker_main(request_rx, reply_tx, params))
        .expect("failed to spawn weekly worker thread");

    WorkerHandle {
        request_tx,
        reply_rx,
        thread: Some(thread),
        pending: None,
        timeout: DEFAULT_WORKER_TIMEOUT,
    }
}

fn worker_main(
    request_rx: Receiver<WorkerRequest>,
    reply_tx: Sender<WorkerReply>,
    params: SimParams,
) {
    while let Ok(message) = request_rx.recv() {
        match message {
            WorkerRequest::Advance { job_id, request } => {
                let outcome = simulate_week(*request, &params);
                if reply_tx.send(WorkerReply { job_id, outcome }).is_err() {
                    return;
                }
            }
            WorkerRequest::Shutdown => {
                log::info!("weekly worker shutting down");
                return;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FinanceSnapshot;
    use crate::world::generate_world;

    fn request(seed: u64) -> WeekRequest {
        let world = generate_world(seed, 6, &SimParams::default()).unwrap();
        let user_team_id = world.teams[0].id;
        WeekRequest {
            schema_version: crate::SCHEMA_VERSION,
            seed,
            user_team_id,
            finance: FinanceSnapshot::default(),
            world,
        }
    }

    #[test]
    fn advance_resolves_a_week() {
        let mut handle = spawn_worker(SimParams::default());
        let outcome = handle.advance(request(1)).unwrap();
        assert_eq!(outcome.world.week, 2);
        assert!(!outcome.resolved.is_empty());
        handle.shutdown();
    }

    #[test]
    fn worker_matches_direct_resolution() {
        let req = request(2);
        let direct = simulate_week(req.clone(), &SimParams::default()).unwrap();
        let mut handle = spawn_worker(SimParams::default());
        let threaded = handle.advance(req).unwrap();
        handle.shutdown();
        assert_eq!(direct, threaded);
    }

    #[test]
    fn busy_handle_refuses_a_second_request() {
        let mut handle = spawn_worker(SimParams::default());
        handle.pending = Some(Uuid::new_v4());
        let err = handle.advance(request(3)).unwrap_err();
        assert!(matches!(err, EngineError::Busy));
        assert!(err.is_recoverable());
        handle.pending = None;
        handle.shutdown();
    }

    #[test]
    fn zero_timeout_reports_a_timeout() {
        let mut handle = spawn_worker(SimParams::default());
        handle.set_timeout(Duration::ZERO);
        let err = handle.advance(request(4)).unwrap_err();
        assert!(matches!(err, EngineError::WorkerTimeout { .. }));
        assert!(err.is_recoverable());

        // The handle stays busy until the late reply lands; keep asking
        // until it drains.
        handle.set_timeout(Duration::from_secs(10));
        let deadline = Instant::now() + Duration::from_secs(30);
        let outcome = loop {
            match handle.advance(request(5)) {
                Ok(outcome) => break outcome,
                Err(EngineError::Busy) => {
                    assert!(Instant::now() < deadline, "late reply never drained");
                    thread::sleep(Duration::from_millis(20));
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        };
        assert_eq!(outcome.world.week, 2);
        handle.shutdown();
    }

    #[test]
    fn dead_worker_reports_worker_gone() {
        let mut handle = spawn_worker(SimParams::default());
        let _ = handle.request_tx.send(WorkerRequest::Shutdown);
        let err = handle.advance(request(6)).unwrap_err();
        assert!(matches!(err, EngineError::WorkerGone));
        assert!(err.is_recoverable());
        if let Some(thread) = handle.thread.take() {
            let _ = thread.join();
        }
    }

    #[test]
    fn sequential_requests_reuse_one_worker() {
        let mut handle = spawn_worker(SimParams::default());
        let first = handle.advance(request(7)).unwrap();
        let second = handle
            .advance(WeekRequest {
                schema_version: crate::SCHEMA_VERSION,
                seed: 8,
                user_team_id: first.world.teams[0].id,
                finance: FinanceSnapshot::default(),
                world: first.world,
            })
            .unwrap();
        assert_eq!(second.world.week, 3);
        handle.shutdown();
    }
}
