//! Remesh worker pool and completion fences.
#![forbid(unsafe_code)]

mod fence;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use burrow_mesh_cpu::{FloorMeshCPU, build_floor};
use burrow_world::{CaveSettings, OccupancyGrid};
use crossbeam_channel::{Receiver, SendError, Sender, unbounded};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;

pub use fence::{FenceGuard, JobFence, fence};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to start remesh workers: {0}")]
    Pool(#[from] ThreadPoolBuildError),
}

/// Rebuild of one floor from the shared grid.
///
/// The job waits for `after` before reading, and completes its own fence by
/// dropping `guard` once the result is sent.
pub struct RemeshJob {
    pub settings: Arc<CaveSettings>,
    pub grid: Arc<RwLock<OccupancyGrid>>,
    pub floor: usize,
    pub rev: u64,
    pub after: JobFence,
    pub guard: FenceGuard,
    pub out: Sender<FloorJobOut>,
}

pub struct FloorJobOut {
    pub floor: usize,
    pub rev: u64,
    pub cpu: FloorMeshCPU,
    pub t_mesh_ms: u32,
}

fn process_remesh_job(job: RemeshJob) {
    let RemeshJob {
        settings,
        grid,
        floor,
        rev,
        after,
        guard,
        out,
    } = job;

    after.wait();
    let t0 = Instant::now();
    let cpu = {
        let grid = grid.read().unwrap_or_else(PoisonError::into_inner);
        match grid.depth_row(floor) {
            Some(row) => build_floor(&settings, floor, rev, row),
            None => {
                log::warn!("remesh of missing floor {floor} (rev {rev}) dropped");
                return;
            }
        }
    };
    let t_mesh_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    log::debug!(
        "floor {floor} rev {rev}: {} tris in {t_mesh_ms} ms",
        cpu.mesh.triangle_count()
    );
    if out
        .send(FloorJobOut {
            floor,
            rev,
            cpu,
            t_mesh_ms,
        })
        .is_err()
    {
        log::debug!("floor {floor} rev {rev}: receiver gone, result discarded");
    }
    drop(guard);
}

pub struct Runtime {
    job_tx: Sender<RemeshJob>,
    _pool: Option<Arc<ThreadPool>>,
    q_remesh: Arc<AtomicUsize>,
    inflight_remesh: Arc<AtomicUsize>,
    pub workers: usize,
}

impl Runtime {
    /// Starts `workers` remesh threads. Zero workers runs every job on the
    /// submitting thread.
    pub fn new(workers: usize) -> Result<Self, RuntimeError> {
        if workers == 0 {
            return Ok(Self::inline());
        }
        let (job_tx, job_rx) = unbounded::<RemeshJob>();
        let q_remesh = Arc::new(AtomicUsize::new(0));
        let inflight_remesh = Arc::new(AtomicUsize::new(0));

        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("burrow-remesh-{i}"))
                .build()?,
        );
        for _ in 0..workers {
            let rx: Receiver<RemeshJob> = job_rx.clone();
            let q = q_remesh.clone();
            let inflight = inflight_remesh.clone();
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    q.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    process_remesh_job(job);
                    inflight.fetch_sub(1, Ordering::Relaxed);
                }
            });
        }
        log::info!("remesh runtime started with {workers} worker(s)");

        Ok(Self {
            job_tx,
            _pool: Some(pool),
            q_remesh,
            inflight_remesh,
            workers,
        })
    }

    /// Runtime without worker threads; remeshes run on the submitting thread.
    pub fn inline() -> Self {
        log::info!("remesh runtime started inline");
        let (job_tx, _) = unbounded();
        Self {
            job_tx,
            _pool: None,
            q_remesh: Arc::new(AtomicUsize::new(0)),
            inflight_remesh: Arc::new(AtomicUsize::new(0)),
            workers: 0,
        }
    }

    pub fn submit_remesh(&self, job: RemeshJob) {
        if self.workers == 0 {
            process_remesh_job(job);
            return;
        }
        self.q_remesh.fetch_add(1, Ordering::Relaxed);
        log::debug!("queue remesh floor {} rev {}", job.floor, job.rev);
        if let Err(SendError(job)) = self.job_tx.send(job) {
            self.q_remesh.fetch_sub(1, Ordering::Relaxed);
            log::warn!(
                "remesh workers gone; building floor {} inline",
                job.floor
            );
            process_remesh_job(job);
        }
    }

    /// `(queued, in_flight)` remesh jobs.
    pub fn queue_debug_counts(&self) -> (usize, usize) {
        (
            self.q_remesh.load(Ordering::Relaxed),
            self.inflight_remesh.load(Ordering::Relaxed),
        )
    }
}
