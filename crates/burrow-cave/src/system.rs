use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use burrow_geom::Ray;
use burrow_mesh_cpu::{FloorMeshCPU, MeshBuild, placed_building_mesh};
use burrow_runtime::{FloorJobOut, JobFence, RemeshJob, Runtime, fence};
use burrow_world::{
    Building, BuildingId, BuildingLedger, BuildingSpec, CaveSettings, OccupancyGrid,
};
use crossbeam_channel::{Receiver, Sender, unbounded};
use hashbrown::HashMap;

use crate::error::CaveError;
use crate::raycast::{CaveRaycaster, RaycastCaveResult};

/// Revision bookkeeping for one floor.
#[derive(Clone, Copy, Debug, Default)]
struct FloorRevs {
    /// Bumped on every remesh request.
    rev: u64,
    /// Revision of the mesh currently exposed.
    applied: u64,
}

/// One cave: the occupancy grid, its buildings, and the floor meshes
/// derived from it.
///
/// Remeshes run on the shared [`Runtime`] strictly one after another; every
/// grid mutation first waits for the previous remesh so a job never reads a
/// half-applied edit.
pub struct CaveSystem {
    settings: Arc<CaveSettings>,
    runtime: Arc<Runtime>,
    grid: Arc<RwLock<OccupancyGrid>>,
    ledger: BuildingLedger,
    raycaster: CaveRaycaster,
    last_job: JobFence,
    res_tx: Sender<FloorJobOut>,
    res_rx: Receiver<FloorJobOut>,
    floors: Vec<FloorRevs>,
    meshes: HashMap<usize, FloorMeshCPU>,
}

impl CaveSystem {
    pub fn new(settings: Arc<CaveSettings>, runtime: Arc<Runtime>) -> Self {
        let (res_tx, res_rx) = unbounded();
        let grid = OccupancyGrid::new(settings.radial_segments());
        log::info!(
            "cave created: {} segments, radii {}..{}, floor height {}",
            settings.radial_segments(),
            settings.inner_radius(),
            settings.outer_radius(),
            settings.floor_height()
        );
        Self {
            raycaster: CaveRaycaster::new(settings.clone()),
            settings,
            runtime,
            grid: Arc::new(RwLock::new(grid)),
            ledger: BuildingLedger::new(),
            last_job: JobFence::completed(),
            res_tx,
            res_rx,
            floors: Vec::new(),
            meshes: HashMap::new(),
        }
    }

    pub fn settings(&self) -> &Arc<CaveSettings> {
        &self.settings
    }

    pub fn raycaster(&self) -> &CaveRaycaster {
        &self.raycaster
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    fn read_grid(&self) -> RwLockReadGuard<'_, OccupancyGrid> {
        self.grid.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Waits out the in-flight remesh, then locks the grid for writing.
    fn write_grid(&self) -> RwLockWriteGuard<'_, OccupancyGrid> {
        self.last_job.wait();
        self.grid.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends an unexcavated floor below the current bottom and meshes it.
    pub fn dig_new_floor(&mut self) -> usize {
        let floor = self.write_grid().push_floor();
        self.floors.push(FloorRevs::default());
        log::debug!("dug floor {floor}");
        self.remesh_floor(floor);
        floor
    }

    pub fn set_segment_depth(
        &mut self,
        floor: i32,
        segment: i32,
        depth: u32,
    ) -> Result<(), CaveError> {
        let floors = self.floor_count();
        let radial = self.settings.radial_segments() as usize;
        if floor < 0 || floor as usize >= floors {
            return Err(CaveError::FloorOutOfRange { floor, floors });
        }
        if segment < 0 || segment as usize >= radial {
            return Err(CaveError::SegmentOutOfRange { segment, radial });
        }
        let (floor, segment) = (floor as usize, segment as usize);
        self.write_grid().set_depth(floor, segment, depth);
        self.remesh_floor(floor);
        Ok(())
    }

    /// Queues a rebuild of `floor` behind whatever remesh is in flight.
    pub fn remesh_floor(&mut self, floor: usize) {
        let Some(revs) = self.floors.get_mut(floor) else {
            return;
        };
        revs.rev += 1;
        let rev = revs.rev;
        let (guard, done) = fence();
        let after = std::mem::replace(&mut self.last_job, done);
        self.runtime.submit_remesh(RemeshJob {
            settings: self.settings.clone(),
            grid: self.grid.clone(),
            floor,
            rev,
            after,
            guard,
            out: self.res_tx.clone(),
        });
    }

    pub fn segment_depth(&self, floor: usize, segment: usize) -> Option<u32> {
        self.read_grid().depth(floor, segment)
    }

    pub fn building_at(&self, floor: usize, segment: usize) -> Option<BuildingId> {
        self.read_grid().building(floor, segment)
    }

    pub fn can_construct_building_at(&self, spec: &BuildingSpec, floor: i32, segment: i32) -> bool {
        self.ledger.can_place(&self.read_grid(), spec, floor, segment)
    }

    /// Claims the footprint for a new building. Floor meshes are unaffected.
    pub fn try_construct_building(
        &mut self,
        spec: &BuildingSpec,
        floor: i32,
        segment: i32,
    ) -> Option<BuildingId> {
        self.last_job.wait();
        let mut grid = self.grid.write().unwrap_or_else(PoisonError::into_inner);
        self.ledger.try_place(&mut grid, spec, floor, segment)
    }

    pub fn buildings(&self) -> &[Building] {
        self.ledger.buildings()
    }

    /// Cave-space footprint mesh of a placed building.
    pub fn building_mesh(&self, id: BuildingId) -> Option<MeshBuild> {
        self.ledger
            .get(id)
            .map(|b| placed_building_mesh(&self.settings, b))
    }

    /// Applies finished remeshes without blocking. Returns the floors whose
    /// exposed mesh changed.
    pub fn poll_meshes(&mut self) -> Vec<usize> {
        let mut updated = Vec::new();
        for out in self.res_rx.try_iter() {
            let Some(revs) = self.floors.get_mut(out.floor) else {
                continue;
            };
            if out.rev <= revs.applied {
                log::debug!(
                    "floor {} rev {} stale (applied {})",
                    out.floor,
                    out.rev,
                    revs.applied
                );
                continue;
            }
            revs.applied = out.rev;
            self.meshes.insert(out.floor, out.cpu);
            if !updated.contains(&out.floor) {
                updated.push(out.floor);
            }
        }
        updated
    }

    /// Blocks until every queued remesh is done, then applies the results.
    pub fn finish_pending_meshes(&mut self) -> Vec<usize> {
        self.last_job.wait();
        self.poll_meshes()
    }

    pub fn is_idle(&self) -> bool {
        self.last_job.is_complete()
    }

    pub fn floor_mesh(&self, floor: usize) -> Option<&FloorMeshCPU> {
        self.meshes.get(&floor)
    }

    pub fn raycast_cave_segment(&self, ray: &Ray) -> Option<RaycastCaveResult> {
        self.raycaster.raycast(ray)
    }
}
