//! Building footprints over the occupancy grid.

use crate::grid::OccupancyGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildingId(pub u32);

/// Reserved "no building" value stored in the occupancy layer.
pub const NULL_BUILDING_ID: BuildingId = BuildingId(0);

/// What a building needs from the grid before it can be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildingSpec {
    pub size_in_segments: u32,
    /// Minimum excavation depth class under every footprint segment.
    pub depth_requirement: u32,
}

impl BuildingSpec {
    pub const fn new(size_in_segments: u32, depth_requirement: u32) -> Self {
        Self {
            size_in_segments,
            depth_requirement,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Building {
    pub id: BuildingId,
    pub floor: usize,
    /// Lowest occupied segment; the footprint runs forward from here and may wrap.
    pub initial_segment: usize,
    pub size_in_segments: u32,
    pub depth_requirement: u32,
}

impl Building {
    pub fn footprint(&self, radial_segments: usize) -> impl Iterator<Item = usize> + '_ {
        footprint(self.initial_segment, self.size_in_segments, radial_segments)
    }
}

fn footprint(start: usize, size: u32, radial_segments: usize) -> impl Iterator<Item = usize> {
    (0..size as usize).map(move |i| (start + i) % radial_segments)
}

/// Placed buildings plus the id counter. Ids start at 1 and are never reused.
#[derive(Clone, Debug)]
pub struct BuildingLedger {
    next_id: u32,
    buildings: Vec<Building>,
}

impl Default for BuildingLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildingLedger {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            buildings: Vec::new(),
        }
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn get(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    /// `floor` and `segment` are signed because they usually come straight
    /// from a raycast; negative floors are simply out of range, segments wrap.
    pub fn can_place(
        &self,
        grid: &OccupancyGrid,
        spec: &BuildingSpec,
        floor: i32,
        segment: i32,
    ) -> bool {
        let radial = grid.radial_segments();
        if floor < 0 || floor as usize >= grid.floor_count() || radial == 0 {
            return false;
        }
        if spec.size_in_segments == 0 || spec.size_in_segments as usize > radial {
            return false;
        }
        let floor = floor as usize;
        let start = grid.wrap_segment(i64::from(segment));
        footprint(start, spec.size_in_segments, radial).all(|s| {
            grid.depth(floor, s)
                .is_some_and(|d| d >= spec.depth_requirement)
                && grid.is_vacant(floor, s)
        })
    }

    /// Validates, allocates the next id and stamps it into every footprint cell.
    pub fn try_place(
        &mut self,
        grid: &mut OccupancyGrid,
        spec: &BuildingSpec,
        floor: i32,
        segment: i32,
    ) -> Option<BuildingId> {
        if !self.can_place(grid, spec, floor, segment) {
            log::debug!(
                "building rejected at floor {} segment {} (size {}, depth {})",
                floor,
                segment,
                spec.size_in_segments,
                spec.depth_requirement
            );
            return None;
        }
        let radial = grid.radial_segments();
        let floor = floor as usize;
        let initial_segment = grid.wrap_segment(i64::from(segment));
        let id = BuildingId(self.next_id);
        self.next_id += 1;
        for s in footprint(initial_segment, spec.size_in_segments, radial) {
            grid.set_building(floor, s, id);
        }
        self.buildings.push(Building {
            id,
            floor,
            initial_segment,
            size_in_segments: spec.size_in_segments,
            depth_requirement: spec.depth_requirement,
        });
        log::debug!(
            "building {:?} placed at floor {} segment {}",
            id,
            floor,
            initial_segment
        );
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dug_grid(radial: u32, floors: usize, depth: u32) -> OccupancyGrid {
        let mut g = OccupancyGrid::new(radial);
        for _ in 0..floors {
            let f = g.push_floor();
            for s in 0..radial as usize {
                g.set_depth(f, s, depth);
            }
        }
        g
    }

    #[test]
    fn footprint_wraps_around_the_ring() {
        let mut g = dug_grid(8, 1, 1);
        let mut ledger = BuildingLedger::new();
        let id = ledger
            .try_place(&mut g, &BuildingSpec::new(3, 1), 0, 7)
            .unwrap();
        assert_eq!(g.building(0, 7), Some(id));
        assert_eq!(g.building(0, 0), Some(id));
        assert_eq!(g.building(0, 1), Some(id));
        assert_eq!(g.building(0, 2), None);
        let b = ledger.get(id).unwrap();
        assert_eq!(b.footprint(8).collect::<Vec<_>>(), vec![7, 0, 1]);
    }

    #[test]
    fn negative_segment_wraps_and_negative_floor_fails() {
        let mut g = dug_grid(8, 1, 1);
        let mut ledger = BuildingLedger::new();
        assert!(!ledger.can_place(&g, &BuildingSpec::new(1, 0), -1, 0));
        let id = ledger.try_place(&mut g, &BuildingSpec::new(1, 0), 0, -1).unwrap();
        assert_eq!(g.building(0, 7), Some(id));
    }

    #[test]
    fn degenerate_sizes_are_rejected() {
        let g = dug_grid(4, 1, 1);
        let ledger = BuildingLedger::new();
        assert!(!ledger.can_place(&g, &BuildingSpec::new(0, 0), 0, 0));
        assert!(!ledger.can_place(&g, &BuildingSpec::new(5, 0), 0, 0));
        assert!(ledger.can_place(&g, &BuildingSpec::new(4, 0), 0, 0));
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut g = dug_grid(8, 2, 2);
        let mut ledger = BuildingLedger::new();
        let a = ledger.try_place(&mut g, &BuildingSpec::new(2, 1), 0, 0).unwrap();
        assert!(ledger.try_place(&mut g, &BuildingSpec::new(2, 1), 0, 1).is_none());
        let b = ledger.try_place(&mut g, &BuildingSpec::new(2, 1), 1, 1).unwrap();
        assert_eq!(a, BuildingId(1));
        assert_eq!(b, BuildingId(2));
        assert_eq!(ledger.buildings().len(), 2);
    }
}
