use crate::building::{BuildingId, NULL_BUILDING_ID};

/// Row-major `[floor][segment]` storage with a fixed row width.
///
/// All flattening goes through [`SegmentGrid::idx`]; out-of-range coordinates
/// never alias into a neighbouring row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentGrid<T> {
    width: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> SegmentGrid<T> {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            cells: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn rows(&self) -> usize {
        if self.width == 0 { 0 } else { self.cells.len() / self.width }
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> Option<usize> {
        if col < self.width && row < self.rows() {
            Some(col + row * self.width)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.idx(row, col).map(|i| self.cells[i])
    }

    /// Writes a cell; returns `false` when the coordinate is out of range.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) -> bool {
        match self.idx(row, col) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows() {
            let start = row * self.width;
            Some(&self.cells[start..start + self.width])
        } else {
            None
        }
    }

    /// Appends a row of `T::default()` and returns its index.
    pub fn push_row(&mut self) -> usize {
        let row = self.rows();
        self.cells.resize(self.cells.len() + self.width, T::default());
        row
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }
}

/// Per-floor, per-segment excavation depth and building occupancy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    segment_depth: SegmentGrid<u32>,
    building_by_segment: SegmentGrid<u32>,
}

impl OccupancyGrid {
    pub fn new(radial_segments: u32) -> Self {
        let width = radial_segments as usize;
        Self {
            segment_depth: SegmentGrid::new(width),
            building_by_segment: SegmentGrid::new(width),
        }
    }

    #[inline]
    pub fn floor_count(&self) -> usize {
        self.segment_depth.rows()
    }

    #[inline]
    pub fn radial_segments(&self) -> usize {
        self.segment_depth.width()
    }

    /// Segment index wrapped onto the ring.
    #[inline]
    pub fn wrap_segment(&self, segment: i64) -> usize {
        segment.rem_euclid(self.radial_segments() as i64) as usize
    }

    /// Appends an unexcavated, unoccupied floor.
    pub fn push_floor(&mut self) -> usize {
        let floor = self.segment_depth.push_row();
        self.building_by_segment.push_row();
        floor
    }

    #[inline]
    pub fn depth(&self, floor: usize, segment: usize) -> Option<u32> {
        self.segment_depth.get(floor, segment)
    }

    #[inline]
    pub fn set_depth(&mut self, floor: usize, segment: usize, depth: u32) -> bool {
        self.segment_depth.set(floor, segment, depth)
    }

    #[inline]
    pub fn depth_row(&self, floor: usize) -> Option<&[u32]> {
        self.segment_depth.row(floor)
    }

    #[inline]
    pub fn building(&self, floor: usize, segment: usize) -> Option<BuildingId> {
        match self.building_by_segment.get(floor, segment) {
            Some(raw) if raw != NULL_BUILDING_ID.0 => Some(BuildingId(raw)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_vacant(&self, floor: usize, segment: usize) -> bool {
        self.building_by_segment.get(floor, segment) == Some(NULL_BUILDING_ID.0)
    }

    #[inline]
    pub fn set_building(&mut self, floor: usize, segment: usize, id: BuildingId) -> bool {
        self.building_by_segment.set(floor, segment, id.0)
    }

    #[inline]
    pub fn depth_cells(&self) -> &[u32] {
        self.segment_depth.as_slice()
    }

    #[inline]
    pub fn building_cells(&self) -> &[u32] {
        self.building_by_segment.as_slice()
    }
}
