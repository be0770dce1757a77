use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaveError {
    #[error("cave already created")]
    AlreadyCreated,
    #[error("floor {floor} out of range ({floors} floors dug)")]
    FloorOutOfRange { floor: i32, floors: usize },
    #[error("segment {segment} out of range ({radial} segments)")]
    SegmentOutOfRange { segment: i32, radial: usize },
}
