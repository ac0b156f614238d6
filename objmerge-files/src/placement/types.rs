use crate::common::types::Vector3;

/// Lines per record in an outer (building level) placement file.
pub const OUTER_STRIDE: usize = 6;
/// Lines per record in an inner (element level) placement file.
pub const INNER_STRIDE: usize = 5;

/// One placed reference: where a referenced file sits relative to its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRecord {
    pub id: String,
    pub position: Vector3,
    /// Row-major 3x3, used verbatim.
    pub rotation: [f64; 9],
    /// The value prefixing the scale triple, if present. Not interpreted.
    pub scale_flag: Option<String>,
    pub scale: Vector3,
    /// Path of the referenced file as written, possibly with `\` separators.
    pub reference: String,
    /// Only present in outer records. Not interpreted.
    pub trailing: Option<String>,
}

impl PlacementRecord {
    /// The referenced path with `\` separators turned into `/`.
    pub fn reference_path(&self) -> String {
        self.reference.replace('\\', "/")
    }
}
