use glam::{DMat3, DMat4, DVec3};
use log::warn;
use objmerge_files::common::types::Vector3;
use objmerge_files::placement::types::PlacementRecord;

const ORTHONORMAL_EPSILON: f64 = 1e-4;

/// An affine instance transform.
///
/// Placement files describe transforms in the row-vector convention, `p' = p · M` with
/// `M = Scale · Rotation · Translation`. Internally the matrix is kept in glam's column-vector
/// layout (`p' = M · p`), i.e. as the transpose of `M`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform(pub DMat4);

impl Transform {
    pub const IDENTITY: Transform = Transform(DMat4::IDENTITY);

    /// `rotation` is a row-major 3x3 rotation and is used verbatim.
    pub fn compose(translation: DVec3, rotation: [f64; 9], scale: DVec3) -> Transform {
        if !is_rotation(&rotation) {
            warn!("Rotation {:?} is not orthonormal, using it anyway", rotation);
        }

        // (S · R · T)ᵀ = Tᵀ · Rᵀ · S, and reading the row-major rotation column by column yields Rᵀ.
        let rotation = DMat4::from_mat3(DMat3::from_cols_array(&rotation));
        Transform(DMat4::from_translation(translation) * rotation * DMat4::from_scale(scale))
    }

    pub fn from_record(record: &PlacementRecord) -> Transform {
        Transform::compose(
            to_dvec3(record.position),
            record.rotation,
            to_dvec3(record.scale),
        )
    }

    /// Applies `child` first, then `parent`: the row-vector product `child · parent`.
    pub fn combine(child: &Transform, parent: &Transform) -> Transform {
        Transform(parent.0 * child.0)
    }

    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        let transformed = self.0.transform_point3(to_dvec3(point));
        Vector3::new(transformed.x, transformed.y, transformed.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

fn to_dvec3(vector: Vector3) -> DVec3 {
    DVec3::new(vector.x, vector.y, vector.z)
}

/// Orthonormal with a positive determinant.
pub fn is_rotation(rotation: &[f64; 9]) -> bool {
    let matrix = DMat3::from_cols_array(rotation);
    (matrix * matrix.transpose()).abs_diff_eq(DMat3::IDENTITY, ORTHONORMAL_EPSILON)
        && (matrix.determinant() - 1.0).abs() < ORTHONORMAL_EPSILON
}
