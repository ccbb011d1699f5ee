//! Face and vertex normal derivation.
//!
//! Face normals are produced un-normalized: their magnitude (twice the area of each face's
//! leading triangle) weights each face's contribution to the vertex normals built from them.

use nalgebra::Vector3;
use simba::scalar::SupersetOf;

use crate::{
    topology::{Topology, VertexFaces, SENTINEL},
    vector, Float,
};

/// An angle, in degrees, beyond which adjacent faces are not smoothed together.
///
/// Only angles within `[0, 180)` enable creasing; anything else (including NaN) yields a
/// disabled crease angle, which selects [uniform](VertexNormals::Uniform) vertex normals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreaseAngle<Real: Float = f32>(Option<Real>);

impl<Real: Float> Default for CreaseAngle<Real> {
    fn default() -> Self {
        Self::disabled()
    }
}

impl<Real: Float> CreaseAngle<Real> {
    pub fn from_degrees(degrees: Real) -> Self {
        let half_turn = nalgebra::convert::<f64, Real>(180.0);
        if degrees >= Real::ZERO && degrees < half_turn {
            Self(Some(degrees))
        } else {
            Self(None)
        }
    }

    #[inline]
    pub fn disabled() -> Self {
        Self(None)
    }

    #[inline]
    pub fn degrees(&self) -> Option<Real> {
        self.0
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }

    /// The cosine of the crease angle. Two unit face normals are smoothed together when their
    /// dot product is strictly greater than this.
    ///
    /// Always computed in `f64`, so that right angles yield a (tiny) positive cosine at any
    /// width; `cos(π_f32 / 2)` is negative.
    pub fn threshold(&self) -> Option<Real> {
        self.0.map(|d| {
            let d: f64 = d.to_subset_unchecked();
            nalgebra::convert::<f64, Real>(d.to_radians().cos())
        })
    }
}

/// Per-vertex normals, in one of two layouts.
#[derive(Debug, Clone, PartialEq)]
pub enum VertexNormals<Real: Float = f32> {
    /// One normal per vertex, indexed by the face stream itself.
    Uniform { normals: Vec<Real> },
    /// One normal per face-instance. `indices` parallels the face stream, mapping each
    /// face-instance to its normal; sentinels are carried over unchanged.
    Creased { normals: Vec<Real>, indices: Vec<i32> },
}

impl<Real: Float> VertexNormals<Real> {
    /// The flat normal buffer.
    #[inline]
    pub fn normals(&self) -> &[Real] {
        match self {
            Self::Uniform { normals } | Self::Creased { normals, .. } => normals,
        }
    }

    /// The normal index stream, if it differs from the face stream.
    #[inline]
    pub fn indices(&self) -> Option<&[i32]> {
        match self {
            Self::Uniform { .. } => None,
            Self::Creased { indices, .. } => Some(indices),
        }
    }

    /// The stream a renderer should use to look up the normal of each face-instance.
    #[inline]
    pub fn index_stream<'s>(&'s self, faces: &'s [i32]) -> &'s [i32] {
        self.indices().unwrap_or(faces)
    }

    /// The number of normals.
    #[inline]
    pub fn len(&self) -> usize {
        self.normals().len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.normals().is_empty()
    }

    #[inline]
    pub fn is_creased(&self) -> bool {
        matches!(self, Self::Creased { .. })
    }
}

/// Compute one un-normalized normal per face, in stream order.
///
/// Only the first three vertices of each face are considered: `(v1 - v0) × (v2 - v0)`. Faces
/// with fewer than three vertices get a zero normal.
///
/// # Panics
///
/// * a face references a vertex outside of `positions`
pub fn face_normals<Real: Float>(positions: &[Real], topology: &Topology) -> Vec<Real> {
    let mut res = Vec::with_capacity(topology.face_count() * 3);
    for face in topology.faces() {
        let n = match face {
            [a, b, c, ..] => {
                let v0 = vector::get(positions, *a as usize);
                let v1 = vector::get(positions, *b as usize);
                let v2 = vector::get(positions, *c as usize);
                (v1 - v0).cross(&(v2 - v0))
            }
            _ => Vector3::zeros(),
        };
        res.extend_from_slice(n.as_slice());
    }
    res
}

/// Sum the normals of every face touching each vertex, then normalize.
///
/// `face_normals` should be un-normalized, so that larger faces contribute more.
pub fn uniform_vertex_normals<Real: Float>(
    vertex_count: usize,
    topology: &Topology,
    face_normals: &[Real],
) -> VertexNormals<Real> {
    let mut normals = vec![Real::ZERO; vertex_count * 3];
    for (face, verts) in topology.faces().enumerate() {
        let n = vector::get(face_normals, face);
        for &v in verts {
            vector::add_to(&mut normals, v as usize, &n);
        }
    }
    vector::normalize_vectors_in_place(&mut normals);
    VertexNormals::Uniform { normals }
}

#[inline]
fn joins<Real: Float>(threshold: Real, a: &Vector3<Real>, b: &Vector3<Real>) -> bool {
    a.dot(b) > threshold
}

/// Compute a normal for every face-instance, smoothing across only those adjacent faces whose
/// normals lie within the crease angle of each other.
///
/// `threshold` is the cosine of the crease angle (see [CreaseAngle::threshold]).
pub fn creased_vertex_normals<Real: Float>(
    topology: &Topology,
    vertex_faces: &VertexFaces,
    face_normals: &[Real],
    threshold: Real,
) -> VertexNormals<Real> {
    // unit normals for the angle test; accumulation still uses the raw ones
    let mut units = vec![Real::ZERO; face_normals.len()];
    vector::normalize_vectors(face_normals, &mut units);

    let mut normals = vec![Real::ZERO; topology.instance_count() * 3];
    let mut indices = Vec::with_capacity(topology.len());
    let mut face = 0;
    let mut slot = 0;
    for &v in topology.indices() {
        if v == SENTINEL {
            face += 1;
            indices.push(SENTINEL);
            continue;
        }
        let unit = vector::get(&units, face);
        let mut n = vector::get(face_normals, face);
        for &other in vertex_faces.of(v as usize) {
            if other != face && joins(threshold, &unit, &vector::get(&units, other)) {
                n += vector::get(face_normals, other);
            }
        }
        vector::set(&mut normals, slot, &n);
        indices.push(slot as i32);
        slot += 1;
    }
    vector::normalize_vectors_in_place(&mut normals);
    VertexNormals::Creased { normals, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crease_angle_range() {
        assert!(CreaseAngle::from_degrees(0.0f32).is_enabled());
        assert!(CreaseAngle::from_degrees(179.5f32).is_enabled());
        assert!(!CreaseAngle::from_degrees(180.0f32).is_enabled());
        assert!(!CreaseAngle::from_degrees(-180.0f32).is_enabled());
        assert!(!CreaseAngle::from_degrees(f32::NAN).is_enabled());
        assert_eq!(CreaseAngle::<f32>::default(), CreaseAngle::disabled());
    }

    #[test]
    fn threshold_is_cosine() {
        let t = CreaseAngle::from_degrees(60.0f64).threshold().unwrap();
        assert!((t - 0.5).abs() < 1e-12);
        assert_eq!(CreaseAngle::from_degrees(0.0f64).threshold(), Some(1.0));
        assert_eq!(CreaseAngle::<f64>::disabled().threshold(), None);
    }

    #[test]
    fn right_angle_stays_sharp_at_any_width() {
        let single = CreaseAngle::from_degrees(90.0f32).threshold().unwrap();
        let double = CreaseAngle::from_degrees(90.0f64).threshold().unwrap();
        assert!(single >= 0.0 && single < 1e-6, "{single}");
        assert!(double >= 0.0 && double < 1e-12, "{double}");
        let (z, y) = (Vector3::new(0.0f32, 0.0, 1.0), Vector3::new(0.0f32, 1.0, 0.0));
        assert!(!joins(single, &z, &y));
    }

    #[test]
    fn joining_is_strict() {
        let z = Vector3::new(0.0f32, 0.0, 1.0);
        assert!(!joins(1.0, &z, &z));
        assert!(joins(0.5, &z, &z));
        assert!(!joins(0.0, &z, &Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn short_faces_have_zero_normals() {
        let positions = [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let t = Topology::normalize(vec![0, 1, -1, 0, 1, 2, -1]);
        let n = face_normals(&positions, &t);
        assert_eq!(n, vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn face_normals_keep_magnitude() {
        let positions = [0.0f32, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0, 0.0];
        let t = Topology::normalize(vec![0, 1, 2]);
        assert_eq!(face_normals(&positions, &t), vec![0.0, 0.0, 6.0]);
    }

    #[test]
    fn index_stream() {
        let faces = [0, 1, 2, -1];
        let uniform = VertexNormals::Uniform {
            normals: vec![0.0f32; 9],
        };
        assert_eq!(uniform.index_stream(&faces), &faces);
        assert_eq!(uniform.len(), 3);
        let creased = VertexNormals::Creased {
            normals: vec![0.0f32; 9],
            indices: vec![2, 1, 0, -1],
        };
        assert_eq!(creased.index_stream(&faces), &[2, 1, 0, -1]);
        assert!(creased.is_creased());
    }
}
