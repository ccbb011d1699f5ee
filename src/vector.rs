//! Batch operations over flat coordinate buffers, read in groups of 3.
//!
//! Buffers are laid out as `[x0, y0, z0, x1, y1, z1, ...]`; trailing scalars which do not form
//! a whole vector are ignored.

use nalgebra::{Matrix3x4, Vector3};

use crate::Float;

/// Read the `i`th vector of a flat buffer.
///
/// # Panics
///
/// * `buf` holds fewer than `i + 1` vectors
#[inline]
pub fn get<Real: Float>(buf: &[Real], i: usize) -> Vector3<Real> {
    Vector3::from_column_slice(&buf[i * 3..i * 3 + 3])
}

/// Overwrite the `i`th vector of a flat buffer.
#[inline]
pub fn set<Real: Float>(buf: &mut [Real], i: usize, v: &Vector3<Real>) {
    buf[i * 3..i * 3 + 3].copy_from_slice(v.as_slice());
}

/// Add `v` to the `i`th vector of a flat buffer.
#[inline]
pub fn add_to<Real: Float>(buf: &mut [Real], i: usize, v: &Vector3<Real>) {
    for (dst, src) in buf[i * 3..i * 3 + 3].iter_mut().zip(v.iter()) {
        *dst += *src;
    }
}

#[inline]
fn normalized<Real: Float>(v: Vector3<Real>) -> Vector3<Real> {
    let len = v.norm();
    if len > Real::ZERO {
        v / len
    } else {
        v
    }
}

/// Normalize each vector of `src`, writing the results to `dest`.
///
/// Zero-length vectors are copied through unchanged rather than becoming NaN.
///
/// # Panics
///
/// * `dest` is shorter than `src`
pub fn normalize_vectors<Real: Float>(src: &[Real], dest: &mut [Real]) {
    assert!(dest.len() >= src.len() - src.len() % 3);
    for (s, d) in src.chunks_exact(3).zip(dest.chunks_exact_mut(3)) {
        let n = normalized(Vector3::from_column_slice(s));
        d.copy_from_slice(n.as_slice());
    }
}

/// Normalize each vector of `buf` in place. Idempotent; zero-length vectors are left as they are.
pub fn normalize_vectors_in_place<Real: Float>(buf: &mut [Real]) {
    for c in buf.chunks_exact_mut(3) {
        let n = normalized(Vector3::from_column_slice(c));
        c.copy_from_slice(n.as_slice());
    }
}

/// Apply an affine transformation to each vector of `src`, writing the results to `dest`.
pub fn transform_vectors<Real: Float>(mat: &Matrix3x4<Real>, src: &[Real], dest: &mut [Real]) {
    assert!(dest.len() >= src.len() - src.len() % 3);
    for (s, d) in src.chunks_exact(3).zip(dest.chunks_exact_mut(3)) {
        let p = mat * nalgebra::vector![s[0], s[1], s[2], Real::ONE];
        d.copy_from_slice(p.as_slice());
    }
}

/// Apply an affine transformation to each vector of `src`, writing only the transformed `z`
/// component of each to `dest_z` (one scalar per vector).
pub fn transform_vector_zs<Real: Float>(mat: &Matrix3x4<Real>, src: &[Real], dest_z: &mut [Real]) {
    assert!(dest_z.len() >= src.len() / 3);
    let row = mat.row(2);
    for (s, z) in src.chunks_exact(3).zip(dest_z.iter_mut()) {
        *z = row[0] * s[0] + row[1] * s[1] + row[2] * s[2] + row[3];
    }
}
