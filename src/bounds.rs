use std::ops::{BitOr, BitOrAssign};

use meshfold_common::{impl_op, item_with};
use nalgebra::Point3;

use crate::Float;

/// Axis-Aligned Bounding Box
///
/// An [empty](Aabb::empty) box has its `mins` at +∞ and its `maxs` at -∞, so that it is the
/// identity of [Aabb::union]. It has no meaningful center or diagonal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb<Real: Float = f32> {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl<Real: Float> Default for Aabb<Real> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<Real: Float> Aabb<Real> {
    #[inline]
    pub fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// A box containing nothing.
    #[inline]
    pub fn empty() -> Self {
        Self {
            mins: Point3::new(Real::INFINITY, Real::INFINITY, Real::INFINITY),
            maxs: Point3::new(Real::NEG_INFINITY, Real::NEG_INFINITY, Real::NEG_INFINITY),
        }
    }

    /// Whether `self` contains no points; i.e. `mins > maxs` on some axis.
    #[inline]
    pub fn is_empty(&self) -> bool {
        let Self { mins: i, maxs: a } = self;
        i.x > a.x || i.y > a.y || i.z > a.z
    }

    /// Construct the smallest box containing every vector of a flat position buffer.
    ///
    /// An empty buffer yields an [empty](Aabb::empty) box.
    pub fn from_positions(positions: &[Real]) -> Self {
        let mut res = Self::empty();
        for p in positions.chunks_exact(3) {
            res.expand_to(&Point3::new(p[0], p[1], p[2]));
        }
        res
    }

    /// Grow `self` such that it contains `p`.
    #[inline]
    pub fn expand_to(&mut self, p: &Point3<Real>) {
        let Self { mins: i, maxs: a } = self;
        if p.x < i.x {
            i.x = p.x;
        }
        if p.x > a.x {
            a.x = p.x;
        }
        if p.y < i.y {
            i.y = p.y;
        }
        if p.y > a.y {
            a.y = p.y;
        }
        if p.z < i.z {
            i.z = p.z;
        }
        if p.z > a.z {
            a.z = p.z;
        }
    }

    /// Construct the smallest box containing both `self` and `other`.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    #[inline]
    pub fn contains(&self, p: &Point3<Real>) -> bool {
        let Self { mins: i, maxs: a } = self;
        (p.x >= i.x && p.y >= i.y && p.z >= i.z) && (p.x <= a.x && p.y <= a.y && p.z <= a.z)
    }

    /// Determine the center of `self`.
    #[inline]
    pub fn center(&self) -> Point3<Real> {
        let Self { mins: i, maxs: a } = self;
        nalgebra::point![
            (i.x + a.x) / Real::TWO,
            (i.y + a.y) / Real::TWO,
            (i.z + a.z) / Real::TWO
        ]
    }

    /// The length of the line from `mins` to `maxs`.
    #[inline]
    pub fn length_of_diagonal(&self) -> Real {
        (self.maxs - self.mins).norm()
    }
}

item_with! {Real: f32, f64 => impl_op! {BitOr, bitor, BitOrAssign, bitor_assign;
    self: Aabb<Real>, rhs: Aabb<Real>;
    self.union(&rhs);
    *self = self.union(&rhs)}}
