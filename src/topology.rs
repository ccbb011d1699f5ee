//! Sentinel-delimited polygon topology.
//!
//! A face stream is a flat sequence of vertex indices in which each face is terminated by
//! [SENTINEL]. Faces are not limited to triangles.

/// Marks the end of a face within a face stream.
pub const SENTINEL: i32 = -1;

/// Errors found by [Topology::validate].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("face {face} references vertex {index}, but there are only {vertex_count} vertices")]
    VertexOutOfRange {
        face: usize,
        index: i32,
        vertex_count: usize,
    },
    #[error("face {face} has {len} vertices; at least 3 are required")]
    ShortFace { face: usize, len: usize },
}

/// A face stream which has been repaired so that every face, including the last, ends with
/// [SENTINEL].
///
/// The face count is computed once, on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    indices: Vec<i32>,
    face_count: usize,
    instance_count: usize,
}

impl Topology {
    /// Repair a raw face stream.
    ///
    /// Every negative entry becomes [SENTINEL], and a sentinel is appended if the stream does
    /// not already end with one.
    pub fn normalize(mut indices: Vec<i32>) -> Self {
        for i in indices.iter_mut().filter(|i| **i < 0) {
            *i = SENTINEL;
        }
        if indices.last() != Some(&SENTINEL) {
            indices.push(SENTINEL);
        }
        let face_count = indices.iter().filter(|&&i| i == SENTINEL).count();
        Self {
            instance_count: indices.len() - face_count,
            indices,
            face_count,
        }
    }

    /// The repaired face stream.
    #[inline]
    pub fn indices(&self) -> &[i32] {
        &self.indices
    }

    #[inline]
    pub fn into_indices(self) -> Vec<i32> {
        self.indices
    }

    /// Length of the face stream, sentinels included.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Never true for a normalized stream, which always ends in a sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_count
    }

    /// The number of face-instances in the stream; i.e. the number of non-sentinel entries.
    #[inline]
    pub fn instance_count(&self) -> usize {
        self.instance_count
    }

    /// Iterate over the vertex indices of each face, in stream order.
    pub fn faces(&self) -> impl ExactSizeIterator<Item = &[i32]> + '_ {
        Faces {
            rest: &self.indices,
            remaining: self.face_count,
        }
    }

    /// Record, for each vertex, the faces which reference it.
    ///
    /// # Panics
    ///
    /// * a face references a vertex `>= vertex_count`
    pub fn vertex_faces(&self, vertex_count: usize) -> VertexFaces {
        // offsets[v + 1] starts out as the number of references to v
        let mut offsets = vec![0usize; vertex_count + 1];
        for &v in self.indices.iter().filter(|&&i| i != SENTINEL) {
            offsets[v as usize + 1] += 1;
        }
        for v in 0..vertex_count {
            offsets[v + 1] += offsets[v];
        }

        let mut cursor = offsets.clone();
        let mut faces = vec![0usize; self.instance_count];
        for (face, verts) in self.faces().enumerate() {
            for &v in verts {
                let slot = &mut cursor[v as usize];
                faces[*slot] = face;
                *slot += 1;
            }
        }
        VertexFaces { offsets, faces }
    }

    /// Check that every face has at least 3 vertices, each of which lies within
    /// `0..vertex_count`.
    pub fn validate(&self, vertex_count: usize) -> Result<(), TopologyError> {
        for (face, verts) in self.faces().enumerate() {
            if verts.len() < 3 {
                return Err(TopologyError::ShortFace {
                    face,
                    len: verts.len(),
                });
            }
            if let Some(&index) = verts.iter().find(|&&v| v as usize >= vertex_count) {
                return Err(TopologyError::VertexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

struct Faces<'t> {
    rest: &'t [i32],
    remaining: usize,
}

impl<'t> Iterator for Faces<'t> {
    type Item = &'t [i32];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // a normalized stream always ends with a sentinel
        let end = self.rest.iter().position(|&i| i == SENTINEL)?;
        let face = &self.rest[..end];
        self.rest = &self.rest[end + 1..];
        self.remaining -= 1;
        Some(face)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Faces<'_> {}

/// For each vertex, the indices of the faces touching it, in stream order.
///
/// A face appears once per occurrence of the vertex within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexFaces {
    offsets: Vec<usize>,
    faces: Vec<usize>,
}

impl VertexFaces {
    /// The faces touching vertex `v`.
    ///
    /// # Panics
    ///
    /// * `v >= self.vertex_count()`
    #[inline]
    pub fn of(&self, v: usize) -> &[usize] {
        &self.faces[self.offsets[v]..self.offsets[v + 1]]
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_missing_sentinel() {
        let t = Topology::normalize(vec![0, 1, 2, -1, 2, 1, 3]);
        assert_eq!(t.indices(), &[0, 1, 2, -1, 2, 1, 3, -1]);
        assert_eq!(t.face_count(), 2);
        assert_eq!(t.instance_count(), 6);
    }

    #[test]
    fn empty_stream_becomes_one_empty_face() {
        let t = Topology::normalize(Vec::new());
        assert_eq!(t.indices(), &[SENTINEL]);
        assert_eq!(t.len(), 1);
        assert!(!t.is_empty());
        assert_eq!(t.face_count(), 1);
        assert_eq!(t.instance_count(), 0);
        assert_eq!(t.faces().next(), Some(&[][..]));
    }

    #[test]
    fn keeps_existing_sentinel() {
        let t = Topology::normalize(vec![0, 1, 2, 3, -1]);
        assert_eq!(t.len(), 5);
        assert_eq!(t.face_count(), 1);
    }

    #[test]
    fn rewrites_other_negatives() {
        let t = Topology::normalize(vec![0, 1, 2, -7, 1, 2, 3, -2]);
        assert_eq!(t.indices(), &[0, 1, 2, -1, 1, 2, 3, -1]);
        assert_eq!(t.face_count(), 2);
    }

    #[test]
    fn faces() {
        let t = Topology::normalize(vec![0, 1, 2, 3, -1, 3, 2, 4]);
        let faces: Vec<&[i32]> = t.faces().collect();
        assert_eq!(faces, vec![&[0, 1, 2, 3][..], &[3, 2, 4][..]]);
        assert_eq!(t.faces().len(), 2);
    }

    #[test]
    fn vertex_faces() {
        let t = Topology::normalize(vec![0, 1, 2, -1, 2, 1, 3, -1, 3, 4, 2, -1]);
        let vf = t.vertex_faces(6);
        assert_eq!(vf.vertex_count(), 6);
        assert_eq!(vf.of(0), &[0]);
        assert_eq!(vf.of(1), &[0, 1]);
        assert_eq!(vf.of(2), &[0, 1, 2]);
        assert_eq!(vf.of(3), &[1, 2]);
        assert_eq!(vf.of(4), &[2]);
        assert!(vf.of(5).is_empty());
    }

    #[test]
    fn validate() {
        assert_eq!(Topology::normalize(vec![0, 1, 2]).validate(3), Ok(()));
        assert_eq!(
            Topology::normalize(vec![0, 1, 2, -1, 0, 1]).validate(3),
            Err(TopologyError::ShortFace { face: 1, len: 2 })
        );
        assert_eq!(
            Topology::normalize(vec![0, 1, 5]).validate(3),
            Err(TopologyError::VertexOutOfRange {
                face: 0,
                index: 5,
                vertex_count: 3
            })
        );
    }
}
