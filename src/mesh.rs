use std::sync::Arc;

use crate::{
    normals::{self, CreaseAngle, VertexNormals},
    topology::Topology,
    vector, Aabb, Error, Float, Material, RenderMode, Texture,
};

/// The face stream of a [Mesh], before and after it has been repaired.
#[derive(Debug, Clone)]
enum FaceStream {
    Raw(Vec<i32>),
    Parsed(Topology),
}

impl FaceStream {
    #[inline]
    fn indices(&self) -> &[i32] {
        match self {
            Self::Raw(raw) => raw,
            Self::Parsed(t) => t.indices(),
        }
    }
}

/// A polygon mesh, along with the attributes derived from it by [Mesh::init].
///
/// Faces are described by a face stream (see [crate::topology]): each face has 3 or more
/// vertices, given in counter-clockwise order, followed by a sentinel.
#[derive(Debug, Clone)]
pub struct Mesh<Real: Float = f32> {
    pub name: String,
    pub metadata: String,
    /// Invisible meshes are ignored by renderers.
    pub visible: bool,
    /// Render both sides of each face.
    pub double_sided: bool,
    /// Accept environment mapping.
    pub environment_cast: bool,
    render_mode: Option<RenderMode>,
    internal_id: u32,
    positions: Vec<Real>,
    faces: FaceStream,
    crease_angle: CreaseAngle<Real>,
    tex_coords: Option<Vec<Real>>,
    tex_coord_indices: Option<Vec<i32>>,
    material: Option<Arc<dyn Material>>,
    texture: Option<Arc<dyn Texture>>,
    bounds: Option<Aabb<Real>>,
    face_normals: Option<Vec<Real>>,
    vertex_normals: Option<VertexNormals<Real>>,
}

impl<Real: Float> Default for Mesh<Real> {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl<Real: Float> Mesh<Real> {
    /// Construct a mesh from a flat position buffer and a face stream.
    ///
    /// The face stream may omit the sentinel after its last face.
    pub fn new(positions: Vec<Real>, indices: Vec<i32>) -> Self {
        Self {
            name: String::new(),
            metadata: String::new(),
            visible: true,
            double_sided: false,
            environment_cast: false,
            render_mode: None,
            internal_id: 0,
            positions,
            faces: FaceStream::Raw(indices),
            crease_angle: CreaseAngle::disabled(),
            tex_coords: None,
            tex_coord_indices: None,
            material: None,
            texture: None,
            bounds: None,
            face_normals: None,
            vertex_normals: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_crease_angle(mut self, degrees: Real) -> Self {
        self.set_crease_angle(degrees);
        self
    }

    /// Attach texture coordinates. If `indices` is `None`, the face stream indexes them.
    pub fn with_tex_coords(mut self, coords: Vec<Real>, indices: Option<Vec<i32>>) -> Self {
        self.tex_coords = Some(coords);
        self.tex_coord_indices = indices;
        self
    }

    pub fn with_material(mut self, material: Arc<dyn Material>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_texture(mut self, texture: Arc<dyn Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Whether `self` has too little data to be processed: fewer than 3 vertices, or fewer
    /// than 3 face stream entries.
    ///
    /// Trivial meshes are skipped by [Mesh::init] and by scene bounds.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.vertex_count() < 3 || self.faces.indices().len() < 3
    }

    /// Derive everything a renderer needs: face count, bounds, normalized face normals, and
    /// vertex normals (creased if a crease angle is set).
    ///
    /// Attributes which are already present are kept. Trivial meshes are left untouched.
    #[tracing::instrument(level = "debug", skip(self), fields(name = %self.name))]
    pub fn init(&mut self) {
        if self.is_trivial() {
            tracing::trace!("skipping trivial mesh");
            return;
        }

        self.calc_face_count();
        let FaceStream::Parsed(topology) = &self.faces else {
            unreachable!("face stream was parsed by calc_face_count")
        };

        if self.bounds.is_none() {
            self.bounds = Some(Aabb::from_positions(&self.positions));
        }

        let face_normals = self
            .face_normals
            .get_or_insert_with(|| normals::face_normals(&self.positions, topology));

        if self.vertex_normals.is_none() {
            let vertex_count = self.positions.len() / 3;
            let vn = match self.crease_angle.threshold() {
                Some(threshold) => {
                    let vertex_faces = topology.vertex_faces(vertex_count);
                    normals::creased_vertex_normals(topology, &vertex_faces, face_normals, threshold)
                }
                None => normals::uniform_vertex_normals(vertex_count, topology, face_normals),
            };
            tracing::debug!(
                faces = topology.face_count(),
                normals = vn.len(),
                creased = vn.is_creased(),
                "derived vertex normals"
            );
            self.vertex_normals = Some(vn);
        }

        // vertex normals are built from the un-normalized face normals, so this must come last
        vector::normalize_vectors_in_place(face_normals);
    }

    /// Repair the face stream (if that hasn't happened yet) and return the number of faces.
    ///
    /// Trivial meshes are not parsed, and have no faces.
    pub fn calc_face_count(&mut self) -> usize {
        if self.is_trivial() {
            return 0;
        }
        if let FaceStream::Raw(raw) = &mut self.faces {
            self.faces = FaceStream::Parsed(Topology::normalize(std::mem::take(raw)));
        }
        self.face_count()
    }

    /// The number of faces, as of the last time the face stream was parsed; 0 if it hasn't been.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.topology().map_or(0, Topology::face_count)
    }

    /// The repaired face stream, if it has been parsed.
    #[inline]
    pub fn topology(&self) -> Option<&Topology> {
        match &self.faces {
            FaceStream::Raw(_) => None,
            FaceStream::Parsed(t) => Some(t),
        }
    }

    /// The face stream; repaired if it has been parsed.
    #[inline]
    pub fn index_buffer(&self) -> &[i32] {
        self.faces.indices()
    }

    #[inline]
    pub fn positions(&self) -> &[Real] {
        &self.positions
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Replace the positions, discarding everything derived from them.
    pub fn set_positions(&mut self, positions: Vec<Real>) {
        self.positions = positions;
        self.invalidate();
    }

    /// Replace the face stream, discarding everything derived from it.
    pub fn set_indices(&mut self, indices: Vec<i32>) {
        self.faces = FaceStream::Raw(indices);
        self.invalidate();
    }

    #[inline]
    pub fn bounds(&self) -> Option<&Aabb<Real>> {
        self.bounds.as_ref()
    }

    /// Per-face normals; normalized once [Mesh::init] has finished.
    #[inline]
    pub fn face_normals(&self) -> Option<&[Real]> {
        self.face_normals.as_deref()
    }

    #[inline]
    pub fn vertex_normals(&self) -> Option<&VertexNormals<Real>> {
        self.vertex_normals.as_ref()
    }

    /// The stream a renderer should use to look up vertex normals: the creased normal index
    /// stream if there is one, or the face stream otherwise.
    pub fn vertex_normal_indices(&self) -> Option<&[i32]> {
        self.vertex_normals
            .as_ref()
            .map(|vn| vn.index_stream(self.faces.indices()))
    }

    #[inline]
    pub fn crease_angle(&self) -> CreaseAngle<Real> {
        self.crease_angle
    }

    /// Set the crease angle, in degrees; see [CreaseAngle::from_degrees].
    ///
    /// Face and vertex normals are discarded, to be derived again by the next [Mesh::init].
    pub fn set_crease_angle(&mut self, degrees: Real) {
        self.crease_angle = CreaseAngle::from_degrees(degrees);
        self.face_normals = None;
        self.vertex_normals = None;
    }

    /// Discard bounds and normals so that the next [Mesh::init] derives them again.
    pub fn invalidate(&mut self) {
        self.bounds = None;
        self.face_normals = None;
        self.vertex_normals = None;
    }

    /// `None` if the renderer's default should be used.
    #[inline]
    pub fn render_mode(&self) -> Option<RenderMode> {
        self.render_mode
    }

    #[inline]
    pub fn set_render_mode(&mut self, mode: Option<RenderMode>) {
        self.render_mode = mode;
    }

    #[inline]
    pub fn internal_id(&self) -> u32 {
        self.internal_id
    }

    #[inline]
    pub(crate) fn set_internal_id(&mut self, id: u32) {
        self.internal_id = id;
    }

    #[inline]
    pub fn material(&self) -> Option<&Arc<dyn Material>> {
        self.material.as_ref()
    }

    /// Replace the material. Derived attributes don't depend on it, and are kept.
    #[inline]
    pub fn set_material(&mut self, material: Option<Arc<dyn Material>>) {
        self.material = material;
    }

    #[inline]
    pub fn texture(&self) -> Option<&Arc<dyn Texture>> {
        self.texture.as_ref()
    }

    #[inline]
    pub fn set_texture(&mut self, texture: Option<Arc<dyn Texture>>) {
        self.texture = texture;
    }

    #[inline]
    pub fn tex_coords(&self) -> Option<&[Real]> {
        self.tex_coords.as_deref()
    }

    #[inline]
    pub fn tex_coord_indices(&self) -> Option<&[i32]> {
        self.tex_coord_indices.as_deref()
    }

    /// Whether `self` can be texture mapped: its texture has data, it has at least one texture
    /// coordinate, and its texture coordinate index stream (if any) covers the face stream.
    pub fn has_texture(&self) -> bool {
        let (Some(texture), Some(coords)) = (&self.texture, &self.tex_coords) else {
            return false;
        };
        texture.has_data()
            && coords.len() >= 2
            && self.tex_coord_indices.as_ref().map_or(true, |ti| {
                ti.len() >= 3 && ti.len() >= self.faces.indices().len()
            })
    }

    /// Check the caller-provided buffers for consistency.
    ///
    /// The derivation pipeline assumes this holds and never calls it.
    pub fn check_valid(&self) -> Result<(), Error> {
        if self.positions.len() % 3 != 0 {
            return Err(Error::PositionLength(self.positions.len()));
        }
        let vertex_count = self.vertex_count();
        match &self.faces {
            FaceStream::Parsed(t) => t.validate(vertex_count)?,
            FaceStream::Raw(raw) => Topology::normalize(raw.clone()).validate(vertex_count)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Checker(bool);

    impl Texture for Checker {
        fn has_data(&self) -> bool {
            self.0
        }
        fn width(&self) -> u32 {
            8
        }
        fn height(&self) -> u32 {
            8
        }
    }

    #[derive(Debug)]
    struct Glass;

    impl Material for Glass {
        fn transparency(&self) -> f32 {
            0.8
        }
    }

    fn quad() -> Mesh {
        Mesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2, 3],
        )
    }

    #[test]
    fn face_count_is_cached() {
        let mut m = quad();
        assert_eq!(m.face_count(), 0);
        assert_eq!(m.calc_face_count(), 1);
        assert_eq!(m.index_buffer(), &[0, 1, 2, 3, -1]);
        assert_eq!(m.calc_face_count(), 1);
        assert_eq!(m.index_buffer().len(), 5);
    }

    #[test]
    fn crease_angle_discards_normals() {
        let mut m = quad();
        m.init();
        assert!(!m.vertex_normals().unwrap().is_creased());
        m.set_crease_angle(30.0);
        assert!(m.face_normals().is_none());
        assert!(m.vertex_normals().is_none());
        assert!(m.bounds().is_some());
        m.init();
        assert!(m.vertex_normals().unwrap().is_creased());
        assert_eq!(m.face_normals(), Some(&[0.0, 0.0, 1.0][..]));
    }

    #[test]
    fn set_indices_resets() {
        let mut m = quad();
        m.init();
        m.set_indices(vec![0, 1, 2, -1, 0, 2, 3, -1]);
        assert_eq!(m.face_count(), 0);
        assert!(m.bounds().is_none());
        m.init();
        assert_eq!(m.face_count(), 2);
        assert_eq!(m.face_normals().unwrap().len(), 6);
    }

    #[test]
    fn has_texture() {
        let m = quad();
        assert!(!m.has_texture());

        let m = quad()
            .with_tex_coords(vec![0.0; 8], None)
            .with_texture(Arc::new(Checker(true)));
        assert!(m.has_texture());

        let m = quad()
            .with_tex_coords(vec![0.0; 8], None)
            .with_texture(Arc::new(Checker(false)));
        assert!(!m.has_texture());

        // texcoord indices shorter than the face stream
        let m = quad()
            .with_tex_coords(vec![0.0; 8], Some(vec![0, 1, 2]))
            .with_texture(Arc::new(Checker(true)));
        assert!(!m.has_texture());
    }

    #[test]
    fn material_survives_init() {
        let mut m = quad().with_material(Arc::new(Glass));
        m.init();
        let material = m.material().unwrap();
        assert_eq!(material.transparency(), 0.8);
        assert!(!material.simulates_specular());
        assert!(m.face_normals().is_some());

        m.set_material(None);
        assert!(m.material().is_none());
        assert!(m.vertex_normals().is_some());
    }

    #[test]
    fn check_valid() {
        assert_eq!(quad().check_valid(), Ok(()));
        assert_eq!(
            Mesh::<f32>::new(vec![0.0; 10], vec![0, 1, 2]).check_valid(),
            Err(Error::PositionLength(10))
        );
        assert!(matches!(
            Mesh::<f32>::new(vec![0.0; 9], vec![0, 1, 3]).check_valid(),
            Err(Error::Topology(_))
        ));
    }
}
