/// Surface properties a renderer uses to shade a mesh.
///
/// Meshes only carry a material; lighting belongs to the renderer.
pub trait Material: std::fmt::Debug + Send + Sync {
    /// 0 is fully opaque, 1 fully transparent.
    fn transparency(&self) -> f32;

    /// Whether the renderer should fake specular highlights for this material.
    fn simulates_specular(&self) -> bool {
        false
    }
}
