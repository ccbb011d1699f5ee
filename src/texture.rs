/// An image which a renderer may map onto a mesh.
///
/// Meshes only need to know whether one is usable; decoding and sampling belong to the renderer.
pub trait Texture: std::fmt::Debug + Send + Sync {
    /// Whether pixel data has been loaded.
    fn has_data(&self) -> bool;
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}
