//! Derivation of the geometric attributes a renderer needs from an indexed polygon soup:
//! face count, bounds, face normals, and vertex normals, optionally split along sharp edges
//! by a crease angle.
//!
//! Data flows strictly forward, one pass per step:
//! [face stream](topology) → [face normals](normals::face_normals) →
//! [vertex normals](normals::VertexNormals) → [bounds](Aabb). [Mesh::init] runs the whole
//! pipeline; [Scene::init] runs it for every mesh in a scene and then aggregates their bounds.
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

mod bounds;
pub mod error;
mod material;
mod mesh;
pub mod normals;
mod render_mode;
mod scene;
mod texture;
pub mod topology;
mod traits;
pub mod vector;

pub use bounds::*;
pub use error::Error;
pub use material::*;
pub use mesh::*;
pub use normals::{CreaseAngle, VertexNormals};
pub use render_mode::*;
pub use scene::*;
pub use texture::*;
pub use topology::{Topology, SENTINEL};
pub use traits::*;
