//! Rendering module
//!
//! `scene` builds draw batches from the ride state without touching the GPU;
//! `pipeline` owns the wgpu device and turns a scene into a frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod texture;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Batch, Scene, build_scene};
pub use texture::{TextureId, TextureSet, load_rgba};
pub use vertex::{TexVertex, Vertex};
