// src/gfx/scene/mod.rs
//! Scene management: objects, materials, paintings, and construction

pub mod builder;
pub mod object;
pub mod scene;
pub mod statue;
pub mod vertex;

pub use builder::{build_room, RoomTextures, PAINTING_COUNT};
pub use object::{DrawObject, Mesh, Object};
pub use scene::Scene;
pub use statue::{place_on_surface, Placement};
pub use vertex::Vertex3D;
