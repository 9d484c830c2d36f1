//! Rendering module
//!
//! Backend-agnostic: builds triangle-list vertices and HUD text from a
//! read-only view of the session. A GPU or terminal backend only has to
//! upload `Frame::vertices` and print `Frame::hud`.

pub mod scene;
pub mod shapes;
pub mod starfield;
pub mod vertex;

pub use scene::{Banner, Frame, Hud, RenderOptions, build_frame};
pub use starfield::Starfield;
pub use vertex::Vertex;
