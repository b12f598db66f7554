//! Scene output for the host renderer
//!
//! The crate does not draw. It describes each frame as positioned shapes and
//! labels that the host graphics framework turns into pixels.

pub mod shapes;

pub use shapes::{SceneFrame, Shape, build_frame};
