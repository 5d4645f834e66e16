pub mod camera;
pub mod gallery;
pub mod panel;
pub mod pipeline;
pub mod scene;
pub mod texture;
