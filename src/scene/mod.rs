pub mod scene_loader;
pub mod transform;
