pub mod grouping;
pub mod material_resolver;
pub mod mesh_merger;
