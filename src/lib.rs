pub mod error;
pub mod io;
pub mod merging;
pub mod pipeline;
pub mod scene;
pub mod settings;
