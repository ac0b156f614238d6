pub mod discovery;
pub mod paths;
