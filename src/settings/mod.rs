use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::pipeline::PipelineConfig;

#[derive(Parser, Debug)]
#[command(name = "objmerge")]
#[command(version = concat!(env!("VERGEN_GIT_BRANCH"), "/", env!("VERGEN_GIT_SHA")))]
#[command(about = "Bakes scene-instanced OBJ meshes and merges them into one mesh per material")]
pub struct CliArgs {
    #[arg(long, env = "OBJMERGE_WORK_DIR", default_value_t = default_work_dir())]
    pub work_dir: String,

    /// Where baked instances go. Defaults to `<work-dir>/baked`.
    #[arg(long, env = "OBJMERGE_INTERMEDIATE_DIR")]
    pub intermediate_dir: Option<PathBuf>,

    /// Where merged meshes go. Defaults to `<work-dir>/merged`.
    #[arg(long, env = "OBJMERGE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Remove previously baked instances before baking.
    #[arg(long)]
    pub clean: bool,

    #[command(subcommand)]
    pub operation_mode: OperationMode,
}

pub fn default_work_dir() -> String {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("_work")
        .to_string_lossy()
        .to_string()
}

#[derive(Subcommand, Debug)]
pub enum OperationMode {
    /// Bake every instance of the given outer placement files, then merge.
    Scene {
        #[arg(required = true)]
        placements: Vec<PathBuf>,
    },
    /// Merge the meshes of a directory as they are.
    Merge { input_dir: PathBuf },
}

impl CliArgs {
    pub fn pipeline_config(&self) -> PipelineConfig {
        let defaults = PipelineConfig::in_work_dir(&PathBuf::from(&self.work_dir));
        PipelineConfig {
            intermediate_dir: self
                .intermediate_dir
                .clone()
                .unwrap_or(defaults.intermediate_dir),
            output_dir: self.output_dir.clone().unwrap_or(defaults.output_dir),
            clean_intermediate: self.clean,
        }
    }
}
