use clap::Parser;
use log::info;
use objmerge::pipeline::{run_merge, run_scene};
use objmerge::settings::{CliArgs, OperationMode};

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let args = CliArgs::parse();
    log::trace!("Starting with args: {:?}", args);

    let config = args.pipeline_config();
    let report = match &args.operation_mode {
        OperationMode::Scene { placements } => run_scene(&config, placements)?,
        OperationMode::Merge { input_dir } => run_merge(&config, input_dir)?,
    };

    info!("Done: {}", report);
    Ok(())
}
