use super::ensure_working_dir;
use crate::cli::PrepareArgs;
use crate::config::{CommandOverrides, build_config};
use crate::error::Result;
use orcanizer::workflows::job::JobRunner;
use tracing::info;

pub fn run(args: PrepareArgs) -> Result<()> {
    let overrides = CommandOverrides {
        xyz_dir: args.xyz_dir.as_deref(),
        ..Default::default()
    };
    let config = build_config(&args.config, &overrides)?;
    ensure_working_dir(&config.batch.working_dir)?;

    let jobs = JobRunner::new(&config.batch, config.geometry.source(), config.runner());
    info!("Preparing input for '{}' in slot {}", args.identifier, args.slot);
    jobs.prepare(&args.identifier, args.slot)?;

    println!(
        "✓ Input for '{}' written to: {}",
        args.identifier,
        jobs.files(args.slot).input().display()
    );
    Ok(())
}
