use crate::cli::ExtractArgs;
use crate::config::{CommandOverrides, build_config};
use crate::error::Result;
use orcanizer::core::models::record::{Property, PropertyRecord};
use orcanizer::workflows::job::JobRunner;
use tracing::info;

pub fn run(args: ExtractArgs) -> Result<()> {
    let config = build_config(&args.config, &CommandOverrides::default())?;
    let identifier = args
        .identifier
        .clone()
        .unwrap_or_else(|| args.slot.to_string());

    let jobs = JobRunner::new(&config.batch, config.geometry.source(), config.runner());
    info!(
        "Extracting properties from {:?}",
        jobs.files(args.slot).output()
    );
    let record = jobs.extract(&identifier, args.slot)?;

    print!("{}", format_record(&record));
    Ok(())
}

fn format_record(record: &PropertyRecord) -> String {
    let mut out = format!("{}\n", record.identifier);
    for property in Property::ALL {
        out.push_str(&format!(
            "  {:<24} {:>18.8}  ({})\n",
            property.to_string(),
            record.get(property),
            property.column()
        ));
    }
    out
}
