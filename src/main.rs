//! Titanic manifest cleaning - entry point
//!
//! Fixed single-run interface: read the train and test manifests, run the
//! cleaning pipeline, write both cleaned tables, print one confirmation line.

use titanic_prep::config::PipelineConfig;
use titanic_prep::job;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "titanic_prep=info".into()),
        )
        .init();

    let summary = job::run(&PipelineConfig::default())?;

    println!(
        "Saved cleaned files: {}, {}",
        summary.train_output.display(),
        summary.test_output.display()
    );
    Ok(())
}
