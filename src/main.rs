use anyhow::Result;
use clap::Parser;
use nld_pipeline::{Pipeline, PipelineArgs, Settings};
use tracing::info;
use tracing_log::AsTrace;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    use tracing_chrome::ChromeLayerBuilder;
    use tracing_subscriber::prelude::*;

    let start = std::time::Instant::now();

    let args = PipelineArgs::parse();

    let settings = Settings::new()?;
    // log level from the flag if present, else from settings
    let log_level_filter = args.verbose.log_level_filter();

    let _guard = if args.tracing {
        let (chrome_layer, guard) = ChromeLayerBuilder::new().build();
        tracing_subscriber::registry().with(chrome_layer).init();
        Some(guard)
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level_filter.as_trace())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");
        None
    };
    info!(
        "Initialized args, settings, and logging in {:?}",
        start.elapsed()
    );

    let pipeline = Pipeline::new(settings, args, Some(start));

    pipeline.exec()?;

    Ok(())
}
