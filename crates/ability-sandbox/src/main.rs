//! Sandbox entry point: plays a scripted timeline against loaded content.
mod config;
mod script;

use ability_content::{ContentFactory, ContentLibrary};
use anyhow::Result;
use config::SandboxConfig;
use script::{Sandbox, Timeline};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SandboxConfig::from_env();
    let library = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir).load_library()?,
        None => ContentLibrary::embedded()?,
    };

    let mut sandbox = Sandbox::new(library, Timeline::demo()?)?;
    let report = sandbox.run(config.step, config.duration);

    tracing::info!(
        ticks = report.ticks,
        steps = report.steps,
        events = report.events,
        "Sandbox finished"
    );
    for (tag, attribute) in sandbox.director().attributes() {
        tracing::info!(
            attribute = %tag,
            base = attribute.base_value(),
            current = attribute.current_value(),
            "final attribute"
        );
    }
    Ok(())
}
