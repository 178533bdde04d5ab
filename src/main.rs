use clap::Parser;

use heic_converter_rs::cli::Cli;
use heic_converter_rs::image_pipeline::{BatchOrchestrator, HeicConversionPipeline, TargetFormat};
use heic_converter_rs::logger;
use heic_converter_rs::session::{
    ArgsSelector, FileOpener, FileSelector, InteractiveSession, PromptSelector, SystemOpener,
    TerminalReporter,
};

use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(&cli.log_level);

    info!("Starting heic_converter_rs...");

    let config = cli.conversion_config();
    info!("JPEG quality: {}", config.jpeg_quality);
    info!("TIFF compression: {:?}", config.tiff_compression);
    info!(
        "Atomic writes: {}",
        if config.atomic_write { "enabled" } else { "disabled" }
    );

    let orchestrator = BatchOrchestrator::new(HeicConversionPipeline::new(config));
    let opener = SystemOpener::from_override(cli.open_with.as_deref());
    info!("File opener: {}", opener.describe());

    if cli.is_interactive() {
        // The menu only offers the closed set, so an unknown -f falls back to jpg.
        let format = cli.format.parse::<TargetFormat>().unwrap_or_else(|e| {
            warn!("{}, using {}", e, TargetFormat::default());
            TargetFormat::default()
        });
        return if cli.paths.is_empty() {
            InteractiveSession::new(orchestrator, PromptSelector, opener, format).run()
        } else {
            let mut session =
                InteractiveSession::new(orchestrator, ArgsSelector::new(cli.paths.clone()), opener, format);
            session.pick_files(&mut std::io::stdout())?;
            session.run()
        };
    }

    let selected = ArgsSelector::new(cli.paths.clone()).select()?;
    let paths: Vec<_> = selected.into_iter().map(|f| f.path).collect();

    let mut reporter = TerminalReporter::new(paths.len(), std::io::stdout());
    let state = reporter.run(&orchestrator, &paths, &cli.format);

    if cli.open {
        for output in state.outputs() {
            if let Err(e) = opener.open(output) {
                warn!("Could not open {}: {}", output.display(), e);
            }
        }
    }

    if let Some(failure) = state.failure() {
        anyhow::bail!("conversion stopped at {}", failure.input_path().display());
    }

    Ok(())
}
