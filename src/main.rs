use anyhow::{Context, Result};
use entitymap::backends::extract_project;
use entitymap::cli::{parse_args, Cli};
use entitymap::config::{load_config, load_config_file};
use entitymap::io::create_writer;
use entitymap::observability::{init_logging, install_panic_hook, set_phase, ExtractionPhase};
use tracing::info;

fn main() {
    let cli = parse_args();
    install_panic_hook();
    init_logging(cli.verbosity);

    if let Err(e) = run(cli) {
        // Single line on stderr; nothing has been written to the output yet
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => load_config(&cli.path),
    };
    let config = cli.apply_overrides(config);

    let report = extract_project(&cli.path, &config, cli.backend)?;
    info!(
        "Scanned {} files with {} warnings",
        report.files_scanned,
        report.warnings.len()
    );

    let _phase = set_phase(ExtractionPhase::OutputGeneration);
    let mut writer = create_writer(cli.output.as_deref())?;
    writer.write_metadata(&report.metadata)
}
