use clap::Parser;
use plate_reader::artifacts::ArtifactWriter;
use plate_reader::cli::{Args, OutputFormat};
use plate_reader::error::ErrorReport;
use plate_reader::report::{render_text, PlateReport};
use plate_reader::{annotate, engines, Annotator, Config, PlateError, PlateRecognizer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing; stdout is reserved for results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from(args);

    tracing::info!("Starting plate-reader v{}", env!("CARGO_PKG_VERSION"));

    match run(&config) {
        Ok(()) => Ok(()),
        Err(err) => {
            if config.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&ErrorReport::from(&err))?);
            }
            Err(err.into())
        }
    }
}

fn run(config: &Config) -> Result<(), PlateError> {
    let recognizer = PlateRecognizer::new(&config.params)?;
    let artifacts = ArtifactWriter::new(config.output_dir.clone())?;

    let image = PlateRecognizer::load_image(&config.image)?;
    let candidate = recognizer.locate_plate(&image)?;

    // Construction may download models; only reached once a plate is found
    let engine = engines::create(&config.ocr)?;
    let annotator = Annotator::new(
        annotate::load_font(config.font.as_deref())?,
        config.params.text_offset,
    );

    let recognition = recognizer.read_plate(candidate, engine.as_ref(), &annotator)?;

    for path in artifacts.write_recognition(&recognition)? {
        tracing::info!("Saved {}", path.display());
    }

    match config.format {
        OutputFormat::Text => print!("{}", render_text(&recognition)),
        OutputFormat::Json => {
            let report = PlateReport::new(&config.image.display().to_string(), &recognition);
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| PlateError::ProcessingError(format!("Failed to encode report: {}", e)))?;
            println!("{}", json);
        }
    }

    Ok(())
}
