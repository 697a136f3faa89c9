use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How results are printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "plate-reader")]
#[command(about = "Locate a license plate in an image and read its text")]
#[command(version)]
pub struct Args {
    /// Image to process
    pub image: PathBuf,

    /// OCR engine to use (e.g., "ocrs", "leptess")
    #[arg(long, env = "PLATE_OCR_ENGINE", default_value = "ocrs")]
    pub engine: String,

    /// Language for OCR (e.g., "eng", "deu", "fra")
    #[arg(long, env = "PLATE_OCR_LANGUAGE", default_value = "eng")]
    pub language: String,

    /// TTF/OTF font used to draw the recognized text
    #[arg(long, env = "PLATE_FONT")]
    pub font: Option<PathBuf>,

    /// Directory receiving the intermediate and annotated images
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output format for the result
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Bilateral filter window diameter in pixels
    #[arg(long, default_value = "17")]
    pub bilateral_diameter: u32,

    /// Bilateral filter intensity sigma
    #[arg(long, default_value = "17")]
    pub sigma_color: f32,

    /// Bilateral filter spatial sigma
    #[arg(long, default_value = "11")]
    pub sigma_space: f32,

    /// Canny low hysteresis threshold
    #[arg(long, default_value = "30")]
    pub canny_low: f32,

    /// Canny high hysteresis threshold
    #[arg(long, default_value = "200")]
    pub canny_high: f32,

    /// Number of largest contours examined for a plate outline
    #[arg(long, default_value = "10")]
    pub max_candidates: usize,

    /// Polygon approximation tolerance in pixels
    #[arg(long, default_value = "10")]
    pub approx_epsilon: f64,

    /// Vertical offset of the overlay text below the plate
    #[arg(long, default_value = "60")]
    pub text_offset: i32,
}
