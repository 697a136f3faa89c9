use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

#[derive(Debug, Deserialize)]
struct ErrorReport {
    error: String,
    code: String,
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plate-reader"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("PLATE_OCR_ENGINE")
        .env_remove("PLATE_OCR_LANGUAGE")
        .output()
        .expect("Failed to run plate-reader")
}

fn write_blank(dir: &Path) -> PathBuf {
    let path = dir.join("blank.png");
    GrayImage::from_pixel(120, 80, Luma([128]))
        .save(&path)
        .unwrap();
    path
}

fn write_plate(dir: &Path) -> PathBuf {
    let path = dir.join("car.png");
    let mut img = RgbImage::from_pixel(240, 160, Rgb([35, 40, 45]));
    draw_filled_rect_mut(&mut img, Rect::at(60, 50).of_size(120, 40), Rgb([235, 235, 225]));
    img.save(&path).unwrap();
    path
}

fn json_error(output: &Output) -> ErrorReport {
    serde_json::from_slice(&output.stdout).expect("Failed to parse error report")
}

#[test]
fn test_help_lists_tuning_flags() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success());

    let help = String::from_utf8_lossy(&output.stdout);
    assert!(help.contains("--canny-low"));
    assert!(help.contains("--approx-epsilon"));
    assert!(help.contains("--output-dir"));
}

#[test]
fn test_missing_image_fails_fast() {
    let output = run_cli(&["/nonexistent/car.jpg"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot load image"), "stderr: {}", stderr);
}

#[test]
fn test_missing_image_json_error() {
    let output = run_cli(&["/nonexistent/car.jpg", "--format", "json"]);

    assert!(!output.status.success());
    let report = json_error(&output);
    assert_eq!(report.code, "IMAGE_LOAD_ERROR");
    assert!(report.error.contains("/nonexistent/car.jpg"));
}

#[test]
fn test_unlocalizable_image_reports_named_failure() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_blank(dir.path());

    let output = run_cli(&[image.to_str().unwrap(), "--format", "json"]);

    assert!(!output.status.success());
    assert_eq!(json_error(&output).code, "PLATE_NOT_LOCALIZED");
}

#[test]
fn test_invalid_parameter_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_plate(dir.path());

    let output = run_cli(&[
        image.to_str().unwrap(),
        "--approx-epsilon",
        "0",
        "--format",
        "json",
    ]);

    assert!(!output.status.success());
    assert_eq!(json_error(&output).code, "INVALID_PARAMETER");
}

#[test]
fn test_unknown_engine_rejected_after_localization() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_plate(dir.path());
    let out_dir = dir.path().join("out");

    let output = run_cli(&[
        image.to_str().unwrap(),
        "--engine",
        "bogus",
        "--format",
        "json",
        "--output-dir",
        out_dir.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let report = json_error(&output);
    assert_eq!(report.code, "UNKNOWN_ENGINE");
    assert!(report.error.contains("bogus"));
    // Output directory is created up front, stage images only after OCR
    assert!(out_dir.exists());
    assert!(!out_dir.join("annotated.png").exists());
}

#[test]
fn test_nan_epsilon_rejected_before_localization() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_plate(dir.path());

    let output = run_cli(&[
        image.to_str().unwrap(),
        "--approx-epsilon",
        "NaN",
        "--format",
        "json",
    ]);

    assert!(!output.status.success());
    assert_eq!(json_error(&output).code, "INVALID_PARAMETER");
}
