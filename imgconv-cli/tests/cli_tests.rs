//! Integration tests for the imgconv CLI

use assert_cmd::Command;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use predicates::prelude::*;
use std::fs;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a small generated image into `dir`
fn create_test_image(dir: &TempDir, name: &str, format: ImageFormat) -> PathBuf {
    let img = RgbaImage::from_fn(6, 4, |x, y| Rgba([x as u8 * 40, y as u8 * 60, 10, 255]));
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8()),
        _ => DynamicImage::ImageRgba8(img),
    };
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();

    let path = dir.path().join(name);
    fs::write(&path, bytes).expect("Failed to write test file");
    path
}

fn imgconv() -> Command {
    Command::cargo_bin("imgconv").unwrap()
}

#[test]
fn test_help() {
    imgconv()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn test_version() {
    imgconv()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("imgconv"));
}

#[test]
fn test_convert_help() {
    imgconv()
        .args(["convert", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Convert an image"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_batch_help() {
    imgconv()
        .args(["batch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch convert"))
        .stdout(predicate::str::contains("--jobs"));
}

#[test]
fn test_convert_png_to_gif() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_image(&temp_dir, "in.png", ImageFormat::Png);
    let output = temp_dir.path().join("out.gif");

    imgconv()
        .args(["convert", input.to_str().unwrap(), "--format", "gif", "--output"])
        .arg(&output)
        .assert()
        .success();

    let bytes = fs::read(&output).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Gif);
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (6, 4));
}

#[test]
fn test_convert_invalid_format() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_image(&temp_dir, "in.png", ImageFormat::Png);

    imgconv()
        .args(["convert", input.to_str().unwrap(), "-f", "webp", "-o", "out.webp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid output format"));
}

#[test]
fn test_convert_nonexistent_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("output.png");

    imgconv()
        .args(["convert", "/nonexistent/file.png", "-f", "png", "--output"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}

#[test]
fn test_convert_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("corrupt.png");
    fs::write(&input, b"definitely not a png").unwrap();

    imgconv()
        .args(["convert", input.to_str().unwrap(), "-f", "jpg", "-o"])
        .arg(temp_dir.path().join("out.jpg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to convert"));
}

#[test]
fn test_batch_creates_archive() {
    let temp_dir = TempDir::new().unwrap();
    let a = create_test_image(&temp_dir, "a.png", ImageFormat::Png);
    let b = create_test_image(&temp_dir, "b.jpg", ImageFormat::Jpeg);
    let corrupt = temp_dir.path().join("c.gif");
    fs::write(&corrupt, b"GIF89a nope").unwrap();
    let archive_path = temp_dir.path().join("out.tar");

    imgconv()
        .arg("batch")
        .args([&a, &b, &corrupt])
        .args(["--format", "png", "--output"])
        .arg(&archive_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted: 2"))
        .stdout(predicate::str::contains("Skipped:   1"));

    let data = fs::read(&archive_path).unwrap();
    let mut archive = tar::Archive::new(data.as_slice());
    let names: Vec<String> = archive
        .entries()
        .unwrap()
        .map(|e| {
            let mut e = e.unwrap();
            let mut body = Vec::new();
            e.read_to_end(&mut body).unwrap();
            assert_eq!(image::guess_format(&body).unwrap(), ImageFormat::Png);
            e.path().unwrap().display().to_string()
        })
        .collect();
    assert_eq!(names, vec!["a.png", "b.png"]);
}

#[test]
fn test_batch_single_input_writes_image() {
    let temp_dir = TempDir::new().unwrap();
    let a = create_test_image(&temp_dir, "only.gif", ImageFormat::Gif);
    let output = temp_dir.path().join("only.jpeg");

    imgconv()
        .arg("batch")
        .arg(&a)
        .args(["-f", "jpeg", "-o"])
        .arg(&output)
        .assert()
        .success();

    let bytes = fs::read(&output).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
}

#[test]
fn test_batch_default_output_name() {
    let temp_dir = TempDir::new().unwrap();
    let a = create_test_image(&temp_dir, "a.png", ImageFormat::Png);
    let b = create_test_image(&temp_dir, "b.png", ImageFormat::Png);

    imgconv()
        .current_dir(temp_dir.path())
        .arg("batch")
        .args([&a, &b])
        .args(["-f", "gif"])
        .assert()
        .success();

    assert!(temp_dir.path().join("images.tar").exists());
}

#[test]
fn test_batch_all_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.png");
    let b = temp_dir.path().join("b.png");
    fs::write(&a, b"junk").unwrap();
    fs::write(&b, b"junk").unwrap();

    imgconv()
        .arg("batch")
        .args([&a, &b])
        .args(["-f", "png", "-o"])
        .arg(temp_dir.path().join("out.tar"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no suitable images uploaded"));
}

#[test]
fn test_batch_zero_jobs_rejected() {
    imgconv()
        .args(["batch", "a.png", "-f", "png", "--jobs", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("jobs must be at least 1"));
}

#[test]
fn test_info_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_image(&temp_dir, "pic.gif", ImageFormat::Gif);

    let output = imgconv()
        .args(["info", input.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["format"], "gif");
    assert_eq!(info["mime_type"], "image/gif");
    assert_eq!(info["width"], 6);
    assert_eq!(info["height"], 4);
}

#[test]
fn test_info_nonexistent_file() {
    imgconv()
        .args(["info", "/nonexistent/file.png"])
        .assert()
        .failure();
}
