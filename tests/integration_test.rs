use std::fs;
use std::path::Path;
use std::process::Command;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_calendar-pdf"))
}

fn output_dir() -> &'static Path {
    Path::new("tests/output")
}

fn setup() {
    fs::create_dir_all(output_dir()).expect("Failed to create output directory");
}

fn cleanup_file(name: &str) {
    let path = output_dir().join(name);
    if path.exists() {
        fs::remove_file(&path).ok();
    }
}

fn page_count(path: &Path) -> usize {
    let doc = lopdf::Document::load(path).expect("Failed to parse generated PDF");
    doc.get_pages().len()
}

#[test]
fn test_basic_year() {
    setup();
    let output_file = "test-calendar-2025.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args(["2025", "-o", &format!("tests/output/{}", output_file)])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small, likely empty or corrupt");
    assert_eq!(page_count(&path), 12);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated"), "Unexpected output: {}", stdout);
}

#[test]
fn test_leap_year_has_twelve_pages() {
    setup();
    let output_file = "test-calendar-2024.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args(["2024", "-o", &format!("tests/output/{}", output_file)])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(page_count(&output_dir().join(output_file)), 12);
}

#[test]
fn test_letter_page_size() {
    setup();
    let output_file = "test-calendar-letter.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "2026",
            "--page-size", "letter",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(page_count(&output_dir().join(output_file)), 12);
}

#[test]
fn test_missing_fonts_fall_back() {
    setup();
    let output_file = "test-calendar-no-fonts.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "2025",
            "--font-dir", "tests/no-such-font-dir",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(page_count(&output_dir().join(output_file)), 12);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Font(s) not found"),
        "Expected a fallback warning on stdout, got: {}",
        stdout
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("Font(s) not found"), "Warning leaked to stderr: {}", stderr);
}

#[test]
fn test_fonts_from_directory_are_embedded() {
    setup();
    let output_file = "test-calendar-fonts.pdf";
    cleanup_file(output_file);

    let font_dir = output_dir().join("fonts");
    fs::create_dir_all(&font_dir).expect("Failed to create font directory");
    for name in [
        "Poppins-Bold.ttf",
        "Poppins-Regular.ttf",
        "Lato-Thin.ttf",
        "Lato-Regular.ttf",
        "Arial.ttf",
    ] {
        fs::copy("tests/fixtures/Roboto-Medium.ttf", font_dir.join(name))
            .expect("Failed to copy font fixture");
    }

    let output = cargo_bin()
        .args([
            "2025",
            "--font-dir", "tests/output/fonts",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(page_count(&output_dir().join(output_file)), 12);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Fonts: 5/5"), "Unexpected output: {}", stdout);
    assert!(!stdout.contains("Font(s) not found"), "Unexpected warning: {}", stdout);
}

#[test]
fn test_invalid_font_manifest() {
    let output = cargo_bin()
        .args([
            "2025",
            "--fonts", "nonexistent.json",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for missing manifest");
}

#[test]
fn test_invalid_page_size() {
    let output = cargo_bin()
        .args([
            "2025",
            "--page-size", "tabloid",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for unknown page size");
}

#[test]
fn test_out_of_range_year() {
    let output = cargo_bin()
        .args(["300000", "-o", "tests/output/should-not-exist.pdf"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for year 300000");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"), "Unexpected stderr: {}", stderr);
}
