mod common;

use common::fixtures::*;
use common::{GeneratedPdf, TestResult};
use issp_report::{RecordingSurface, RenderConfig, ReportError, ReportGenerator, render_document};
use std::io::{self, Write};

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_generate_to_file() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("issp.pdf");
    let mut file = std::fs::File::create(&path)?;
    let summary = ReportGenerator::default().generate_to(&issp_document(&issp_record()), &mut file)?;
    file.flush()?;

    let pdf = GeneratedPdf::from_bytes(std::fs::read(&path)?)?;
    assert_eq!(pdf.page_count(), summary.pages);
    assert!(pdf.bytes.starts_with(b"%PDF-"));
    Ok(())
}

#[test]
fn test_config_from_json() -> TestResult {
    let generator = ReportGenerator::from_config_json(r#"{"pageSize":"Letter","footer":{"pageNumbers":false}}"#)?;
    assert!((generator.config().page_dimensions().width - 612.0).abs() < 0.01);
    assert!(!generator.config().footer.page_numbers);
    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = ReportGenerator::from_config_json(r#"{"fonts":{"body":0}}"#);
    assert!(matches!(result, Err(ReportError::Layout(_))));

    let result = ReportGenerator::from_config_json(r#"{"table":{"numberedRatios":[0.2,0.2,0.2]}}"#);
    assert!(matches!(result, Err(ReportError::Layout(_))));

    let result = ReportGenerator::from_config_json(r#"{"table":{"labelRatio":1.4}}"#);
    assert!(matches!(result, Err(ReportError::Layout(_))));

    let result = ReportGenerator::from_config_json("{not json");
    assert!(matches!(result, Err(ReportError::Json(_))));
}

#[test]
fn test_write_failure_is_reported() {
    let _ = env_logger::builder().is_test(true).try_init();

    let result = ReportGenerator::default().generate_to(&issp_document(&issp_record()), &mut BrokenPipe);
    assert!(result.is_err());
}

#[test]
fn test_drawing_failure_aborts_render() {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = RenderConfig::default();
    let mut surface = RecordingSurface::new(config.page_dimensions(), config.margins).failing_after(25);
    let result = render_document(&mut surface, &config, &issp_document(&issp_record()));

    assert!(result.is_err());
    assert!(surface.ops().len() <= 25);
}

#[test]
fn test_same_document_renders_identically() -> TestResult {
    let config = RenderConfig::default();
    let document = issp_document(&issp_record());

    let mut first = RecordingSurface::new(config.page_dimensions(), config.margins);
    let mut second = RecordingSurface::new(config.page_dimensions(), config.margins);
    render_document(&mut first, &config, &document)?;
    render_document(&mut second, &config, &document)?;

    assert_eq!(first.ops(), second.ops());
    Ok(())
}
