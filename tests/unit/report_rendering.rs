//! Display markup and export document

use fakecheck::config::ExportConfig;
use fakecheck::report::{to_display_markup, to_export_document, DrawOp, ExportOptions, TextStyle};
use fakecheck::types::{AnalysisResult, EncodedMedia, Verdict};

#[test]
fn test_display_markup_heading_and_bullets() {
    assert_eq!(
        to_display_markup("### Title\n* a\n* b"),
        "<h3>Title</h3>\n<li>a</li>\n<li>b</li>"
    );
}

#[test]
fn test_display_markup_leaves_plain_text() {
    let report = "Plain line\n## Level two\n- dash bullet\n*not a bullet*";
    assert_eq!(to_display_markup(report), report);
}

#[test]
fn test_export_embeds_image_snapshot_above_report() {
    let result = AnalysisResult {
        verdict: Verdict::Safe,
        confidence_score: 0.12,
        report: "### Summary\n* No manipulation found".to_string(),
        evidence_frames: vec![],
        document_anomalies: vec![],
        audio_anomalies: vec![],
        report_artifact_ref: None,
    };
    let media = EncodedMedia::new("image/jpeg", vec![0xFF, 0xD8, 0xFF]).unwrap();
    let options = ExportOptions::from_config(&ExportConfig::default()).unwrap();

    let doc = to_export_document(&result, &media, "photo.jpg", &options);
    assert!(doc.file_name.starts_with("fakecheck-report-"));
    assert!(doc.file_name.ends_with(".pdf"));

    let ops = &doc.pages[0].ops;
    let image_at = ops
        .iter()
        .position(|op| matches!(op, DrawOp::Image { frame: None, .. }))
        .unwrap();
    let heading_at = ops
        .iter()
        .position(|op| {
            matches!(op, DrawOp::Text { style: TextStyle::Heading, text, .. } if text == "Summary")
        })
        .unwrap();
    assert!(image_at < heading_at);
    assert!(doc.text_lines().contains(&"\u{2022} No manipulation found"));
}
