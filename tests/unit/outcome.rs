//! Failure and result are mutually exclusive

use fakecheck::errors::AnalysisError;
use fakecheck::types::AnalysisFailure;

const RESULT_FIELDS: &[&str] = &[
    "verdict",
    "confidenceScore",
    "report",
    "evidenceFrames",
    "documentAnomalies",
    "audioAnomalies",
    "reportArtifactRef",
];

#[test]
fn test_failures_carry_no_result_fields() {
    let errors = vec![
        AnalysisError::InvalidInput("Invalid URL format.".into()),
        AnalysisError::UnsupportedMediaType("text/html".into()),
        AnalysisError::PayloadTooLarge {
            limit: 10,
            actual: 20,
        },
        AnalysisError::UpstreamUnreachable("timed out".into()),
        AnalysisError::UpstreamMalformed("no JSON".into()),
        AnalysisError::AnalysisInternal("boom".into()),
    ];

    for err in errors {
        let failure = AnalysisFailure::from(err);
        let value = serde_json::to_value(&failure).unwrap();
        for field in RESULT_FIELDS {
            assert!(value.get(*field).is_none(), "{} present on failure", field);
        }
        assert!(!failure.message.is_empty());
    }
}
