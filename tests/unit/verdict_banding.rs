//! Confidence banding edges

use fakecheck::types::{band, Verdict};

#[test]
fn test_band_edges() {
    let cases = [
        (0.0, Verdict::Safe),
        (0.4, Verdict::Safe),
        (0.41, Verdict::Suspicious),
        (0.75, Verdict::Suspicious),
        (0.76, Verdict::LikelyManipulated),
        (1.0, Verdict::LikelyManipulated),
    ];
    for (score, expected) in cases {
        assert_eq!(band(score), expected, "band({})", score);
    }
}

#[test]
fn test_verdict_labels_parse_back() {
    for verdict in [Verdict::Safe, Verdict::Suspicious, Verdict::LikelyManipulated] {
        assert_eq!(verdict.label().parse::<Verdict>().unwrap(), verdict);
    }
    assert_eq!("likely_manipulated".parse::<Verdict>().unwrap(), Verdict::LikelyManipulated);
    assert!("fake".parse::<Verdict>().is_err());
}
