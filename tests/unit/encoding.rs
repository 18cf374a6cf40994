//! Encoded media round trip and file resolution

use fakecheck::errors::AnalysisError;
use fakecheck::media::{encode, FileUpload, MediaSource};
use fakecheck::types::EncodedMedia;

use crate::common::PNG_BYTES;

#[test]
fn test_data_uri_round_trip_recovers_bytes_and_mime() {
    let payloads: Vec<(&str, Vec<u8>)> = vec![
        ("image/png", PNG_BYTES.to_vec()),
        ("video/webm", (0..=255u8).collect()),
        ("audio/ogg", vec![0u8; 3]),
        ("image/gif", vec![0xFF]),
    ];

    for (mime, bytes) in payloads {
        let media = EncodedMedia::new(mime, bytes.clone()).unwrap();
        let uri = media.to_data_uri();
        assert!(uri.starts_with(&format!("data:{};base64,", mime)));

        let decoded = EncodedMedia::from_data_uri(&uri).unwrap();
        assert_eq!(decoded.mime_type(), mime);
        assert_eq!(decoded.payload(), bytes.as_slice());
    }
}

#[test]
fn test_non_media_mime_is_rejected() {
    let err = EncodedMedia::new("application/pdf", vec![1]).unwrap_err();
    assert!(matches!(err, AnalysisError::UnsupportedMediaType(_)));
}

#[test]
fn test_file_sniffed_when_name_is_unhelpful() {
    let media = encode(MediaSource::File(FileUpload {
        name: Some("upload.bin".to_string()),
        declared_mime: Some("application/octet-stream".to_string()),
        bytes: PNG_BYTES.to_vec(),
    }))
    .unwrap();
    assert_eq!(media.mime_type(), "image/png");
}

#[test]
fn test_empty_file_is_invalid_input() {
    let err = encode(MediaSource::File(FileUpload {
        name: Some("a.png".to_string()),
        declared_mime: None,
        bytes: Vec::new(),
    }))
    .unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidInput(_)));
}
