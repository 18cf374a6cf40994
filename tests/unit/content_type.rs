//! Extension table and header precedence

use fakecheck::errors::AnalysisError;
use fakecheck::media::content_type::EXTENSION_MIME_TABLE;
use fakecheck::media::resolve_content_type;

const TABLE: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
];

#[test]
fn test_table_matches_known_extensions() {
    for (ext, mime) in TABLE {
        assert!(
            EXTENSION_MIME_TABLE.contains(&(*ext, *mime)),
            "missing {} -> {}",
            ext,
            mime
        );
    }
}

#[test]
fn test_unusable_headers_fall_back_to_extension() {
    for (ext, mime) in TABLE {
        for header in [None, Some("text/html"), Some("application/octet-stream")] {
            let url = format!("https://cdn.example.com/media/file.{}?sig=abc#t=3", ext.to_uppercase());
            assert_eq!(
                resolve_content_type(&url, header).unwrap(),
                *mime,
                "url {} header {:?}",
                url,
                header
            );
        }
    }
}

#[test]
fn test_media_header_wins() {
    let mime = resolve_content_type("https://a.example/clip.png", Some("video/mp4")).unwrap();
    assert_eq!(mime, "video/mp4");
}

#[test]
fn test_unknown_extension_without_header() {
    let err = resolve_content_type("https://a.example/file.xyz", Some("text/html")).unwrap_err();
    assert!(matches!(err, AnalysisError::UnsupportedMediaType(ref t) if t == "text/html"));

    let err = resolve_content_type("https://a.example/file", None).unwrap_err();
    assert!(matches!(err, AnalysisError::UnsupportedMediaType(_)));
}

#[test]
fn test_any_non_media_header_falls_back_to_extension() {
    for header in ["application/json", "text/plain; charset=utf-8", "binary/octet-stream"] {
        assert_eq!(
            resolve_content_type("https://a.example/photo.webp", Some(header)).unwrap(),
            "image/webp",
            "header {}",
            header
        );
    }

    let err = resolve_content_type("https://a.example/report", Some("application/json")).unwrap_err();
    assert!(matches!(err, AnalysisError::UnsupportedMediaType(ref t) if t == "application/json"));
}
