//! Magic-byte sniffing for uploaded files
//!
//! Last-resort MIME detection when neither a declared type nor a file extension
//! resolves. Detection is conservative: containers and tags must be present, so
//! MPEG sync words or stray `ftyp` boxes in arbitrary data are not accepted.

/// Detect a media MIME type from the leading bytes of a payload
pub fn sniff_media_mime(data: &[u8]) -> Option<&'static str> {
    sniff_image(data)
        .or_else(|| sniff_video(data))
        .or_else(|| sniff_audio(data))
}

fn sniff_image(data: &[u8]) -> Option<&'static str> {
    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }

    // JPEG: FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }

    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }

    // WebP: RIFF....WEBP
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    None
}

fn sniff_video(data: &[u8]) -> Option<&'static str> {
    if data.len() < 12 {
        return None;
    }

    // MP4: ftyp box with a video brand (M4A audio brands excluded)
    if &data[4..8] == b"ftyp" {
        let brand = &data[8..12];
        if matches!(brand, b"isom" | b"mp42" | b"mp41" | b"avc1" | b"iso2") {
            return Some("video/mp4");
        }
    }

    // WebM/MKV: EBML header, doctype within the first 100 bytes
    if data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        let head = &data[..data.len().min(100)];
        if head.windows(4).any(|w| w == b"webm") {
            return Some("video/webm");
        }
        if head.windows(8).any(|w| w == b"matroska") {
            return Some("video/x-matroska");
        }
    }

    None
}

fn sniff_audio(data: &[u8]) -> Option<&'static str> {
    if data.len() < 12 {
        return None;
    }

    // MP3 only with an ID3 tag
    if data.starts_with(b"ID3") {
        return Some("audio/mpeg");
    }

    if data.starts_with(b"RIFF") && &data[8..12] == b"WAVE" {
        return Some("audio/wav");
    }

    if data.starts_with(b"OggS") {
        return Some("audio/ogg");
    }

    None
}
