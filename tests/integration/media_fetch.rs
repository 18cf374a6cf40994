//! Byte ceiling on streamed bodies without Content-Length

use crate::common::{fetch_config, spawn_media_host, STREAM_CHUNKS, STREAM_CHUNK_LEN};
use anyhow::Result;
use fakecheck::errors::AnalysisError;
use fakecheck::media::MediaFetcher;

#[tokio::test]
async fn test_streamed_body_aborts_once_ceiling_is_crossed() -> Result<()> {
    let host = spawn_media_host().await;
    let fetcher = MediaFetcher::new(&fetch_config(4096))?;
    assert_eq!(fetcher.max_bytes(), 4096);

    let err = fetcher
        .fetch(&host.url("/media/stream.png"))
        .await
        .unwrap_err();

    match err {
        AnalysisError::PayloadTooLarge { limit, actual } => {
            assert_eq!(limit, 4096);
            assert!(actual > 4096);
            assert!(actual <= (STREAM_CHUNKS * STREAM_CHUNK_LEN) as u64);
        }
        other => panic!("unexpected error {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_streamed_body_within_ceiling_is_collected() -> Result<()> {
    let host = spawn_media_host().await;
    let fetcher = MediaFetcher::new(&fetch_config(1024 * 1024))?;

    let media = fetcher.fetch_encoded(&host.url("/media/stream.png")).await?;

    assert_eq!(media.mime_type(), "image/png");
    assert_eq!(media.len(), STREAM_CHUNKS * STREAM_CHUNK_LEN);
    Ok(())
}
