use super::{apply_analysis_overrides, load_config, write_output_to_file};
use crate::analysis::AnalysisGateway;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::media::{encode, read_upload, MediaFetcher, MediaSource};
use crate::report::{to_export_document, ExportOptions, OutputFormat, ReportFormatter};
use crate::types::{AnalysisRequest, EncodedMedia};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output flags shared by both analyze commands
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format: console, json
    #[arg(long, default_value = "console")]
    format: String,

    /// Render the report body as display markup (<h3>/<li>)
    #[arg(long)]
    markup: bool,

    /// Write the paginated export document (JSON draw operations) to this path
    #[arg(long)]
    export: Option<PathBuf>,

    /// Analysis provider: gemini, openai, mock (overrides config)
    #[arg(long)]
    provider: Option<String>,

    /// Model name (overrides config)
    #[arg(long)]
    model: Option<String>,
}

/// Analyse a local image, video or audio file
#[derive(Args)]
pub struct AnalyzeFileCommand {
    /// Path to the media file
    path: PathBuf,

    /// MIME type to use instead of detecting it
    #[arg(long)]
    mime_type: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

impl AnalyzeFileCommand {
    pub async fn run(&self, config_path: Option<&Path>) -> AppResult<()> {
        let mut config = load_config(config_path)?;
        apply_analysis_overrides(
            &mut config,
            self.output.provider.as_deref(),
            self.output.model.as_deref(),
        )?;

        let mut upload = read_upload(&self.path).await?;
        upload.declared_mime = self.mime_type.clone();
        let name = upload
            .name
            .clone()
            .unwrap_or_else(|| self.path.display().to_string());

        let media = encode(MediaSource::File(upload))?;
        info!(
            "Encoded {} as {} ({})",
            name,
            media.mime_type(),
            ReportFormatter::format_bytes(media.len() as u64)
        );

        run_analysis(&config, &self.output, &name, media).await
    }
}

/// Fetch a remote media URL and analyse it
#[derive(Args)]
pub struct AnalyzeUrlCommand {
    /// http:// or https:// URL of the media
    url: String,

    /// Maximum bytes to download (overrides config)
    #[arg(long)]
    max_bytes: Option<u64>,

    #[command(flatten)]
    output: OutputArgs,
}

impl AnalyzeUrlCommand {
    pub async fn run(&self, config_path: Option<&Path>) -> AppResult<()> {
        let mut config = load_config(config_path)?;
        apply_analysis_overrides(
            &mut config,
            self.output.provider.as_deref(),
            self.output.model.as_deref(),
        )?;
        if let Some(max_bytes) = self.max_bytes {
            config.fetch.max_bytes = max_bytes;
        }

        let fetcher = MediaFetcher::new(&config.fetch)?;
        let media = fetcher.fetch_encoded(&self.url).await?;
        info!(
            "Fetched {} as {} ({} of {} allowed)",
            self.url,
            media.mime_type(),
            ReportFormatter::format_bytes(media.len() as u64),
            ReportFormatter::format_bytes(fetcher.max_bytes())
        );

        run_analysis(&config, &self.output, &self.url, media).await
    }
}

async fn run_analysis(
    config: &AppConfig,
    output: &OutputArgs,
    source: &str,
    media: EncodedMedia,
) -> AppResult<()> {
    let format = OutputFormat::parse(&output.format);
    let gateway = AnalysisGateway::from_config(&config.analysis)?;

    // Kept for the export snapshot; the request consumes its own copy
    let snapshot = output.export.as_ref().map(|_| media.clone());

    match gateway.analyze(AnalysisRequest::new(media)).await {
        Ok(result) => {
            print!(
                "{}",
                ReportFormatter::format_result(source, &result, format, output.markup)?
            );

            if let (Some(path), Some(snapshot)) = (&output.export, snapshot) {
                let options = ExportOptions::from_config(&config.export)?;
                let file_name = Path::new(source)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| source.to_string());
                let document = to_export_document(&result, &snapshot, &file_name, &options);
                info!(
                    "Export document {} has {} page(s)",
                    document.file_name,
                    document.page_count()
                );
                write_output_to_file(
                    path,
                    &ReportFormatter::export_json(&document)?,
                    "Export document",
                )?;
            }
            Ok(())
        }
        Err(failure) => {
            if format == OutputFormat::Json {
                print!("{}", ReportFormatter::format_failure(&failure, format)?);
            }
            Err(AppError::from(failure))
        }
    }
}
