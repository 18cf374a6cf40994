//! Structured instruction sent alongside the media

use crate::types::verdict::{SAFE_UPPER_BOUND, SUSPICIOUS_UPPER_BOUND};
use crate::types::{EncodedMedia, MediaCategory};

/// Build the analysis instruction for one media object
pub fn build_instruction(media: &EncodedMedia) -> String {
    let focus = match media.category() {
        MediaCategory::Image => {
            "Inspect facial geometry, skin texture, lighting and shadow coherence, \
             compression and resampling artefacts, and cloned or inpainted regions."
        }
        MediaCategory::Video => {
            "Inspect facial anomalies, lip-sync drift, temporal flicker between frames, \
             blending boundaries, and inconsistent motion blur. Identify the frames that \
             show manipulation most clearly."
        }
        MediaCategory::Audio => {
            "Inspect spectral discontinuities, unnatural prosody, breath and room-tone \
             inconsistencies, and artefacts typical of voice cloning."
        }
    };

    let mut prompt = format!(
        "You are an AI expert in analysing media for deepfake manipulation.\n\n\
         Analyse the attached {} media ({}) and determine the likelihood that it has been \
         manipulated or synthetically generated.\n\n\
         {}\n\n",
        category_name(media.category()),
        media.mime_type(),
        focus
    );

    prompt.push_str(&format!(
        "## Confidence Score Guidelines\n\
         - Above {hi:.2}: Likely Manipulated\n\
         - Above {lo:.2} up to {hi:.2}: Suspicious\n\
         - {lo:.2} or below: Safe\n\n",
        lo = SAFE_UPPER_BOUND,
        hi = SUSPICIOUS_UPPER_BOUND
    ));

    prompt.push_str(
        "## Report Format\n\
         Write `report` in markdown using only `### ` headings and `* ` bullet lines \
         for structure. Summarise the verdict first, then list the evidence.\n\n\
         ## Response\n\
         Respond with a single JSON object and nothing else:\n\
         ```json\n\
         {\n\
           \"confidenceScore\": 0.82,\n\
           \"verdict\": \"Likely Manipulated\",\n\
           \"report\": \"### Summary\\n* ...\",\n\
           \"evidenceFrames\": [{\"frameIndex\": 0, \"score\": 0.9, \"heatmapRef\": null}],\n\
           \"documentAnomalies\": [{\"kind\": \"...\", \"description\": \"...\", \"score\": 0.5}],\n\
           \"audioAnomalies\": [{\"kind\": \"...\", \"description\": \"...\", \"score\": 0.5}],\n\
           \"reportArtifactRef\": null\n\
         }\n\
         ```\n\
         `confidenceScore` is the likelihood of manipulation between 0 and 1. \
         `verdict` is one of \"Safe\", \"Suspicious\", \"Likely Manipulated\". \
         Use empty arrays when there is no evidence of a kind.",
    );

    prompt
}

fn category_name(category: MediaCategory) -> &'static str {
    match category {
        MediaCategory::Image => "image",
        MediaCategory::Video => "video",
        MediaCategory::Audio => "audio",
    }
}
