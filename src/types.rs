//! FakeCheck type system
//!
//! - `media`: `EncodedMedia` and the `data:` URI wire form
//! - `verdict`: verdict taxonomy and confidence banding
//! - `analysis`: requests, normalised results and failures

mod analysis;
pub mod media;
pub mod verdict;

pub use analysis::*;
pub use media::{is_media_mime, normalise_mime, EncodedMedia, MediaCategory};
pub use verdict::{band, Verdict};
