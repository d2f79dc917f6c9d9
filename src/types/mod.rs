//! Value types shared across the cascade.

pub mod attempt;
pub mod config;
pub mod target;
pub mod transcript;

pub use attempt::ExtractionAttempt;
pub use config::CascadeConfig;
pub use target::{VideoId, VIDEO_ID_LEN};
pub use transcript::{MethodKind, RawContent, Transcript, TranscriptSegment};
