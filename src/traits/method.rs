//! The strategy trait every extraction method implements.

use async_trait::async_trait;

use crate::error::MethodResult;
use crate::types::target::VideoId;
use crate::types::transcript::{MethodKind, RawContent};

/// One concrete strategy for obtaining raw content from a target.
///
/// The cascade dispatches over an ordered list of boxed methods rather
/// than a shared base type; the set of methods is closed and named by
/// [`MethodKind`].
///
/// Implementations must be side-effect-free with respect to each other:
/// a failed attempt never corrupts the next one, and nothing is shared
/// mutably between methods.
#[async_trait]
pub trait TranscriptMethod: Send + Sync {
    /// Which member of the closed method set this is.
    fn kind(&self) -> MethodKind;

    /// Try to produce raw content for the video.
    ///
    /// Runs to completion or returns an error; the cascade never cancels
    /// an attempt mid-flight.
    async fn attempt(&self, video: &VideoId) -> MethodResult<RawContent>;
}
