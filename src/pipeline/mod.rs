//! The extraction pipeline: escalation, validation, normalization.
//!
//! Data flow: the cascade tries methods in trust order, the first raw
//! candidate is normalized into the canonical triple, the validator
//! inspects it for failure disguised as success, and a rejected
//! candidate gets exactly one metadata-generation fallback before the
//! run fails.

pub mod cascade;
pub mod normalize;
pub mod validate;

pub use cascade::{Cascade, CascadeOutcome};
pub use normalize::{format_timestamp, normalize, Normalized};
pub use validate::{validate, InvalidReason, Verdict};
