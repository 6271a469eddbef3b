//! Portable, exact implementations of softmax and scaled dot-product attention.
//!
//! These paths favour clarity over absolute performance and materialise every
//! intermediate (scores, exponentials, row sums) for the duration of a call.

pub mod exact;
pub mod softmax;

pub use exact::{attention, attention_with_config, ScaledDotProductAttention};
pub use softmax::{softmax, softmax_with_config};
