//! Normalized message records and their derivation from provider payloads.

mod model;
mod normalize;

pub use model::{AttachmentRef, Email};
pub use normalize::{header_value, normalize_message};
