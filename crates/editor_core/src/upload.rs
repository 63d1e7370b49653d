//! Image uploads read by the host as raw bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::dom::NodeId;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Encode file bytes as a `data:` URL.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = mime.trim();
    let mime = if mime.is_empty() { FALLBACK_MIME } else { mime };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// An image read in flight, bound to the image that was selected when the
/// read started. Reads are not sequenced: whichever completes last wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingUpload {
    pub target: NodeId,
}
