//! Button payloads carrying the chosen media reference.
//!
//! A payload is `dl_<media_ref>`. Decoding splits on the first separator only,
//! and the prefix never contains one, so any media reference survives the
//! round trip untouched, underscores included.

use crate::track_selection::types::MediaRef;

pub const DOWNLOAD_ACTION: &str = "dl";
pub const PAYLOAD_SEPARATOR: char = '_';

pub fn encode_action_payload(media_ref: &MediaRef) -> String {
    format!("{}{}{}", DOWNLOAD_ACTION, PAYLOAD_SEPARATOR, media_ref)
}

pub fn decode_action_payload(payload: &str) -> Option<MediaRef> {
    match payload.split_once(PAYLOAD_SEPARATOR) {
        Some((DOWNLOAD_ACTION, media_ref)) => Some(MediaRef(media_ref.to_string())),
        _ => None,
    }
}
