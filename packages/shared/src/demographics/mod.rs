pub mod extraction;
pub mod view;

use serde_json::Value;

use extraction::{demographic_info, scalar_text, split_segments};

/// Shortest phone segment accepted as usable.
///
/// Heuristic proxy for "the historical record is good enough"; it is not a
/// phone-number format check.
pub const MIN_PHONE_SEGMENT_LEN: usize = 8;

pub const MOBILE_PHONE_KEY: &str = "numero_telefonico_celular";

/// True when at least one pipe-delimited segment is long enough.
pub fn has_usable_phone_segment(value: &str) -> bool {
    split_segments(value)
        .iter()
        .any(|segment| segment.chars().count() >= MIN_PHONE_SEGMENT_LEN)
}

/// Whether a record's demographic sub-record carries a usable mobile number.
pub fn has_usable_mobile(record: &Value) -> bool {
    demographic_info(record)
        .and_then(|info| info.get(MOBILE_PHONE_KEY))
        .and_then(scalar_text)
        .is_some_and(|phones| has_usable_phone_segment(&phones))
}
