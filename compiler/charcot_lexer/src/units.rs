//! Recognized medical units and measurement-suffix scanning.

use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Units that turn a numeric literal into a measurement literal.
    pub static ref MEDICAL_UNITS: HashSet<&'static str> = [
        "mg", "g", "kg", "mmHg", "bpm", "mmol", "μmol", "mL", "L", "mg/dL",
        "mEq/L", "ng/mL", "U/L", "mmol/L", "cm", "m", "years", "days", "hours",
        "h", "min", "C", "F",
    ]
    .into_iter()
    .collect();
}

/// Returns true when `unit` is one of the recognized medical units.
pub fn is_medical_unit(unit: &str) -> bool {
    MEDICAL_UNITS.contains(unit)
}

/// Length in bytes of the measurement suffix at the start of `rest`, or 0.
///
/// `rest` is the text right after a numeric body. The suffix is an optional
/// ratio part (`/` followed by at least one digit, as in `120/80`) and then a
/// run of letters and `/`. The whole suffix is accepted only when that run is
/// a known unit; otherwise nothing is consumed and the caller emits a plain
/// number.
pub fn measurement_suffix_len(rest: &str) -> usize {
    let mut ratio_len = 0;
    if let Some(after_slash) = rest.strip_prefix('/') {
        let digits = after_slash.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 {
            ratio_len = 1 + digits;
        }
    }

    let tail = &rest[ratio_len..];
    let unit_len = tail
        .char_indices()
        .find(|(_, c)| !(c.is_alphabetic() || *c == '/'))
        .map(|(i, _)| i)
        .unwrap_or(tail.len());

    if unit_len > 0 && is_medical_unit(&tail[..unit_len]) {
        ratio_len + unit_len
    } else {
        0
    }
}
