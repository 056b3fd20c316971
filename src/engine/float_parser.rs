//! Shared numeric-with-unit-suffix parser backing the dimension, float and
//! fraction converters. Malformed input is a recoverable failure (`false`),
//! never a panic, so the format-trial loop can move on to the next declared
//! format.

use crate::engine::typed_value::{
    self, TypedValue, COMPLEX_UNIT_DIP, COMPLEX_UNIT_FRACTION, COMPLEX_UNIT_FRACTION_PARENT,
    COMPLEX_UNIT_IN, COMPLEX_UNIT_MM, COMPLEX_UNIT_PT, COMPLEX_UNIT_PX, COMPLEX_UNIT_SP,
    TYPE_DIMENSION, TYPE_FLOAT, TYPE_FRACTION,
};

struct UnitEntry {
    suffix: &'static str,
    value_type: i32,
    unit: i32,
    scale: f32,
}

// Longer suffixes first so "%p" is tried before "%" and "dip" before "in".
const UNITS: [UnitEntry; 9] = [
    UnitEntry { suffix: "dip", value_type: TYPE_DIMENSION, unit: COMPLEX_UNIT_DIP, scale: 1.0 },
    UnitEntry { suffix: "dp", value_type: TYPE_DIMENSION, unit: COMPLEX_UNIT_DIP, scale: 1.0 },
    UnitEntry { suffix: "sp", value_type: TYPE_DIMENSION, unit: COMPLEX_UNIT_SP, scale: 1.0 },
    UnitEntry { suffix: "px", value_type: TYPE_DIMENSION, unit: COMPLEX_UNIT_PX, scale: 1.0 },
    UnitEntry { suffix: "pt", value_type: TYPE_DIMENSION, unit: COMPLEX_UNIT_PT, scale: 1.0 },
    UnitEntry { suffix: "in", value_type: TYPE_DIMENSION, unit: COMPLEX_UNIT_IN, scale: 1.0 },
    UnitEntry { suffix: "mm", value_type: TYPE_DIMENSION, unit: COMPLEX_UNIT_MM, scale: 1.0 },
    UnitEntry {
        suffix: "%p",
        value_type: TYPE_FRACTION,
        unit: COMPLEX_UNIT_FRACTION_PARENT,
        scale: 0.01,
    },
    UnitEntry { suffix: "%", value_type: TYPE_FRACTION, unit: COMPLEX_UNIT_FRACTION, scale: 0.01 },
];

/// Parse `value` as a float with an optional unit suffix into `out`.
///
/// Bare floats fill a `TYPE_FLOAT` unless `require_unit` is set; suffixed
/// values fill complex-encoded `TYPE_DIMENSION`/`TYPE_FRACTION` payloads.
pub fn parse_float_attribute(value: &str, out: &mut TypedValue, require_unit: bool) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }

    for entry in &UNITS {
        if let Some(number) = value.strip_suffix(entry.suffix) {
            let Ok(parsed) = number.trim().parse::<f32>() else {
                return false;
            };
            out.value_type = entry.value_type;
            out.data = typed_value::encode_complex(parsed * entry.scale, entry.unit);
            out.asset_cookie = 0;
            out.string = None;
            return true;
        }
    }

    if require_unit {
        return false;
    }

    let Ok(parsed) = value.parse::<f32>() else {
        return false;
    };
    out.value_type = TYPE_FLOAT;
    out.data = parsed.to_bits() as i32;
    out.asset_cookie = 0;
    out.string = None;
    true
}
