use serde::Serialize;

// Type discriminants, matching the platform's typed-value encoding.
pub const TYPE_NULL: i32 = 0x00;
pub const TYPE_REFERENCE: i32 = 0x01;
pub const TYPE_ATTRIBUTE: i32 = 0x02;
pub const TYPE_STRING: i32 = 0x03;
pub const TYPE_FLOAT: i32 = 0x04;
pub const TYPE_DIMENSION: i32 = 0x05;
pub const TYPE_FRACTION: i32 = 0x06;
pub const TYPE_INT_DEC: i32 = 0x10;
pub const TYPE_INT_HEX: i32 = 0x11;
pub const TYPE_INT_BOOLEAN: i32 = 0x12;
pub const TYPE_INT_COLOR_ARGB8: i32 = 0x1c;

// Payloads for TYPE_NULL.
pub const DATA_NULL_UNDEFINED: i32 = 0;
pub const DATA_NULL_EMPTY: i32 = 1;

// Complex-value layout: unit nibble, 2-bit radix, signed 24-bit mantissa.
pub const COMPLEX_UNIT_SHIFT: i32 = 0;
pub const COMPLEX_UNIT_MASK: i32 = 0xf;
pub const COMPLEX_RADIX_SHIFT: i32 = 4;
pub const COMPLEX_RADIX_MASK: i32 = 0x3;
pub const COMPLEX_MANTISSA_SHIFT: i32 = 8;
pub const COMPLEX_MANTISSA_MASK: i32 = 0xffffff;

pub const COMPLEX_UNIT_PX: i32 = 0;
pub const COMPLEX_UNIT_DIP: i32 = 1;
pub const COMPLEX_UNIT_SP: i32 = 2;
pub const COMPLEX_UNIT_PT: i32 = 3;
pub const COMPLEX_UNIT_IN: i32 = 4;
pub const COMPLEX_UNIT_MM: i32 = 5;

pub const COMPLEX_UNIT_FRACTION: i32 = 0;
pub const COMPLEX_UNIT_FRACTION_PARENT: i32 = 1;

const COMPLEX_RADIX_23P0: i32 = 0;
const COMPLEX_RADIX_16P7: i32 = 1;
const COMPLEX_RADIX_8P15: i32 = 2;
const COMPLEX_RADIX_0P23: i32 = 3;

const MANTISSA_MULT: f32 = 1.0 / (1 << COMPLEX_MANTISSA_SHIFT) as f32;
const RADIX_MULTS: [f32; 4] = [
    MANTISSA_MULT,
    MANTISSA_MULT / (1 << 7) as f32,
    MANTISSA_MULT / (1 << 15) as f32,
    MANTISSA_MULT / (1 << 23) as f32,
];

/// Binary-typed resolution result: a type discriminant, a 32-bit payload, and
/// an optional string payload, laid out like the platform's typed value so
/// callers can encode it positionally.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypedValue {
    #[serde(rename = "type")]
    pub value_type: i32,
    pub data: i32,
    pub string: Option<String>,
    pub asset_cookie: i32,
    pub resource_id: i32,
}

impl TypedValue {
    pub fn is_null(&self) -> bool {
        self.value_type == TYPE_NULL
    }
}

/// Pack a float into the complex layout: pick the radix with the most
/// precision that still fits the magnitude, like the platform's encoder.
pub fn encode_complex(value: f32, unit: i32) -> i32 {
    let neg = value < 0.0;
    let magnitude = if neg { -value } else { value };
    let bits = (magnitude as f64 * (1i64 << 23) as f64 + 0.5) as i64;

    let (radix, shift) = if bits & 0x7f_ffff == 0 {
        (COMPLEX_RADIX_23P0, 23)
    } else if bits & !0x7f_ffff_i64 == 0 {
        (COMPLEX_RADIX_0P23, 0)
    } else if bits & !0x7fff_ffff_i64 == 0 {
        (COMPLEX_RADIX_8P15, 8)
    } else if bits & !0x7f_ffff_ffff_i64 == 0 {
        (COMPLEX_RADIX_16P7, 16)
    } else {
        (COMPLEX_RADIX_23P0, 23)
    };

    let mut mantissa = ((bits >> shift) as i32) & COMPLEX_MANTISSA_MASK;
    if neg {
        mantissa = (-mantissa) & COMPLEX_MANTISSA_MASK;
    }

    (mantissa << COMPLEX_MANTISSA_SHIFT)
        | (radix << COMPLEX_RADIX_SHIFT)
        | (unit << COMPLEX_UNIT_SHIFT)
}

/// Decode a complex-encoded value back to its float magnitude.
pub fn complex_to_float(complex: i32) -> f32 {
    let mantissa_bits = complex & (COMPLEX_MANTISSA_MASK << COMPLEX_MANTISSA_SHIFT);
    let radix = ((complex >> COMPLEX_RADIX_SHIFT) & COMPLEX_RADIX_MASK) as usize;
    mantissa_bits as f32 * RADIX_MULTS[radix]
}

pub fn complex_unit(complex: i32) -> i32 {
    (complex >> COMPLEX_UNIT_SHIFT) & COMPLEX_UNIT_MASK
}
