// Typed IR operands and literal formatting.

use charcot_type::IrType;

/// An operand together with the IR type it was produced at.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub repr: String,
    pub ty: IrType,
}

impl Value {
    pub fn new(repr: impl Into<String>, ty: IrType) -> Self {
        Self {
            repr: repr.into(),
            ty,
        }
    }

    /// Result of a call that returns nothing.
    pub fn void() -> Self {
        Self::new("", IrType::Void)
    }

    pub fn null() -> Self {
        Self::new("null", IrType::Opaque)
    }

    pub fn float(value: f64) -> Self {
        Self::new(float_literal(value), IrType::Float)
    }

    pub fn int(value: i64) -> Self {
        Self::new(value.to_string(), IrType::Int)
    }

    pub fn bool(value: bool) -> Self {
        Self::new(if value { "true" } else { "false" }, IrType::Bool)
    }

    /// `ty repr`, as written in call arguments and stores.
    pub fn typed(&self) -> String {
        format!("{} {}", self.ty, self.repr)
    }
}

/// The zero constant of `ty`.
pub fn zero_of(ty: IrType) -> Value {
    match ty {
        IrType::Void => Value::void(),
        IrType::Bool => Value::bool(false),
        IrType::Int => Value::int(0),
        IrType::Float => Value::float(0.0),
        IrType::Opaque | IrType::OpaqueArray | IrType::Record(_) => Value::new("null", ty),
    }
}

/// Formats `value` as a `float` immediate.
///
/// Values exactly representable in single precision print in decimal; the
/// rest use the hexadecimal double form of their rounded single value.
pub fn float_literal(value: f64) -> String {
    let single = value as f32;
    let widened = f64::from(single);
    let decimal = format!("{widened:?}");
    if widened == value && decimal.contains('.') && !decimal.contains('e') {
        decimal
    } else {
        format!("0x{:016X}", widened.to_bits())
    }
}

/// Numeric value of a measurement literal: every digit and dot, in order.
pub fn measurement_value(text: &str) -> f64 {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().unwrap_or(0.0)
}

/// Escapes `text` for a `c"..."` constant and appends the terminator.
/// Returns the escaped body and the byte length including the terminator.
pub fn c_string(text: &str) -> (String, usize) {
    let mut body = String::with_capacity(text.len() + 3);
    for byte in text.bytes() {
        match byte {
            b'"' | b'\\' => body.push_str(&format!("\\{byte:02X}")),
            0x20..=0x7E => body.push(byte as char),
            _ => body.push_str(&format!("\\{byte:02X}")),
        }
    }
    body.push_str("\\00");
    (body, text.len() + 1)
}
