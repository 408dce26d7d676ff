use std::fmt;

/// Classification of a scalar leaf, carrying the declared bit width where the
/// width decides the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Bool,
    Int(u32),
    Uint(u32),
    Float(u32),
    /// Width of the whole complex value (64 = two `f32`, 128 = two `f64`).
    Complex(u32),
    Duration,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::String => f.write_str("string"),
            ScalarKind::Bool => f.write_str("bool"),
            ScalarKind::Int(bits) => write!(f, "int{bits}"),
            ScalarKind::Uint(bits) => write!(f, "uint{bits}"),
            ScalarKind::Float(bits) => write!(f, "float{bits}"),
            ScalarKind::Complex(bits) => write!(f, "complex{bits}"),
            ScalarKind::Duration => f.write_str("duration"),
        }
    }
}

/// Composite kind of a value. Governs how leftover key segments are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Scalar(ScalarKind),
    /// Optional or shared reference (`Option<T>`, `Rc<T>`, `Arc<T>`).
    Pointer,
    Record,
    Map,
    Sequence,
    /// Accepts arbitrary values (`toml::Value`, `serde_json::Value`).
    Dynamic,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Scalar(scalar) => scalar.fmt(f),
            Kind::Pointer => f.write_str("pointer"),
            Kind::Record => f.write_str("record"),
            Kind::Map => f.write_str("map"),
            Kind::Sequence => f.write_str("sequence"),
            Kind::Dynamic => f.write_str("dynamic"),
        }
    }
}

/// Settings shared by every key of a decode call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeOptions {
    /// Only keys starting with `{prefix}_` are decoded; the prefix is stripped.
    pub prefix: Option<String>,
    /// Sequence indices at or above this value are rejected instead of grown into.
    pub max_sequence_len: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_kinds_render_with_width() {
        assert_eq!(ScalarKind::Int(16).to_string(), "int16");
        assert_eq!(ScalarKind::Uint(8).to_string(), "uint8");
        assert_eq!(ScalarKind::Complex(128).to_string(), "complex128");
        assert_eq!(Kind::Scalar(ScalarKind::Duration).to_string(), "duration");
    }

    #[test]
    fn composite_kinds_render_lowercase() {
        assert_eq!(Kind::Pointer.to_string(), "pointer");
        assert_eq!(Kind::Sequence.to_string(), "sequence");
        assert_eq!(Kind::Dynamic.to_string(), "dynamic");
    }
}
