use crate::types_impl::lob::LobInDescr;
use bigdecimal::BigDecimal;

/// The protocol-domain form of a parameter value, as produced by
/// [`ParameterField::convert`](crate::ParameterField::convert).
#[allow(non_camel_case_types)]
#[derive(Debug)]
pub enum HdbValue {
    /// Representation of a database NULL value.
    NULL,
    /// Stores an 8-bit unsigned integer.
    TINYINT(u8),
    /// Stores a 16-bit signed integer.
    SMALLINT(i16),
    /// Stores a 32-bit signed integer.
    INT(i32),
    /// Stores a 64-bit signed integer.
    BIGINT(i64),
    /// Representation for fixed-point decimal values.
    DECIMAL(BigDecimal),
    /// Stores a single-precision 32-bit floating-point number.
    REAL(f32),
    /// Stores a double-precision 64-bit floating-point number.
    DOUBLE(f64),
    /// BOOLEAN stores boolean values, which are TRUE or FALSE.
    BOOLEAN(bool),
    /// String content, already transcoded into the server's transport
    /// encoding (CESU-8).
    STRING(Vec<u8>),
    /// Stores binary data.
    BINARY(Vec<u8>),
    /// An in-progress streaming upload of a large object; the first chunk
    /// is fetched during conversion, follow-up chunks are pulled by the
    /// protocol layer.
    LOBSTREAM(LobInDescr),
}

impl HdbValue {
    /// Returns true if the value is a NULL value.
    pub fn is_null(&self) -> bool {
        matches!(*self, HdbValue::NULL)
    }
}

impl std::fmt::Display for HdbValue {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            HdbValue::NULL => write!(fmt, "<NULL>"),
            HdbValue::TINYINT(value) => write!(fmt, "{value}"),
            HdbValue::SMALLINT(value) => write!(fmt, "{value}"),
            HdbValue::INT(value) => write!(fmt, "{value}"),
            HdbValue::BIGINT(value) => write!(fmt, "{value}"),
            HdbValue::DECIMAL(value) => write!(fmt, "{value}"),
            HdbValue::REAL(value) => write!(fmt, "{value}"),
            HdbValue::DOUBLE(value) => write!(fmt, "{value}"),
            HdbValue::BOOLEAN(value) => write!(fmt, "{value}"),
            HdbValue::STRING(bytes) => write!(fmt, "<STRING of {} bytes>", bytes.len()),
            HdbValue::BINARY(bytes) => write!(fmt, "<BINARY of {} bytes>", bytes.len()),
            HdbValue::LOBSTREAM(_) => write!(fmt, "<LOBSTREAM>"),
        }
    }
}
