//! The caller-side argument model.
//!
//! A generic database API hands arguments to the driver as loosely-typed
//! [`NamedValue`]s. The conversion entry points in [`crate::conversion`]
//! turn each value into its protocol-domain form in place, guided by the
//! statement's [`ParameterField`](crate::ParameterField)s.

use crate::{HdbError, HdbResult, HdbValue};
use bigdecimal::BigDecimal;
use std::sync::{Arc, Mutex};

// Value producers may nest (e.g. a nullable wrapper around a domain type);
// deeper chains than this are treated as an error.
const MAX_PRODUCER_DEPTH: usize = 4;

/// A capability that yields the value that should actually be bound.
///
/// Producers may be nested: the produced value can itself be a producer.
/// The unwrap loop in [`ArgValue::resolve`] follows such chains up to a
/// small depth limit.
pub trait ProduceValue: Send + Sync {
    /// Produces the value to be bound.
    ///
    /// # Errors
    ///
    /// Any error of the producing side; it is surfaced to the caller
    /// unchanged.
    fn produce_value(&self) -> HdbResult<ArgValue>;
}

/// The caller-side value space.
///
/// Besides plain values, the conversion layer recognizes a number of
/// structural wrappers: explicit nullable indirection, self-describing
/// value producers, output-parameter markers, and the result-set sink that
/// takes a table-valued output of a procedure call.
#[allow(non_camel_case_types)]
#[derive(Default)]
pub enum ArgValue {
    /// SQL NULL.
    #[default]
    NULL,
    /// A boolean value.
    BOOLEAN(bool),
    /// An integer value; bound to the integer field types with a range check.
    INT(i64),
    /// A floating-point value.
    DOUBLE(f64),
    /// A fixed-point decimal value.
    DECIMAL(BigDecimal),
    /// A string value.
    STRING(String),
    /// A binary value.
    BINARY(Vec<u8>),
    /// A data source whose content is streamed to the database in chunks;
    /// UTF-8 text for the character LOB types, raw bytes for BLOB.
    LOBSTREAM(Arc<Mutex<dyn std::io::Read + Send>>),
    /// An explicit level of nullable indirection; `None` is a nil reference.
    INDIRECT(Option<Box<ArgValue>>),
    /// A self-describing value producer, unwrapped before conversion.
    PRODUCER(Arc<dyn ProduceValue>),
    /// Marks the argument position as an output parameter.
    OUT(OutArg),
    /// Destination for a table-valued output at a trailing position of a
    /// procedure call.
    RESULT_SET_SINK,
    /// An already-converted protocol value. Conversion writes this variant
    /// back into the argument slot; values provided in this form are bound
    /// without further conversion.
    HDB(HdbValue),
}

impl ArgValue {
    /// A stable name of the value's variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ArgValue::NULL => "NULL",
            ArgValue::BOOLEAN(_) => "BOOLEAN",
            ArgValue::INT(_) => "INT",
            ArgValue::DOUBLE(_) => "DOUBLE",
            ArgValue::DECIMAL(_) => "DECIMAL",
            ArgValue::STRING(_) => "STRING",
            ArgValue::BINARY(_) => "BINARY",
            ArgValue::LOBSTREAM(_) => "LOBSTREAM",
            ArgValue::INDIRECT(_) => "INDIRECT",
            ArgValue::PRODUCER(_) => "PRODUCER",
            ArgValue::OUT(_) => "OUT",
            ArgValue::RESULT_SET_SINK => "RESULT_SET_SINK",
            ArgValue::HDB(_) => "HDB",
        }
    }

    /// Returns true if the value is semantically null.
    ///
    /// Indirection levels are peeled transitively: a reference to a
    /// reference to nothing is null.
    pub fn is_nil(&self) -> bool {
        match self {
            ArgValue::NULL | ArgValue::INDIRECT(None) => true,
            ArgValue::INDIRECT(Some(inner)) => inner.is_nil(),
            _ => false,
        }
    }

    /// Unwraps self-describing value producers until a non-producer value
    /// or null is reached.
    ///
    /// # Errors
    ///
    /// A producer failure is surfaced unchanged; chains deeper than the
    /// supported nesting limit fail with `HdbError::ProducerRecursion`.
    pub fn resolve(mut self) -> HdbResult<Self> {
        let mut depth = 0;
        loop {
            if self.is_nil() {
                return Ok(self);
            }
            match self {
                ArgValue::PRODUCER(producer) => {
                    if depth == MAX_PRODUCER_DEPTH {
                        return Err(HdbError::ProducerRecursion {
                            max: MAX_PRODUCER_DEPTH,
                        });
                    }
                    depth += 1;
                    self = producer.produce_value()?;
                }
                other => return Ok(other),
            }
        }
    }
}

impl std::fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ArgValue::NULL => write!(f, "NULL"),
            ArgValue::BOOLEAN(b) => write!(f, "BOOLEAN({b})"),
            ArgValue::INT(i) => write!(f, "INT({i})"),
            ArgValue::DOUBLE(d) => write!(f, "DOUBLE({d})"),
            ArgValue::DECIMAL(bd) => write!(f, "DECIMAL({bd})"),
            ArgValue::STRING(s) => write!(f, "STRING({s:?})"),
            ArgValue::BINARY(bytes) => write!(f, "BINARY(<{} bytes>)", bytes.len()),
            ArgValue::LOBSTREAM(_) => write!(f, "LOBSTREAM(..)"),
            ArgValue::INDIRECT(inner) => write!(f, "INDIRECT({inner:?})"),
            ArgValue::PRODUCER(_) => write!(f, "PRODUCER(..)"),
            ArgValue::OUT(out) => write!(f, "OUT({out:?})"),
            ArgValue::RESULT_SET_SINK => write!(f, "RESULT_SET_SINK"),
            ArgValue::HDB(value) => write!(f, "HDB({value:?})"),
        }
    }
}

/// Marks an argument position of a procedure call as an output parameter.
#[derive(Debug)]
pub struct OutArg {
    /// True if the destination also carries the input value, for an INOUT
    /// parameter.
    pub is_in: bool,
    /// The destination slot; for an INOUT parameter it holds the input
    /// value before conversion.
    pub dest: Box<ArgValue>,
}

impl OutArg {
    /// An output-only destination.
    pub fn new(dest: ArgValue) -> Self {
        Self {
            is_in: false,
            dest: Box::new(dest),
        }
    }

    /// An INOUT destination carrying the given input value.
    pub fn new_in_out(dest: ArgValue) -> Self {
        Self {
            is_in: true,
            dest: Box::new(dest),
        }
    }
}

/// A single caller-supplied argument.
#[derive(Debug, Default)]
pub struct NamedValue {
    /// Position of the argument within the argument list, starting with 1.
    pub ordinal: usize,
    /// Optional name for binding by parameter name (procedure calls only);
    /// empty for positional arguments.
    pub name: String,
    /// The argument's value; replaced with the converted form during
    /// binding.
    pub value: ArgValue,
}

impl NamedValue {
    /// A positional argument.
    pub fn positional(ordinal: usize, value: ArgValue) -> Self {
        Self {
            ordinal,
            name: String::new(),
            value,
        }
    }

    /// An argument that binds to the parameter field with the given name.
    pub fn named<S: Into<String>>(ordinal: usize, name: S, value: ArgValue) -> Self {
        Self {
            ordinal,
            name: name.into(),
            value,
        }
    }
}

impl std::fmt::Display for NamedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.name.is_empty() {
            write!(f, "{} ({:?})", self.ordinal, self.value)
        } else {
            write!(f, "{} \"{}\" ({:?})", self.ordinal, self.name, self.value)
        }
    }
}
