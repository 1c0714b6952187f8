use crate::TypeId;
use thiserror::Error;

/// A list specifying categories of [`HdbError`](crate::HdbError).
///
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HdbError {
    /// The number of arguments does not match the number of parameter fields.
    #[error("invalid number of arguments {actual} - {expected} expected")]
    ArgCount {
        /// Number of provided arguments.
        actual: usize,
        /// Number of parameter fields.
        expected: usize,
    },

    /// The number of batched arguments is not a positive multiple of the
    /// number of parameter fields.
    #[error("invalid number of arguments {actual} - multiple of {field_count} expected")]
    BatchArgCount {
        /// Number of provided arguments.
        actual: usize,
        /// Number of parameter fields.
        field_count: usize,
    },

    /// A named argument occurred in a mode that only supports positional arguments.
    #[error("invalid argument {name} - named arguments are not supported here")]
    NamedArgNotSupported {
        /// The offending argument name.
        name: String,
    },

    /// An output parameter field occurred in a mode that only supports input parameters.
    #[error("invalid parameter {field} - output not allowed")]
    OutFieldNotAllowed { field: String },

    /// An out argument occurred in a mode that only supports input parameters.
    #[error("invalid argument {arg} - output not allowed")]
    OutArgNotAllowed { arg: String },

    /// An input-capable field got an out argument that carries no input value.
    #[error("argument field {field} mismatch - use in argument with out field")]
    InArgExpected { field: String },

    /// An output field got an argument that is no out argument.
    #[error("argument field {field} mismatch - use out argument with non-out field")]
    OutArgExpected { field: String },

    /// A named argument does not match the parameter field at its position.
    #[error("invalid argument name {name} - did you mean {suggestion}?")]
    UnknownArgName {
        /// The name the caller supplied.
        name: String,
        /// The closest declared field name (case-insensitive edit distance).
        suggestion: String,
    },

    /// A trailing call argument is no out argument.
    #[error("invalid argument type {kind} at position {index} - out argument expected")]
    TrailingOutArgExpected { kind: &'static str, index: usize },

    /// A trailing out argument does not point to a result-set sink.
    #[error("invalid out argument type {kind} at position {index} - result-set sink expected")]
    ResultSetSinkExpected { kind: &'static str, index: usize },

    /// A scalar output field got a result-set sink as destination.
    #[error("invalid out argument for field {field} - result-set sink not allowed")]
    ResultSetSinkNotAllowed { field: String },

    /// Conversion of an argument against its parameter field failed;
    /// the source error describes the concrete reason.
    #[error("field {field} conversion error")]
    FieldConversion {
        field: String,
        /// The causing Error.
        #[source]
        source: Box<HdbError>,
    },

    /// A value does not fit the parameter field's type.
    #[error("value of type {kind} cannot be converted into type {type_id:?}")]
    ValueConversion { kind: &'static str, type_id: TypeId },

    /// A value is out of range for the parameter field's type.
    #[error("value {value} is out of range for type {type_id:?}")]
    ValueRange { value: String, type_id: TypeId },

    /// NULL was bound to a parameter that is not nullable.
    #[error("cannot bind NULL to not-nullable parameter {field}")]
    NotNullable { field: String },

    /// Value producers are nested deeper than supported.
    #[error("value producers are nested deeper than {max} levels")]
    ProducerRecursion { max: usize },

    /// Some error occured while encoding or decoding CESU-8.
    #[error("Some error occured while encoding or decoding CESU-8")]
    Cesu8,

    /// Error occured in thread synchronization.
    #[error("Error occured in thread synchronization")]
    Poison,

    /// Implementation error.
    #[error("Implementation error: {}", _0)]
    ImplDetailed(String),

    /// Error occured in communication with a LOB data source.
    #[error(transparent)]
    Io {
        /// The causing Error.
        #[from]
        source: std::io::Error,
    },
}

/// Abbreviation of `Result<T, HdbError>`.
pub type HdbResult<T> = std::result::Result<T, HdbError>;

impl HdbError {
    /// Reveal the inner error, if any.
    #[must_use]
    pub fn inner(&self) -> Option<&dyn std::error::Error> {
        match self {
            Self::FieldConversion { source, .. } => Some(&**source),
            Self::Io { source } => Some(source),
            _ => None,
        }
    }
}

impl<G> From<std::sync::PoisonError<G>> for HdbError {
    fn from(_error: std::sync::PoisonError<G>) -> Self {
        Self::Poison
    }
}
