//! Conversion of caller-supplied arguments into protocol values.
//!
//! The three entry points correspond to the three calling modes of the
//! protocol:
//!
//! * [`convert_exec_args`] for batched EXEC (input-only, positional,
//!   multiple parameter rows),
//! * [`convert_query_args`] for single-row QUERY (input-only, positional),
//! * [`convert_call_args`] for procedure CALL (named arguments, output
//!   parameters, trailing table-valued outputs).
//!
//! All entry points run on the calling thread, convert in declared-field
//! order, and abort on the first invariant violation. On error,
//! already-processed argument slots may be left in converted form; the
//! caller is expected to discard the arguments.

mod call;
mod exec;
mod query;

pub use call::{convert_call_args, CallArgs};
pub use exec::convert_exec_args;
pub use query::convert_query_args;

use crate::{
    named_value::ArgValue, HdbError, HdbResult, HdbValue, ParameterField, Transcoder,
};

// Resolves value producers and applies the field's type-directed
// conversion. Producer errors surface unchanged; conversion errors are
// wrapped with the field rendering.
pub(crate) fn convert_arg(
    field: &ParameterField,
    value: ArgValue,
    transcoder: &mut dyn Transcoder,
) -> HdbResult<ArgValue> {
    let resolved = value.resolve()?;
    match field.convert(resolved, transcoder) {
        Ok(hdb_value) => Ok(ArgValue::HDB(hdb_value)),
        Err(e) => Err(HdbError::FieldConversion {
            field: field.to_string(),
            source: Box::new(e),
        }),
    }
}

// Fetches the first chunk of a freshly-converted LOB value; a no-op for
// everything else. Returns true if the LOB still owes the server further
// chunks.
pub(crate) fn fetch_first_lob_chunk(
    value: &mut ArgValue,
    lob_chunk_size: usize,
) -> HdbResult<bool> {
    if let ArgValue::HDB(HdbValue::LOBSTREAM(descr)) = value {
        descr.fetch_next(lob_chunk_size)?;
        Ok(!descr.opts().is_last_data())
    } else {
        Ok(false)
    }
}
