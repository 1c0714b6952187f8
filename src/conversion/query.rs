use super::{convert_arg, fetch_first_lob_chunk};
use crate::{
    named_value::{ArgValue, NamedValue},
    HdbError, HdbResult, ParameterField, Transcoder,
};

/// Converts the arguments of a single-row QUERY in place.
///
/// * all fields need to be input fields
/// * out arguments are not supported
/// * named arguments are not supported
///
/// The number of arguments has to match the number of fields exactly. For
/// every LOB argument the first chunk is fetched with `lob_chunk_size`
/// bytes; continuation of unfinished LOBs is left to the protocol layer,
/// which finds the primed descriptors in the argument slots.
///
/// # Errors
///
/// The arity, named-argument, and out-parameter violations described above;
/// conversion and LOB source errors of the individual arguments.
pub fn convert_query_args(
    fields: &[ParameterField],
    nvargs: &mut [NamedValue],
    transcoder: &mut dyn Transcoder,
    lob_chunk_size: usize,
) -> HdbResult<()> {
    if nvargs.len() != fields.len() {
        return Err(HdbError::ArgCount {
            actual: nvargs.len(),
            expected: fields.len(),
        });
    }

    for (field, nvarg) in fields.iter().zip(nvargs.iter_mut()) {
        if field.is_out() {
            return Err(HdbError::OutFieldNotAllowed {
                field: field.to_string(),
            });
        }
        if matches!(nvarg.value, ArgValue::OUT(_)) {
            return Err(HdbError::OutArgNotAllowed {
                arg: nvarg.to_string(),
            });
        }
        if !nvarg.name.is_empty() {
            return Err(HdbError::NamedArgNotSupported {
                name: nvarg.name.clone(),
            });
        }

        let value = std::mem::take(&mut nvarg.value);
        nvarg.value = convert_arg(field, value, transcoder)?;
        // fetch first lob chunk
        fetch_first_lob_chunk(&mut nvarg.value, lob_chunk_size)?;
    }
    Ok(())
}
