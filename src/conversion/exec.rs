use super::{convert_arg, fetch_first_lob_chunk};
use crate::{
    named_value::{ArgValue, NamedValue},
    HdbError, HdbResult, ParameterField, Transcoder,
};

/// Converts the arguments of a batched EXEC in place.
///
/// * all fields need to be input fields
/// * out arguments are not supported
/// * named arguments are not supported
///
/// The argument list has to contain a positive multiple of the field count;
/// every slice of `fields.len()` consecutive arguments forms one parameter
/// row. For every LOB argument the first chunk is fetched with
/// `lob_chunk_size` bytes.
///
/// Returns the indexes of the rows after which the protocol layer has to
/// send additional LOB data before it can proceed with the next row; the
/// last row is always included so that the protocol layer knows where the
/// batch ends.
///
/// # Errors
///
/// The arity, named-argument, and out-parameter violations described above;
/// conversion and LOB source errors of the individual arguments.
pub fn convert_exec_args(
    fields: &[ParameterField],
    nvargs: &mut [NamedValue],
    transcoder: &mut dyn Transcoder,
    lob_chunk_size: usize,
) -> HdbResult<Vec<usize>> {
    let num_fields = fields.len();
    if num_fields == 0 || nvargs.is_empty() || nvargs.len() % num_fields != 0 {
        return Err(HdbError::BatchArgCount {
            actual: nvargs.len(),
            field_count: num_fields,
        });
    }
    let num_rows = nvargs.len() / num_fields;
    let mut add_lob_data_rows = Vec::<usize>::new();

    for row in 0..num_rows {
        let mut has_add_lob_data = false;
        for (col, field) in fields.iter().enumerate() {
            let nvarg = &mut nvargs[row * num_fields + col];

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
            if fetch_first_lob_chunk(&mut nvarg.value, lob_chunk_size)? {
                has_add_lob_data = true;
            }
        }
        if has_add_lob_data || row == num_rows - 1 {
            add_lob_data_rows.push(row);
        }
    }
    Ok(add_lob_data_rows)
}
