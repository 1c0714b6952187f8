use super::{convert_arg, fetch_first_lob_chunk};
use crate::{
    named_value::{ArgValue, NamedValue},
    protocol::levenshtein,
    HdbError, HdbResult, ParameterField, Transcoder,
};

/// The classified arguments of a procedure CALL.
///
/// `in_fields` and `in_args` are parallel lists in declared-field order and
/// carry the converted input values; `out_fields` and `out_args` carry the
/// output destinations. `out_args` can be longer than `out_fields`: the
/// surplus entries at the end are the destinations of table-valued outputs,
/// which have no scalar parameter field.
///
/// Classification consumes the argument values: the caller's slots are left
/// empty, the converted forms live here.
#[derive(Debug)]
pub struct CallArgs<'a> {
    /// The IN and INOUT fields, in declared order.
    pub in_fields: Vec<&'a ParameterField>,
    /// The converted input value for each field in `in_fields`.
    pub in_args: Vec<NamedValue>,
    /// The INOUT and OUT fields, in declared order.
    pub out_fields: Vec<&'a ParameterField>,
    /// One out argument per field in `out_fields`, followed by the
    /// table-output destinations in caller-supplied order.
    pub out_args: Vec<NamedValue>,
}

impl CallArgs<'_> {
    fn new() -> Self {
        Self {
            in_fields: Vec::new(),
            in_args: Vec::new(),
            out_fields: Vec::new(),
            out_args: Vec::new(),
        }
    }
}

// Moves the first argument named `name` at position `pos` or later to
// position `pos` and right-shifts the arguments in between by one slot.
// No-op if no argument matches; every other position keeps its relative
// order. A second argument with the same name is deliberately left alone -
// it fails the name check at its own position later.
fn reorder_nvargs(pos: usize, name: &str, nvargs: &mut [NamedValue]) {
    for i in pos..nvargs.len() {
        if !nvargs[i].name.is_empty() && nvargs[i].name == name {
            nvargs[pos..=i].rotate_right(1);
            return;
        }
    }
}

/// Converts and classifies the arguments of a procedure CALL.
///
/// * fields can be input, output, or both
/// * named arguments are supported and are positioned to their field
/// * arguments beyond the field count have to be out arguments with a
///   result-set sink as destination; they take the table-valued outputs of
///   the procedure
///
/// # Errors
///
/// Arity and direction violations, unknown argument names (with a
/// "did you mean" suggestion), misplaced result-set sinks; conversion and
/// LOB source errors of the individual arguments.
pub fn convert_call_args<'a>(
    fields: &'a [ParameterField],
    nvargs: &mut [NamedValue],
    transcoder: &mut dyn Transcoder,
    lob_chunk_size: usize,
) -> HdbResult<CallArgs<'a>> {
    let mut call_args = CallArgs::new();

    // the argument count has to match the field count or exceed it
    // (table output args)
    if nvargs.len() < fields.len() {
        return Err(HdbError::ArgCount {
            actual: nvargs.len(),
            expected: fields.len(),
        });
    }

    let num_fields = fields.len();
    for (i, field) in fields.iter().enumerate() {
        reorder_nvargs(i, field.name().unwrap_or(""), &mut nvargs[..num_fields]);

        let nvarg = &mut nvargs[i];
        if !nvarg.name.is_empty() && Some(nvarg.name.as_str()) != field.name() {
            return Err(HdbError::UnknownArgName {
                name: nvarg.name.clone(),
                suggestion: levenshtein::min_string(
                    fields,
                    |field| field.name().unwrap_or(""),
                    &nvarg.name,
                    false,
                ),
            });
        }

        match std::mem::take(&mut nvarg.value) {
            ArgValue::OUT(mut out) => {
                if field.is_in() {
                    if !out.is_in {
                        return Err(HdbError::InArgExpected {
                            field: field.to_string(),
                        });
                    }
                    // consume the input half; a sink as input fails its
                    // conversion below
                    let dest = std::mem::take(&mut *out.dest);
                    let mut converted = convert_arg(field, dest, transcoder)?;
                    if !field.is_out() {
                        // fetch first lob chunk
                        fetch_first_lob_chunk(&mut converted, lob_chunk_size)?;
                    }
                    call_args.in_fields.push(field);
                    call_args.in_args.push(NamedValue {
                        ordinal: nvarg.ordinal,
                        name: nvarg.name.clone(),
                        value: converted,
                    });
                    if field.is_out() {
                        // INOUT: the emptied wrapper takes the reply value
                        call_args.out_fields.push(field);
                        call_args.out_args.push(NamedValue {
                            ordinal: nvarg.ordinal,
                            name: nvarg.name.clone(),
                            value: ArgValue::OUT(out),
                        });
                    }
                } else {
                    // out-only field: the destination stays in the wrapper;
                    // a result-set sink is only legal at the trailing
                    // positions
                    if matches!(*out.dest, ArgValue::RESULT_SET_SINK) {
                        return Err(HdbError::ResultSetSinkNotAllowed {
                            field: field.to_string(),
                        });
                    }
                    call_args.out_fields.push(field);
                    call_args.out_args.push(NamedValue {
                        ordinal: nvarg.ordinal,
                        name: nvarg.name.clone(),
                        value: ArgValue::OUT(out),
                    });
                }
            }
            plain => {
                if field.is_out() {
                    return Err(HdbError::OutArgExpected {
                        field: field.to_string(),
                    });
                }
                let mut converted = convert_arg(field, plain, transcoder)?;
                // fetch first lob chunk
                fetch_first_lob_chunk(&mut converted, lob_chunk_size)?;
                call_args.in_fields.push(field);
                call_args.in_args.push(NamedValue {
                    ordinal: nvarg.ordinal,
                    name: nvarg.name.clone(),
                    value: converted,
                });
            }
        }
    }

    // table output args
    for i in num_fields..nvargs.len() {
        let nvarg = &mut nvargs[i];
        match std::mem::take(&mut nvarg.value) {
            ArgValue::OUT(out) => {
                if !matches!(*out.dest, ArgValue::RESULT_SET_SINK) {
                    return Err(HdbError::ResultSetSinkExpected {
                        kind: out.dest.kind(),
                        index: i,
                    });
                }
                call_args.out_args.push(NamedValue {
                    ordinal: nvarg.ordinal,
                    name: nvarg.name.clone(),
                    value: ArgValue::OUT(out),
                });
            }
            other => {
                return Err(HdbError::TrailingOutArgExpected {
                    kind: other.kind(),
                    index: i,
                });
            }
        }
    }
    Ok(call_args)
}

#[cfg(test)]
mod test {
    use super::reorder_nvargs;
    use crate::{ArgValue, NamedValue};

    fn named(ordinal: usize, name: &str) -> NamedValue {
        NamedValue::named(ordinal, name, ArgValue::INT(i64::try_from(ordinal).unwrap()))
    }

    #[test]
    fn test_reorder_moves_match_into_place() {
        let mut nvargs = vec![named(1, "B"), named(2, "C"), named(3, "A")];
        reorder_nvargs(0, "A", &mut nvargs);
        assert_eq!(
            nvargs.iter().map(|nv| nv.name.as_str()).collect::<Vec<_>>(),
            ["A", "B", "C"]
        );
    }

    #[test]
    fn test_reorder_keeps_relative_order_of_others() {
        let mut nvargs = vec![named(1, "X"), named(2, "Y"), named(3, "T"), named(4, "Z")];
        reorder_nvargs(1, "T", &mut nvargs);
        assert_eq!(
            nvargs.iter().map(|nv| nv.name.as_str()).collect::<Vec<_>>(),
            ["X", "T", "Y", "Z"]
        );
    }

    #[test]
    fn test_reorder_without_match_is_a_noop() {
        let mut nvargs = vec![named(1, "A"), named(2, "B")];
        reorder_nvargs(0, "Q", &mut nvargs);
        assert_eq!(
            nvargs.iter().map(|nv| nv.name.as_str()).collect::<Vec<_>>(),
            ["A", "B"]
        );
    }

    #[test]
    fn test_reorder_ignores_positional_args_and_earlier_positions() {
        let mut nvargs = vec![
            NamedValue::positional(1, ArgValue::INT(1)),
            named(2, "A"),
            named(3, "B"),
        ];
        // scan starts at pos 1; the positional arg at 0 is out of scope
        reorder_nvargs(1, "B", &mut nvargs);
        assert!(nvargs[0].name.is_empty());
        assert_eq!(nvargs[1].name, "B");
        assert_eq!(nvargs[2].name, "A");
    }

    #[test]
    fn test_reorder_stops_at_the_first_match() {
        let mut nvargs = vec![named(1, "B"), named(2, "A"), named(3, "A")];
        reorder_nvargs(0, "A", &mut nvargs);
        // the duplicate stays behind and is caught by the name check later
        assert_eq!(
            nvargs.iter().map(|nv| nv.ordinal).collect::<Vec<_>>(),
            [2, 1, 3]
        );
    }
}
