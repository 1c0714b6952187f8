mod test_utils;

use flexi_logger::LoggerHandle;
use hdbconvert::{
    convert_exec_args, ArgValue, Cesu8Transcoder, HdbError, HdbResult, HdbValue, NamedValue,
    TypeId, DEFAULT_LOB_WRITE_LENGTH,
};
use log::info;

// Test the conversion of batched EXEC arguments: in-place conversion,
// LOB-continuation bookkeeping per row, and the reject rules.

#[test]
pub fn test_010_convert_exec() -> HdbResult<()> {
    let mut log_handle = test_utils::init_logger();

    single_row_without_lob(&mut log_handle)?;
    several_rows_are_converted_in_declared_order(&mut log_handle)?;
    lob_rows_owe_continuations(&mut log_handle)?;
    arity_must_be_a_positive_multiple(&mut log_handle);
    rejects_out_fields_and_out_args(&mut log_handle);
    rejects_named_args(&mut log_handle);
    conversion_errors_name_the_field(&mut log_handle);
    Ok(())
}

fn single_row_without_lob(_log_handle: &mut LoggerHandle) -> HdbResult<()> {
    info!("a single row without LOBs yields only the final-row record");
    let fields = vec![test_utils::in_field("", TypeId::INT)];
    let mut nvargs = test_utils::positional_args(vec![ArgValue::INT(42)]);

    let add_lob_data_rows = convert_exec_args(
        &fields,
        &mut nvargs,
        &mut Cesu8Transcoder,
        DEFAULT_LOB_WRITE_LENGTH,
    )?;

    assert_eq!(add_lob_data_rows, [0]);
    assert!(matches!(
        nvargs[0].value,
        ArgValue::HDB(HdbValue::INT(42))
    ));
    Ok(())
}

fn several_rows_are_converted_in_declared_order(_log_handle: &mut LoggerHandle) -> HdbResult<()> {
    info!("three rows with two fields each are converted in place");
    let fields = vec![
        test_utils::in_field("", TypeId::NVARCHAR),
        test_utils::in_field("", TypeId::BIGINT),
    ];
    let mut nvargs = test_utils::positional_args(vec![
        ArgValue::STRING("row1".to_string()),
        ArgValue::INT(1),
        ArgValue::STRING("row2".to_string()),
        ArgValue::INT(2),
        ArgValue::STRING("row3".to_string()),
        ArgValue::INT(3),
    ]);

    let add_lob_data_rows = convert_exec_args(
        &fields,
        &mut nvargs,
        &mut Cesu8Transcoder,
        DEFAULT_LOB_WRITE_LENGTH,
    )?;

    assert_eq!(add_lob_data_rows, [2], "only the final row is recorded");
    for (i, nvarg) in nvargs.iter().enumerate() {
        match &nvarg.value {
            ArgValue::HDB(HdbValue::STRING(bytes)) => {
                assert_eq!(bytes, format!("row{}", i / 2 + 1).as_bytes());
            }
            ArgValue::HDB(HdbValue::BIGINT(value)) => {
                assert_eq!(*value, i64::try_from(i / 2 + 1).unwrap());
            }
            other => panic!("unexpected value {other:?}"),
        }
    }
    Ok(())
}

fn lob_rows_owe_continuations(_log_handle: &mut LoggerHandle) -> HdbResult<()> {
    info!("rows whose LOB does not fit into the first chunk are recorded");
    let fields = vec![
        test_utils::in_field("", TypeId::INT),
        test_utils::in_field("", TypeId::BLOB),
    ];
    let mut nvargs = test_utils::positional_args(vec![
        ArgValue::INT(1),
        test_utils::lob_source(vec![0_u8; 10]), // fits
        ArgValue::INT(2),
        test_utils::lob_source(vec![0_u8; 500]), // does not fit
        ArgValue::INT(3),
        test_utils::lob_source(vec![0_u8; 10]), // fits
    ]);

    let add_lob_data_rows = convert_exec_args(&fields, &mut nvargs, &mut Cesu8Transcoder, 32)?;
    assert_eq!(add_lob_data_rows, [1, 2]);

    // the primed descriptor of row 1 carries the first chunk
    let ArgValue::HDB(HdbValue::LOBSTREAM(descr)) = &nvargs[3].value else {
        panic!("expected a primed LOB descriptor");
    };
    assert_eq!(descr.chunk().len(), 32);
    assert!(!descr.opts().is_last_data());
    Ok(())
}

fn arity_must_be_a_positive_multiple(_log_handle: &mut LoggerHandle) {
    info!("argument counts that are no positive multiple of the field count are rejected");
    let fields = vec![
        test_utils::in_field("", TypeId::INT),
        test_utils::in_field("", TypeId::INT),
    ];
    let mut nvargs = test_utils::positional_args(vec![
        ArgValue::INT(1),
        ArgValue::INT(2),
        ArgValue::INT(3),
    ]);

    assert!(matches!(
        convert_exec_args(&fields, &mut nvargs, &mut Cesu8Transcoder, 32),
        Err(HdbError::BatchArgCount {
            actual: 3,
            field_count: 2
        })
    ));

    let mut no_args = Vec::<NamedValue>::new();
    assert!(matches!(
        convert_exec_args(&fields, &mut no_args, &mut Cesu8Transcoder, 32),
        Err(HdbError::BatchArgCount { actual: 0, .. })
    ));
}

fn rejects_out_fields_and_out_args(_log_handle: &mut LoggerHandle) {
    info!("batched EXEC is input-only");
    let out_fields = vec![test_utils::out_field("", TypeId::INT)];
    let mut nvargs = test_utils::positional_args(vec![ArgValue::INT(1)]);
    assert!(matches!(
        convert_exec_args(&out_fields, &mut nvargs, &mut Cesu8Transcoder, 32),
        Err(HdbError::OutFieldNotAllowed { .. })
    ));

    let in_fields = vec![test_utils::in_field("", TypeId::INT)];
    let mut nvargs = test_utils::positional_args(vec![ArgValue::OUT(
        hdbconvert::OutArg::new(ArgValue::NULL),
    )]);
    assert!(matches!(
        convert_exec_args(&in_fields, &mut nvargs, &mut Cesu8Transcoder, 32),
        Err(HdbError::OutArgNotAllowed { .. })
    ));
}

fn rejects_named_args(_log_handle: &mut LoggerHandle) {
    info!("the first named argument in scan order is reported");
    let fields = vec![test_utils::in_field("ID", TypeId::INT)];
    let mut nvargs = vec![
        NamedValue::positional(1, ArgValue::INT(1)),
        NamedValue::named(2, "id", ArgValue::INT(2)),
        NamedValue::named(3, "di", ArgValue::INT(3)),
    ];

    assert!(matches!(
        convert_exec_args(&fields, &mut nvargs, &mut Cesu8Transcoder, 32),
        Err(HdbError::NamedArgNotSupported { ref name }) if name == "id"
    ));
}

fn conversion_errors_name_the_field(_log_handle: &mut LoggerHandle) {
    info!("conversion failures carry the field rendering and the cause");
    let fields = vec![test_utils::in_field("NUM", TypeId::TINYINT)];
    let mut nvargs = test_utils::positional_args(vec![ArgValue::INT(4711)]);

    match convert_exec_args(&fields, &mut nvargs, &mut Cesu8Transcoder, 32) {
        Err(HdbError::FieldConversion { field, source }) => {
            assert!(field.contains("NUM"));
            assert!(matches!(*source, HdbError::ValueRange { .. }));
        }
        other => panic!("expected a FieldConversion error, got {other:?}"),
    }
}
