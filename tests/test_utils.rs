// advisable because not all test modules use all functions of this module:
#![allow(dead_code)]

use flexi_logger::{opt_format, Logger, LoggerHandle};
use hdbconvert::{
    ArgValue, NamedValue, ParameterBinding, ParameterDirection, ParameterField, TypeId,
};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

// Returns a logger that prints out all info, warn and error messages.
pub fn init_logger() -> LoggerHandle {
    Logger::try_with_env_or_str("info")
        .unwrap()
        .format(opt_format)
        .start()
        .unwrap_or_else(|e| panic!("Logger initialization failed with {e}"))
}

pub fn in_field(name: &str, type_id: TypeId) -> ParameterField {
    field(name, type_id, ParameterDirection::IN)
}

pub fn out_field(name: &str, type_id: TypeId) -> ParameterField {
    field(name, type_id, ParameterDirection::OUT)
}

pub fn inout_field(name: &str, type_id: TypeId) -> ParameterField {
    field(name, type_id, ParameterDirection::INOUT)
}

pub fn field(name: &str, type_id: TypeId, direction: ParameterDirection) -> ParameterField {
    ParameterField::new(
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        },
        type_id,
        ParameterBinding::Optional,
        direction,
        0,
        0,
    )
}

// Builds a positional argument list from the given values, with ordinals
// starting at 1.
pub fn positional_args(values: Vec<ArgValue>) -> Vec<NamedValue> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| NamedValue::positional(i + 1, value))
        .collect()
}

// A LOB source over in-memory bytes.
pub fn lob_source(bytes: Vec<u8>) -> ArgValue {
    let rdr: Arc<Mutex<dyn std::io::Read + Send>> = Arc::new(Mutex::new(Cursor::new(bytes)));
    ArgValue::LOBSTREAM(rdr)
}
