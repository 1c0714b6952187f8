//! Argument conversion and parameter binding for SAP HANA (TM) drivers.
//!
//! `hdbconvert` implements the layer of a HANA client driver that reconciles
//! the loosely-typed caller-side argument space with the strictly-typed
//! parameter fields of a prepared statement. It covers the three calling
//! modes the protocol distinguishes:
//!
//! * batched EXEC ([`convert_exec_args`]): input-only, positional, any
//!   positive number of parameter rows per roundtrip,
//! * single-row QUERY ([`convert_query_args`]): input-only, positional,
//! * procedure CALL ([`convert_call_args`]): named arguments, output
//!   parameters, and trailing table-valued outputs.
//!
//! Arguments are given as [`NamedValue`]s over the caller-side value space
//! [`ArgValue`]; the parameter metadata comes as [`ParameterField`]s, which
//! the surrounding protocol layer parses from the server's PREPARE reply
//! (see [`ParameterFields::parse`]). Conversion replaces each argument value
//! with its protocol-domain form ([`HdbValue`]) and pulls the first chunk of
//! every large object so that the protocol layer knows which rows owe the
//! server additional LOB roundtrips.

#![deny(missing_debug_implementations)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod conversion;
pub mod hdb_error;
pub mod named_value;
pub mod protocol;
pub mod types_impl;

pub use crate::conversion::{convert_call_args, convert_exec_args, convert_query_args, CallArgs};
pub use crate::hdb_error::{HdbError, HdbResult};
pub use crate::named_value::{ArgValue, NamedValue, OutArg, ProduceValue};
pub use crate::protocol::cesu8::{Cesu8Transcoder, Transcoder};
pub use crate::protocol::parts::{
    HdbValue, ParameterBinding, ParameterDirection, ParameterField, ParameterFields, TypeId,
};
pub use crate::types_impl::lob::{LobInDescr, LobInOptions};

/// Number of bytes that are sent to the database in a single LOB WRITE
/// roundtrip; the constant's value is 16,000,000.
///
/// This is the default chunk size handed to the conversion entry points;
/// the value used at runtime is owned by the connection configuration.
pub const DEFAULT_LOB_WRITE_LENGTH: usize = 16_000_000;
