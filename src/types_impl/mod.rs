//! Implementation of the non-scalar parameter types.

pub mod lob;
