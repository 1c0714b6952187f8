mod hdb_value;
mod parameter_field;
mod type_id;

pub use hdb_value::HdbValue;
pub use parameter_field::{
    ParameterBinding, ParameterDirection, ParameterField, ParameterFields,
};
pub use type_id::TypeId;
