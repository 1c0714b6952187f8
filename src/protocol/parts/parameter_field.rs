use crate::{
    named_value::ArgValue,
    protocol::{cesu8, util_sync},
    types_impl::lob::LobInDescr,
    HdbError, HdbResult, HdbValue, Transcoder, TypeId,
};
use bigdecimal::BigDecimal;
use byteorder::{LittleEndian, ReadBytesExt};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// Option bits of the fixed metadata part.
const OPTION_MANDATORY: u8 = 0b_0000_0001;
const OPTION_OPTIONAL: u8 = 0b_0000_0010;
const OPTION_HAS_DEFAULT: u8 = 0b_0000_0100;

/// The parameters of a prepared statement, in declared order. Can be empty.
#[derive(Debug, Default)]
pub struct ParameterFields(Vec<ParameterField>);

impl ParameterFields {
    /// Iterates over the parameters that take input (IN and INOUT).
    pub fn iter_in(&self) -> impl std::iter::Iterator<Item = &ParameterField> {
        self.0.iter().filter(|f| f.is_in())
    }

    /// Iterates over the parameters that deliver output (INOUT and OUT).
    pub fn iter_out(&self) -> impl std::iter::Iterator<Item = &ParameterField> {
        self.0.iter().filter(|f| f.is_out())
    }

    /// Returns true if at least one parameter takes input.
    pub fn has_in(&self) -> bool {
        self.iter_in().next().is_some()
    }

    /// Returns the number of contained fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true exactly if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The fields in declaration order, as expected by the conversion
    /// entry points.
    pub fn as_slice(&self) -> &[ParameterField] {
        &self.0
    }

    /// Parses the parameter metadata of a PREPARE reply.
    ///
    /// The part consists of one 16-byte record per parameter, followed by a
    /// block of length-prefixed CESU-8 names for the parameters that have
    /// one (a name offset of `u32::MAX` in the record means "unnamed").
    ///
    /// # Errors
    ///
    /// `HdbError::Io` if the reader is exhausted early, `HdbError::ImplDetailed`
    /// for type codes or direction values this crate does not handle.
    pub fn parse(count: usize, rdr: &mut dyn std::io::Read) -> HdbResult<Self> {
        let mut pairs = Vec::<(ParameterField, u32)>::with_capacity(count);
        for _ in 0..count {
            let option_bits = rdr.read_u8()?;
            let type_code = rdr.read_u8()?;
            let direction = direction_from_wire(rdr.read_u8()?)?;
            rdr.read_u8()?; // filler
            let name_offset = rdr.read_u32::<LittleEndian>()?;
            let precision = rdr.read_i16::<LittleEndian>()?;
            let scale = rdr.read_i16::<LittleEndian>()?;
            rdr.read_u32::<LittleEndian>()?; // unused
            pairs.push((
                ParameterField::new(
                    None,
                    TypeId::try_new(type_code)?,
                    binding_from_wire(option_bits),
                    direction,
                    precision,
                    scale,
                ),
                name_offset,
            ));
        }

        let mut fields = Vec::<ParameterField>::with_capacity(count);
        for (mut field, name_offset) in pairs {
            if name_offset != u32::MAX {
                let name_len = usize::from(rdr.read_u8()?);
                field.set_name(cesu8::string_from_cesu8(util_sync::parse_bytes(
                    name_len, rdr,
                )?)?);
            }
            fields.push(field);
        }
        Ok(Self(fields))
    }
}

impl From<Vec<ParameterField>> for ParameterFields {
    fn from(fields: Vec<ParameterField>) -> Self {
        Self(fields)
    }
}

impl std::ops::Index<usize> for ParameterFields {
    type Output = ParameterField;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Metadata and conversion capability for a single parameter.
#[derive(Clone, Debug)]
pub struct ParameterField {
    name: Option<String>,
    type_id: TypeId,
    binding: ParameterBinding,
    scale: i16,
    precision: i16,
    direction: ParameterDirection,
}

impl ParameterField {
    /// Builds a field from already-evaluated metadata; used by the protocol
    /// layer where the metadata does not come directly off the wire.
    pub fn new(
        name: Option<String>,
        type_id: TypeId,
        binding: ParameterBinding,
        direction: ParameterDirection,
        precision: i16,
        scale: i16,
    ) -> Self {
        Self {
            name,
            type_id,
            binding,
            scale,
            precision,
            direction,
        }
    }

    /// The parameter's nullability.
    pub fn binding(&self) -> ParameterBinding {
        self.binding
    }

    /// Returns true if the parameter can be set to NULL.
    pub fn is_nullable(&self) -> bool {
        matches!(self.binding, ParameterBinding::Optional)
    }

    /// Returns true if the parameter has a default value.
    pub fn has_default(&self) -> bool {
        matches!(self.binding, ParameterBinding::HasDefault)
    }

    /// Returns the type id of the parameter.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Scale.
    pub fn scale(&self) -> i16 {
        self.scale
    }

    /// Precision.
    pub fn precision(&self) -> i16 {
        self.precision
    }

    /// The parameter's data flow.
    pub fn direction(&self) -> ParameterDirection {
        self.direction.clone()
    }

    /// Returns true if the parameter accepts input (IN or INOUT).
    pub fn is_in(&self) -> bool {
        matches!(
            self.direction,
            ParameterDirection::IN | ParameterDirection::INOUT
        )
    }

    /// Returns true if the parameter produces output (INOUT or OUT).
    pub fn is_out(&self) -> bool {
        matches!(
            self.direction,
            ParameterDirection::INOUT | ParameterDirection::OUT
        )
    }

    /// Returns the name of the parameter, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Converts a caller-side value into the protocol value for this field.
    ///
    /// Conversion is lossless; values that do not fit the field's type or
    /// range produce an error. The transcoder is applied to string values
    /// bound to the character types; LOB-typed fields yield a
    /// [`LobInDescr`] whose first chunk is not yet fetched.
    ///
    /// # Errors
    ///
    /// `HdbError::ValueConversion`, `HdbError::ValueRange`,
    /// `HdbError::NotNullable`, or `HdbError::Cesu8`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn convert(
        &self,
        value: ArgValue,
        transcoder: &mut dyn Transcoder,
    ) -> HdbResult<HdbValue> {
        if value.is_nil() {
            return if self.is_nullable() || self.has_default() {
                Ok(HdbValue::NULL)
            } else {
                Err(HdbError::NotNullable {
                    field: self.to_string(),
                })
            };
        }

        // peel explicit indirection levels
        let mut value = value;
        while let ArgValue::INDIRECT(Some(inner)) = value {
            value = *inner;
        }

        // values provided in protocol form are bound as they are
        if let ArgValue::HDB(hdb_value) = value {
            return Ok(hdb_value);
        }

        Ok(match self.type_id {
            TypeId::TINYINT => match value {
                ArgValue::INT(i) => {
                    HdbValue::TINYINT(u8::try_from(i).map_err(|_| self.range_error(i))?)
                }
                ArgValue::BOOLEAN(b) => HdbValue::TINYINT(u8::from(b)),
                other => return Err(self.conversion_error(&other)),
            },
            TypeId::SMALLINT => match value {
                ArgValue::INT(i) => {
                    HdbValue::SMALLINT(i16::try_from(i).map_err(|_| self.range_error(i))?)
                }
                ArgValue::BOOLEAN(b) => HdbValue::SMALLINT(i16::from(b)),
                other => return Err(self.conversion_error(&other)),
            },
            TypeId::INT => match value {
                ArgValue::INT(i) => {
                    HdbValue::INT(i32::try_from(i).map_err(|_| self.range_error(i))?)
                }
                ArgValue::BOOLEAN(b) => HdbValue::INT(i32::from(b)),
                other => return Err(self.conversion_error(&other)),
            },
            TypeId::BIGINT => match value {
                ArgValue::INT(i) => HdbValue::BIGINT(i),
                ArgValue::BOOLEAN(b) => HdbValue::BIGINT(i64::from(b)),
                other => return Err(self.conversion_error(&other)),
            },
            TypeId::REAL => match value {
                ArgValue::DOUBLE(d) => HdbValue::REAL(d as f32),
                ArgValue::INT(i) => HdbValue::REAL(i as f32),
                other => return Err(self.conversion_error(&other)),
            },
            TypeId::DOUBLE => match value {
                ArgValue::DOUBLE(d) => HdbValue::DOUBLE(d),
                ArgValue::INT(i) => HdbValue::DOUBLE(i as f64),
                other => return Err(self.conversion_error(&other)),
            },
            TypeId::BOOLEAN => match value {
                ArgValue::BOOLEAN(b) => HdbValue::BOOLEAN(b),
                other => return Err(self.conversion_error(&other)),
            },
            TypeId::DECIMAL | TypeId::FIXED8 | TypeId::FIXED12 | TypeId::FIXED16 => match value {
                ArgValue::DECIMAL(bd) => HdbValue::DECIMAL(bd),
                ArgValue::INT(i) => HdbValue::DECIMAL(BigDecimal::from(i)),
                ArgValue::STRING(s) => HdbValue::DECIMAL(
                    BigDecimal::from_str(&s).map_err(|_| HdbError::ValueConversion {
                        kind: "STRING",
                        type_id: self.type_id,
                    })?,
                ),
                other => return Err(self.conversion_error(&other)),
            },
            TypeId::CHAR
            | TypeId::VARCHAR
            | TypeId::NCHAR
            | TypeId::NVARCHAR
            | TypeId::STRING
            | TypeId::NSTRING
            | TypeId::SHORTTEXT
            | TypeId::ALPHANUM => match value {
                ArgValue::STRING(s) => HdbValue::STRING(transcoder.transcode(s.as_bytes())?),
                other => return Err(self.conversion_error(&other)),
            },
            TypeId::BINARY | TypeId::VARBINARY => match value {
                ArgValue::BINARY(bytes) => HdbValue::BINARY(bytes),
                other => return Err(self.conversion_error(&other)),
            },
            TypeId::CLOB | TypeId::NCLOB | TypeId::TEXT => match value {
                ArgValue::STRING(s) => {
                    let rdr: Arc<Mutex<dyn std::io::Read + Send>> =
                        Arc::new(Mutex::new(std::io::Cursor::new(s.into_bytes())));
                    HdbValue::LOBSTREAM(LobInDescr::new(rdr, true))
                }
                ArgValue::LOBSTREAM(rdr) => HdbValue::LOBSTREAM(LobInDescr::new(rdr, true)),
                other => return Err(self.conversion_error(&other)),
            },
            TypeId::BLOB => match value {
                ArgValue::BINARY(bytes) => {
                    let rdr: Arc<Mutex<dyn std::io::Read + Send>> =
                        Arc::new(Mutex::new(std::io::Cursor::new(bytes)));
                    HdbValue::LOBSTREAM(LobInDescr::new(rdr, false))
                }
                ArgValue::LOBSTREAM(rdr) => HdbValue::LOBSTREAM(LobInDescr::new(rdr, false)),
                other => return Err(self.conversion_error(&other)),
            },
        })
    }

    fn range_error<V: std::fmt::Display>(&self, value: V) -> HdbError {
        HdbError::ValueRange {
            value: value.to_string(),
            type_id: self.type_id,
        }
    }

    fn conversion_error(&self, value: &ArgValue) -> HdbError {
        HdbError::ValueConversion {
            kind: value.kind(),
            type_id: self.type_id,
        }
    }
}

// The wire encodes the direction one-hot in the low three bits.
fn direction_from_wire(bits: u8) -> HdbResult<ParameterDirection> {
    match bits {
        0b001 => Ok(ParameterDirection::IN),
        0b010 => Ok(ParameterDirection::INOUT),
        0b100 => Ok(ParameterDirection::OUT),
        _ => Err(HdbError::ImplDetailed(format!(
            "parameter direction {bits:#05b} is not one of IN, INOUT, OUT"
        ))),
    }
}

fn binding_from_wire(option_bits: u8) -> ParameterBinding {
    if option_bits & OPTION_MANDATORY != 0 {
        ParameterBinding::Mandatory
    } else if option_bits & OPTION_OPTIONAL != 0 {
        ParameterBinding::Optional
    } else {
        if option_bits & OPTION_HAS_DEFAULT == 0 {
            log::warn!("parameter metadata with option bits {option_bits:#b}, treating as HasDefault");
        }
        ParameterBinding::HasDefault
    }
}

impl std::fmt::Display for ParameterField {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if let Some(ref name) = self.name {
            write!(f, "\"{name}\" ")?;
        }
        write!(f, "{:?} {:?} {:?}", self.type_id, self.direction, self.binding)?;
        if self.precision != 0 || self.scale != 0 {
            write!(f, " ({}, {})", self.precision, self.scale)?;
        }
        Ok(())
    }
}

/// Nullability of a parameter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParameterBinding {
    /// The parameter must be supplied with a non-NULL value.
    Mandatory,
    /// The parameter accepts NULL.
    Optional,
    /// The parameter falls back to its declared DEFAULT value.
    HasDefault,
}

/// Data flow of a parameter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParameterDirection {
    /// Input only.
    IN,
    /// Input and output.
    INOUT,
    /// Output only.
    OUT,
}
