use crate::{HdbError, HdbResult};

/// ID of the value type of a parameter.
///
/// The discriminants are the type codes of the wire protocol. Only the
/// types that can occur as parameters of prepared statements are listed;
/// codes the conversion layer does not handle are rejected during metadata
/// parsing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeId {
    /// For database type TINYINT.
    TINYINT = 1,
    /// For database type SMALLINT.
    SMALLINT = 2,
    /// For database type INT.
    INT = 3,
    /// For database type BIGINT.
    BIGINT = 4,
    /// For database type DECIMAL and SMALLDECIMAL.
    DECIMAL = 5,
    /// For database type REAL.
    REAL = 6,
    /// For database type DOUBLE.
    DOUBLE = 7,
    /// For database type CHAR.
    CHAR = 8,
    /// For database type VARCHAR.
    VARCHAR = 9,
    /// For database type NCHAR.
    NCHAR = 10,
    /// For database type NVARCHAR.
    NVARCHAR = 11,
    /// For database type BINARY.
    BINARY = 12,
    /// For database type VARBINARY.
    VARBINARY = 13,
    /// For database type CLOB.
    CLOB = 25,
    /// For database type NCLOB.
    NCLOB = 26,
    /// For database type BLOB.
    BLOB = 27,
    /// For database type BOOLEAN.
    BOOLEAN = 28,
    /// For database type STRING.
    STRING = 29,
    /// For database type NSTRING.
    NSTRING = 30,
    /// For database type TEXT.
    TEXT = 51,
    /// For database type SHORTTEXT.
    SHORTTEXT = 52,
    /// For database type ALPHANUM.
    ALPHANUM = 55,
    /// Transport format for database type DECIMAL.
    FIXED16 = 76,
    /// Transport format for database type DECIMAL.
    FIXED8 = 81,
    /// Transport format for database type DECIMAL.
    FIXED12 = 82,
}

impl TypeId {
    pub(crate) fn try_new(id: u8) -> HdbResult<Self> {
        Ok(match id {
            1 => Self::TINYINT,
            2 => Self::SMALLINT,
            3 => Self::INT,
            4 => Self::BIGINT,
            5 => Self::DECIMAL,
            6 => Self::REAL,
            7 => Self::DOUBLE,
            8 => Self::CHAR,
            9 => Self::VARCHAR,
            10 => Self::NCHAR,
            11 => Self::NVARCHAR,
            12 => Self::BINARY,
            13 => Self::VARBINARY,
            // DATE: 14, TIME: 15, TIMESTAMP: 16 (deprecated with protocol version 3)
            25 => Self::CLOB,
            26 => Self::NCLOB,
            27 => Self::BLOB,
            28 => Self::BOOLEAN,
            29 => Self::STRING,
            30 => Self::NSTRING,
            51 => Self::TEXT,
            52 => Self::SHORTTEXT,
            55 => Self::ALPHANUM,
            76 => Self::FIXED16,
            81 => Self::FIXED8,
            82 => Self::FIXED12,
            tc => return Err(HdbError::ImplDetailed(format!("unknown type code {tc}"))),
        })
    }
}
