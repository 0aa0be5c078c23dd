//! The rencode typecode table.
//!
//! The bencode typecodes (`i`, `l`, `d`, ...) have been extended and relocated across the
//! full byte range. Small integers, short strings and short containers fold their value or
//! length into the leading byte; everything else uses an explicit tag plus payload.
//!
//! | Bytes      | Meaning                                       |
//! |------------|-----------------------------------------------|
//! | `0..44`    | positive integer `byte`                       |
//! | `44`       | 64-bit float, 8 bytes big-endian              |
//! | `48..=57`  | long byte string: `<decimal length>:<bytes>`  |
//! | `59`       | list, closed by `127`                         |
//! | `60`       | dictionary, closed by `127`                   |
//! | `61`       | big number, ASCII decimal closed by `127`     |
//! | `62..=65`  | signed integer, 1/2/4/8 bytes big-endian      |
//! | `66`       | 32-bit float, 4 bytes big-endian              |
//! | `67..=69`  | true, false, none                             |
//! | `70..102`  | negative integer `-1 - (byte - 70)`           |
//! | `102..127` | dictionary of `byte - 102` pairs              |
//! | `127`      | terminator                                    |
//! | `128..192` | byte string of `byte - 128` bytes             |
//! | `192..=255`| list of `byte - 192` elements                 |

/// Maximum length of an integer written as a base-10 string, sign included.
pub const MAX_INT_LENGTH: usize = 64;

pub const CHR_LIST: u8 = 59;
pub const CHR_DICT: u8 = 60;
pub const CHR_INT: u8 = 61;
pub const CHR_INT1: u8 = 62;
pub const CHR_INT2: u8 = 63;
pub const CHR_INT4: u8 = 64;
pub const CHR_INT8: u8 = 65;
pub const CHR_FLOAT32: u8 = 66;
pub const CHR_FLOAT64: u8 = 44;
pub const CHR_TRUE: u8 = 67;
pub const CHR_FALSE: u8 = 68;
pub const CHR_NONE: u8 = 69;
pub const CHR_TERM: u8 = 127;

/// Separator between a long string's decimal length and its bytes.
pub const LENGTH_DELIMITER: u8 = b':';

pub const INT_POS_FIXED_START: u8 = 0;
pub const INT_POS_FIXED_COUNT: u8 = 44;

pub const INT_NEG_FIXED_START: u8 = 70;
pub const INT_NEG_FIXED_COUNT: u8 = 32;

pub const DICT_FIXED_START: u8 = 102;
pub const DICT_FIXED_COUNT: u8 = 25;

pub const STR_FIXED_START: u8 = 128;
pub const STR_FIXED_COUNT: u8 = 64;

pub const LIST_FIXED_START: u8 = STR_FIXED_START + STR_FIXED_COUNT;
pub const LIST_FIXED_COUNT: u8 = 64;

/// Meaning of a leading byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Typecode {
    /// Positive integer embedded in the byte.
    PosFixed(i8),
    /// Negative integer embedded in the byte.
    NegFixed(i8),
    /// Byte string whose length is embedded in the byte.
    BytesFixed(usize),
    /// List whose element count is embedded in the byte.
    ListFixed(usize),
    /// Dictionary whose pair count is embedded in the byte.
    DictFixed(usize),
    /// ASCII digit: first character of a long string's length prefix.
    LongBytes,
    ListTerminated,
    DictTerminated,
    BigNumber,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    True,
    False,
    None,
    Terminator,
    Unknown,
}

impl Typecode {
    /// Classify a leading byte.
    ///
    /// ASCII digits are checked before anything else: they mark a long string and never
    /// overlap the embedded-integer range, but are easy to confuse with it.
    pub fn classify(byte: u8) -> Typecode {
        if byte.is_ascii_digit() {
            return Typecode::LongBytes;
        }
        match byte {
            b if is_pos_fixed(b) => Typecode::PosFixed((b - INT_POS_FIXED_START) as i8),
            CHR_FLOAT64 => Typecode::Float64,
            CHR_LIST => Typecode::ListTerminated,
            CHR_DICT => Typecode::DictTerminated,
            CHR_INT => Typecode::BigNumber,
            CHR_INT1 => Typecode::Int8,
            CHR_INT2 => Typecode::Int16,
            CHR_INT4 => Typecode::Int32,
            CHR_INT8 => Typecode::Int64,
            CHR_FLOAT32 => Typecode::Float32,
            CHR_TRUE => Typecode::True,
            CHR_FALSE => Typecode::False,
            CHR_NONE => Typecode::None,
            b if is_neg_fixed(b) => Typecode::NegFixed(-1 - (b - INT_NEG_FIXED_START) as i8),
            b if is_dict_fixed(b) => Typecode::DictFixed((b - DICT_FIXED_START) as usize),
            CHR_TERM => Typecode::Terminator,
            b if is_str_fixed(b) => Typecode::BytesFixed((b - STR_FIXED_START) as usize),
            b if is_list_fixed(b) => Typecode::ListFixed((b - LIST_FIXED_START) as usize),
            _ => Typecode::Unknown,
        }
    }
}

pub fn is_pos_fixed(byte: u8) -> bool {
    (INT_POS_FIXED_START..INT_POS_FIXED_START + INT_POS_FIXED_COUNT).contains(&byte)
}

pub fn is_neg_fixed(byte: u8) -> bool {
    (INT_NEG_FIXED_START..INT_NEG_FIXED_START + INT_NEG_FIXED_COUNT).contains(&byte)
}

pub fn is_dict_fixed(byte: u8) -> bool {
    (DICT_FIXED_START..DICT_FIXED_START + DICT_FIXED_COUNT).contains(&byte)
}

pub fn is_str_fixed(byte: u8) -> bool {
    (STR_FIXED_START..STR_FIXED_START + STR_FIXED_COUNT).contains(&byte)
}

pub fn is_list_fixed(byte: u8) -> bool {
    byte >= LIST_FIXED_START
}
