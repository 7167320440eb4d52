//! Byte and hex-text conversion helpers.
//!
//! Used to stringify identifiers and exposed for callers that need to dump
//! raw bytes into a log line.

use std::fmt::Write;

use crate::error::HexError;

/// Converts bytes into lowercase hex text, two digits per byte, no separators.
///
/// # Examples
///
/// ```
/// # use micro_logger::hex::bytes_to_hex;
/// assert_eq!(bytes_to_hex(b"out"), "6f7574");
/// assert_eq!(bytes_to_hex(&[]), "");
/// ```
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // Writing into a String cannot fail.
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Converts hex text (either case) back into bytes.
///
/// # Errors
///
/// * [`HexError::OddLength`] when the text has an odd number of characters
/// * [`HexError::InvalidDigit`] when a pair is not hexadecimal
///
/// # Examples
///
/// ```
/// # use micro_logger::hex::hex_to_bytes;
/// assert_eq!(hex_to_bytes("6F7574").unwrap(), vec![0x6f, 0x75, 0x74]);
/// assert!(hex_to_bytes("6f757").is_err());
/// ```
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, HexError> {
    let raw = hex.as_bytes();
    if raw.len() % 2 != 0 {
        return Err(HexError::OddLength(raw.len()));
    }

    let mut out = Vec::with_capacity(raw.len() / 2);
    for (index, pair) in raw.chunks_exact(2).enumerate() {
        match (hex_digit(pair[0]), hex_digit(pair[1])) {
            (Some(high), Some(low)) => out.push((high << 4) | low),
            _ => {
                return Err(HexError::InvalidDigit {
                    offset: index * 2,
                    pair: String::from_utf8_lossy(pair).into_owned(),
                })
            }
        }
    }
    Ok(out)
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Integer types that [`bytes_to_integral`] can rebuild.
pub trait Integral: Copy {
    /// Size of the type in bytes.
    const WIDTH: usize;

    /// Keeps the low `WIDTH` bytes of `bits`.
    fn from_bits(bits: u64) -> Self;
}

macro_rules! impl_integral {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Integral for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn from_bits(bits: u64) -> Self {
                    bits as $ty
                }
            }
        )*
    };
}

impl_integral!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Rebuilds an integer from a byte sequence, most significant byte first.
///
/// The function has no idea which endianness produced the bytes; converting
/// the result (e.g. with `i32::from_be`) is up to the caller. Inputs shorter
/// than `T` are zero-extended.
///
/// # Errors
///
/// [`HexError::UnsupportedLength`] unless the input is exactly 1, 2, 4 or 8
/// bytes long and no wider than `T`.
///
/// # Examples
///
/// ```
/// # use micro_logger::hex::bytes_to_integral;
/// let value: i32 = bytes_to_integral(&[0xff, 0xff, 0xfd, 0x66]).unwrap();
/// assert_eq!(value, -666);
/// assert!(bytes_to_integral::<i32>(&[0, 0, 1]).is_err());
/// ```
pub fn bytes_to_integral<T: Integral>(bytes: &[u8]) -> Result<T, HexError> {
    let len = bytes.len();
    if !matches!(len, 1 | 2 | 4 | 8) || len > T::WIDTH {
        return Err(HexError::UnsupportedLength { len, max: T::WIDTH });
    }
    let bits = bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));
    Ok(T::from_bits(bits))
}
