use micro_logger::{bytes_to_hex, bytes_to_integral, hex_to_bytes, HexError};

#[test]
fn test_round_trip_all_byte_values() {
    let bytes: Vec<u8> = (0..=255).collect();
    let hex = bytes_to_hex(&bytes);
    assert_eq!(hex.len(), 512, "Every byte should take two digits");
    assert_eq!(hex_to_bytes(&hex).unwrap(), bytes);
}

#[test]
fn test_known_text() {
    assert_eq!(bytes_to_hex(b"out"), "6f7574");
    assert_eq!(hex_to_bytes("6f7574").unwrap(), b"out");
    assert_eq!(hex_to_bytes("DeadBEEF").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
}

#[test]
fn test_odd_length_rejected() {
    assert_eq!(hex_to_bytes("6f757"), Err(HexError::OddLength(5)));
}

#[test]
fn test_invalid_digit_reports_offset() {
    match hex_to_bytes("6f7g74") {
        Err(HexError::InvalidDigit { offset, pair }) => {
            assert_eq!(offset, 2);
            assert_eq!(pair, "7g");
        }
        other => panic!("Expected InvalidDigit, got {other:?}"),
    }
    assert!(hex_to_bytes("0x").is_err());
}

#[test]
fn test_integral_big_endian_bytes() {
    let value: i32 = bytes_to_integral(&666i32.to_be_bytes()).unwrap();
    assert_eq!(value, 666);

    let value: i32 = bytes_to_integral(&(-666i32).to_be_bytes()).unwrap();
    assert_eq!(value, -666);

    let value: u64 = bytes_to_integral(&0x0102_0304_0506_0708u64.to_be_bytes()).unwrap();
    assert_eq!(value, 0x0102_0304_0506_0708);
}

#[test]
fn test_integral_little_endian_bytes_need_swapping() {
    // Bytes are always read most significant first
    let raw: i32 = bytes_to_integral(&666i32.to_le_bytes()).unwrap();
    assert_ne!(raw, 666);
    assert_eq!(raw.swap_bytes(), 666);
}

#[test]
fn test_integral_from_hex_text() {
    let bytes = hex_to_bytes("fffffd66").unwrap();
    assert_eq!(bytes_to_integral::<i32>(&bytes).unwrap(), -666);
}

#[test]
fn test_integral_shorter_input_zero_extended() {
    assert_eq!(bytes_to_integral::<u32>(&[0x12, 0x34]).unwrap(), 0x1234);
    assert_eq!(bytes_to_integral::<i64>(&[0xff]).unwrap(), 0xff);
}

#[test]
fn test_integral_unsupported_lengths() {
    assert_eq!(
        bytes_to_integral::<i32>(&[0, 0, 1]),
        Err(HexError::UnsupportedLength { len: 3, max: 4 })
    );
    assert!(bytes_to_integral::<i32>(&[]).is_err());
    assert!(bytes_to_integral::<u16>(&[1, 2, 3, 4]).is_err());
    assert!(bytes_to_integral::<u64>(&[0; 16]).is_err());
}
