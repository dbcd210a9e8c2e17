//! Keypad meaning of the raw matrix codes
//!
//! The 4x4 matrix yields codes 0..16: the first ten are digits, the
//! remaining six the operator/control keys. The core never interprets
//! these; apps do, through this module.

pub const KEY_0: u8 = 0;
pub const KEY_1: u8 = 1;
pub const KEY_2: u8 = 2;
pub const KEY_3: u8 = 3;
pub const KEY_4: u8 = 4;
pub const KEY_5: u8 = 5;
pub const KEY_6: u8 = 6;
pub const KEY_7: u8 = 7;
pub const KEY_8: u8 = 8;
pub const KEY_9: u8 = 9;
pub const KEY_PLUS: u8 = 10;
pub const KEY_MINUS: u8 = 11;
pub const KEY_MULTIPLY: u8 = 12;
pub const KEY_DIVIDE: u8 = 13;
pub const KEY_EQUAL: u8 = 14;
pub const KEY_CLEAR: u8 = 15;

/// Digit value of `code`, if it is a digit key
pub const fn digit(code: u8) -> Option<u8> {
    if code <= KEY_9 {
        Some(code)
    } else {
        None
    }
}

/// Printable label of `code`, if any
pub const fn label(code: u8) -> Option<&'static str> {
    match code {
        KEY_0 => Some("0"),
        KEY_1 => Some("1"),
        KEY_2 => Some("2"),
        KEY_3 => Some("3"),
        KEY_4 => Some("4"),
        KEY_5 => Some("5"),
        KEY_6 => Some("6"),
        KEY_7 => Some("7"),
        KEY_8 => Some("8"),
        KEY_9 => Some("9"),
        KEY_PLUS => Some("+"),
        KEY_MINUS => Some("-"),
        KEY_MULTIPLY => Some("*"),
        KEY_DIVIDE => Some("/"),
        KEY_EQUAL => Some("="),
        KEY_CLEAR => Some("C"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_mapping() {
        assert_eq!(digit(KEY_0), Some(0));
        assert_eq!(digit(KEY_9), Some(9));
        assert_eq!(digit(KEY_PLUS), None);
    }

    #[test]
    fn test_labels_cover_matrix() {
        for code in 0..16 {
            assert!(label(code).is_some());
        }
        assert_eq!(label(16), None);
    }
}
