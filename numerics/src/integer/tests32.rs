use super::{Int16, Int32, Int8};
use crate::error::ArithmeticError;

#[test]
fn test_find_msb_walks_down_set_bits() {
    let mut x = Int32::ZERO;
    x.set_raw_bits(0xD555_5555);
    assert!(x.is_negative());
    let mut found = Vec::new();
    loop {
        let msb = x.find_msb();
        found.push(msb);
        if msb < 0 {
            break;
        }
        x.reset(msb as usize).expect("find_msb returns a valid index");
    }
    assert_eq!(
        found,
        vec![31, 30, 28, 26, 24, 22, 20, 18, 16, 14, 12, 10, 8, 6, 4, 2, 0, -1]
    );
}

#[test]
fn test_find_msb_of_single_bits() {
    for k in 0..32_i32 {
        let x = Int32::ONE << k;
        assert_eq!(x.find_msb(), k);
    }
    assert_eq!(Int32::ZERO.find_msb(), -1);
}

#[test]
fn test_parse_hex_into_16_bits() {
    assert_eq!("0x1A".parse::<Int16>(), Ok(Int16::from(26_i16)));
    assert_eq!("0Xff'ff".parse::<Int16>(), Ok(Int16::from(-1_i16)));
    assert_eq!("-0x10".parse::<Int16>(), Ok(Int16::from(-16_i16)));
    // Separators may appear anywhere after the prefix.
    assert_eq!("0x'1A".parse::<Int16>(), Ok(Int16::from(26_i16)));
    assert_eq!("0x1'A'".parse::<Int16>(), Ok(Int16::from(26_i16)));
    assert_eq!("0x''".parse::<Int16>(), Ok(Int16::ZERO));
}

#[test]
fn test_assign_resets_to_zero_on_failure() {
    let mut x = Int32::from(99_i32);
    assert!(x.assign("not a number").is_err());
    assert_eq!(x, 0);
    assert_eq!(x.assign("1'000'000"), Ok(()));
    assert_eq!(x, 1_000_000);
}

#[test]
fn test_divide_by_zero_is_reported() {
    let x = Int32::from(7_i32);
    assert_eq!(x.div_rem(&Int32::ZERO), Err(ArithmeticError::DivideByZero));
    assert_eq!(x.divide(&Int32::ZERO), Err(ArithmeticError::DivideByZero));
    assert_eq!(x.remainder(&Int32::ZERO), Err(ArithmeticError::DivideByZero));
    assert_eq!(x.checked_div(&Int32::ZERO), None);
    assert_eq!(x.checked_rem(&Int32::ZERO), None);
}

#[cfg(not(feature = "lenient-divide-by-zero"))]
#[test]
#[should_panic(expected = "attempt to divide by zero")]
fn test_divide_operator_panics_on_zero() {
    let _ = Int32::from(7_i32) / Int32::ZERO;
}

#[cfg(feature = "lenient-divide-by-zero")]
#[test]
fn test_lenient_divide_by_zero() {
    let x = Int32::from(7_i32);
    assert_eq!(x / Int32::ZERO, 0);
    assert_eq!(x % Int32::ZERO, 7);
}

#[test]
fn test_division_truncates_towards_zero() {
    let cases: [(i32, i32); 6] = [(7, 2), (-7, 2), (7, -2), (-7, -2), (1, 7), (-1, 7)];
    for (a, b) in cases {
        let result = Int32::from(a)
            .div_rem(&Int32::from(b))
            .expect("divisor is not zero");
        assert_eq!(result.quotient, i64::from(a / b), "{a} / {b}");
        assert_eq!(result.remainder, i64::from(a % b), "{a} % {b}");
    }
}

#[test]
fn test_from_f64() {
    assert_eq!(Int32::from(3.9_f64), 3);
    assert_eq!(Int32::from(-3.9_f64), -3);
    assert_eq!(Int32::from(-0.5_f64), 0);
    assert_eq!(Int32::from(f64::NAN), 0);
    assert_eq!(Int32::from(f64::INFINITY), Int32::MAX);
    assert_eq!(Int32::from(f64::NEG_INFINITY), Int32::MIN);
    assert_eq!(Int32::from(1e20_f64), Int32::MAX);
    assert_eq!(Int32::from(-1e20_f64), Int32::MIN);
    assert_eq!(Int32::from(2147483647.0_f64), Int32::MAX);
    assert_eq!(Int32::from(-2147483648.0_f64), Int32::MIN);
    assert_eq!(Int32::from(1073741824.5_f32), 1073741824);
}

#[test]
fn test_to_float() {
    assert_eq!(Int32::from(-123456_i32).to_f64(), -123456.0);
    assert_eq!(Int32::MIN.to_f64(), -2147483648.0);
    assert_eq!(Int32::MAX.to_f32(), 2147483648.0_f32);
}

#[test]
fn test_formatting() {
    let x = Int32::from(-123456_i32);
    assert_eq!(format!("{x}"), "-123456");
    assert_eq!(format!("{x:>10}"), "   -123456");
    assert_eq!(format!("{x:<10}|"), "-123456   |");
    assert_eq!(format!("{x:010}"), "-000123456");
    assert_eq!(format!("{x:?}"), "Integer<32>(-123456)");
    assert_eq!(Int32::MIN.to_string(), "-2147483648");
}

#[test]
fn test_width_changes() {
    let small = Int8::from(-2_i8);
    assert_eq!(Int32::sign_extend_from(&small), -2);
    assert_eq!(Int32::bitcopy(&small), 254);
    let big = Int32::from(0x1234_5680_i32);
    assert_eq!(Int8::bitcopy(&big), -128);
    assert_eq!(Int8::sign_extend_from(&big), -128);
}

#[test]
fn test_byte_access() {
    let mut x = Int32::ZERO;
    x.set_byte(3, 0x80).expect("byte 3 exists");
    assert_eq!(x, Int32::MIN);
    x.set_byte(0, 0x01).expect("byte 0 exists");
    assert_eq!(x.block(0), Ok(0x01));
    assert_eq!(x.byte(3), Ok(0x80));
    assert!(x.set_byte(4, 0).is_err());
}

#[test]
fn test_scale() {
    assert_eq!(Int32::MIN.scale(), 31);
    assert_eq!(Int32::from(1024_i32).scale(), 10);
    assert_eq!(Int32::from(-1025_i32).scale(), 10);
    assert_eq!(Int32::ZERO.scale(), 0);
}

#[test]
fn test_parity_and_sign() {
    assert!(Int32::from(-3_i32).is_odd());
    assert!(Int32::from(-4_i32).is_even());
    assert!(Int32::from(-4_i32).sign());
    assert!(!Int32::ZERO.sign());
}

#[test]
fn test_serde_uses_decimal_strings() {
    let x = Int32::from(-42_i32);
    let json = serde_json::to_string(&x).expect("serialization succeeds");
    assert_eq!(json, "\"-42\"");
    let back: Int32 = serde_json::from_str(&json).expect("deserialization succeeds");
    assert_eq!(back, x);
    assert!(serde_json::from_str::<Int32>("\"forty-two\"").is_err());
}
