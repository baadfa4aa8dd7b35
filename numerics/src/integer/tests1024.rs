use super::{gcd, ipow, Int1024};

fn power_of_two(k: i32) -> Int1024 {
    Int1024::ONE << k
}

#[test]
fn test_ipow_1024_squared() {
    let x = Int1024::from(1024_i32);
    assert_eq!(ipow(x, Int1024::from(2_i32)), 1048576);
    assert_eq!(ipow(Int1024::from(2_i32), Int1024::from(1000_i32)), power_of_two(1000));
}

#[test]
fn test_int64_round_trip() {
    let x = Int1024::from(123456789_i64);
    assert_eq!(x.to_i64(), 123456789);
    assert_eq!(i64::try_from(x), Ok(123456789));
    assert!(i64::try_from(power_of_two(64)).is_err());
}

#[test]
fn test_decimal_of_power_of_two() {
    assert_eq!(
        power_of_two(100).to_string(),
        "1267650600228229401496703205376"
    );
    assert_eq!(
        (-power_of_two(100)).to_string(),
        "-1267650600228229401496703205376"
    );
    assert_eq!(
        "1267650600228229401496703205376".parse::<Int1024>(),
        Ok(power_of_two(100))
    );
}

#[test]
fn test_extremes_round_trip_through_decimal() {
    for x in [Int1024::MIN, Int1024::MAX, Int1024::ZERO, -Int1024::ONE] {
        let text = x.to_string();
        assert_eq!(text.parse::<Int1024>(), Ok(x), "{text}");
    }
    assert!(Int1024::MIN.to_string().starts_with("-8988465674311579538"));
    assert_eq!(Int1024::MIN.to_f64(), -(2.0_f64.powi(1023)));
}

#[test]
fn test_wide_multiply_and_divide() {
    let one = Int1024::ONE;
    let a = power_of_two(500) + one;
    let b = power_of_two(500) - one;
    let product = a * b;
    assert_eq!(product, power_of_two(1000) - one);

    let result = product.div_rem(&b).expect("divisor is not zero");
    assert_eq!(result.quotient, a);
    assert!(result.remainder.is_zero());

    let result = (product + Int1024::from(5_i32))
        .div_rem(&b)
        .expect("divisor is not zero");
    assert_eq!(result.quotient, a);
    assert_eq!(result.remainder, 5);

    assert_eq!(gcd(product, power_of_two(500) - one), b);
}

#[test]
fn test_wide_hex() {
    let all_ones = format!("0x{}", "F".repeat(256));
    assert_eq!(all_ones.parse::<Int1024>(), Ok(-Int1024::ONE));
    let top = format!("0x1{}", "0".repeat(255));
    assert_eq!(top.parse::<Int1024>(), Ok(power_of_two(1020)));
    // Digits which do not fit are discarded.
    let too_long = format!("0x12{}", "0".repeat(255));
    assert_eq!(too_long.parse::<Int1024>(), Ok(power_of_two(1021)));
}

#[test]
fn test_binary_string() {
    let text = power_of_two(1022).to_binary();
    assert_eq!(text.len(), 1024);
    assert!(text.starts_with("01"));
    assert_eq!(text.matches('1').count(), 1);
}

#[test]
fn test_i128_values_format_like_native() {
    for v in [i128::MIN, i128::MAX, -1, 0, 1234567890123456789012345678901234567_i128] {
        assert_eq!(Int1024::from(v).to_string(), v.to_string());
        assert_eq!(Int1024::from(v).to_i128(), v);
    }
}

#[test]
fn test_wide_float_conversion() {
    let x = Int1024::from(1e300_f64);
    assert_eq!(x.to_f64(), 1e300);
    assert_eq!(Int1024::from(-1e300_f64).to_f64(), -1e300);
    assert_eq!(Int1024::from(f64::MAX), Int1024::MAX);
}

#[test]
fn test_arithmetic_shift_of_wide_negative() {
    let x = -power_of_two(1000);
    assert_eq!(x >> 990, -1024);
    assert_eq!(x >> 5000, -1);
    assert_eq!(power_of_two(1000) >> 5000, 0);
    assert_eq!(x << 23, Int1024::MIN);
    assert_eq!(x << 24, 0);
}
