use test_strategy::{proptest, Arbitrary};

use super::{Int128, Int256, Int64, Integer};

type Int100 = Integer<100, 13>;

const INT100_LIMIT: i128 = 1 << 99;

/// Reduces `v` modulo 2^100 into the signed 100-bit range.
fn wrap100(v: i128) -> i128 {
    (v << 28) >> 28
}

#[derive(Debug, Arbitrary)]
struct Int100Operands {
    #[strategy(-INT100_LIMIT..INT100_LIMIT)]
    a: i128,
    #[strategy(-INT100_LIMIT..INT100_LIMIT)]
    b: i128,
}

#[proptest]
fn int64_arithmetic_matches_i64(a: i64, b: i64) {
    let (x, y) = (Int64::from(a), Int64::from(b));
    assert_eq!((x + y).to_i64(), a.wrapping_add(b));
    assert_eq!((x - y).to_i64(), a.wrapping_sub(b));
    assert_eq!((x * y).to_i64(), a.wrapping_mul(b));
    if b != 0 {
        assert_eq!((x / y).to_i64(), a.wrapping_div(b));
        assert_eq!((x % y).to_i64(), a.wrapping_rem(b));
    }
    assert_eq!(x.cmp(&y), a.cmp(&b));
}

#[proptest]
fn int128_arithmetic_matches_i128(a: i128, b: i128) {
    let (x, y) = (Int128::from(a), Int128::from(b));
    assert_eq!((x * y).to_i128(), a.wrapping_mul(b));
    if b != 0 {
        assert_eq!((x / y).to_i128(), a.wrapping_div(b));
        assert_eq!((x % y).to_i128(), a.wrapping_rem(b));
    }
}

#[proptest]
fn int100_arithmetic_wraps(input: Int100Operands) {
    let (x, y) = (Int100::from(input.a), Int100::from(input.b));
    assert_eq!((x + y).to_i128(), wrap100(input.a + input.b));
    assert_eq!((x - y).to_i128(), wrap100(input.a - input.b));
    if input.b != 0 {
        // -2^99 / -1 overflows, so the quotient is wrapped too.
        assert_eq!((x / y).to_i128(), wrap100(input.a / input.b));
        assert_eq!((x % y).to_i128(), input.a % input.b);
    }
}

#[proptest]
fn int100_binary_string_decodes(input: Int100Operands) {
    let x = Int100::from(input.a);
    let text = x.to_binary();
    assert_eq!(text.len(), 100);
    let mut decoded = Int100::ZERO;
    for (i, ch) in text.chars().rev().enumerate() {
        match ch {
            '0' => (),
            '1' => decoded.set(i).expect("index is in range"),
            other => panic!("unexpected character {other:?} in {text}"),
        }
    }
    assert_eq!(decoded, x);
}

#[proptest]
fn addition_is_undone_by_subtraction(a: i128, b: i128, #[strategy(0..128i32)] shift: i32) {
    let x = Int256::from(a) << shift;
    let y = Int256::from(b) * Int256::from(a);
    assert_eq!((x + y) - y, x);
}

#[proptest]
fn division_identity_holds(a: i128, b: i128, c: i128) {
    let dividend = Int256::from(a) * Int256::from(b);
    let divisor = Int256::from(c);
    if !divisor.is_zero() {
        let result = dividend.div_rem(&divisor).expect("divisor is not zero");
        assert_eq!(result.quotient * divisor + result.remainder, dividend);
        assert!(result.remainder.is_zero() || result.remainder.is_negative() == dividend.is_negative());
        assert!(result.remainder.wrapping_abs() < divisor.wrapping_abs());
    }
}

#[proptest]
fn decimal_round_trip(a: i128, b: i128) {
    let x = Int256::from(a) * Int256::from(b);
    assert_eq!(x.to_string().parse::<Int256>(), Ok(x));
    assert_eq!((-x).to_string().parse::<Int256>(), Ok(-x));
}

#[proptest]
fn from_f64_matches_saturating_cast(x: f64) {
    assert_eq!(Int64::from(x).to_i64(), x as i64);
}

#[proptest]
fn to_f64_matches_native_cast(a: i128) {
    assert_eq!(Int128::from(a).to_f64(), a as f64);
    assert_eq!(Int64::from(a as i64).to_f64(), a as i64 as f64);
}
