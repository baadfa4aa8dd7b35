use super::Int8;
use crate::error::{BitIndexOutOfBounds, ConversionFailed, ParseFailureReason};

// 8-bit integers are small enough to check exhaustively against i8.

fn all_values() -> impl Iterator<Item = i8> {
    i8::MIN..=i8::MAX
}

#[test]
fn test_127_plus_1_wraps() {
    let mut x = Int8::from(127_i8);
    x += 1;
    assert_eq!(x, -128);
    assert_eq!(x, Int8::MIN);
}

#[test]
fn test_add_sub_mul_match_i8() {
    for a in all_values() {
        let left = Int8::from(a);
        for b in all_values() {
            let right = Int8::from(b);
            assert_eq!((left + right).to_i8(), a.wrapping_add(b), "{a} + {b}");
            assert_eq!((left - right).to_i8(), a.wrapping_sub(b), "{a} - {b}");
            assert_eq!((left * right).to_i8(), a.wrapping_mul(b), "{a} * {b}");
        }
    }
}

#[test]
fn test_div_rem_match_i8() {
    for a in all_values() {
        let left = Int8::from(a);
        for b in all_values().filter(|b| *b != 0) {
            let right = Int8::from(b);
            assert_eq!((left / right).to_i8(), a.wrapping_div(b), "{a} / {b}");
            assert_eq!((left % right).to_i8(), a.wrapping_rem(b), "{a} % {b}");
        }
    }
}

#[test]
fn test_min_divided_by_minus_one_wraps() {
    let result = Int8::MIN
        .div_rem(&Int8::from(-1_i8))
        .expect("divisor is not zero");
    assert_eq!(result.quotient, Int8::MIN);
    assert_eq!(result.remainder, 0);
}

#[test]
fn test_shifts_match_i32() {
    for a in all_values() {
        let x = Int8::from(a);
        for shift in 0..12_i32 {
            let expected_left = (i32::from(a) << shift) as i8;
            let expected_right = (i32::from(a) >> shift) as i8;
            assert_eq!((x << shift).to_i8(), expected_left, "{a} << {shift}");
            assert_eq!((x >> shift).to_i8(), expected_right, "{a} >> {shift}");
            // A negative amount shifts the other way.
            assert_eq!((x << -shift).to_i8(), expected_right, "{a} << -{shift}");
            assert_eq!((x >> -shift).to_i8(), expected_left, "{a} >> -{shift}");
        }
    }
}

#[test]
fn test_ordering_matches_i8() {
    for a in all_values() {
        for b in all_values() {
            assert_eq!(Int8::from(a).cmp(&Int8::from(b)), a.cmp(&b), "{a} vs {b}");
        }
        assert_eq!(
            Int8::from(a).partial_cmp(&i64::from(a)),
            Some(std::cmp::Ordering::Equal)
        );
        assert!(Int8::from(a) < 200_i64);
        assert!(Int8::from(a) > -200_i64);
    }
}

#[test]
fn test_display_matches_i8() {
    for a in all_values() {
        assert_eq!(Int8::from(a).to_string(), a.to_string());
        assert_eq!(format!("{:>6}", Int8::from(a)), format!("{a:>6}"));
        assert_eq!(format!("{:+05}", Int8::from(a)), format!("{a:+05}"));
    }
}

#[test]
fn test_to_binary() {
    for a in all_values() {
        assert_eq!(Int8::from(a).to_binary(), format!("{:08b}", a as u8));
    }
    assert_eq!(format!("{:#b}", Int8::from(5_i8)), "0b00000101");
}

#[test]
fn test_not_and_bitwise() {
    for a in all_values() {
        assert_eq!((!Int8::from(a)).to_i8(), !a);
        assert_eq!((-Int8::from(a)).to_i8(), a.wrapping_neg());
    }
    let x = Int8::from(0b0110_1100_i8);
    let y = Int8::from(0b0101_0101_i8);
    assert_eq!((x & y).to_i8(), 0b0100_0100);
    assert_eq!((x | y).to_i8(), 0b0111_1101);
    assert_eq!((x ^ y).to_i8(), 0b0011_1001);
}

#[test]
fn test_increment_decrement() {
    let mut x = Int8::MAX;
    x.increment();
    assert_eq!(x, Int8::MIN);
    x.decrement();
    assert_eq!(x, Int8::MAX);
    let mut z = Int8::ZERO;
    z.decrement();
    assert_eq!(z, -1);
}

#[test]
fn test_checked_native_conversions() {
    assert_eq!(i8::try_from(Int8::from(-5_i8)), Ok(-5_i8));
    assert_eq!(u8::try_from(Int8::from(100_i8)), Ok(100_u8));
    assert_eq!(u8::try_from(Int8::from(-1_i8)), Err(ConversionFailed::TooSmall));
    assert_eq!(u64::try_from(Int8::MIN), Err(ConversionFailed::TooSmall));
    assert_eq!(i64::try_from(Int8::MIN), Ok(-128_i64));
    // 200 does not fit, so it wraps.
    assert_eq!(Int8::from(200_u8), -56);
    assert_eq!(Int8::from(0x1234_i32), 0x34);
}

#[test]
fn test_bit_access_out_of_range() {
    let mut x = Int8::ZERO;
    assert_eq!(x.set(7), Ok(()));
    assert_eq!(x, Int8::MIN);
    assert_eq!(
        x.set(8),
        Err(BitIndexOutOfBounds { index: 8, limit: 8 })
    );
    assert_eq!(
        x.at(100),
        Err(BitIndexOutOfBounds {
            index: 100,
            limit: 8
        })
    );
    assert_eq!(x.byte(0), Ok(0x80));
    assert_eq!(x.byte(1), Err(BitIndexOutOfBounds { index: 1, limit: 1 }));
    assert_eq!(x.reset(7), Ok(()));
    assert!(x.is_zero());
}

#[test]
fn test_parse() {
    assert_eq!("-128".parse::<Int8>(), Ok(Int8::MIN));
    assert_eq!("127".parse::<Int8>(), Ok(Int8::MAX));
    assert_eq!("255".parse::<Int8>(), Ok(Int8::from(-1_i8)));
    assert_eq!("0x7F".parse::<Int8>(), Ok(Int8::MAX));
    assert_eq!("0x1FF".parse::<Int8>(), Ok(Int8::from(-1_i8)));
    assert_eq!("017".parse::<Int8>(), Ok(Int8::from(15_i8)));
    assert_eq!("0".parse::<Int8>(), Ok(Int8::ZERO));
    assert_eq!(
        "".parse::<Int8>().map_err(|e| e.reason),
        Err(ParseFailureReason::Empty)
    );
    assert_eq!(
        "12z".parse::<Int8>().map_err(|e| e.reason),
        Err(ParseFailureReason::UnrecognisedFormat)
    );
}

#[test]
fn test_decimal_round_trip() {
    for a in all_values() {
        let x = Int8::from(a);
        assert_eq!(x.to_string().parse::<Int8>(), Ok(x));
    }
}

#[test]
fn test_scale() {
    assert_eq!(Int8::MIN.scale(), 7);
    assert_eq!(Int8::MAX.scale(), 6);
    assert_eq!(Int8::from(1_i8).scale(), 0);
    assert_eq!(Int8::from(-1_i8).scale(), 0);
    assert_eq!(Int8::from(-9_i8).scale(), 3);
}
