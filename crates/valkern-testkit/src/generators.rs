//! Proptest generators for property-based testing.

use proptest::prelude::*;

use valkern_core::PhoneNumber;

use crate::fixtures::{Amount, Labelled, Point, Profile, Reading};

/// Generate an area code or prefix (three digits).
pub fn three_digits() -> impl Strategy<Value = u16> {
    0u16..=999
}

/// Generate a line number (four digits).
pub fn four_digits() -> impl Strategy<Value = u16> {
    0u16..=9999
}

/// Generate a valid phone number.
pub fn phone_number() -> impl Strategy<Value = PhoneNumber> {
    any::<PhoneParams>().prop_map(|params| phone_from_params(&params))
}

/// Generate a string that is not `DDD-DDD-DDDD`.
///
/// Covers truncated, overlong, wrongly delimited and non-digit inputs.
pub fn malformed_phone() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{3}-[0-9]{3}",
        "[0-9]{3}-[0-9]{3}-[0-9]{5}",
        "[0-9]{3}-[0-9]{3}-[0-9]{3}",
        "[0-9]{3}[ ./][0-9]{3}[ ./][0-9]{4}",
        "[0-9]{10}",
        "[a-z]{3}-[0-9]{3}-[0-9]{4}",
        " [0-9]{3}-[0-9]{3}-[0-9]{4}",
        "[0-9]{3}-[0-9]{3}-[0-9]{4}\n",
    ]
}

/// Generate a coordinate in `-3..=3`, so that generated values often collide.
pub fn coordinate() -> impl Strategy<Value = i64> {
    -3i64..=3
}

/// Generate a point.
pub fn point() -> impl Strategy<Value = Point> {
    (coordinate(), coordinate()).prop_map(|(x, y)| Point { x, y })
}

/// Generate a float, including signed zeros, infinities and NaN.
pub fn float_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(-0.0),
        Just(1.5),
        Just(-1.5),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        Just(f64::NAN),
        -1.0e6f64..1.0e6,
    ]
}

/// Generate a profile with any weight, NaN and signed zeros included.
pub fn profile() -> impl Strategy<Value = Profile> {
    (coordinate(), float_value(), coordinate()).prop_map(|(height, weight, age)| Profile {
        height,
        weight,
        age,
    })
}

/// Generate a reading with any float in either field.
pub fn reading() -> impl Strategy<Value = Reading> {
    (float_value(), float_value()).prop_map(|(celsius, raw)| Reading { celsius, raw })
}

/// Generate a scaled amount.
pub fn amount() -> impl Strategy<Value = Amount> {
    (-100i64..=100, 0i64..=3).prop_map(|(units, scale)| Amount { units, scale })
}

/// Generate a label, with or without an anchor.
pub fn labelled() -> impl Strategy<Value = Labelled> {
    (coordinate(), proptest::option::of(point())).prop_map(|(id, anchor)| Labelled { id, anchor })
}

/// Parameters for generating a phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneParams {
    pub area_code: u16,
    pub prefix: u16,
    pub line_num: u16,
}

impl PhoneParams {
    pub fn build(&self) -> PhoneNumber {
        phone_from_params(self)
    }
}

impl Arbitrary for PhoneParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (three_digits(), three_digits(), four_digits())
            .prop_map(|(area_code, prefix, line_num)| PhoneParams {
                area_code,
                prefix,
                line_num,
            })
            .boxed()
    }
}

/// Build a phone number from parameters.
///
/// # Panics
///
/// If a group is wider than `DDD-DDD-DDDD` allows; [`PhoneParams`] from
/// `any()` never are.
pub fn phone_from_params(params: &PhoneParams) -> PhoneNumber {
    match PhoneNumber::new(params.area_code, params.prefix, params.line_num) {
        Ok(number) => number,
        Err(e) => panic!("phone params out of range: {}", e),
    }
}
