//! Test fixtures and helpers.
//!
//! Sample value types covering every key-field kind, shared by the
//! generators, the golden vectors and downstream integration tests.

use valkern::{Kernel, KernelConfig};
use valkern_core::{
    KeyField, OrderConsistency, OrderStep, Ordered, PhoneNumber, Structural, ValueType,
};

/// Two integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl ValueType for Point {
    const TYPE_NAME: &'static str = "Point";
    const KEY_FIELDS: &'static [KeyField<Self>] =
        &[KeyField::int("x", |p| p.x), KeyField::int("y", |p| p.y)];
}

impl Ordered for Point {
    const ORDER: &'static [OrderStep<Self>] =
        &[OrderStep::int("x", |p| p.x), OrderStep::int("y", |p| p.y)];
}

/// Same key fields as [`Point`] under a different domain name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanePoint {
    pub x: i64,
    pub y: i64,
}

impl ValueType for PlanePoint {
    const TYPE_NAME: &'static str = "PlanePoint";
    const KEY_FIELDS: &'static [KeyField<Self>] =
        &[KeyField::int("x", |p| p.x), KeyField::int("y", |p| p.y)];
}

/// A point that adds a key field. Never comparable with [`Point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPoint {
    pub x: i64,
    pub y: i64,
    pub color: i64,
}

impl ValueType for ColorPoint {
    const TYPE_NAME: &'static str = "ColorPoint";
    const KEY_FIELDS: &'static [KeyField<Self>] = &[
        KeyField::int("x", |p| p.x),
        KeyField::int("y", |p| p.y),
        KeyField::int("color", |p| p.color),
    ];
}

impl ColorPoint {
    /// The composed point view.
    pub fn as_point(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }
}

/// Height, weight and age, ordered in that priority.
///
/// Weight is compared by bit pattern, matching the `total_cmp` order, so
/// the order is consistent with equality for every weight: `-0.0` and
/// `0.0` are distinct and a NaN weight equals the same NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub height: i64,
    pub weight: f64,
    pub age: i64,
}

impl ValueType for Profile {
    const TYPE_NAME: &'static str = "Profile";
    const KEY_FIELDS: &'static [KeyField<Self>] = &[
        KeyField::int("height", |p| p.height),
        KeyField::float_bits("weight", |p| p.weight),
        KeyField::int("age", |p| p.age),
    ];
}

impl Ordered for Profile {
    const ORDER: &'static [OrderStep<Self>] = &[
        OrderStep::int("height", |p| p.height),
        OrderStep::float("weight", |p| p.weight),
        OrderStep::int("age", |p| p.age),
    ];
}

/// A scaled integer amount: equal by representation, ordered by magnitude.
///
/// `Amount { units: 10, scale: 1 }` and `Amount { units: 100, scale: 2 }`
/// compare equal but are not equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    pub units: i64,
    pub scale: i64,
}

impl Amount {
    pub fn value(&self) -> f64 {
        self.units as f64 / 10f64.powi(self.scale as i32)
    }
}

impl ValueType for Amount {
    const TYPE_NAME: &'static str = "Amount";
    const KEY_FIELDS: &'static [KeyField<Self>] = &[
        KeyField::int("units", |a| a.units),
        KeyField::int("scale", |a| a.scale),
    ];
}

impl Ordered for Amount {
    const ORDER: &'static [OrderStep<Self>] = &[OrderStep::float("value", Amount::value)];
    const CONSISTENCY: OrderConsistency = OrderConsistency::InconsistentWithEquals;
}

/// A sensor reading with one numeric and one bitwise float.
#[derive(Debug, Clone, Copy)]
pub struct Reading {
    /// Numeric equality: NaN never equal, `-0.0 == 0.0`.
    pub celsius: f64,
    /// Bitwise equality: NaN equal to itself, `-0.0 != 0.0`.
    pub raw: f64,
}

impl ValueType for Reading {
    const TYPE_NAME: &'static str = "Reading";
    const KEY_FIELDS: &'static [KeyField<Self>] = &[
        KeyField::float("celsius", |r| r.celsius),
        KeyField::float_bits("raw", |r| r.raw),
    ];
}

/// A label with an optional anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labelled {
    pub id: i64,
    pub anchor: Option<Point>,
}

impl ValueType for Labelled {
    const TYPE_NAME: &'static str = "Labelled";
    const KEY_FIELDS: &'static [KeyField<Self>] = &[
        KeyField::int("id", |l| l.id),
        KeyField::nullable::<Point>("anchor", |l| {
            l.anchor.as_ref().map(|p| p as &dyn Structural)
        }),
    ];
}

/// A kernel with every fixture type registered.
///
/// # Panics
///
/// If a fixture declaration is rejected.
pub fn registered_kernel() -> Kernel {
    let mut kernel = Kernel::new(KernelConfig::default());
    if let Err(e) = register_all(&mut kernel) {
        panic!("fixture declaration rejected: {}", e);
    }
    kernel
}

fn register_all(kernel: &mut Kernel) -> valkern::Result<()> {
    kernel.register::<Point>()?;
    kernel.register_order::<Point>()?;
    kernel.register::<PlanePoint>()?;
    kernel.register::<ColorPoint>()?;
    kernel.register::<Profile>()?;
    kernel.register_order::<Profile>()?;
    kernel.register::<Amount>()?;
    kernel.register_order::<Amount>()?;
    kernel.register::<Reading>()?;
    kernel.register::<Labelled>()?;
    kernel.register::<PhoneNumber>()?;
    kernel.register_order::<PhoneNumber>()?;
    kernel.register_canonical::<PhoneNumber>()?;
    Ok(())
}
