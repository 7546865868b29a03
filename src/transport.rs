//! Transport records: planes, trains and trucks.
//!
//! Every variant carries the same [`TransportBase`] (owner, speed, distance) plus its
//! own attributes, and renders a one-line description. Attributes can also be read
//! by name through [`Transport::field`], which is how conditional removal inspects
//! records without knowing their concrete type.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Value of a named attribute, borrowed from the record it was read from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(i64),
    Float(f64),
}

/// Attributes shared by all transport kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportBase {
    owner: String,
    speed: i64,
    distance: i64,
}

impl TransportBase {
    pub fn new(owner: impl Into<String>, speed: i64, distance: i64) -> Self {
        Self {
            owner: owner.into(),
            speed,
            distance,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn speed(&self) -> i64 {
        self.speed
    }

    pub fn distance(&self) -> i64 {
        self.distance
    }
}

impl fmt::Display for TransportBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Владелец: {}, Скорость: {}, Расстояние: {}",
            self.owner, self.speed, self.distance
        )
    }
}

type Accessor<T> = for<'a> fn(&'a T) -> FieldValue<'a>;

/// Name-to-accessor lookup for one variant, built once per process.
pub struct FieldTable<T: 'static> {
    accessors: HashMap<&'static str, Accessor<T>>,
}

impl<T: Variant> FieldTable<T> {
    fn new(specific: &[(&'static str, Accessor<T>)]) -> Self {
        let mut accessors: HashMap<&'static str, Accessor<T>> = HashMap::new();
        accessors.insert("owner", owner::<T>);
        accessors.insert("speed", speed::<T>);
        accessors.insert("distance", distance::<T>);
        accessors.extend(specific.iter().copied());
        Self { accessors }
    }

    fn get<'a>(&self, item: &'a T, name: &str) -> Option<FieldValue<'a>> {
        self.accessors.get(name).map(|accessor| accessor(item))
    }
}

fn owner<T: Variant>(item: &T) -> FieldValue<'_> {
    FieldValue::Text(item.base().owner())
}

fn speed<T: Variant>(item: &T) -> FieldValue<'_> {
    FieldValue::Int(item.base().speed())
}

fn distance<T: Variant>(item: &T) -> FieldValue<'_> {
    FieldValue::Int(item.base().distance())
}

/// Behaviour every concrete transport kind provides.
pub trait Variant: Sized + 'static {
    /// Localized label printed in brackets at the start of the description.
    const LABEL: &'static str;

    fn base(&self) -> &TransportBase;

    #[doc(hidden)]
    fn fields() -> &'static FieldTable<Self>;

    /// Read an attribute by its name. Unknown names yield `None`.
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Self::fields().get(self, name)
    }
}

/// Aircraft with a flight range and a payload capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    base: TransportBase,
    flight_range: i64,
    capacity: i64,
}

impl Plane {
    pub fn new(
        owner: impl Into<String>,
        speed: i64,
        distance: i64,
        flight_range: i64,
        capacity: i64,
    ) -> Self {
        Self {
            base: TransportBase::new(owner, speed, distance),
            flight_range,
            capacity,
        }
    }

    /// Maximum flight range. Filled from the `range` key of `ADD`.
    pub fn flight_range(&self) -> i64 {
        self.flight_range
    }

    /// Payload capacity.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }
}

fn plane_flight_range(p: &Plane) -> FieldValue<'_> {
    FieldValue::Int(p.flight_range)
}

fn plane_capacity(p: &Plane) -> FieldValue<'_> {
    FieldValue::Int(p.capacity)
}

static PLANE_FIELDS: LazyLock<FieldTable<Plane>> = LazyLock::new(|| {
    FieldTable::new(&[
        ("flight_range", plane_flight_range as Accessor<Plane>),
        ("capacity", plane_capacity as Accessor<Plane>),
    ])
});

impl Variant for Plane {
    const LABEL: &'static str = "Самолет";

    fn base(&self) -> &TransportBase {
        &self.base
    }

    fn fields() -> &'static FieldTable<Self> {
        &PLANE_FIELDS
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}, Дальность: {}, Грузоподъемность: {}",
            Self::LABEL,
            self.base,
            self.flight_range,
            self.capacity
        )
    }
}

/// Train made of a number of wagons.
#[derive(Debug, Clone, PartialEq)]
pub struct Train {
    base: TransportBase,
    wagons: i64,
}

impl Train {
    pub fn new(owner: impl Into<String>, speed: i64, distance: i64, wagons: i64) -> Self {
        Self {
            base: TransportBase::new(owner, speed, distance),
            wagons,
        }
    }

    /// Number of wagons.
    pub fn wagons(&self) -> i64 {
        self.wagons
    }
}

fn train_wagons(t: &Train) -> FieldValue<'_> {
    FieldValue::Int(t.wagons)
}

static TRAIN_FIELDS: LazyLock<FieldTable<Train>> =
    LazyLock::new(|| FieldTable::new(&[("wagons", train_wagons as Accessor<Train>)]));

impl Variant for Train {
    const LABEL: &'static str = "Поезд";

    fn base(&self) -> &TransportBase {
        &self.base
    }

    fn fields() -> &'static FieldTable<Self> {
        &TRAIN_FIELDS
    }
}

impl fmt::Display for Train {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}, Вагоны: {}", Self::LABEL, self.base, self.wagons)
    }
}

/// Truck with a payload capacity and a body volume.
#[derive(Debug, Clone, PartialEq)]
pub struct Truck {
    base: TransportBase,
    capacity: i64,
    volume: f64,
}

impl Truck {
    pub fn new(
        owner: impl Into<String>,
        speed: i64,
        distance: i64,
        capacity: i64,
        volume: f64,
    ) -> Self {
        Self {
            base: TransportBase::new(owner, speed, distance),
            capacity,
            volume,
        }
    }

    /// Payload capacity.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Body volume, the only fractional attribute.
    pub fn volume(&self) -> f64 {
        self.volume
    }
}

fn truck_capacity(t: &Truck) -> FieldValue<'_> {
    FieldValue::Int(t.capacity)
}

fn truck_volume(t: &Truck) -> FieldValue<'_> {
    FieldValue::Float(t.volume)
}

static TRUCK_FIELDS: LazyLock<FieldTable<Truck>> = LazyLock::new(|| {
    FieldTable::new(&[
        ("capacity", truck_capacity as Accessor<Truck>),
        ("volume", truck_volume as Accessor<Truck>),
    ])
});

impl Variant for Truck {
    const LABEL: &'static str = "Грузовик";

    fn base(&self) -> &TransportBase {
        &self.base
    }

    fn fields() -> &'static FieldTable<Self> {
        &TRUCK_FIELDS
    }
}

impl fmt::Display for Truck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}, Грузоподъемность: {}, Объем: {}",
            Self::LABEL,
            self.base,
            self.capacity,
            float_repr(self.volume)
        )
    }
}

/// Shortest round-trip rendering of a float with a mandatory fractional part
/// or exponent: `30.0`, `20.5`, `1e+16`, `1.5e-05`, `nan`, `inf`.
fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    // Debug switches to exponent form below 1e-4 and from 1e16 on.
    let debug = format!("{value:?}");
    match debug.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => debug,
    }
}

/// Any transport stored in the container.
#[derive(Debug, Clone, PartialEq)]
pub enum Transport {
    Plane(Plane),
    Train(Train),
    Truck(Truck),
}

impl Transport {
    pub fn base(&self) -> &TransportBase {
        match self {
            Transport::Plane(p) => p.base(),
            Transport::Train(t) => t.base(),
            Transport::Truck(t) => t.base(),
        }
    }

    /// One-line description, as printed by `PRINT`.
    pub fn info(&self) -> String {
        self.to_string()
    }

    /// Read an attribute by name. Names the concrete variant lacks yield `None`.
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self {
            Transport::Plane(p) => p.field(name),
            Transport::Train(t) => t.field(name),
            Transport::Truck(t) => t.field(name),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Plane(p) => p.fmt(f),
            Transport::Train(t) => t.fmt(f),
            Transport::Truck(t) => t.fmt(f),
        }
    }
}

impl From<Plane> for Transport {
    fn from(value: Plane) -> Self {
        Transport::Plane(value)
    }
}

impl From<Train> for Transport {
    fn from(value: Train) -> Self {
        Transport::Train(value)
    }
}

impl From<Truck> for Transport {
    fn from(value: Truck) -> Self {
        Transport::Truck(value)
    }
}
