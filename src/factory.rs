//! Building transports from a type tag and named parameters.
//!
//! Each concrete kind implements [`TransportSpec`]; the generic [`Factory`] turns any
//! such kind into a [`TransportFactory`] that recognizes its tag. A
//! [`TransportRegistry`] asks its factories in order, the first one that
//! recognizes the tag builds the value.

use crate::error::TransportError;
use crate::transport::{Plane, Train, Transport, Truck};
use std::collections::HashMap;
use std::str::FromStr;

/// Raw `key=value` parameters of an `ADD` line.
///
/// Values are kept as text and coerced when a variant asks for a typed field.
/// A repeated key keeps its last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect `key=value` tokens, splitting each on its first `=`.
    ///
    /// Returns the offending token when one carries no `=`.
    pub fn parse_pairs<'a, I>(tokens: I) -> Result<Self, &'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut params = Self::new();
        for token in tokens {
            let (key, value) = token.split_once('=').ok_or(token)?;
            params.insert(key, value);
        }
        Ok(params)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Required text field.
    pub fn text(&self, key: &str) -> Result<&str, TransportError> {
        self.get(key)
            .ok_or_else(|| TransportError::MissingField(key.to_string()))
    }

    /// Required integer field.
    pub fn integer(&self, key: &str) -> Result<i64, TransportError> {
        self.number(key)
    }

    /// Required floating-point field.
    pub fn float(&self, key: &str) -> Result<f64, TransportError> {
        self.number(key)
    }

    fn number<N: FromStr>(&self, key: &str) -> Result<N, TransportError> {
        let raw = self.text(key)?;
        raw.parse().map_err(|_| TransportError::Format {
            field: key.to_string(),
            value: raw.to_string(),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// A transport kind that can be built from [`Params`].
pub trait TransportSpec: Sized + Into<Transport> {
    /// Type tag used by `ADD`, e.g. "PLANE".
    fn tag() -> &'static str;

    fn from_params(params: &Params) -> Result<Self, TransportError>;
}

impl TransportSpec for Plane {
    fn tag() -> &'static str {
        "PLANE"
    }

    fn from_params(params: &Params) -> Result<Self, TransportError> {
        Ok(Plane::new(
            params.text("owner")?,
            params.integer("speed")?,
            params.integer("distance")?,
            params.integer("range")?,
            params.integer("capacity")?,
        ))
    }
}

impl TransportSpec for Train {
    fn tag() -> &'static str {
        "TRAIN"
    }

    fn from_params(params: &Params) -> Result<Self, TransportError> {
        Ok(Train::new(
            params.text("owner")?,
            params.integer("speed")?,
            params.integer("distance")?,
            params.integer("wagons")?,
        ))
    }
}

impl TransportSpec for Truck {
    fn tag() -> &'static str {
        "TRUCK"
    }

    fn from_params(params: &Params) -> Result<Self, TransportError> {
        Ok(Truck::new(
            params.text("owner")?,
            params.integer("speed")?,
            params.integer("distance")?,
            params.integer("capacity")?,
            params.float("volume")?,
        ))
    }
}

/// Zero-sized factory for the type `T`.
///
/// Implements [`TransportFactory`] for transport kinds and
/// [`CommandFactory`](crate::command::CommandFactory) for built-in commands.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Factory that tries to build a transport from a tag and its parameters.
///
/// Returns `None` when the factory doesn't recognize the `tag`.
pub trait TransportFactory {
    fn try_create(&self, tag: &str, params: &Params) -> Option<Result<Transport, TransportError>>;
}

impl<T: TransportSpec> TransportFactory for Factory<T> {
    fn try_create(&self, tag: &str, params: &Params) -> Option<Result<Transport, TransportError>> {
        if tag == T::tag() {
            Some(T::from_params(params).map(Into::into))
        } else {
            None
        }
    }
}

/// Ordered set of transport factories.
pub struct TransportRegistry {
    factories: Vec<Box<dyn TransportFactory>>,
}

impl TransportRegistry {
    pub fn new(factories: Vec<Box<dyn TransportFactory>>) -> Self {
        Self { factories }
    }

    /// Build a transport, failing with [`TransportError::UnknownType`] when no
    /// factory recognizes `tag`.
    pub fn create(&self, tag: &str, params: &Params) -> Result<Transport, TransportError> {
        self.factories
            .iter()
            .find_map(|factory| factory.try_create(tag, params))
            .unwrap_or_else(|| Err(TransportError::UnknownType(tag.to_string())))
    }
}

impl Default for TransportRegistry {
    /// Planes, trains and trucks.
    fn default() -> Self {
        Self::new(vec![
            Box::new(Factory::<Plane>::default()),
            Box::new(Factory::<Train>::default()),
            Box::new(Factory::<Truck>::default()),
        ])
    }
}

/// Build a transport with the default registry.
pub fn create(tag: &str, params: &Params) -> Result<Transport, TransportError> {
    TransportRegistry::default().create(tag, params)
}
