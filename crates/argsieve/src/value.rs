//! Parse output: parameter records, positional inputs, and the scalar/multi union.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A single value or an ordered collection of values.
///
/// Options that may occur more than once hold `Multi`; everything else holds
/// `Scalar`. [`Arity::push`] is the only way a scalar becomes a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Arity<T> {
    Scalar(T),
    Multi(Vec<T>),
}

impl<T> Arity<T> {
    /// Append `item`, promoting a scalar to a two-element list.
    pub fn push(&mut self, item: T) {
        let prev = std::mem::replace(self, Arity::Multi(Vec::new()));
        *self = match prev {
            Arity::Scalar(first) => Arity::Multi(vec![first, item]),
            Arity::Multi(mut items) => {
                items.push(item);
                Arity::Multi(items)
            }
        };
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Arity::Scalar(item) => std::slice::from_ref(item),
            Arity::Multi(items) => items.as_slice(),
        }
    }

    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Arity::Multi(_))
    }
}

/// Where a value came from.
///
/// Serializes as the token position, or `-1` for a schema default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Token(usize),
    Default,
}

impl Origin {
    pub fn index(self) -> i64 {
        match self {
            Origin::Token(pos) => pos as i64,
            Origin::Default => -1,
        }
    }
}

impl Serialize for Origin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.index())
    }
}

/// One entry of [`ParseResult::params`].
///
/// `value` and `origin` always have the same arity and length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamRecord {
    value: Arity<Value>,
    #[serde(rename = "index")]
    origin: Arity<Origin>,
}

impl ParamRecord {
    pub(crate) fn scalar(value: Value, origin: Origin) -> Self {
        Self {
            value: Arity::Scalar(value),
            origin: Arity::Scalar(origin),
        }
    }

    pub(crate) fn multi(value: Value, origin: Origin) -> Self {
        Self {
            value: Arity::Multi(vec![value]),
            origin: Arity::Multi(vec![origin]),
        }
    }

    pub(crate) fn push(&mut self, value: Value, origin: Origin) {
        self.value.push(value);
        self.origin.push(origin);
    }

    pub fn value(&self) -> &Arity<Value> {
        &self.value
    }

    pub fn origin(&self) -> &Arity<Origin> {
        &self.origin
    }

    /// Whether any value came from the token stream (as opposed to a default).
    pub fn is_explicit(&self) -> bool {
        self.origin
            .as_slice()
            .iter()
            .any(|o| matches!(o, Origin::Token(_)))
    }
}

/// A positional token that was not an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputRecord {
    pub value: String,
    #[serde(rename = "index")]
    pub origin: usize,
}

/// Output of [`crate::parse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    pub params: IndexMap<String, ParamRecord>,
    pub inputs: Vec<InputRecord>,
}

impl ParseResult {
    /// Get the last value for a parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.get(name).and_then(|r| r.value.last())
    }

    /// Get all values for a parameter (one element for scalars).
    pub fn get_all(&self, name: &str) -> Option<&[Value]> {
        self.params.get(name).map(|r| r.value.as_slice())
    }

    /// Last value as a string slice, if it is a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Whether a record exists, explicit or defaulted.
    pub fn is_present(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Whether the parameter was given on the command line.
    ///
    /// Defaults injected by the schema do not count.
    pub fn is_explicit(&self, name: &str) -> bool {
        self.params.get(name).is_some_and(ParamRecord::is_explicit)
    }

    pub fn input_values(&self) -> Vec<&str> {
        self.inputs.iter().map(|i| i.value.as_str()).collect()
    }
}
