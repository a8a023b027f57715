use serde::{Deserialize, Deserializer};

/// A single field of a partial-update payload.
///
/// JSON cannot distinguish "left out" from "sent as null" once it has been
/// decoded into an `Option`, so update payloads carry this marker instead.
/// Fields declared with `#[serde(default)]` start as `Absent` and only become
/// `Null` or `Value` when the key is present in the body.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(value) => Patch::Value(f(value)),
        }
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Overwrites `target` when a value was supplied. `Absent` and `Null`
    /// leave it untouched; payload validation rejects `Null` for every
    /// non-nullable field before a merge happens.
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Value(value) = self {
            *target = value;
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}
