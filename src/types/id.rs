// ABOUTME: Phantom-typed engine identifiers for containers and networks.
// ABOUTME: Keeps container IDs and network IDs from being passed in each other's place.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub enum ContainerMarker {}
pub enum NetworkMarker {}

/// Length of the abbreviated form the engine CLI prints for IDs.
const SHORT_ID_LEN: usize = 12;

/// An opaque identifier handed out by the container engine.
///
/// The marker parameter only exists at compile time: a `NetworkId` can never be
/// used where a `ContainerId` is expected, even though both are plain strings on
/// the wire.
#[must_use = "IDs reference engine resources and should not be ignored"]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// First twelve characters, or the whole value when it is shorter.
    pub fn short(&self) -> &str {
        match self.value.char_indices().nth(SHORT_ID_LEN) {
            Some((end, _)) => &self.value[..end],
            None => &self.value,
        }
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

// Written by hand so that T needs no bounds.

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

pub type ContainerId = Id<ContainerMarker>;
pub type NetworkId = Id<NetworkMarker>;
