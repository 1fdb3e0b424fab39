use std::{fmt, str::FromStr};

use serde::Serialize;

/// The literal selecting every value of a facet.
pub const ALL: &str = "all";

/// A facet selection: everything, or one concrete value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Facet<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Facet<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(v) => v == value,
        }
    }
}

impl<T> Facet<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn as_only(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(v) => Some(v),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Facet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(v) => v.fmt(f),
        }
    }
}

/// `"all"` (any case) selects everything; anything else goes through `T`.
impl<T: FromStr> FromStr for Facet<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl<T: fmt::Display> Serialize for Facet<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One selectable option with the number of entries it would admit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "T: fmt::Display"))]
pub struct FacetOption<T> {
    pub value: Facet<T>,
    pub count: usize,
}

impl<T> FacetOption<T> {
    pub fn all(count: usize) -> Self {
        Self {
            value: Facet::All,
            count,
        }
    }

    pub fn only(value: T, count: usize) -> Self {
        Self {
            value: Facet::Only(value),
            count,
        }
    }
}
