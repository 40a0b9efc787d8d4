//! Container assertion policies.
//!
//! Each policy decides, for one family of containers, whether the container
//! object itself is tested, whether its contents are, or both.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Policy for sequences and arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionPolicy {
    /// Test only the elements.
    #[default]
    ElementsOnly,
    /// Test only the collection object; elements are not visited.
    CollectionObjectOnly,
    /// Test the collection object and every element.
    CollectionObjectAndElements,
}

impl CollectionPolicy {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ElementsOnly => "ELEMENTS_ONLY",
            Self::CollectionObjectOnly => "COLLECTION_OBJECT_ONLY",
            Self::CollectionObjectAndElements => "COLLECTION_OBJECT_AND_ELEMENTS",
        }
    }

    pub const fn tests_container(self) -> bool {
        !matches!(self, Self::ElementsOnly)
    }

    pub const fn visits_elements(self) -> bool {
        !matches!(self, Self::CollectionObjectOnly)
    }
}

/// Policy for key/value maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MapPolicy {
    /// Test only the map object; entries are not visited.
    MapObjectOnly,
    /// Test only the values.
    #[default]
    MapValuesOnly,
    /// Test the map object, every value and every key.
    MapObjectAndEntries,
}

impl MapPolicy {
    pub const fn name(self) -> &'static str {
        match self {
            Self::MapObjectOnly => "MAP_OBJECT_ONLY",
            Self::MapValuesOnly => "MAP_VALUES_ONLY",
            Self::MapObjectAndEntries => "MAP_OBJECT_AND_ENTRIES",
        }
    }

    pub const fn tests_container(self) -> bool {
        !matches!(self, Self::MapValuesOnly)
    }

    pub const fn visits_values(self) -> bool {
        !matches!(self, Self::MapObjectOnly)
    }

    pub const fn visits_keys(self) -> bool {
        matches!(self, Self::MapObjectAndEntries)
    }
}

/// Policy for optional wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionalPolicy {
    /// Test only the wrapped value, when present.
    #[default]
    OptionalValueOnly,
    /// Test only the wrapper; the value is not visited.
    OptionalObjectOnly,
    /// Test the wrapper and the wrapped value.
    OptionalObjectAndValue,
}

impl OptionalPolicy {
    pub const fn name(self) -> &'static str {
        match self {
            Self::OptionalValueOnly => "OPTIONAL_VALUE_ONLY",
            Self::OptionalObjectOnly => "OPTIONAL_OBJECT_ONLY",
            Self::OptionalObjectAndValue => "OPTIONAL_OBJECT_AND_VALUE",
        }
    }

    pub const fn tests_container(self) -> bool {
        !matches!(self, Self::OptionalValueOnly)
    }

    pub const fn visits_value(self) -> bool {
        !matches!(self, Self::OptionalObjectOnly)
    }
}

macro_rules! display_by_name {
    ($($policy:ty),*) => {
        $(
            impl fmt::Display for $policy {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }
        )*
    };
}

display_by_name!(CollectionPolicy, MapPolicy, OptionalPolicy);
