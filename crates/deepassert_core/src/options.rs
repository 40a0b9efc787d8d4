//! Serializable configuration options.

use deepassert_reflect::TypeName;
use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::config::RecursiveAssertionConfigBuilder;
use crate::policy::{CollectionPolicy, MapPolicy, OptionalPolicy};

/// Recursive assertion options as stored in a JSON document.
///
/// Every field is optional. Types are given by their fully-qualified name,
/// as reported by `std::any::type_name`.
///
/// ```json
/// {
///   "ignore_all_null_fields": true,
///   "ignored_fields": ["address.number"],
///   "ignored_types": ["alloc::string::String"],
///   "collection_policy": "COLLECTION_OBJECT_AND_ELEMENTS"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecursiveAssertionOptions {
    pub ignore_all_null_fields: bool,
    pub ignore_primitive_fields: bool,
    pub ignored_fields: Vec<String>,
    pub ignored_fields_matching_regexes: Vec<String>,
    pub ignored_types: Vec<String>,
    pub recurse_into_library_types: bool,
    pub collection_policy: CollectionPolicy,
    pub map_policy: MapPolicy,
    pub optional_policy: OptionalPolicy,
}

impl RecursiveAssertionOptions {
    /// Parses options from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::options(e.to_string()))
    }

    /// Returns a builder carrying these options and the default strategy.
    pub fn into_builder(self) -> RecursiveAssertionConfigBuilder {
        let mut builder = RecursiveAssertionConfigBuilder::default();
        builder
            .ignore_all_null_fields(self.ignore_all_null_fields)
            .ignore_primitive_fields(self.ignore_primitive_fields)
            .ignored_fields(self.ignored_fields)
            .ignored_fields_matching_regexes(self.ignored_fields_matching_regexes)
            .ignored_types(self.ignored_types.into_iter().map(TypeName::named))
            .recurse_into_library_types(self.recurse_into_library_types)
            .collection_policy(self.collection_policy)
            .map_policy(self.map_policy)
            .optional_policy(self.optional_policy);
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecursiveAssertionConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_is_default() {
        let options = RecursiveAssertionOptions::from_json("{}").unwrap();
        assert_eq!(options, RecursiveAssertionOptions::default());
        assert_eq!(
            options.into_builder().build().unwrap(),
            RecursiveAssertionConfig::default()
        );
    }

    #[test]
    fn test_full_document() {
        let json = serde_json::json!({
            "ignore_all_null_fields": true,
            "ignore_primitive_fields": true,
            "ignored_fields": ["address.number"],
            "ignored_fields_matching_regexes": [".*_id"],
            "ignored_types": ["alloc::string::String"],
            "recurse_into_library_types": true,
            "collection_policy": "COLLECTION_OBJECT_AND_ELEMENTS",
            "map_policy": "MAP_OBJECT_ONLY",
            "optional_policy": "OPTIONAL_OBJECT_ONLY"
        });

        let config = RecursiveAssertionConfig::from_json(&json.to_string()).unwrap();
        let expected = RecursiveAssertionConfig::builder()
            .ignore_all_null_fields(true)
            .ignore_primitive_fields(true)
            .ignored_fields(["address.number"])
            .ignored_fields_matching_regexes([".*_id"])
            .ignore_type::<String>()
            .recurse_into_library_types(true)
            .collection_policy(CollectionPolicy::CollectionObjectAndElements)
            .map_policy(MapPolicy::MapObjectOnly)
            .optional_policy(OptionalPolicy::OptionalObjectOnly)
            .build()
            .unwrap();
        assert_eq!(config, expected);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = RecursiveAssertionOptions::from_json(r#"{"ignore_nulls": true}"#);
        assert!(matches!(result, Err(ConfigError::InvalidOptions(_))));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result = RecursiveAssertionOptions::from_json(r#"{"map_policy": "KEYS_ONLY"}"#);
        assert!(matches!(result, Err(ConfigError::InvalidOptions(_))));
    }

    #[test]
    fn test_invalid_regex_surfaces_at_build() {
        let result =
            RecursiveAssertionConfig::from_json(r#"{"ignored_fields_matching_regexes": ["["]}"#);
        assert!(matches!(result, Err(ConfigError::InvalidRegex { .. })));
    }
}
