//! Recursive assertion configuration.
//!
//! A [`RecursiveAssertionConfig`] is frozen once built: it owns its ignore
//! rules and policies, so later changes to the builder that produced it are
//! never observed by a driver holding it.

use std::fmt;
use std::sync::Arc;

use deepassert_reflect::TypeName;
use regex::Regex;

use crate::introspection::{DefaultIntrospectionStrategy, IntrospectionStrategy};
use crate::options::RecursiveAssertionOptions;
use crate::policy::{CollectionPolicy, MapPolicy, OptionalPolicy};
use crate::{ConfigError, FieldPath};

/// Frozen configuration of a recursive assertion.
#[derive(Clone)]
pub struct RecursiveAssertionConfig {
    ignore_all_null_fields: bool,
    ignore_primitive_fields: bool,
    ignored_fields: Vec<String>,
    ignored_field_regexes: Vec<IgnoredRegex>,
    ignored_types: Vec<TypeName>,
    recurse_into_library_types: bool,
    collection_policy: CollectionPolicy,
    map_policy: MapPolicy,
    optional_policy: OptionalPolicy,
    introspection_strategy: Arc<dyn IntrospectionStrategy>,
}

/// A compiled ignore pattern, kept alongside its source for reporting.
#[derive(Clone)]
struct IgnoredRegex {
    pattern: String,
    regex: Regex,
}

impl IgnoredRegex {
    fn compile(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            ConfigError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }
}

impl RecursiveAssertionConfig {
    pub fn builder() -> RecursiveAssertionConfigBuilder {
        RecursiveAssertionConfigBuilder::default()
    }

    /// Parses an options document and builds a configuration from it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        RecursiveAssertionOptions::from_json(json)?.into_builder().build()
    }

    pub fn ignore_all_null_fields(&self) -> bool {
        self.ignore_all_null_fields
    }

    pub fn ignore_primitive_fields(&self) -> bool {
        self.ignore_primitive_fields
    }

    pub fn ignored_fields(&self) -> &[String] {
        &self.ignored_fields
    }

    /// Returns the ignored-field patterns as they were given.
    pub fn ignored_field_regexes(&self) -> impl Iterator<Item = &str> {
        self.ignored_field_regexes
            .iter()
            .map(|ignored| ignored.pattern.as_str())
    }

    pub fn ignored_types(&self) -> &[TypeName] {
        &self.ignored_types
    }

    pub fn recurse_into_library_types(&self) -> bool {
        self.recurse_into_library_types
    }

    pub fn collection_policy(&self) -> CollectionPolicy {
        self.collection_policy
    }

    pub fn map_policy(&self) -> MapPolicy {
        self.map_policy
    }

    pub fn optional_policy(&self) -> OptionalPolicy {
        self.optional_policy
    }

    pub fn introspection_strategy(&self) -> &dyn IntrospectionStrategy {
        self.introspection_strategy.as_ref()
    }

    /// Returns `true` if the rules path of `path` is an ignored field.
    pub fn matches_ignored_field(&self, path: &FieldPath) -> bool {
        if self.ignored_fields.is_empty() {
            return false;
        }
        let rules_path = path.rules_path();
        self.ignored_fields.iter().any(|field| *field == rules_path)
    }

    /// Returns `true` if the rules path of `path` fully matches an ignored
    /// pattern.
    pub fn matches_ignored_field_regex(&self, path: &FieldPath) -> bool {
        if self.ignored_field_regexes.is_empty() {
            return false;
        }
        let rules_path = path.rules_path();
        self.ignored_field_regexes
            .iter()
            .any(|ignored| ignored.regex.is_match(&rules_path))
    }

    pub fn is_ignored_type(&self, type_name: &TypeName) -> bool {
        self.ignored_types.contains(type_name)
    }

    /// Returns a builder primed with this configuration.
    pub fn to_builder(&self) -> RecursiveAssertionConfigBuilder {
        RecursiveAssertionConfigBuilder {
            ignore_all_null_fields: self.ignore_all_null_fields,
            ignore_primitive_fields: self.ignore_primitive_fields,
            ignored_fields: self.ignored_fields.clone(),
            ignored_field_regexes: self.ignored_field_regexes().map(str::to_string).collect(),
            ignored_types: self.ignored_types.clone(),
            recurse_into_library_types: self.recurse_into_library_types,
            collection_policy: self.collection_policy,
            map_policy: self.map_policy,
            optional_policy: self.optional_policy,
            introspection_strategy: Arc::clone(&self.introspection_strategy),
        }
    }
}

impl Default for RecursiveAssertionConfig {
    fn default() -> Self {
        Self {
            ignore_all_null_fields: false,
            ignore_primitive_fields: false,
            ignored_fields: Vec::new(),
            ignored_field_regexes: Vec::new(),
            ignored_types: Vec::new(),
            recurse_into_library_types: false,
            collection_policy: CollectionPolicy::default(),
            map_policy: MapPolicy::default(),
            optional_policy: OptionalPolicy::default(),
            introspection_strategy: Arc::new(DefaultIntrospectionStrategy),
        }
    }
}

/// The strategy is not compared.
impl PartialEq for RecursiveAssertionConfig {
    fn eq(&self, other: &Self) -> bool {
        self.ignore_all_null_fields == other.ignore_all_null_fields
            && self.ignore_primitive_fields == other.ignore_primitive_fields
            && self.ignored_fields == other.ignored_fields
            && self
                .ignored_field_regexes()
                .eq(other.ignored_field_regexes())
            && self.ignored_types == other.ignored_types
            && self.recurse_into_library_types == other.recurse_into_library_types
            && self.collection_policy == other.collection_policy
            && self.map_policy == other.map_policy
            && self.optional_policy == other.optional_policy
    }
}

impl fmt::Debug for RecursiveAssertionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecursiveAssertionConfig")
            .field("ignore_all_null_fields", &self.ignore_all_null_fields)
            .field("ignore_primitive_fields", &self.ignore_primitive_fields)
            .field("ignored_fields", &self.ignored_fields)
            .field(
                "ignored_field_regexes",
                &self.ignored_field_regexes().collect::<Vec<_>>(),
            )
            .field("ignored_types", &self.ignored_types)
            .field("recurse_into_library_types", &self.recurse_into_library_types)
            .field("collection_policy", &self.collection_policy)
            .field("map_policy", &self.map_policy)
            .field("optional_policy", &self.optional_policy)
            .field(
                "introspection_strategy",
                &self.introspection_strategy.description(),
            )
            .finish()
    }
}

/// Multi-line description used in assertion failure reports.
impl fmt::Display for RecursiveAssertionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ignore_all_null_fields {
            writeln!(f, "- all null fields were ignored in the assertion")?;
        }
        if !self.ignored_fields.is_empty() {
            writeln!(
                f,
                "- the following fields were ignored in the comparison: {}",
                self.ignored_fields.join(", ")
            )?;
        }
        if !self.ignored_field_regexes.is_empty() {
            writeln!(
                f,
                "- the fields matching the following regexes were ignored in the comparison: {}",
                self.ignored_field_regexes().collect::<Vec<_>>().join(", ")
            )?;
        }
        if !self.ignored_types.is_empty() {
            let types: Vec<&str> = self.ignored_types.iter().map(TypeName::as_str).collect();
            writeln!(
                f,
                "- the following types were ignored in the assertion: {}",
                types.join(", ")
            )?;
        }
        if self.ignore_primitive_fields {
            writeln!(f, "- primitive fields were ignored in the recursive assertion")?;
        }
        let library = if self.recurse_into_library_types {
            "included"
        } else {
            "excluded"
        };
        writeln!(
            f,
            "- fields from standard library types (std::*, core::* or alloc::*) were {} in the recursive assertion",
            library
        )?;
        writeln!(f, "- the collection assertion policy was {}", self.collection_policy)?;
        writeln!(f, "- the map assertion policy was {}", self.map_policy)?;
        writeln!(f, "- the optional assertion policy was {}", self.optional_policy)?;
        writeln!(
            f,
            "- the introspection strategy used was: {}",
            self.introspection_strategy.description()
        )
    }
}

/// Builder for [`RecursiveAssertionConfig`].
///
/// Collection setters accumulate; repeated entries are kept once.
#[derive(Clone)]
pub struct RecursiveAssertionConfigBuilder {
    ignore_all_null_fields: bool,
    ignore_primitive_fields: bool,
    ignored_fields: Vec<String>,
    ignored_field_regexes: Vec<String>,
    ignored_types: Vec<TypeName>,
    recurse_into_library_types: bool,
    collection_policy: CollectionPolicy,
    map_policy: MapPolicy,
    optional_policy: OptionalPolicy,
    introspection_strategy: Arc<dyn IntrospectionStrategy>,
}

impl Default for RecursiveAssertionConfigBuilder {
    fn default() -> Self {
        RecursiveAssertionConfig::default().to_builder()
    }
}

impl RecursiveAssertionConfigBuilder {
    pub fn ignore_all_null_fields(&mut self, ignore: bool) -> &mut Self {
        self.ignore_all_null_fields = ignore;
        self
    }

    pub fn ignore_primitive_fields(&mut self, ignore: bool) -> &mut Self {
        self.ignore_primitive_fields = ignore;
        self
    }

    /// Ignores the given dotted field paths, relative to the root.
    pub fn ignored_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.ignored_fields, fields.into_iter().map(Into::into));
        self
    }

    /// Ignores fields whose path fully matches one of `patterns`.
    ///
    /// Patterns are compiled by [`build`](Self::build).
    pub fn ignored_fields_matching_regexes<I, S>(&mut self, patterns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(
            &mut self.ignored_field_regexes,
            patterns.into_iter().map(Into::into),
        );
        self
    }

    pub fn ignored_types<I>(&mut self, types: I) -> &mut Self
    where
        I: IntoIterator<Item = TypeName>,
    {
        extend_unique(&mut self.ignored_types, types);
        self
    }

    pub fn ignore_type<T: ?Sized>(&mut self) -> &mut Self {
        self.ignored_types(std::iter::once(TypeName::of::<T>()))
    }

    pub fn recurse_into_library_types(&mut self, recurse: bool) -> &mut Self {
        self.recurse_into_library_types = recurse;
        self
    }

    pub fn collection_policy(&mut self, policy: CollectionPolicy) -> &mut Self {
        self.collection_policy = policy;
        self
    }

    pub fn map_policy(&mut self, policy: MapPolicy) -> &mut Self {
        self.map_policy = policy;
        self
    }

    pub fn optional_policy(&mut self, policy: OptionalPolicy) -> &mut Self {
        self.optional_policy = policy;
        self
    }

    pub fn introspection_strategy(
        &mut self,
        strategy: impl IntrospectionStrategy + 'static,
    ) -> &mut Self {
        self.introspection_strategy = Arc::new(strategy);
        self
    }

    /// Builds a frozen configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegex`] for the first pattern that does
    /// not compile.
    pub fn build(&self) -> Result<RecursiveAssertionConfig, ConfigError> {
        let ignored_field_regexes = self
            .ignored_field_regexes
            .iter()
            .map(|pattern| IgnoredRegex::compile(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RecursiveAssertionConfig {
            ignore_all_null_fields: self.ignore_all_null_fields,
            ignore_primitive_fields: self.ignore_primitive_fields,
            ignored_fields: self.ignored_fields.clone(),
            ignored_field_regexes,
            ignored_types: self.ignored_types.clone(),
            recurse_into_library_types: self.recurse_into_library_types,
            collection_policy: self.collection_policy,
            map_policy: self.map_policy,
            optional_policy: self.optional_policy,
            introspection_strategy: Arc::clone(&self.introspection_strategy),
        })
    }
}

fn extend_unique<T: PartialEq>(target: &mut Vec<T>, items: impl IntoIterator<Item = T>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepassert_reflect::Value;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::ChildNode;

    struct NoChildren;

    impl IntrospectionStrategy for NoChildren {
        fn child_nodes(&self, _node: &Value) -> Vec<ChildNode> {
            Vec::new()
        }

        fn description(&self) -> String {
            "NoChildren".to_string()
        }
    }

    #[test]
    fn test_default_description() {
        let config = RecursiveAssertionConfig::builder().build().unwrap();
        assert_eq!(
            config.to_string(),
            "- fields from standard library types (std::*, core::* or alloc::*) were excluded in the recursive assertion\n\
             - the collection assertion policy was ELEMENTS_ONLY\n\
             - the map assertion policy was MAP_VALUES_ONLY\n\
             - the optional assertion policy was OPTIONAL_VALUE_ONLY\n\
             - the introspection strategy used was: DefaultIntrospectionStrategy (all fields including inherited ones, synthetic fields skipped)\n"
        );
    }

    #[test]
    fn test_full_description() {
        let config = RecursiveAssertionConfig::builder()
            .ignore_all_null_fields(true)
            .ignored_fields(["name", "address.number"])
            .ignored_fields_matching_regexes([".*name", "zip.*"])
            .ignored_types([TypeName::named("app::Address"), TypeName::named("app::Person")])
            .ignore_primitive_fields(true)
            .recurse_into_library_types(true)
            .collection_policy(CollectionPolicy::CollectionObjectOnly)
            .map_policy(MapPolicy::MapObjectAndEntries)
            .optional_policy(OptionalPolicy::OptionalObjectAndValue)
            .introspection_strategy(NoChildren)
            .build()
            .unwrap();

        assert_eq!(
            config.to_string(),
            "- all null fields were ignored in the assertion\n\
             - the following fields were ignored in the comparison: name, address.number\n\
             - the fields matching the following regexes were ignored in the comparison: .*name, zip.*\n\
             - the following types were ignored in the assertion: app::Address, app::Person\n\
             - primitive fields were ignored in the recursive assertion\n\
             - fields from standard library types (std::*, core::* or alloc::*) were included in the recursive assertion\n\
             - the collection assertion policy was COLLECTION_OBJECT_ONLY\n\
             - the map assertion policy was MAP_OBJECT_AND_ENTRIES\n\
             - the optional assertion policy was OPTIONAL_OBJECT_AND_VALUE\n\
             - the introspection strategy used was: NoChildren\n"
        );
    }

    #[test]
    fn test_invalid_regex_fails_at_build() {
        let error = RecursiveAssertionConfig::builder()
            .ignored_fields_matching_regexes(["valid", "(unclosed"])
            .build()
            .unwrap_err();

        match error {
            ConfigError::InvalidRegex { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("Expected InvalidRegex, got {:?}", other),
        }
    }

    #[test]
    fn test_built_config_is_frozen() {
        let mut builder = RecursiveAssertionConfig::builder();
        builder.ignored_fields(["a"]);
        let config = builder.build().unwrap();

        builder
            .ignored_fields(["b"])
            .ignore_all_null_fields(true)
            .map_policy(MapPolicy::MapObjectOnly);

        assert_eq!(config.ignored_fields(), ["a".to_string()]);
        assert!(!config.ignore_all_null_fields());
        assert_eq!(config.map_policy(), MapPolicy::MapValuesOnly);
        assert_ne!(config, builder.build().unwrap());
    }

    #[test]
    fn test_setters_accumulate_without_duplicates() {
        let config = RecursiveAssertionConfig::builder()
            .ignored_fields(["a", "b"])
            .ignored_fields(["b", "c"])
            .ignore_type::<String>()
            .ignore_type::<String>()
            .build()
            .unwrap();

        assert_eq!(config.ignored_fields(), ["a", "b", "c"].map(String::from));
        assert_eq!(config.ignored_types(), [TypeName::of::<String>()]);
    }

    #[test]
    fn test_equality_ignores_strategy() {
        let default = RecursiveAssertionConfig::default();
        let custom = RecursiveAssertionConfig::builder()
            .introspection_strategy(NoChildren)
            .build()
            .unwrap();
        assert_eq!(default, custom);
        assert_eq!(custom.introspection_strategy().description(), "NoChildren");
    }

    #[rstest]
    #[case("children", true)]
    #[case("children.name", false)]
    #[case("child", false)]
    fn test_matches_ignored_field(#[case] ignored: &str, #[case] expected: bool) {
        let config = RecursiveAssertionConfig::builder()
            .ignored_fields([ignored])
            .build()
            .unwrap();
        let path = FieldPath::root().field("children").array_index(2);
        assert_eq!(config.matches_ignored_field(&path), expected);
    }

    #[rstest]
    #[case("link_to_middle\\.link_to_bottom", true)]
    #[case(".*bottom", true)]
    #[case("link", false)]
    #[case("middle", false)]
    fn test_regexes_are_full_match(#[case] pattern: &str, #[case] expected: bool) {
        let config = RecursiveAssertionConfig::builder()
            .ignored_fields_matching_regexes([pattern])
            .build()
            .unwrap();
        let path = FieldPath::parse("link_to_middle.link_to_bottom");
        assert_eq!(config.matches_ignored_field_regex(&path), expected);
    }

    #[test]
    fn test_to_builder_round_trip() {
        let config = RecursiveAssertionConfig::builder()
            .ignored_fields_matching_regexes(["a.*"])
            .optional_policy(OptionalPolicy::OptionalObjectOnly)
            .build()
            .unwrap();
        assert_eq!(config.to_builder().build().unwrap(), config);
    }
}
