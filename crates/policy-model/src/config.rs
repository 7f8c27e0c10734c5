// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;

/// Options controlling which declarations lose their optional marker
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationConfig {
    /// Emit `import type { ... }` instead of `import { ... }`
    pub use_type_imports: bool,
    /// Make `keyFields` required for every type
    pub require_key_fields: bool,
    /// Make every non-root type's entry required
    pub require_policies_for_all_types: bool,
    /// Make field policies required for fields whose type lacks an `id`, restricted to the types
    /// this filter selects
    pub require_policies_for_fields_without_id: FilterOptions,
}

/// Either an unconditional answer or a name-based exclusion filter
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FilterOptions {
    Always(bool),
    Match(TypeMatchOptions),
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions::Always(false)
    }
}

impl From<bool> for FilterOptions {
    fn from(value: bool) -> Self {
        FilterOptions::Always(value)
    }
}

impl From<TypeMatchOptions> for FilterOptions {
    fn from(options: TypeMatchOptions) -> Self {
        FilterOptions::Match(options)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TypeMatchOptions {
    pub exclude: Vec<String>,
    pub exclude_prefixes: Vec<String>,
    pub exclude_suffixes: Vec<String>,
}

impl TypeMatchOptions {
    /// Whether a type name survives the exclusions
    pub fn admits(&self, type_name: &str) -> bool {
        !self.exclude.iter().any(|excluded| excluded == type_name)
            && !self
                .exclude_prefixes
                .iter()
                .any(|prefix| type_name.starts_with(prefix.as_str()))
            && !self
                .exclude_suffixes
                .iter()
                .any(|suffix| type_name.ends_with(suffix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_unless_excluded() {
        let options = TypeMatchOptions {
            exclude: vec!["User".to_string()],
            exclude_prefixes: vec!["Temp".to_string()],
            exclude_suffixes: vec!["Node".to_string()],
        };

        assert!(options.admits("Post"));
        assert!(options.admits("Users"));
        assert!(options.admits("user"));
        assert!(!options.admits("User"));
        assert!(!options.admits("TempUser"));
        assert!(!options.admits("UserNode"));

        assert!(TypeMatchOptions::default().admits("Anything"));
    }

    #[test]
    fn defaults_require_nothing() {
        let config = GenerationConfig::default();

        assert!(!config.use_type_imports);
        assert!(!config.require_key_fields);
        assert!(!config.require_policies_for_all_types);
        assert_eq!(
            config.require_policies_for_fields_without_id,
            FilterOptions::Always(false)
        );
    }
}
