// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;

use crate::{
    error::SchemaLoadingError,
    types::{FieldType, NamedType, SchemaType},
};

pub const QUERY_ROOT_TYPENAME: &str = "Query";
pub const MUTATION_ROOT_TYPENAME: &str = "Mutation";
pub const SUBSCRIPTION_ROOT_TYPENAME: &str = "Subscription";

pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Names of the query, mutation, and subscription entry types
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RootOperationTypes {
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

/// A read-only graph of named types. Iteration follows the order in which types were added
/// (declaration order for schemas loaded from SDL).
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    types: IndexMap<String, NamedType>,
    root_operation_types: RootOperationTypes,
}

impl Schema {
    /// Build a schema from its named types. The root operation types default to `Query`,
    /// `Mutation`, and `Subscription` when types with those names are present, and the built-in
    /// scalars are added unless already declared.
    pub fn new(types: impl IntoIterator<Item = NamedType>) -> Self {
        let mut types: IndexMap<String, NamedType> = types
            .into_iter()
            .map(|typ| (typ.name().to_string(), typ))
            .collect();

        for scalar in BUILTIN_SCALARS {
            if !types.contains_key(scalar) {
                types.insert(scalar.to_string(), NamedType::Scalar(scalar.to_string()));
            }
        }

        let default_root = |name: &str| types.contains_key(name).then(|| name.to_string());

        let root_operation_types = RootOperationTypes {
            query: default_root(QUERY_ROOT_TYPENAME),
            mutation: default_root(MUTATION_ROOT_TYPENAME),
            subscription: default_root(SUBSCRIPTION_ROOT_TYPENAME),
        };

        Self {
            types,
            root_operation_types,
        }
    }

    /// Parse GraphQL SDL into a schema
    pub fn from_sdl(sdl: &str) -> Result<Self, SchemaLoadingError> {
        crate::sdl_loader::load_schema(sdl)
    }

    pub fn with_root_operation_types(mut self, root_operation_types: RootOperationTypes) -> Self {
        self.root_operation_types = root_operation_types;
        self
    }

    pub fn types(&self) -> impl Iterator<Item = &NamedType> {
        self.types.values()
    }

    pub fn get_type(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }

    /// Look up a named type as a [`SchemaType`]
    pub fn type_named(&self, name: &str) -> Option<SchemaType<'_>> {
        self.get_type(name).map(SchemaType::Named)
    }

    /// Resolve a field's declared type. Wrappers resolve to themselves (unwrapping is up to the
    /// caller); a named reference resolves to its definition, or `None` if the schema lacks it.
    pub fn resolve<'a>(&'a self, field_type: &'a FieldType) -> Option<SchemaType<'a>> {
        match field_type {
            FieldType::Named(name) => self.type_named(name),
            FieldType::List(of_type) => Some(SchemaType::List(of_type)),
            FieldType::NonNull(of_type) => Some(SchemaType::NonNull(of_type)),
        }
    }

    pub fn root_operation_type_names(&self) -> Vec<&str> {
        let RootOperationTypes {
            query,
            mutation,
            subscription,
        } = &self.root_operation_types;

        [query, mutation, subscription]
            .into_iter()
            .flatten()
            .map(|name| name.as_str())
            .collect()
    }

    pub fn is_root_operation_type(&self, name: &str) -> bool {
        self.root_operation_type_names().contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompositeType;

    fn object(name: &str) -> NamedType {
        NamedType::Object(CompositeType::new(name).with_field("id", FieldType::named("ID")))
    }

    #[test]
    fn default_root_types() {
        let schema = Schema::new(vec![object("Query"), object("User")]);

        assert_eq!(schema.root_operation_type_names(), vec!["Query"]);
        assert!(schema.is_root_operation_type("Query"));
        assert!(!schema.is_root_operation_type("Mutation"));
        assert!(!schema.is_root_operation_type("User"));
    }

    #[test]
    fn explicit_root_types() {
        let schema = Schema::new(vec![object("RootQuery"), object("Query")])
            .with_root_operation_types(RootOperationTypes {
                query: Some("RootQuery".to_string()),
                mutation: None,
                subscription: None,
            });

        assert_eq!(schema.root_operation_type_names(), vec!["RootQuery"]);
        assert!(!schema.is_root_operation_type("Query"));
    }

    #[test]
    fn builtin_scalars_are_appended() {
        let schema = Schema::new(vec![object("User")]);

        let names: Vec<_> = schema.types().map(|typ| typ.name()).collect();
        assert_eq!(names, vec!["User", "Int", "Float", "String", "Boolean", "ID"]);
    }

    #[test]
    fn resolve_field_types() {
        let schema = Schema::new(vec![object("User")]);

        let named = FieldType::named("User");
        assert!(matches!(
            schema.resolve(&named),
            Some(SchemaType::Named(typ)) if typ.name() == "User"
        ));

        let list = FieldType::list(FieldType::named("User"));
        assert!(matches!(schema.resolve(&list), Some(SchemaType::List(_))));

        let missing = FieldType::named("Missing");
        assert_eq!(schema.resolve(&missing), None);
    }
}
