// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashSet;

use policy_model::{
    config::GenerationConfig,
    schema::Schema,
    types::{CompositeType, FieldType, NamedType, SchemaType},
};
use tracing::{debug, trace};

use crate::{
    declarations::{
        FieldPolicyEntry, FieldPolicyShape, KeySpecifier, TypePolicyDeclaration,
        TypePolicyDeclarations, field_policy_name, key_specifier_name,
    },
    filter::type_matches_options,
    identity::type_has_id,
};

/// Names of the types whose aggregate entry must be required because one of their fields needs
/// an explicit policy. Scoped to a single [`generate_type_policies`] call.
#[derive(Debug, Default)]
struct NonOptionalTypes(HashSet<String>);

impl NonOptionalTypes {
    fn mark(&mut self, type_name: &str) {
        self.0.insert(type_name.to_string());
    }

    fn contains(&self, type_name: &str) -> bool {
        self.0.contains(type_name)
    }
}

/// Compute the cache policy declarations for every object and interface type of the schema.
///
/// This walks the schema twice:
/// 1. Each type's key specifier and field policy shapes are built. A field whose type is selected
///    by `require_policies_for_fields_without_id` and lacks an `id` gets a required policy, and
///    the type being walked (not the field's type) is marked non-optional.
/// 2. Each type's aggregate entry is made required if it was marked, or if it is not a root
///    operation type and either every type's policy is required or the type itself is selected
///    by the filter and lacks an `id`.
pub fn generate_type_policies(schema: &Schema, config: &GenerationConfig) -> TypePolicyDeclarations {
    let mut non_optional_types = NonOptionalTypes::default();

    let walked: Vec<(&NamedType, TypePolicyDeclaration)> = schema
        .types()
        .filter(|typ| !typ.is_introspection())
        .filter_map(|typ| typ.as_composite().map(|composite| (typ, composite)))
        .map(|(typ, composite)| {
            let declaration =
                walk_composite_type(schema, config, composite, &mut non_optional_types);
            (typ, declaration)
        })
        .collect();

    let types = walked
        .into_iter()
        .map(|(typ, mut declaration)| {
            declaration.required = non_optional_types.contains(typ.name())
                || type_requires_policy(schema, config, typ);
            debug!(
                type_name = typ.name(),
                required = declaration.required,
                fields_required = declaration.fields_required,
                "Type policy"
            );
            declaration
        })
        .collect();

    TypePolicyDeclarations {
        use_type_imports: config.use_type_imports,
        types,
    }
}

fn walk_composite_type(
    schema: &Schema,
    config: &GenerationConfig,
    composite: &CompositeType,
    non_optional_types: &mut NonOptionalTypes,
) -> TypePolicyDeclaration {
    let type_name = composite.name.as_str();

    let fields: Vec<(&str, &FieldType)> = composite
        .fields
        .iter()
        .filter(|(field_name, _)| !field_name.starts_with("__"))
        .map(|(field_name, field_type)| (field_name.as_str(), field_type))
        .collect();

    let field_policies: Vec<FieldPolicyEntry> = fields
        .iter()
        .map(|(field_name, field_type)| {
            let required = field_requires_policy(schema, config, field_type);
            trace!(type_name, field_name, required, "Field policy");
            if required {
                non_optional_types.mark(type_name);
            }
            FieldPolicyEntry {
                field_name: field_name.to_string(),
                required,
            }
        })
        .collect();

    let field_policy = FieldPolicyShape {
        name: field_policy_name(type_name),
        fields: field_policies,
    };

    TypePolicyDeclaration {
        type_name: type_name.to_string(),
        key_specifier: KeySpecifier {
            name: key_specifier_name(type_name),
            fields: fields
                .iter()
                .map(|(field_name, _)| field_name.to_string())
                .collect(),
        },
        fields_required: field_policy.has_required_field(),
        field_policy,
        // Settled in the second pass
        required: false,
        key_fields_required: config.require_key_fields,
    }
}

fn field_requires_policy(schema: &Schema, config: &GenerationConfig, field_type: &FieldType) -> bool {
    let Some(typ) = schema.resolve(field_type) else {
        // An absent type counts as having an id
        return false;
    };

    type_matches_options(schema, typ, &config.require_policies_for_fields_without_id)
        && !type_has_id(schema, Some(typ))
}

fn type_requires_policy(schema: &Schema, config: &GenerationConfig, typ: &NamedType) -> bool {
    if schema.is_root_operation_type(typ.name()) {
        return false;
    }

    let typ_ref = SchemaType::Named(typ);

    // Same polarity as the field rule: a type the filter excludes is never forced required here
    config.require_policies_for_all_types
        || (type_matches_options(schema, typ_ref, &config.require_policies_for_fields_without_id)
            && !type_has_id(schema, Some(typ_ref)))
}

#[cfg(test)]
mod tests {
    use policy_model::config::{FilterOptions, TypeMatchOptions};
    use test_log::test;

    use super::*;

    const USER_SCHEMA: &str = r#"
        type Query {
          user: User!
        }

        type User {
          id: ID!
          name: String!
        }
    "#;

    const VISITOR_SCHEMA: &str = r#"
        type Query {
          user: User
          nonNullableUser: User!
          users: [User]
          nonNullableUsers: [User!]!
          visitor: Visitor
          nonNullableVisitor: Visitor
          visitors: [Visitor]
          nonNullableVisitors: [Visitor!]!
        }

        type User {
          name: String!
        }

        type Admin {
          id: ID!
          name: String
        }

        union Visitor = User | Admin
    "#;

    fn generate(sdl: &str, config: GenerationConfig) -> TypePolicyDeclarations {
        let schema = Schema::from_sdl(sdl).unwrap();
        generate_type_policies(&schema, &config)
    }

    fn required_fields(declaration: &TypePolicyDeclaration) -> Vec<&str> {
        declaration
            .field_policy
            .fields
            .iter()
            .filter(|entry| entry.required)
            .map(|entry| entry.field_name.as_str())
            .collect()
    }

    #[test]
    fn default_config_keeps_everything_optional() {
        let declarations = generate(USER_SCHEMA, GenerationConfig::default());

        let names: Vec<_> = declarations
            .types
            .iter()
            .map(|declaration| declaration.type_name.as_str())
            .collect();
        assert_eq!(names, vec!["Query", "User"]);

        for declaration in &declarations.types {
            assert!(!declaration.required);
            assert!(!declaration.key_fields_required);
            assert!(!declaration.fields_required);
            assert!(required_fields(declaration).is_empty());
        }

        let user = declarations.get("User").unwrap();
        assert_eq!(user.key_specifier.name, "UserKeySpecifier");
        assert_eq!(user.key_specifier.fields, vec!["id", "name"]);
        assert_eq!(user.field_policy.name, "UserFieldPolicy");
    }

    #[test]
    fn require_key_fields() {
        let declarations = generate(
            USER_SCHEMA,
            GenerationConfig {
                require_key_fields: true,
                ..Default::default()
            },
        );

        assert!(declarations.get("User").unwrap().key_fields_required);
        assert!(declarations.get("Query").unwrap().key_fields_required);
        assert!(!declarations.get("User").unwrap().required);
        assert!(!declarations.get("Query").unwrap().required);
    }

    #[test]
    fn require_policies_for_all_types_spares_root_types() {
        let declarations = generate(
            USER_SCHEMA,
            GenerationConfig {
                require_policies_for_all_types: true,
                ..Default::default()
            },
        );

        assert!(declarations.get("User").unwrap().required);
        assert!(!declarations.get("Query").unwrap().required);
    }

    #[test]
    fn fields_without_id_require_policies() {
        let declarations = generate(
            VISITOR_SCHEMA,
            GenerationConfig {
                require_policies_for_fields_without_id: FilterOptions::Always(true),
                ..Default::default()
            },
        );

        let query = declarations.get("Query").unwrap();
        assert_eq!(
            required_fields(query),
            vec![
                "user",
                "nonNullableUser",
                "users",
                "nonNullableUsers",
                "visitor",
                "nonNullableVisitor",
                "visitors",
                "nonNullableVisitors"
            ]
        );
        assert!(query.fields_required);
        // A root type still becomes required through its own fields
        assert!(query.required);

        // `User` lacks an id and is selected by the filter
        let user = declarations.get("User").unwrap();
        assert!(user.required);
        assert!(!user.fields_required);

        let admin = declarations.get("Admin").unwrap();
        assert!(!admin.required);
        assert!(!admin.fields_required);
        assert!(required_fields(admin).is_empty());
    }

    #[test]
    fn required_field_makes_type_with_id_required() {
        let declarations = generate(
            r#"
            type Post {
              id: ID!
              author: Author
            }

            type Author {
              name: String
            }
            "#,
            GenerationConfig {
                require_policies_for_fields_without_id: TypeMatchOptions::default().into(),
                ..Default::default()
            },
        );

        let post = declarations.get("Post").unwrap();
        assert_eq!(required_fields(post), vec!["author"]);
        assert!(post.fields_required);
        assert!(post.required);

        // Marking goes to the enclosing type; `Author` is required on its own account only
        let author = declarations.get("Author").unwrap();
        assert!(!author.fields_required);
        assert!(author.required);
    }

    #[test]
    fn marking_does_not_cascade() {
        let declarations = generate(
            r#"
            type Query {
              post: Post
            }

            type Post {
              id: ID!
              comments: [Comment!]!
            }

            type Comment {
              id: ID!
              text: String
            }
            "#,
            GenerationConfig {
                require_policies_for_fields_without_id: FilterOptions::Always(true),
                ..Default::default()
            },
        );

        assert!(!declarations.get("Query").unwrap().required);
        assert!(!declarations.get("Post").unwrap().required);
        assert!(!declarations.get("Comment").unwrap().required);
    }

    #[test]
    fn excluded_types_keep_field_policies_optional() {
        for (sdl, options) in [
            (
                "type Query { user: User } type User { name: String! }",
                TypeMatchOptions {
                    exclude: vec!["User".to_string()],
                    ..Default::default()
                },
            ),
            (
                "type Query { user: TempUser } type TempUser { name: String! }",
                TypeMatchOptions {
                    exclude_prefixes: vec!["Temp".to_string()],
                    ..Default::default()
                },
            ),
            (
                "type Query { user: UserNode } type UserNode { name: String! }",
                TypeMatchOptions {
                    exclude_suffixes: vec!["Node".to_string()],
                    ..Default::default()
                },
            ),
        ] {
            let declarations = generate(
                sdl,
                GenerationConfig {
                    require_policies_for_fields_without_id: options.into(),
                    ..Default::default()
                },
            );

            let query = declarations.get("Query").unwrap();
            assert!(required_fields(query).is_empty());
            assert!(!query.fields_required);
            assert!(!query.required);

            for declaration in &declarations.types {
                assert!(!declaration.required, "{}", declaration.type_name);
            }
        }
    }

    #[test]
    fn excluded_type_without_id_stays_optional() {
        let declarations = generate(
            r#"
            type Query { user: User post: Post }
            type User { name: String }
            type Post { title: String }
            "#,
            GenerationConfig {
                require_policies_for_fields_without_id: TypeMatchOptions {
                    exclude: vec!["User".to_string()],
                    ..Default::default()
                }
                .into(),
                ..Default::default()
            },
        );

        // Both lack an id; only the type the filter selects is required
        assert!(!declarations.get("User").unwrap().required);
        assert!(declarations.get("Post").unwrap().required);

        let query = declarations.get("Query").unwrap();
        assert_eq!(required_fields(query), vec!["post"]);
        assert!(query.required);
    }

    #[test]
    fn union_with_member_lacking_id_requires_policy() {
        let declarations = generate(
            r#"
            type Query {
              visitor: Visitor
              admin: Admin
            }
            type User { name: String }
            type Admin { id: ID! }
            union Visitor = User | Admin
            "#,
            GenerationConfig {
                require_policies_for_fields_without_id: true.into(),
                ..Default::default()
            },
        );

        let query = declarations.get("Query").unwrap();
        assert_eq!(required_fields(query), vec!["visitor"]);
        // Unions get no declarations of their own
        assert!(declarations.get("Visitor").is_none());
    }

    #[test]
    fn interfaces_are_declared_and_treated_as_identifiable() {
        let declarations = generate(
            r#"
            interface Node {
              name: String
            }

            type Holder {
              id: ID!
              node: Node
            }
            "#,
            GenerationConfig {
                require_policies_for_fields_without_id: true.into(),
                ..Default::default()
            },
        );

        let node = declarations.get("Node").unwrap();
        assert_eq!(node.key_specifier.fields, vec!["name"]);
        assert!(!node.required);

        assert!(required_fields(declarations.get("Holder").unwrap()).is_empty());
    }

    #[test]
    fn introspection_types_and_fields_are_skipped() {
        let declarations = generate(
            r#"
            type __Internal {
              name: String
            }

            type User {
              id: ID!
              __typename: String
              name: String
            }
            "#,
            GenerationConfig::default(),
        );

        assert!(declarations.get("__Internal").is_none());
        let user = declarations.get("User").unwrap();
        assert_eq!(user.key_specifier.fields, vec!["id", "name"]);
        assert!(user.field_policy.get("__typename").is_none());
    }

    #[test]
    fn generation_is_repeatable() {
        let schema = Schema::from_sdl(VISITOR_SCHEMA).unwrap();
        let config = GenerationConfig {
            require_policies_for_fields_without_id: true.into(),
            ..Default::default()
        };

        assert_eq!(
            generate_type_policies(&schema, &config),
            generate_type_policies(&schema, &config)
        );
    }
}
