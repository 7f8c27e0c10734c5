// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{
    Positioned,
    types::{
        BaseType, FieldDefinition, SchemaDefinition, Type, TypeDefinition, TypeKind,
        TypeSystemDefinition,
    },
};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::{
    error::SchemaLoadingError,
    schema::{RootOperationTypes, Schema},
    types::{CompositeType, FieldType, NamedType, UnionType},
};

pub(crate) fn load_schema(sdl: &str) -> Result<Schema, SchemaLoadingError> {
    let document = async_graphql_parser::parse_schema(sdl)?;

    let mut types: IndexMap<String, NamedType> = IndexMap::new();
    let mut extensions: Vec<&TypeDefinition> = vec![];
    let mut schema_definitions: Vec<&SchemaDefinition> = vec![];

    for definition in &document.definitions {
        match definition {
            TypeSystemDefinition::Type(type_definition) => {
                let type_definition = &type_definition.node;
                if type_definition.extend {
                    extensions.push(type_definition);
                    continue;
                }

                let named_type = named_type(type_definition);
                let name = named_type.name().to_string();
                if types.contains_key(&name) {
                    return Err(SchemaLoadingError::DuplicateType(name));
                }
                types.insert(name, named_type);
            }
            TypeSystemDefinition::Schema(schema_definition) => {
                schema_definitions.push(&schema_definition.node);
            }
            TypeSystemDefinition::Directive(_) => {}
        }
    }

    // Extensions may appear before the definition they extend, so apply them once all base
    // definitions are known
    for extension in extensions {
        apply_extension(&mut types, extension)?;
    }

    let schema = Schema::new(types.into_values());
    // Without a `schema { ... }` block, the conventional root names apply
    let schema = match declared_root_operation_types(&schema_definitions) {
        Some(root_operation_types) => schema.with_root_operation_types(root_operation_types),
        None => schema,
    };

    check_type_references(&schema)?;

    info!(
        "Loaded schema with {} types (roots: {:?})",
        schema.types().count(),
        schema.root_operation_type_names()
    );

    Ok(schema)
}

fn named_type(type_definition: &TypeDefinition) -> NamedType {
    let name = type_definition.name.node.to_string();

    match &type_definition.kind {
        TypeKind::Scalar => NamedType::Scalar(name),
        TypeKind::Enum(_) => NamedType::Enum(name),
        TypeKind::InputObject(_) => NamedType::InputObject(name),
        TypeKind::Object(object) => NamedType::Object(composite_type(name, &object.fields)),
        TypeKind::Interface(interface) => {
            NamedType::Interface(composite_type(name, &interface.fields))
        }
        TypeKind::Union(union) => NamedType::Union(UnionType {
            name,
            members: union
                .members
                .iter()
                .map(|member| member.node.to_string())
                .collect(),
        }),
    }
}

fn composite_type(name: String, fields: &[Positioned<FieldDefinition>]) -> CompositeType {
    let mut composite = CompositeType::new(name);
    extend_fields(&mut composite, fields);
    composite
}

fn extend_fields(composite: &mut CompositeType, fields: &[Positioned<FieldDefinition>]) {
    for field in fields {
        let field = &field.node;
        composite
            .fields
            .insert(field.name.node.to_string(), field_type(&field.ty.node));
    }
}

fn field_type(typ: &Type) -> FieldType {
    let base = match &typ.base {
        BaseType::Named(name) => FieldType::named(name.as_str()),
        BaseType::List(of_type) => FieldType::list(field_type(of_type)),
    };

    if typ.nullable {
        base
    } else {
        FieldType::non_null(base)
    }
}

fn apply_extension(
    types: &mut IndexMap<String, NamedType>,
    extension: &TypeDefinition,
) -> Result<(), SchemaLoadingError> {
    let name = extension.name.node.as_str();
    debug!("Applying extension to '{name}'");

    let existing = types
        .get_mut(name)
        .ok_or_else(|| SchemaLoadingError::ExtensionWithoutDefinition(name.to_string()))?;

    match (existing, &extension.kind) {
        (NamedType::Object(composite), TypeKind::Object(object)) => {
            extend_fields(composite, &object.fields);
        }
        (NamedType::Interface(composite), TypeKind::Interface(interface)) => {
            extend_fields(composite, &interface.fields);
        }
        (NamedType::Union(union), TypeKind::Union(extension)) => {
            for member in &extension.members {
                let member = member.node.to_string();
                if !union.members.contains(&member) {
                    union.members.push(member);
                }
            }
        }
        // Extensions of these kinds only add values or directives, which we do not track
        (NamedType::Scalar(_), TypeKind::Scalar)
        | (NamedType::Enum(_), TypeKind::Enum(_))
        | (NamedType::InputObject(_), TypeKind::InputObject(_)) => {}
        _ => {
            return Err(SchemaLoadingError::ExtensionKindMismatch(name.to_string()));
        }
    }

    Ok(())
}

fn declared_root_operation_types(
    schema_definitions: &[&SchemaDefinition],
) -> Option<RootOperationTypes> {
    if schema_definitions.is_empty() {
        return None;
    }

    let roots = schema_definitions.iter().fold(
        RootOperationTypes::default(),
        |mut roots, schema_definition| {
            if let Some(query) = root_name(&schema_definition.query) {
                roots.query = Some(query);
            }
            if let Some(mutation) = root_name(&schema_definition.mutation) {
                roots.mutation = Some(mutation);
            }
            if let Some(subscription) = root_name(&schema_definition.subscription) {
                roots.subscription = Some(subscription);
            }
            roots
        },
    );

    Some(roots)
}

fn root_name<T: ToString>(name: &Option<Positioned<T>>) -> Option<String> {
    name.as_ref().map(|name| name.node.to_string())
}

fn check_type_references(schema: &Schema) -> Result<(), SchemaLoadingError> {
    let unknown = |type_name: &str, referenced_by: String| SchemaLoadingError::UnknownType {
        type_name: type_name.to_string(),
        referenced_by,
    };

    for typ in schema.types() {
        match typ {
            NamedType::Object(composite) | NamedType::Interface(composite) => {
                for (field_name, field_type) in &composite.fields {
                    let type_name = field_type.innermost_name();
                    if schema.get_type(type_name).is_none() {
                        return Err(unknown(
                            type_name,
                            format!("{}.{}", composite.name, field_name),
                        ));
                    }
                }
            }
            NamedType::Union(union) => {
                if let Some(member) = union
                    .members
                    .iter()
                    .find(|member| schema.get_type(member).is_none())
                {
                    return Err(unknown(member, union.name.clone()));
                }
            }
            NamedType::Scalar(_) | NamedType::Enum(_) | NamedType::InputObject(_) => {}
        }
    }

    for root in schema.root_operation_type_names() {
        if schema.get_type(root).is_none() {
            return Err(unknown(root, "schema".to_string()));
        }
    }

    Ok(())
}
