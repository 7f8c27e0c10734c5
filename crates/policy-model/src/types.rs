// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;

/// A named type definition in the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum NamedType {
    Scalar(String),
    Enum(String),
    InputObject(String),
    Object(CompositeType),
    Interface(CompositeType),
    Union(UnionType),
}

impl NamedType {
    pub fn name(&self) -> &str {
        match self {
            NamedType::Scalar(name) | NamedType::Enum(name) | NamedType::InputObject(name) => name,
            NamedType::Object(composite) | NamedType::Interface(composite) => &composite.name,
            NamedType::Union(union) => &union.name,
        }
    }

    /// Object and interface types (the ones that get policy declarations)
    pub fn as_composite(&self) -> Option<&CompositeType> {
        match self {
            NamedType::Object(composite) | NamedType::Interface(composite) => Some(composite),
            _ => None,
        }
    }

    /// Introspection types such as `__Schema` or `__Type`
    pub fn is_introspection(&self) -> bool {
        self.name().starts_with("__")
    }
}

/// An object or interface type: a name and its fields in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeType {
    pub name: String,
    pub fields: IndexMap<String, FieldType>,
}

impl CompositeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, typ: FieldType) -> Self {
        self.fields.insert(name.into(), typ);
        self
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub name: String,
    pub members: Vec<String>,
}

/// A reference to a type as written in a field declaration, such as `User`, `[User]` or
/// `[User!]!`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Named(String),
    List(Box<FieldType>),
    NonNull(Box<FieldType>),
}

impl FieldType {
    pub fn named(name: impl Into<String>) -> Self {
        FieldType::Named(name.into())
    }

    pub fn list(of_type: FieldType) -> Self {
        FieldType::List(Box::new(of_type))
    }

    pub fn non_null(of_type: FieldType) -> Self {
        FieldType::NonNull(Box::new(of_type))
    }

    pub fn innermost_name(&self) -> &str {
        match self {
            FieldType::Named(name) => name,
            FieldType::List(of_type) | FieldType::NonNull(of_type) => of_type.innermost_name(),
        }
    }
}

/// A schema type as seen by the policy predicates: either a named definition or one of the
/// wrapper types, whose wrapped type is resolved against the schema on demand (see
/// [`crate::schema::Schema::resolve`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaType<'a> {
    Named(&'a NamedType),
    List(&'a FieldType),
    NonNull(&'a FieldType),
}
