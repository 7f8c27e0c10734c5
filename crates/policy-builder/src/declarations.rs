// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// Everything generated for a schema, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct TypePolicyDeclarations {
    pub use_type_imports: bool,
    pub types: Vec<TypePolicyDeclaration>,
}

impl TypePolicyDeclarations {
    pub fn get(&self, type_name: &str) -> Option<&TypePolicyDeclaration> {
        self.types
            .iter()
            .find(|declaration| declaration.type_name == type_name)
    }
}

/// Declarations for one object or interface type, plus the markers of its entry in the
/// aggregate `StrictTypedTypePolicies` shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TypePolicyDeclaration {
    pub type_name: String,
    pub key_specifier: KeySpecifier,
    pub field_policy: FieldPolicyShape,
    /// The type's own entry in the aggregate is required
    pub required: bool,
    pub key_fields_required: bool,
    pub fields_required: bool,
}

/// `<Type>KeySpecifier`: the field names that may identify an instance. The shape refers to
/// itself so that nested specifiers (`['author', ['id']]`) are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct KeySpecifier {
    pub name: String,
    pub fields: Vec<String>,
}

/// `<Type>FieldPolicy`: one read/merge customization point per field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPolicyShape {
    pub name: String,
    pub fields: Vec<FieldPolicyEntry>,
}

impl FieldPolicyShape {
    pub fn get(&self, field_name: &str) -> Option<&FieldPolicyEntry> {
        self.fields
            .iter()
            .find(|entry| entry.field_name == field_name)
    }

    pub fn has_required_field(&self) -> bool {
        self.fields.iter().any(|entry| entry.required)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldPolicyEntry {
    pub field_name: String,
    pub required: bool,
}

pub(crate) fn key_specifier_name(type_name: &str) -> String {
    format!("{type_name}KeySpecifier")
}

pub(crate) fn field_policy_name(type_name: &str) -> String {
    format!("{type_name}FieldPolicy")
}
