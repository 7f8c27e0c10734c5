// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use policy_model::{
    schema::Schema,
    types::{NamedType, SchemaType},
};

const ID_FIELD: &str = "id";

/// Does the type carry a field the cache can normalize instances by?
///
/// - An absent type vacuously has one.
/// - List and non-null wrappers defer to the wrapped type.
/// - A union has one only if every member does.
/// - An object has one if it declares an `id` field (whatever that field's type).
/// - Everything else (scalars, enums, interfaces, input objects) is treated as having one.
pub fn type_has_id(schema: &Schema, typ: Option<SchemaType<'_>>) -> bool {
    match typ {
        None => true,
        Some(SchemaType::List(of_type) | SchemaType::NonNull(of_type)) => {
            type_has_id(schema, schema.resolve(of_type))
        }
        Some(SchemaType::Named(NamedType::Union(union))) => union
            .members
            .iter()
            .all(|member| type_has_id(schema, schema.type_named(member))),
        Some(SchemaType::Named(NamedType::Object(object))) => object.has_field(ID_FIELD),
        Some(SchemaType::Named(_)) => true,
    }
}
