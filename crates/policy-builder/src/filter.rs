// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use policy_model::{
    config::FilterOptions,
    schema::Schema,
    types::SchemaType,
};

/// Is the type selected by the filter?
///
/// A boolean filter answers for every type. Otherwise list and non-null wrappers are stripped and
/// the named type is selected unless its name is excluded. Unions are matched on their own name,
/// not on their members.
pub fn type_matches_options(schema: &Schema, typ: SchemaType<'_>, options: &FilterOptions) -> bool {
    let criteria = match options {
        FilterOptions::Always(selected) => return *selected,
        FilterOptions::Match(criteria) => criteria,
    };

    match typ {
        SchemaType::List(of_type) | SchemaType::NonNull(of_type) => {
            match schema.resolve(of_type) {
                Some(of_type) => type_matches_options(schema, of_type, options),
                // Not in the schema, but the reference still names it
                None => criteria.admits(of_type.innermost_name()),
            }
        }
        SchemaType::Named(named) => criteria.admits(named.name()),
    }
}
