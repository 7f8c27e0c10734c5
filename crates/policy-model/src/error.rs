// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaLoadingError {
    #[error("Could not parse schema: {0}")]
    Parse(#[from] async_graphql_parser::Error),

    #[error("Type '{0}' is defined more than once")]
    DuplicateType(String),

    #[error("Cannot extend type '{0}' since it is not defined")]
    ExtensionWithoutDefinition(String),

    #[error("Cannot extend type '{0}': kind does not match the original definition")]
    ExtensionKindMismatch(String),

    #[error("Unknown type '{type_name}' referenced by '{referenced_by}'")]
    UnknownType {
        type_name: String,
        referenced_by: String,
    },
}
