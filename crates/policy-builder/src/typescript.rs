// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Renders [`TypePolicyDeclarations`] as TypeScript against `@apollo/client/cache`.
//!
//! For a `User { id: ID!, name: String }` type with default options, the output looks like this:
//! ```typescript
//! import { FieldPolicy, FieldReadFunction, TypePolicies, TypePolicy } from '@apollo/client/cache';
//!
//! export type UserKeySpecifier = ('id' | 'name' | UserKeySpecifier)[];
//! export type UserFieldPolicy = {
//!     id?: FieldPolicy<any> | FieldReadFunction<any>,
//!     name?: FieldPolicy<any> | FieldReadFunction<any>
//! };
//! export type StrictTypedTypePolicies = {
//!     User?: Omit<TypePolicy, "fields" | "keyFields"> & {
//!         keyFields?: false | UserKeySpecifier | (() => undefined | UserKeySpecifier),
//!         fields?: UserFieldPolicy,
//!     }
//! };
//! export type TypedTypePolicies = StrictTypedTypePolicies & TypePolicies;
//! ```
//! (indented with tabs in the actual output)

use crate::declarations::{
    FieldPolicyShape, KeySpecifier, TypePolicyDeclaration, TypePolicyDeclarations,
};

const APOLLO_CACHE_MODULE: &str = "@apollo/client/cache";
const APOLLO_CACHE_IMPORTS: &str = "FieldPolicy, FieldReadFunction, TypePolicies, TypePolicy";

trait TypeScriptDeclaration {
    fn typescript_declaration(&self) -> String;
}

impl TypeScriptDeclaration for KeySpecifier {
    fn typescript_declaration(&self) -> String {
        let members = self
            .fields
            .iter()
            .map(|field_name| format!("'{field_name}'"))
            .chain(std::iter::once(self.name.clone()))
            .collect::<Vec<_>>()
            .join(" | ");

        format!("export type {} = ({})[];", self.name, members)
    }
}

impl TypeScriptDeclaration for FieldPolicyShape {
    fn typescript_declaration(&self) -> String {
        if self.fields.is_empty() {
            return format!("export type {} = {{}};", self.name);
        }

        let entries = self
            .fields
            .iter()
            .map(|entry| {
                format!(
                    "\t{}{}: FieldPolicy<any> | FieldReadFunction<any>",
                    entry.field_name,
                    optional_marker(entry.required)
                )
            })
            .collect::<Vec<_>>()
            .join(",\n");

        format!("export type {} = {{\n{}\n}};", self.name, entries)
    }
}

/// The type's entry in `StrictTypedTypePolicies`
fn aggregate_entry(declaration: &TypePolicyDeclaration) -> String {
    let key_specifier = &declaration.key_specifier.name;

    format!(
        "\n\t{}{}: Omit<TypePolicy, \"fields\" | \"keyFields\"> & {{\n\
         \t\tkeyFields{}: false | {} | (() => undefined | {}),\n\
         \t\tfields{}: {},\n\
         \t}}",
        declaration.type_name,
        optional_marker(declaration.required),
        optional_marker(declaration.key_fields_required),
        key_specifier,
        key_specifier,
        optional_marker(declaration.fields_required),
        declaration.field_policy.name,
    )
}

fn optional_marker(required: bool) -> &'static str {
    if required { "" } else { "?" }
}

impl TypePolicyDeclarations {
    /// Lines to place at the top of the generated file
    pub fn imports(&self) -> Vec<String> {
        let import_keyword = if self.use_type_imports {
            "import type"
        } else {
            "import"
        };

        vec![format!(
            "{import_keyword} {{ {APOLLO_CACHE_IMPORTS} }} from '{APOLLO_CACHE_MODULE}';"
        )]
    }

    /// The per-type declarations followed by the aggregate `StrictTypedTypePolicies` and
    /// `TypedTypePolicies` types
    pub fn content(&self) -> String {
        let per_type = self.types.iter().flat_map(|declaration| {
            [
                declaration.key_specifier.typescript_declaration(),
                declaration.field_policy.typescript_declaration(),
            ]
        });

        let entries = self
            .types
            .iter()
            .map(aggregate_entry)
            .collect::<Vec<_>>()
            .join(",");

        let aggregate = format!(
            "export type StrictTypedTypePolicies = {{{entries}\n}};\n\
             export type TypedTypePolicies = StrictTypedTypePolicies & TypePolicies;"
        );

        per_type
            .chain(std::iter::once(aggregate))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The complete file: imports, a blank line, then the content
    pub fn to_typescript(&self) -> String {
        format!("{}\n\n{}\n", self.imports().join("\n"), self.content())
    }
}
