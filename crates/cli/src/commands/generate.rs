// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgMatches, Command};
use colored::Colorize;
use policy_builder::{generate_type_policies, output};
use policy_model::{
    config::{FilterOptions, GenerationConfig, TypeMatchOptions},
    schema::Schema,
};
use tracing::info;

use crate::commands::command::{
    CommandDefinition, flag_arg, get, get_many, get_required, output_arg, repeated_arg,
    schema_file_arg,
};
use crate::config::Config;

pub(crate) struct GenerateCommandDefinition {}

impl CommandDefinition for GenerateCommandDefinition {
    fn command(&self) -> Command {
        Command::new("generate")
            .about("Generate typed cache policies (TypeScript) for a GraphQL schema")
            .arg(schema_file_arg())
            .arg(output_arg())
            .arg(flag_arg(
                "use-type-imports",
                "Use `import type {}` rather than `import {}`",
            ))
            .arg(flag_arg(
                "require-key-fields",
                "Make `keyFields` required for every type",
            ))
            .arg(flag_arg(
                "require-policies-for-all-types",
                "Make the policy of every type (except the root operation types) required",
            ))
            .arg(flag_arg(
                "require-policies-for-fields-without-id",
                "Make field policies required where the field's type (or its list/union members) has no `id`",
            ))
            .arg(repeated_arg(
                "exclude",
                "NAME",
                "Type to exempt from required field policies",
            ))
            .arg(repeated_arg(
                "exclude-prefix",
                "PREFIX",
                "Exempt types whose name starts with this prefix from required field policies",
            ))
            .arg(repeated_arg(
                "exclude-suffix",
                "SUFFIX",
                "Exempt types whose name ends with this suffix from required field policies",
            ))
    }

    fn execute(&self, matches: &ArgMatches, config: &Config) -> Result<()> {
        let schema_path: PathBuf = get_required(matches, "schema")?;
        let output: Option<PathBuf> = get(matches, "output");

        // Fail before doing any work if the target cannot hold TypeScript
        if let Some(output) = &output {
            output::validate_output_path(output)?;
        }

        let generation_config = generation_config(matches, &config.generate);
        info!("Generating with {generation_config:?}");

        let sdl = std::fs::read_to_string(&schema_path)
            .with_context(|| format!("Failed to read schema file '{}'", schema_path.display()))?;
        let schema = Schema::from_sdl(&sdl)
            .with_context(|| format!("Failed to load schema '{}'", schema_path.display()))?;

        let declarations = generate_type_policies(&schema, &generation_config);

        match output {
            Some(output) => {
                output::write_declarations(&declarations, &output)?;
                eprintln!(
                    "{}",
                    format!(
                        "Generated {} type policies in {}",
                        declarations.types.len(),
                        output.display()
                    )
                    .green()
                );
            }
            None => print!("{}", declarations.to_typescript()),
        }

        Ok(())
    }
}

/// Command line flags layered over the configuration file: boolean flags can only turn options
/// on, and any exclusion flag replaces the configured filter.
fn generation_config(matches: &ArgMatches, base: &GenerationConfig) -> GenerationConfig {
    let exclusions = TypeMatchOptions {
        exclude: get_many(matches, "exclude"),
        exclude_prefixes: get_many(matches, "exclude-prefix"),
        exclude_suffixes: get_many(matches, "exclude-suffix"),
    };
    let has_exclusions = exclusions != TypeMatchOptions::default();

    let require_policies_for_fields_without_id = if has_exclusions {
        FilterOptions::Match(exclusions)
    } else if matches.get_flag("require-policies-for-fields-without-id") {
        FilterOptions::Always(true)
    } else {
        base.require_policies_for_fields_without_id.clone()
    };

    GenerationConfig {
        use_type_imports: base.use_type_imports || matches.get_flag("use-type-imports"),
        require_key_fields: base.require_key_fields || matches.get_flag("require-key-fields"),
        require_policies_for_all_types: base.require_policies_for_all_types
            || matches.get_flag("require-policies-for-all-types"),
        require_policies_for_fields_without_id,
    }
}
