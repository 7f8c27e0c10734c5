// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use anyhow::Result;
use common::logging_tracing;

use commands::{
    command::{CommandDefinition, SubcommandDefinition, config_arg},
    generate::GenerateCommandDefinition,
};

mod commands;
mod config;

fn main() -> Result<()> {
    logging_tracing::init()?;

    let subcommand_definition = SubcommandDefinition::new(
        "policygen",
        "Generate typed Apollo cache policies from a GraphQL schema",
        vec![Box::new(GenerateCommandDefinition {})],
    );

    let command = subcommand_definition
        .command()
        .version(env!("CARGO_PKG_VERSION"))
        .arg(config_arg());

    let matches = command.get_matches();

    let config_path = matches.get_one::<PathBuf>("config").cloned();
    let config = config::load_config(config_path.as_deref())?;

    subcommand_definition.execute(&matches, &config)
}
