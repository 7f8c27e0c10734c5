// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{fs, path::Path};

use tracing::info;

use crate::{declarations::TypePolicyDeclarations, error::PolicyGenerationError};

const ACCEPTED_EXTENSIONS: [&str; 2] = ["ts", "tsx"];

/// The declarations are TypeScript-only, so the target must be a `.ts` or `.tsx` file
pub fn validate_output_path(path: impl AsRef<Path>) -> Result<(), PolicyGenerationError> {
    let path = path.as_ref();

    let accepted = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext))
        .unwrap_or(false);

    if accepted {
        Ok(())
    } else {
        Err(PolicyGenerationError::InvalidOutputExtension(
            path.to_path_buf(),
        ))
    }
}

/// Validate the target and write the rendered declarations to it, creating parent directories
/// as needed
pub fn write_declarations(
    declarations: &TypePolicyDeclarations,
    path: impl AsRef<Path>,
) -> Result<(), PolicyGenerationError> {
    let path = path.as_ref();
    validate_output_path(path)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, declarations.to_typescript())?;

    info!("Wrote {} type policies to {}", declarations.types.len(), path.display());

    Ok(())
}
