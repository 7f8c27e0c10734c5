// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyGenerationError {
    #[error("Output file {0} requires extension to be \".ts\" or \".tsx\"")]
    InvalidOutputExtension(PathBuf),

    #[error("{0}")]
    IO(#[from] std::io::Error),
}
