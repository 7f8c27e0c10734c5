// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! # Tracing configuration setup.
//!
//! The generator is instrumented with Rust's `tracing` framework.
//!
//! Calling the `init` function will initialize a global tracing subscriber based on the values of
//! the `POLICYGEN_LOG` environment variable which follows the same conventions as `RUST_LOG`.
//!
//! Log lines go to stderr, so generated declarations printed to stdout can be piped into a file
//! without being interleaved with diagnostics. For example, to see every per-field decision:
//!
//! ```shell
//! $ POLICYGEN_LOG=policy_builder=trace policygen generate schema.graphql > policies.ts
//! ```

use thiserror::Error;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};

const POLICYGEN_LOG: &str = "POLICYGEN_LOG";

/// Initialize the tracing subscriber.
///
/// Creates a compact `tracing_subscriber::fmt` layer writing to stderr, filtered by
/// `POLICYGEN_LOG` (defaulting to `warn`).
pub fn init() -> Result<(), LoggingError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(POLICYGEN_LOG)
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Unable to install the tracing subscriber: {0}")]
    SubscriberInit(#[from] tracing_subscriber::util::TryInitError),
}
