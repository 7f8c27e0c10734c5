// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The schema type graph consumed by the policy generator, together with the generation options
//! and the SDL loader that builds the graph from GraphQL schema text.

pub mod config;
pub mod error;
pub mod schema;
mod sdl_loader;
pub mod types;
