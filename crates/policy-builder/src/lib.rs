// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Decides which Apollo cache policy declarations must be spelled out for a schema and renders
//! them as TypeScript.
//!
//! The decisions rest on two predicates over schema types:
//! - [`identity::type_has_id`]: can the cache identify instances of the type on its own?
//! - [`filter::type_matches_options`]: does the configured filter select the type?
//!
//! [`generator::generate_type_policies`] combines them for every object and interface type and
//! returns a [`declarations::TypePolicyDeclarations`], which [`typescript`] renders.

pub mod declarations;
pub mod error;
pub mod filter;
pub mod generator;
pub mod identity;
pub mod output;
pub mod typescript;

pub use generator::generate_type_policies;
