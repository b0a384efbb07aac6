/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Alias persistence seam.
//!
//! [`AliasStore`] is the only contract the alias service needs from storage. The
//! in-memory implementation lives here; durable implementations live in their own
//! crates (see `alias-store-json-file`).

mod memory;
pub use memory::InMemoryAliasStore;

use crate::route_values::RouteValues;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One persisted alias.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    pub path: String,
    pub target: Option<RouteValues>,
    pub source: String,
}

/// Storage-layer faults. Not-found is never an error.
#[derive(Debug)]
pub enum AliasStoreError {
    Io(std::io::Error),
    Serialization(String),
}

impl Display for AliasStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AliasStoreError::Io(err) => write!(f, "alias storage I/O failed: {err}"),
            AliasStoreError::Serialization(reason) => {
                write!(f, "alias storage content is invalid: {reason}")
            }
        }
    }
}

impl Error for AliasStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AliasStoreError::Io(err) => Some(err),
            AliasStoreError::Serialization(_) => None,
        }
    }
}

impl From<std::io::Error> for AliasStoreError {
    fn from(err: std::io::Error) -> Self {
        AliasStoreError::Io(err)
    }
}

/// Persistent mapping from alias path to (target route values, source tag).
///
/// Paths are unique; `set` overwrites. Removing a missing path is a no-op.
#[async_trait]
pub trait AliasStore: Send + Sync {
    async fn get(&self, path: &str) -> Result<Option<AliasRecord>, AliasStoreError>;

    async fn set(
        &self,
        path: &str,
        target: Option<RouteValues>,
        source: &str,
    ) -> Result<(), AliasStoreError>;

    async fn remove(&self, path: &str) -> Result<(), AliasStoreError>;

    /// Removes every alias whose source equals `source`.
    async fn remove_by_source(&self, source: &str) -> Result<(), AliasStoreError>;

    async fn list(&self) -> Result<Vec<AliasRecord>, AliasStoreError>;

    /// Lists aliases whose source starts with `source_prefix`.
    async fn list_by_source(&self, source_prefix: &str)
        -> Result<Vec<AliasRecord>, AliasStoreError>;
}
