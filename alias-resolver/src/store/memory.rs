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

use crate::route_values::RouteValues;
use crate::store::{AliasRecord, AliasStore, AliasStoreError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Clone, Debug)]
struct StoredAlias {
    target: Option<RouteValues>,
    source: String,
}

/// Process-local [`AliasStore`]; lists in path order.
#[derive(Debug, Default)]
pub struct InMemoryAliasStore {
    aliases: RwLock<BTreeMap<String, StoredAlias>>,
}

impl InMemoryAliasStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records`; later duplicates win.
    pub fn with_records(records: impl IntoIterator<Item = AliasRecord>) -> Self {
        let aliases = records
            .into_iter()
            .map(|record| {
                (
                    record.path,
                    StoredAlias {
                        target: record.target,
                        source: record.source,
                    },
                )
            })
            .collect();
        Self {
            aliases: RwLock::new(aliases),
        }
    }
}

fn to_record(path: &str, alias: &StoredAlias) -> AliasRecord {
    AliasRecord {
        path: path.to_string(),
        target: alias.target.clone(),
        source: alias.source.clone(),
    }
}

#[async_trait]
impl AliasStore for InMemoryAliasStore {
    async fn get(&self, path: &str) -> Result<Option<AliasRecord>, AliasStoreError> {
        let aliases = self.aliases.read().await;
        Ok(aliases.get(path).map(|alias| to_record(path, alias)))
    }

    async fn set(
        &self,
        path: &str,
        target: Option<RouteValues>,
        source: &str,
    ) -> Result<(), AliasStoreError> {
        let mut aliases = self.aliases.write().await;
        aliases.insert(
            path.to_string(),
            StoredAlias {
                target,
                source: source.to_string(),
            },
        );
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), AliasStoreError> {
        let mut aliases = self.aliases.write().await;
        aliases.remove(path);
        Ok(())
    }

    async fn remove_by_source(&self, source: &str) -> Result<(), AliasStoreError> {
        let mut aliases = self.aliases.write().await;
        aliases.retain(|_, alias| alias.source != source);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<AliasRecord>, AliasStoreError> {
        let aliases = self.aliases.read().await;
        Ok(aliases
            .iter()
            .map(|(path, alias)| to_record(path, alias))
            .collect())
    }

    async fn list_by_source(
        &self,
        source_prefix: &str,
    ) -> Result<Vec<AliasRecord>, AliasStoreError> {
        let aliases = self.aliases.read().await;
        Ok(aliases
            .iter()
            .filter(|(_, alias)| alias.source.starts_with(source_prefix))
            .map(|(path, alias)| to_record(path, alias))
            .collect())
    }
}
