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

//! [`AliasStoreJsonFile`] keeps aliases in a single JSON document:
//!
//! ```json
//! { "aliases": [ { "path": "about", "target": { "controller": "Page", "id": "7" }, "source": "page" } ] }
//! ```
//!
//! The whole document is loaded on open and rewritten on every mutation through a
//! sibling temp file and a rename.

use alias_resolver::observability::events;
use alias_resolver::{AliasRecord, AliasStore, AliasStoreError, RouteValues};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

const COMPONENT: &str = "alias_store_json_file";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AliasFile {
    #[serde(default)]
    aliases: Vec<AliasRecord>,
}

#[derive(Clone, Debug)]
struct StoredAlias {
    target: Option<RouteValues>,
    source: String,
}

type AliasMap = BTreeMap<String, StoredAlias>;

#[derive(Debug)]
pub struct AliasStoreJsonFile {
    file_path: PathBuf,
    aliases: RwLock<AliasMap>,
}

impl AliasStoreJsonFile {
    /// Loads the store from `file_path`. A missing file opens an empty store; the file
    /// is created on the first mutation.
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self, AliasStoreError> {
        let file_path = file_path.into();

        let aliases = match fs::read_to_string(&file_path) {
            Ok(data) => {
                let document: AliasFile = serde_json::from_str(&data)
                    .map_err(|err| AliasStoreError::Serialization(err.to_string()))?;
                let aliases: AliasMap = document
                    .aliases
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
                info!(
                    event = events::ALIAS_STORE_LOAD_OK,
                    component = COMPONENT,
                    file_path = %file_path.display(),
                    alias_count = aliases.len(),
                    "alias file loaded"
                );
                aliases
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    event = events::ALIAS_STORE_LOAD_MISSING,
                    component = COMPONENT,
                    file_path = %file_path.display(),
                    "alias file not found, starting empty"
                );
                AliasMap::new()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            file_path,
            aliases: RwLock::new(aliases),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Applies `mutate` to a copy of the aliases, persists the copy and only then
    /// publishes it, so a failed write leaves the store unchanged.
    ///
    /// The file is written synchronously under the write lock.
    async fn mutate(&self, mutate: impl FnOnce(&mut AliasMap)) -> Result<(), AliasStoreError> {
        let mut aliases = self.aliases.write().await;
        let mut updated = aliases.clone();
        mutate(&mut updated);

        match persist(&self.file_path, &updated) {
            Ok(()) => {
                debug!(
                    event = events::ALIAS_STORE_PERSIST_OK,
                    component = COMPONENT,
                    file_path = %self.file_path.display(),
                    alias_count = updated.len(),
                    "alias file written"
                );
                *aliases = updated;
                Ok(())
            }
            Err(err) => {
                error!(
                    event = events::ALIAS_STORE_PERSIST_FAILED,
                    component = COMPONENT,
                    file_path = %self.file_path.display(),
                    err = %err,
                    "alias file write failed"
                );
                Err(err)
            }
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

fn temp_path(file_path: &Path) -> PathBuf {
    let mut file_name = file_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("aliases.json"));
    file_name.push(".tmp");
    file_path.with_file_name(file_name)
}

fn persist(file_path: &Path, aliases: &AliasMap) -> Result<(), AliasStoreError> {
    let document = AliasFile {
        aliases: aliases
            .iter()
            .map(|(path, alias)| to_record(path, alias))
            .collect(),
    };
    let data = serde_json::to_string_pretty(&document)
        .map_err(|err| AliasStoreError::Serialization(err.to_string()))?;

    let temp = temp_path(file_path);
    fs::write(&temp, data)
        .and_then(|()| fs::rename(&temp, file_path))
        .map_err(|err| {
            let _ = fs::remove_file(&temp);
            AliasStoreError::from(err)
        })
}

#[async_trait]
impl AliasStore for AliasStoreJsonFile {
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
        self.mutate(|aliases| {
            aliases.insert(
                path.to_string(),
                StoredAlias {
                    target,
                    source: source.to_string(),
                },
            );
        })
        .await
    }

    async fn remove(&self, path: &str) -> Result<(), AliasStoreError> {
        if !self.aliases.read().await.contains_key(path) {
            return Ok(());
        }
        self.mutate(|aliases| {
            aliases.remove(path);
        })
        .await
    }

    async fn remove_by_source(&self, source: &str) -> Result<(), AliasStoreError> {
        self.mutate(|aliases| aliases.retain(|_, alias| alias.source != source))
            .await
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
