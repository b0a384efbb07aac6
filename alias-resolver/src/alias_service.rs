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

use crate::catalog::route_catalog::LazyRouteCatalog;
use crate::catalog::route_descriptor::RouteDescriptor;
use crate::catalog::route_provider::RouteProvider;
use crate::matching::request_context::RequestContext;
use crate::matching::route::VirtualPathData;
use crate::matching::route_matcher;
use crate::observability::{events, fields};
use crate::route_values::{RouteValueDictionary, RouteValues};
use crate::store::{AliasStore, AliasStoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::{debug, error, info};

const COMPONENT: &str = "alias_service";

/// Failures surfaced by [`AliasService`]. Missing aliases are not failures.
#[derive(Debug)]
pub enum AliasServiceError {
    Store(AliasStoreError),
}

impl Display for AliasServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AliasServiceError::Store(err) => write!(f, "alias store failure: {err}"),
        }
    }
}

impl Error for AliasServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AliasServiceError::Store(err) => Some(err),
        }
    }
}

impl From<AliasStoreError> for AliasServiceError {
    fn from(err: AliasStoreError) -> Self {
        AliasServiceError::Store(err)
    }
}

fn log_store_failure(operation: &'static str) -> impl FnOnce(&AliasStoreError) {
    move |err: &AliasStoreError| {
        error!(
            event = events::ALIAS_STORE_FAILED,
            component = COMPONENT,
            operation,
            err = %err,
            "alias store operation failed"
        );
    }
}

fn normalize_alias_path(alias_path: &str) -> &str {
    alias_path.trim_matches('/')
}

///
/// [`AliasService`] maps alias paths to route values and back.
///
/// Literal route paths are converted with the route catalog built from the registered
/// [`RouteProvider`]s on first use. Alias paths are stored without leading or trailing
/// `/`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use alias_resolver::{AliasService, InMemoryAliasStore, RouteValueDictionary};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let service = AliasService::new(Arc::new(InMemoryAliasStore::new()), Vec::new());
///
/// let target: RouteValueDictionary = [("controller", "Blog"), ("action", "Item"), ("id", "42")]
///     .into_iter()
///     .collect();
/// service.set("/blog/my-post/", &target, "blog").await.unwrap();
///
/// assert_eq!(service.get("blog/my-post").await.unwrap(), Some(target.clone()));
/// assert_eq!(service.lookup(&target).await.unwrap(), vec!["blog/my-post"]);
/// # });
/// ```
pub struct AliasService {
    store: Arc<dyn AliasStore>,
    catalog: LazyRouteCatalog,
}

impl AliasService {
    pub fn new(store: Arc<dyn AliasStore>, route_providers: Vec<Arc<dyn RouteProvider>>) -> Self {
        Self {
            store,
            catalog: LazyRouteCatalog::new(route_providers),
        }
    }

    /// Route values stored for `alias_path`. An alias stored without a target reads as
    /// an empty dictionary.
    pub async fn get(
        &self,
        alias_path: &str,
    ) -> Result<Option<RouteValueDictionary>, AliasServiceError> {
        let record = self
            .store
            .get(normalize_alias_path(alias_path))
            .await
            .inspect_err(log_store_failure("get"))?;

        Ok(record.map(|record| record.target.map(RouteValueDictionary::from).unwrap_or_default()))
    }

    /// Stores `route_values` (in invariant string form) under `alias_path`.
    pub async fn set(
        &self,
        alias_path: &str,
        route_values: &RouteValueDictionary,
        source: &str,
    ) -> Result<(), AliasServiceError> {
        self.store_target(alias_path, Some(route_values.to_route_values()), source)
            .await
    }

    /// Stores the route values `route_path` parses to under `alias_path`.
    ///
    /// A missing or unparseable `route_path` stores the alias without a target.
    pub async fn set_route_path(
        &self,
        alias_path: &str,
        route_path: Option<&str>,
        source: &str,
    ) -> Result<(), AliasServiceError> {
        let target = self.parse_route_path(route_path);
        self.store_target(alias_path, target, source).await
    }

    /// Removes one alias; a missing path is treated as the empty path.
    pub async fn delete(&self, alias_path: Option<&str>) -> Result<(), AliasServiceError> {
        let alias_path = normalize_alias_path(alias_path.unwrap_or_default());

        self.store
            .remove(alias_path)
            .await
            .inspect_err(log_store_failure("remove"))?;

        debug!(
            event = events::ALIAS_DELETE,
            component = COMPONENT,
            alias_path,
            "alias deleted"
        );
        Ok(())
    }

    /// Removes every alias created by `source`.
    pub async fn delete_by_source(&self, source: &str) -> Result<(), AliasServiceError> {
        self.store
            .remove_by_source(source)
            .await
            .inspect_err(log_store_failure("remove_by_source"))?;

        debug!(
            event = events::ALIAS_DELETE_BY_SOURCE,
            component = COMPONENT,
            source,
            "aliases deleted by source"
        );
        Ok(())
    }

    /// Alias paths whose target is contained in `route_values`, in store order.
    pub async fn lookup(
        &self,
        route_values: &RouteValueDictionary,
    ) -> Result<Vec<String>, AliasServiceError> {
        let records = self
            .store
            .list()
            .await
            .inspect_err(log_store_failure("list"))?;

        Ok(records
            .into_iter()
            .filter(|record| {
                record
                    .target
                    .as_ref()
                    .is_some_and(|target| route_values.matches(target))
            })
            .map(|record| record.path)
            .collect())
    }

    /// Alias paths for the route values `route_path` parses to; empty when it does not
    /// parse.
    pub async fn lookup_route_path(
        &self,
        route_path: Option<&str>,
    ) -> Result<Vec<String>, AliasServiceError> {
        match self.parse_route_path(route_path) {
            Some(values) => self.lookup(&RouteValueDictionary::from(values)).await,
            None => Ok(Vec::new()),
        }
    }

    /// Points `alias_path` at `route_values` and removes every other alias for them.
    ///
    /// Not atomic: a concurrent `set` for the same target may survive.
    pub async fn replace(
        &self,
        alias_path: &str,
        route_values: &RouteValueDictionary,
        source: &str,
    ) -> Result<(), AliasServiceError> {
        let alias_path = normalize_alias_path(alias_path);

        for existing in self.lookup(route_values).await? {
            if existing == alias_path {
                continue;
            }
            self.store
                .remove(&existing)
                .await
                .inspect_err(log_store_failure("remove"))?;

            info!(
                event = events::ALIAS_REPLACE_EVICT,
                component = COMPONENT,
                evicted_alias_path = existing.as_str(),
                alias_path,
                route_values = %fields::format_route_value_dictionary(route_values),
                "replaced alias for target"
            );
        }

        self.set(alias_path, route_values, source).await
    }

    /// [`replace`](Self::replace) for a literal route path. An unparseable path has no
    /// target to deduplicate and is stored without one.
    pub async fn replace_route_path(
        &self,
        alias_path: &str,
        route_path: Option<&str>,
        source: &str,
    ) -> Result<(), AliasServiceError> {
        match self.parse_route_path(route_path) {
            Some(values) => {
                self.replace(alias_path, &RouteValueDictionary::from(values), source)
                    .await
            }
            None => self.store_target(alias_path, None, source).await,
        }
    }

    /// Every alias with its route values, in store order.
    pub async fn list(&self) -> Result<Vec<(String, RouteValueDictionary)>, AliasServiceError> {
        let records = self
            .store
            .list()
            .await
            .inspect_err(log_store_failure("list"))?;

        Ok(records
            .into_iter()
            .map(|record| {
                (
                    record.path,
                    record.target.map(RouteValueDictionary::from).unwrap_or_default(),
                )
            })
            .collect())
    }

    /// Aliases whose source starts with `source_prefix`.
    pub async fn list_by_source(
        &self,
        source_prefix: &str,
    ) -> Result<Vec<(String, RouteValueDictionary, String)>, AliasServiceError> {
        let records = self
            .store
            .list_by_source(source_prefix)
            .await
            .inspect_err(log_store_failure("list_by_source"))?;

        Ok(records
            .into_iter()
            .map(|record| {
                (
                    record.path,
                    record.target.map(RouteValueDictionary::from).unwrap_or_default(),
                    record.source,
                )
            })
            .collect())
    }

    /// Paths the catalog routes generate for `route_values`, highest priority first.
    pub fn lookup_virtual_paths(
        &self,
        route_values: &RouteValueDictionary,
        context: &dyn RequestContext,
    ) -> Vec<VirtualPathData> {
        route_matcher::generate_paths(route_values, context, self.catalog.get())
    }

    /// The cached route catalog, highest priority first.
    pub fn route_descriptors(&self) -> &[RouteDescriptor] {
        self.catalog.get().descriptors()
    }

    fn parse_route_path(&self, route_path: Option<&str>) -> Option<RouteValues> {
        let values = route_matcher::parse_to_values(route_path, self.catalog.get());
        if values.is_none() {
            debug!(
                event = events::ALIAS_ROUTE_PATH_UNRESOLVED,
                component = COMPONENT,
                route_path = %fields::format_optional_path(route_path),
                "route path did not resolve to route values"
            );
        }
        values
    }

    async fn store_target(
        &self,
        alias_path: &str,
        target: Option<RouteValues>,
        source: &str,
    ) -> Result<(), AliasServiceError> {
        let alias_path = normalize_alias_path(alias_path);
        let formatted_target = fields::format_route_values(target.as_ref());

        self.store
            .set(alias_path, target, source)
            .await
            .inspect_err(log_store_failure("set"))?;

        debug!(
            event = events::ALIAS_SET,
            component = COMPONENT,
            alias_path,
            source,
            route_values = %formatted_target,
            "alias stored"
        );
        Ok(())
    }
}
