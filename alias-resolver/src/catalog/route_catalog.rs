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

//! Priority-ordered route snapshot used for matching and generation.

use crate::catalog::route_descriptor::RouteDescriptor;
use crate::catalog::route_provider::RouteProvider;
use crate::observability::events;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

const COMPONENT: &str = "route_catalog";

/// Provider routes without alias routes, sorted by descending priority.
///
/// Routes sharing a priority keep provider registration order, then insertion order.
pub(crate) struct RouteCatalog {
    descriptors: Vec<RouteDescriptor>,
}

impl RouteCatalog {
    /// Collects every provider's routes and builds the ordered snapshot.
    pub(crate) fn from_providers(providers: &[Arc<dyn RouteProvider>]) -> Self {
        let mut collected = Vec::new();
        for provider in providers {
            let mut routes = Vec::new();
            provider.get_routes(&mut routes);
            collected.extend(routes);
        }

        let collected_count = collected.len();
        let catalog = Self::from_descriptors(collected);

        info!(
            event = events::ROUTE_CATALOG_BUILT,
            component = COMPONENT,
            provider_count = providers.len(),
            route_count = catalog.descriptors.len(),
            skipped_alias_routes = collected_count - catalog.descriptors.len(),
            "route catalog built"
        );
        catalog
    }

    pub(crate) fn from_descriptors(descriptors: Vec<RouteDescriptor>) -> Self {
        let mut descriptors: Vec<RouteDescriptor> = descriptors
            .into_iter()
            .filter(|descriptor| {
                if descriptor.is_alias_route {
                    debug!(
                        event = events::ROUTE_CATALOG_ALIAS_ROUTE_SKIPPED,
                        component = COMPONENT,
                        route_name = descriptor.name.as_deref().unwrap_or("unnamed"),
                        priority = descriptor.priority,
                        "skipping alias route"
                    );
                }
                !descriptor.is_alias_route
            })
            .collect();

        // stable: ties keep provider order
        descriptors.sort_by(|left, right| right.priority.cmp(&left.priority));

        Self { descriptors }
    }

    pub(crate) fn descriptors(&self) -> &[RouteDescriptor] {
        &self.descriptors
    }
}

/// Builds the catalog on first access and serves the same snapshot afterwards.
///
/// Routes that providers add after the first access are not picked up.
pub(crate) struct LazyRouteCatalog {
    providers: Vec<Arc<dyn RouteProvider>>,
    catalog: OnceLock<RouteCatalog>,
}

impl LazyRouteCatalog {
    pub(crate) fn new(providers: Vec<Arc<dyn RouteProvider>>) -> Self {
        Self {
            providers,
            catalog: OnceLock::new(),
        }
    }

    pub(crate) fn get(&self) -> &RouteCatalog {
        self.catalog
            .get_or_init(|| RouteCatalog::from_providers(&self.providers))
    }
}
