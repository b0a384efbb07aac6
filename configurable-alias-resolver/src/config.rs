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

use alias_resolver::{
    PatternRoute, RouteDescriptor, RouteProvider, RoutePatternError, RouteValueDictionary,
    StaticRouteProvider,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub(crate) alias_store: AliasStoreConfig,
    #[serde(default)]
    pub(crate) route_providers: Vec<RouteProviderConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct AliasStoreConfig {
    pub(crate) file_path: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RouteProviderConfig {
    pub(crate) name: String,
    pub(crate) routes: Vec<RouteConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    pub(crate) name: Option<String>,
    pub(crate) template: String,
    #[serde(default)]
    pub(crate) priority: i32,
    #[serde(default)]
    pub(crate) defaults: RouteValueDictionary,
    #[serde(default)]
    pub(crate) alias_route: bool,
}

impl Config {
    pub fn from_json5(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(json5::from_str(contents)?)
    }

    /// One [`StaticRouteProvider`] per configured provider, in file order.
    pub fn build_route_providers(&self) -> Result<Vec<Arc<dyn RouteProvider>>, RoutePatternError> {
        self.route_providers
            .iter()
            .map(|provider| {
                let routes = provider
                    .routes
                    .iter()
                    .map(RouteConfig::build)
                    .collect::<Result<Vec<_>, _>>()?;
                debug!(
                    provider = %provider.name,
                    route_count = routes.len(),
                    "route provider configured"
                );
                Ok(Arc::new(StaticRouteProvider::new(routes)) as Arc<dyn RouteProvider>)
            })
            .collect()
    }
}

impl RouteConfig {
    fn build(&self) -> Result<RouteDescriptor, RoutePatternError> {
        let route = PatternRoute::new(&self.template, self.defaults.clone())?;
        let mut descriptor = RouteDescriptor::new(route, self.priority);
        if let Some(name) = &self.name {
            descriptor = descriptor.with_name(name);
        }
        if self.alias_route {
            descriptor = descriptor.as_alias_route();
        }
        Ok(descriptor)
    }
}
