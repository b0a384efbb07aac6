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

use crate::catalog::route_descriptor::RouteDescriptor;

/// A source of route descriptors, e.g. one application feature.
pub trait RouteProvider: Send + Sync {
    /// Appends this provider's routes to `routes`.
    fn get_routes(&self, routes: &mut Vec<RouteDescriptor>);
}

/// Provider over a fixed descriptor list.
///
/// # Examples
///
/// ```
/// use alias_resolver::{PatternRoute, RouteDescriptor, RouteProvider, RouteValueDictionary, StaticRouteProvider};
///
/// let route = PatternRoute::new("{controller}/{action}", RouteValueDictionary::new()).unwrap();
/// let provider = StaticRouteProvider::new(vec![RouteDescriptor::new(route, 0)]);
///
/// let mut routes = Vec::new();
/// provider.get_routes(&mut routes);
/// assert_eq!(routes.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticRouteProvider {
    routes: Vec<RouteDescriptor>,
}

impl StaticRouteProvider {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }
}

impl RouteProvider for StaticRouteProvider {
    fn get_routes(&self, routes: &mut Vec<RouteDescriptor>) {
        routes.extend(self.routes.iter().cloned());
    }
}
