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

//! Path <-> route-value conversion over an ordered route catalog.

use crate::catalog::route_catalog::RouteCatalog;
use crate::matching::request_context::{RequestContext, SyntheticRequestContext};
use crate::matching::route::VirtualPathData;
use crate::route_values::{RouteValueDictionary, RouteValues};

/// Parses `path` with the first catalog route that matches it.
pub(crate) fn parse_to_values(path: Option<&str>, catalog: &RouteCatalog) -> Option<RouteValues> {
    let context = SyntheticRequestContext::for_path(path?);

    catalog
        .descriptors()
        .iter()
        .find_map(|descriptor| descriptor.route.route_data(&context))
        .map(|values| values.to_route_values())
}

/// Generates a virtual path from every catalog route able to represent `values`,
/// in catalog priority order.
pub(crate) fn generate_paths(
    values: &RouteValueDictionary,
    context: &dyn RequestContext,
    catalog: &RouteCatalog,
) -> Vec<VirtualPathData> {
    catalog
        .descriptors()
        .iter()
        .filter_map(|descriptor| {
            descriptor
                .route
                .virtual_path(context, values)
                .map(|generated| VirtualPathData {
                    virtual_path: generated.path,
                    route_values: generated.route_values,
                    route_name: descriptor.name.clone(),
                    priority: descriptor.priority,
                })
        })
        .collect()
}
