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

use crate::matching::request_context::RequestContext;
use crate::route_values::RouteValueDictionary;
use serde::Serialize;
use std::fmt::Debug;

/// A route the matching engine can evaluate in both directions.
pub trait Route: Send + Sync + Debug {
    /// Extracts route values from the context's request path, or `None` when the
    /// route does not match it.
    fn route_data(&self, context: &dyn RequestContext) -> Option<RouteValueDictionary>;

    /// Generates an application-relative path for `values`, or `None` when the route
    /// cannot represent them.
    fn virtual_path(
        &self,
        context: &dyn RequestContext,
        values: &RouteValueDictionary,
    ) -> Option<VirtualPath>;
}

/// Output of a single route's path generation.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualPath {
    pub path: String,
    pub route_values: RouteValueDictionary,
}

/// A generated path together with the catalog entry that produced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VirtualPathData {
    pub virtual_path: String,
    pub route_values: RouteValueDictionary,
    pub route_name: Option<String>,
    pub priority: i32,
}
