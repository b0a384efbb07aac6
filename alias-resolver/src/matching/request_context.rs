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

use crate::route_values::RouteValueDictionary;

/// The slice of a request the route engine reads while matching or generating paths.
pub trait RequestContext: Send + Sync {
    /// Application-relative path of the request being matched, if any.
    fn request_path(&self) -> Option<&str>;

    /// Route values of the current request, used as ambient values during generation.
    fn route_values(&self) -> Option<&RouteValueDictionary>;
}

///
/// [`SyntheticRequestContext`] stands in for a live request when the route engine has
/// to run outside of one, e.g. when converting a literal route path into route values
/// while setting an alias.
///
/// It is a production test double: it carries only a path and optional ambient values,
/// no headers, no connection and no user.
///
/// # Examples
///
/// ```
/// use alias_resolver::{RequestContext, SyntheticRequestContext};
///
/// let context = SyntheticRequestContext::for_path("blog/my-post");
/// assert_eq!(context.request_path(), Some("blog/my-post"));
/// assert!(context.route_values().is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SyntheticRequestContext {
    path: Option<String>,
    route_values: Option<RouteValueDictionary>,
}

impl SyntheticRequestContext {
    /// A context with neither a path nor ambient values.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn for_path(path: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            route_values: None,
        }
    }

    pub fn with_route_values(mut self, route_values: RouteValueDictionary) -> Self {
        self.route_values = Some(route_values);
        self
    }
}

impl RequestContext for SyntheticRequestContext {
    fn request_path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn route_values(&self) -> Option<&RouteValueDictionary> {
        self.route_values.as_ref()
    }
}
