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

use crate::matching::route::Route;
use std::sync::Arc;

///
/// [`RouteDescriptor`] pairs a [`Route`] with its evaluation priority.
///
/// Higher priorities are evaluated first. Descriptors flagged as alias routes are the
/// routes that serve aliases themselves; they never take part in alias resolution.
#[derive(Clone, Debug)]
pub struct RouteDescriptor {
    pub name: Option<String>,
    pub priority: i32,
    pub route: Arc<dyn Route>,
    pub is_alias_route: bool,
}

impl RouteDescriptor {
    pub fn new(route: impl Route + 'static, priority: i32) -> Self {
        Self::from_shared(Arc::new(route), priority)
    }

    pub fn from_shared(route: Arc<dyn Route>, priority: i32) -> Self {
        Self {
            name: None,
            priority,
            route,
            is_alias_route: false,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Marks the descriptor as a route generated from aliases.
    pub fn as_alias_route(mut self) -> Self {
        self.is_alias_route = true;
        self
    }
}
