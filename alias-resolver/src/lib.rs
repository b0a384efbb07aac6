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

//! # alias-resolver
//!
//! `alias-resolver` maps human-friendly alias paths (`"blog/my-post"`) to route values
//! (`controller=Blog, action=Item, id=42`) and back.
//!
//! Typical usage is API-first and remains centered on [`AliasService`], an
//! [`AliasStore`] and one or more [`RouteProvider`]s.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use alias_resolver::{
//!     AliasService, InMemoryAliasStore, PatternRoute, RouteDescriptor, RouteProvider,
//!     RouteValueDictionary, StaticRouteProvider,
//! };
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let defaults: RouteValueDictionary = [("action", "Index")].into_iter().collect();
//! let default_route = PatternRoute::new("{controller}/{action}/{id}", defaults).unwrap();
//! let providers: Vec<Arc<dyn RouteProvider>> = vec![Arc::new(StaticRouteProvider::new(vec![
//!     RouteDescriptor::new(default_route, 0).with_name("Default"),
//! ]))];
//!
//! let service = AliasService::new(Arc::new(InMemoryAliasStore::new()), providers);
//!
//! service
//!     .set_route_path("blog/my-post", Some("Blog/Item/42"), "blog")
//!     .await
//!     .unwrap();
//!
//! let target = service.get("blog/my-post").await.unwrap().unwrap();
//! assert_eq!(target.get("id").unwrap().to_string(), "42");
//! assert_eq!(
//!     service.lookup_route_path(Some("Blog/Item/42")).await.unwrap(),
//!     vec!["blog/my-post"]
//! );
//! # });
//! ```
//!
//! ## Replace contract
//!
//! [`AliasService::replace`] leaves exactly one alias for a target: every other alias
//! whose target is matched by the new route values is deleted before the new one is set.
//!
//! ```
//! use std::sync::Arc;
//! use alias_resolver::{AliasService, InMemoryAliasStore, RouteValueDictionary};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let service = AliasService::new(Arc::new(InMemoryAliasStore::new()), Vec::new());
//! let page: RouteValueDictionary = [("controller", "Page"), ("id", "7")].into_iter().collect();
//!
//! service.set("old-name", &page, "page").await.unwrap();
//! service.replace("new-name", &page, "page").await.unwrap();
//!
//! assert_eq!(service.lookup(&page).await.unwrap(), vec!["new-name"]);
//! assert!(service.get("old-name").await.unwrap().is_none());
//! # });
//! ```
//!
//! ## Internal architecture map
//!
//! - API facade: [`AliasService`] and the route-value types
//! - Catalog: route descriptors, the provider seam, and the once-built priority snapshot
//! - Matching: the route abstraction, the template route engine, and path <-> value
//!   conversion against a synthetic request context
//! - Store: the persistence seam and the in-memory store
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events.
//! Library code emits events and does not initialize a global subscriber.
//! Binaries and tests are responsible for one-time `tracing_subscriber` initialization
//! at process boundaries.

mod alias_service;
pub use alias_service::{AliasService, AliasServiceError};

mod catalog;
pub use catalog::route_descriptor::RouteDescriptor;
pub use catalog::route_provider::{RouteProvider, StaticRouteProvider};

mod matching;
pub use matching::request_context::{RequestContext, SyntheticRequestContext};
pub use matching::route::{Route, VirtualPath, VirtualPathData};
pub use matching::route_pattern::{PatternRoute, RoutePatternError};

#[doc(hidden)]
pub mod observability;

mod route_values;
pub use route_values::{RouteValue, RouteValueDictionary, RouteValues};

mod store;
pub use store::{AliasRecord, AliasStore, AliasStoreError, InMemoryAliasStore};
