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

mod support;

use alias_resolver::{
    AliasService, InMemoryAliasStore, RouteDescriptor, RouteProvider, StaticRouteProvider,
};
use std::sync::Arc;
use support::{application_providers, init_logging, route};

fn names(descriptors: &[RouteDescriptor]) -> Vec<Option<&str>> {
    descriptors
        .iter()
        .map(|descriptor| descriptor.name.as_deref())
        .collect()
}

#[test]
fn catalog_excludes_alias_routes_and_orders_by_priority() {
    init_logging();
    let service = AliasService::new(Arc::new(InMemoryAliasStore::new()), application_providers());

    assert_eq!(
        names(service.route_descriptors()),
        vec![Some("BlogPost"), Some("Default")]
    );
    assert!(service
        .route_descriptors()
        .iter()
        .all(|descriptor| !descriptor.is_alias_route));
}

#[test]
fn equal_priorities_keep_provider_order() {
    init_logging();
    let first: Arc<dyn RouteProvider> = Arc::new(StaticRouteProvider::new(vec![
        route("First", "first/{id}", &[], 5),
        route("Low", "low/{id}", &[], -1),
    ]));
    let second: Arc<dyn RouteProvider> = Arc::new(StaticRouteProvider::new(vec![
        route("Second", "second/{id}", &[], 5),
        route("High", "high/{id}", &[], 50),
    ]));
    let service = AliasService::new(Arc::new(InMemoryAliasStore::new()), vec![first, second]);

    assert_eq!(
        names(service.route_descriptors()),
        vec![Some("High"), Some("First"), Some("Second"), Some("Low")]
    );
}

#[tokio::test]
async fn higher_priority_route_wins_when_parsing_route_paths() {
    init_logging();
    let generic: Arc<dyn RouteProvider> = Arc::new(StaticRouteProvider::new(vec![route(
        "Generic",
        "{controller}/{id}",
        &[],
        0,
    )]));
    let specific: Arc<dyn RouteProvider> = Arc::new(StaticRouteProvider::new(vec![route(
        "Product",
        "product/{id}",
        &[("controller", "Catalog"), ("action", "Product")],
        10,
    )]));
    let service = AliasService::new(Arc::new(InMemoryAliasStore::new()), vec![generic, specific]);

    service
        .set_route_path("tea", Some("product/42"), "catalog")
        .await
        .unwrap();

    let target = service.get("tea").await.unwrap().unwrap();
    assert_eq!(target.get("controller").unwrap().to_string(), "Catalog");
    assert_eq!(target.get("action").unwrap().to_string(), "Product");
}

#[test]
fn empty_catalog_parses_nothing_and_generates_nothing() {
    let service = AliasService::new(Arc::new(InMemoryAliasStore::new()), Vec::new());

    assert!(service.route_descriptors().is_empty());
    assert!(service
        .lookup_virtual_paths(
            &support::values(&[("controller", "Page")]),
            &alias_resolver::SyntheticRequestContext::empty()
        )
        .is_empty());
}
