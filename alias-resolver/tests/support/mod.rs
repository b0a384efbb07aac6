use alias_resolver::{
    AliasService, InMemoryAliasStore, PatternRoute, RouteDescriptor, RouteProvider,
    RouteValueDictionary, StaticRouteProvider,
};
use std::sync::Arc;

#[allow(dead_code)]
pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub(crate) fn values(pairs: &[(&str, &str)]) -> RouteValueDictionary {
    pairs.iter().copied().collect()
}

#[allow(dead_code)]
pub(crate) fn route(
    name: &str,
    template: &str,
    defaults: &[(&str, &str)],
    priority: i32,
) -> RouteDescriptor {
    RouteDescriptor::new(
        PatternRoute::new(template, values(defaults)).expect("test template should parse"),
        priority,
    )
    .with_name(name)
}

/// Application routes: a blog feature plus the catch-all MVC default route.
#[allow(dead_code)]
pub(crate) fn application_providers() -> Vec<Arc<dyn RouteProvider>> {
    vec![
        Arc::new(StaticRouteProvider::new(vec![route(
            "Default",
            "{controller}/{action}/{id}",
            &[("action", "Index"), ("id", "0")],
            0,
        )])),
        Arc::new(StaticRouteProvider::new(vec![
            route(
                "BlogPost",
                "blog/{slug}",
                &[("area", "Blogs"), ("controller", "BlogPost"), ("action", "Item")],
                20,
            ),
            route("AliasCatchAll", "{*alias}", &[("area", "Alias")], 100).as_alias_route(),
        ])),
    ]
}

#[allow(dead_code)]
pub(crate) fn make_service() -> AliasService {
    AliasService::new(Arc::new(InMemoryAliasStore::new()), application_providers())
}

#[allow(dead_code)]
pub(crate) fn make_service_with_store(store: Arc<InMemoryAliasStore>) -> AliasService {
    AliasService::new(store, application_providers())
}
