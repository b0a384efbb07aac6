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

mod config;

use crate::config::Config;
use alias_resolver::{AliasService, RouteValueDictionary, SyntheticRequestContext};
use alias_store_json_file::AliasStoreJsonFile;
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use std::error::Error;
use std::fs;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const COMPONENT: &str = "configurable_alias_resolver";

#[derive(Parser)]
#[command(about = "Manage URL aliases over a json5-configured route catalog")]
struct ResolverArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the route values stored for an alias.
    Get { alias_path: String },
    /// Create or overwrite an alias.
    Set {
        alias_path: String,
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long, default_value = "cli")]
        source: String,
    },
    /// Remove an alias; without a path the empty alias is removed.
    Delete { alias_path: Option<String> },
    /// Remove every alias created by a source.
    DeleteBySource { source: String },
    /// Find the aliases pointing at a target.
    Lookup {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Point an alias at a target and drop the target's other aliases.
    Replace {
        alias_path: String,
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long, default_value = "cli")]
        source: String,
    },
    /// List aliases, optionally only those whose source starts with a prefix.
    List {
        #[arg(long)]
        source: Option<String>,
    },
    /// Print the route catalog in priority order.
    Routes,
    /// Generate the catalog's paths for route values.
    VirtualPaths {
        #[arg(long = "value", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        values: Vec<(String, String)>,
    },
}

#[derive(Args, Debug)]
struct TargetArgs {
    #[arg(
        long = "value",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        conflicts_with = "route_path"
    )]
    values: Vec<(String, String)>,

    /// Literal route path, parsed against the route catalog.
    #[arg(long)]
    route_path: Option<String>,
}

enum Target {
    RouteValues(RouteValueDictionary),
    RoutePath(String),
}

impl From<TargetArgs> for Target {
    fn from(args: TargetArgs) -> Self {
        match args.route_path {
            Some(route_path) => Target::RoutePath(route_path),
            None => Target::RouteValues(args.values.into_iter().collect()),
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

async fn run(service: &AliasService, command: Command) -> Result<Value, Box<dyn Error>> {
    let output = match command {
        Command::Get { alias_path } => {
            let route_values = service.get(&alias_path).await?;
            json!({ "alias_path": alias_path, "route_values": route_values })
        }
        Command::Set {
            alias_path,
            target,
            source,
        } => {
            match Target::from(target) {
                Target::RouteValues(values) => service.set(&alias_path, &values, &source).await?,
                Target::RoutePath(route_path) => {
                    service
                        .set_route_path(&alias_path, Some(&route_path), &source)
                        .await?
                }
            }
            json!({ "alias_path": alias_path, "route_values": service.get(&alias_path).await? })
        }
        Command::Delete { alias_path } => {
            service.delete(alias_path.as_deref()).await?;
            json!({ "deleted": alias_path.unwrap_or_default() })
        }
        Command::DeleteBySource { source } => {
            service.delete_by_source(&source).await?;
            json!({ "deleted_source": source })
        }
        Command::Lookup { target } => {
            let alias_paths = match Target::from(target) {
                Target::RouteValues(values) => service.lookup(&values).await?,
                Target::RoutePath(route_path) => {
                    service.lookup_route_path(Some(&route_path)).await?
                }
            };
            json!(alias_paths)
        }
        Command::Replace {
            alias_path,
            target,
            source,
        } => {
            match Target::from(target) {
                Target::RouteValues(values) => {
                    service.replace(&alias_path, &values, &source).await?
                }
                Target::RoutePath(route_path) => {
                    service
                        .replace_route_path(&alias_path, Some(&route_path), &source)
                        .await?
                }
            }
            json!({ "alias_path": alias_path, "route_values": service.get(&alias_path).await? })
        }
        Command::List { source } => match source {
            Some(source_prefix) => Value::Array(
                service
                    .list_by_source(&source_prefix)
                    .await?
                    .into_iter()
                    .map(|(path, route_values, source)| {
                        json!({ "path": path, "route_values": route_values, "source": source })
                    })
                    .collect(),
            ),
            None => Value::Array(
                service
                    .list()
                    .await?
                    .into_iter()
                    .map(|(path, route_values)| json!({ "path": path, "route_values": route_values }))
                    .collect(),
            ),
        },
        Command::Routes => Value::Array(
            service
                .route_descriptors()
                .iter()
                .map(|descriptor| {
                    json!({ "name": descriptor.name, "priority": descriptor.priority })
                })
                .collect(),
        ),
        Command::VirtualPaths { values } => {
            let values: RouteValueDictionary = values.into_iter().collect();
            let generated =
                service.lookup_virtual_paths(&values, &SyntheticRequestContext::empty());
            serde_json::to_value(generated)?
        }
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let args = ResolverArgs::parse();

    let contents = fs::read_to_string(&args.config)
        .map_err(|err| format!("Unable to read config file '{}': {err}", args.config))?;
    let config = Config::from_json5(&contents)
        .map_err(|err| format!("Unable to parse config file '{}': {err}", args.config))?;

    let route_providers = config.build_route_providers()?;
    let store = Arc::new(AliasStoreJsonFile::open(&config.alias_store.file_path)?);

    info!(
        component = COMPONENT,
        config = %args.config,
        alias_file = %store.file_path().display(),
        route_provider_count = route_providers.len(),
        "started configurable-alias-resolver"
    );

    let service = AliasService::new(store, route_providers);
    let output = run(&service, args.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_key_value, run, Command, Config, TargetArgs};
    use alias_resolver::AliasService;
    use alias_store_json_file::AliasStoreJsonFile;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::tempdir;

    const CONFIG: &str = r#"
    {
      alias_store: { file_path: "unused.json" },
      route_providers: [
        {
          name: "core",
          routes: [
            { name: "Default", template: "{controller}/{action}/{id}",
              defaults: { action: "Index", id: "0" } },
          ],
        },
      ],
    }
    "#;

    fn service_in(dir: &std::path::Path) -> AliasService {
        let config = Config::from_json5(CONFIG).unwrap();
        let store = AliasStoreJsonFile::open(dir.join("aliases.json")).unwrap();
        AliasService::new(Arc::new(store), config.build_route_providers().unwrap())
    }

    fn route_path(route_path: &str) -> TargetArgs {
        TargetArgs {
            values: Vec::new(),
            route_path: Some(route_path.to_string()),
        }
    }

    #[test]
    fn key_value_arguments_split_on_the_first_equals_sign() {
        assert_eq!(
            parse_key_value("q=a=b"),
            Ok(("q".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_key_value("id="), Ok(("id".to_string(), String::new())));
        assert!(parse_key_value("=7").is_err());
        assert!(parse_key_value("controller").is_err());
    }

    #[tokio::test]
    async fn commands_share_the_persisted_store() {
        let dir = tempdir().expect("temp dir");
        let service = service_in(dir.path());

        let set = run(
            &service,
            Command::Set {
                alias_path: "/about/".to_string(),
                target: route_path("Page/Display/7"),
                source: "page".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(
            set,
            json!({
                "alias_path": "/about/",
                "route_values": { "action": "Display", "controller": "Page", "id": "7" }
            })
        );

        let reopened = service_in(dir.path());
        let found = run(
            &reopened,
            Command::Lookup {
                target: TargetArgs {
                    values: vec![
                        ("controller".to_string(), "page".to_string()),
                        ("action".to_string(), "display".to_string()),
                        ("id".to_string(), "7".to_string()),
                    ],
                    route_path: None,
                },
            },
        )
        .await
        .unwrap();
        assert_eq!(found, json!(["about"]));
    }

    #[tokio::test]
    async fn replace_command_leaves_one_alias() {
        let dir = tempdir().expect("temp dir");
        let service = service_in(dir.path());
        for alias_path in ["old", "older"] {
            run(
                &service,
                Command::Set {
                    alias_path: alias_path.to_string(),
                    target: route_path("Page/Display/7"),
                    source: "page".to_string(),
                },
            )
            .await
            .unwrap();
        }

        run(
            &service,
            Command::Replace {
                alias_path: "new".to_string(),
                target: route_path("Page/Display/7"),
                source: "page".to_string(),
            },
        )
        .await
        .unwrap();

        let listed = run(&service, Command::List { source: None }).await.unwrap();
        assert_eq!(
            listed,
            json!([{
                "path": "new",
                "route_values": { "action": "Display", "controller": "Page", "id": "7" }
            }])
        );
    }

    #[tokio::test]
    async fn routes_and_virtual_paths_report_the_catalog() {
        let dir = tempdir().expect("temp dir");
        let service = service_in(dir.path());

        let routes = run(&service, Command::Routes).await.unwrap();
        assert_eq!(routes, json!([{ "name": "Default", "priority": 0 }]));

        let generated = run(
            &service,
            Command::VirtualPaths {
                values: vec![
                    ("controller".to_string(), "Page".to_string()),
                    ("action".to_string(), "Display".to_string()),
                ],
            },
        )
        .await
        .unwrap();
        assert_eq!(generated[0]["virtual_path"], json!("Page/Display"));
        assert_eq!(generated[0]["route_name"], json!("Default"));
    }
}
