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

//! Structured field value-format helpers.

use crate::route_values::{RouteValueDictionary, RouteValues};

pub const NONE: &str = "none";

/// Renders stored route values as `key=value` pairs in key order.
pub fn format_route_values(values: Option<&RouteValues>) -> String {
    match values {
        Some(values) if !values.is_empty() => values
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(","),
        _ => NONE.to_string(),
    }
}

pub fn format_route_value_dictionary(values: &RouteValueDictionary) -> String {
    format_route_values(Some(&values.to_route_values()))
}

pub fn format_optional_path(path: Option<&str>) -> String {
    path.unwrap_or(NONE).to_string()
}
