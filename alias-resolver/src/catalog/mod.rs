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

//! Catalog layer.
//!
//! Owns route descriptors, the provider seam they come from, and the once-built,
//! priority-ordered snapshot that matching runs on. Alias routes are filtered out
//! here so alias resolution can never match against itself.

pub(crate) mod route_catalog;
pub(crate) mod route_descriptor;
pub(crate) mod route_provider;
