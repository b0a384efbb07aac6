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

//! Matching layer.
//!
//! Owns the route abstraction, the template-based route engine, and the conversion
//! between literal paths and route values over the catalog. Everything here is a
//! pure function of its input and the catalog snapshot.

pub(crate) mod request_context;
pub(crate) mod route;
pub(crate) mod route_matcher;
pub(crate) mod route_pattern;
