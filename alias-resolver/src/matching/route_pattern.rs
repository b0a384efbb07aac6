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

//! Template-driven route: `"{controller}/{action}/{id}"` with defaults and an
//! optional trailing `{*catch_all}`.

use crate::matching::request_context::RequestContext;
use crate::matching::route::{Route, VirtualPath};
use crate::route_values::RouteValueDictionary;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const QUERY_COMPONENT: &AsciiSet = &PATH_SEGMENT.add(b'&').add(b'=').add(b'+');

/// Rejections raised while parsing a route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePatternError {
    EmptySegment { template: String },
    InvalidSegment { segment: String },
    EmptyParameterName { segment: String },
    DuplicateParameter { name: String },
    CatchAllNotLast { name: String },
}

impl Display for RoutePatternError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutePatternError::EmptySegment { template } => {
                write!(f, "template '{template}' contains an empty segment")
            }
            RoutePatternError::InvalidSegment { segment } => write!(
                f,
                "segment '{segment}' must be a literal or a single {{parameter}}"
            ),
            RoutePatternError::EmptyParameterName { segment } => {
                write!(f, "segment '{segment}' declares an unnamed parameter")
            }
            RoutePatternError::DuplicateParameter { name } => {
                write!(f, "parameter '{name}' appears more than once")
            }
            RoutePatternError::CatchAllNotLast { name } => {
                write!(f, "catch-all parameter '{name}' must be the last segment")
            }
        }
    }
}

impl Error for RoutePatternError {}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Parameter(String),
    CatchAll(String),
}

impl Segment {
    fn parameter_name(&self) -> Option<&str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Parameter(name) | Segment::CatchAll(name) => Some(name.as_str()),
        }
    }
}

struct RenderedSegment {
    text: String,
    is_parameter: bool,
    omittable: bool,
}

///
/// [`PatternRoute`] matches application-relative paths against a segment template
/// and generates paths back from route values.
///
/// # Examples
///
/// ```
/// use alias_resolver::{PatternRoute, Route, RouteValueDictionary, SyntheticRequestContext};
///
/// let defaults: RouteValueDictionary = [("action", "Index")].into_iter().collect();
/// let route = PatternRoute::new("{controller}/{action}/{id}", defaults).unwrap();
///
/// let matched = route
///     .route_data(&SyntheticRequestContext::for_path("Blog/Item/42"))
///     .unwrap();
/// assert_eq!(matched.get("id").unwrap().to_string(), "42");
///
/// let values: RouteValueDictionary = [("controller", "Blog"), ("action", "Index")]
///     .into_iter()
///     .collect();
/// assert!(route
///     .virtual_path(&SyntheticRequestContext::empty(), &values)
///     .is_none());
/// ```
#[derive(Clone, Debug)]
pub struct PatternRoute {
    template: String,
    segments: Vec<Segment>,
    defaults: RouteValueDictionary,
}

impl PatternRoute {
    pub fn new(template: &str, defaults: RouteValueDictionary) -> Result<Self, RoutePatternError> {
        let segments = parse_template(template)?;
        Ok(Self {
            template: template.to_string(),
            segments,
            defaults,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn defaults(&self) -> &RouteValueDictionary {
        &self.defaults
    }

    /// Names of the parameters declared in the template, in template order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::parameter_name)
    }

    fn is_parameter(&self, key: &str) -> bool {
        self.parameter_names()
            .any(|name| name.eq_ignore_ascii_case(key))
    }

    fn match_path(&self, path: &str) -> Option<RouteValueDictionary> {
        let path = path.split('?').next().unwrap_or_default().trim_matches('/');
        let request: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };
        if request.iter().any(|segment| segment.is_empty()) {
            return None;
        }

        let mut values = RouteValueDictionary::new();
        let mut position = 0;

        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => {
                    let candidate = request.get(position)?;
                    if !candidate.eq_ignore_ascii_case(literal) {
                        return None;
                    }
                    position += 1;
                }
                Segment::Parameter(name) => match request.get(position) {
                    Some(raw) => {
                        values.insert(name.clone(), decode_segment(raw));
                        position += 1;
                    }
                    None => {
                        let default = self.defaults.get(name)?;
                        values.insert(name.clone(), default.clone());
                    }
                },
                Segment::CatchAll(name) => {
                    if position < request.len() {
                        let rest = request[position..]
                            .iter()
                            .map(|raw| decode_segment(raw))
                            .collect::<Vec<_>>()
                            .join("/");
                        values.insert(name.clone(), rest);
                        position = request.len();
                    } else if let Some(default) = self.defaults.get(name) {
                        values.insert(name.clone(), default.clone());
                    }
                }
            }
        }

        if position != request.len() {
            return None;
        }

        for (key, default) in &self.defaults {
            if !values.contains_key(key) {
                values.insert(key.clone(), default.clone());
            }
        }

        Some(values)
    }

    fn generate(
        &self,
        ambient: Option<&RouteValueDictionary>,
        values: &RouteValueDictionary,
    ) -> Option<VirtualPath> {
        let mut route_values = RouteValueDictionary::new();
        let mut rendered = Vec::with_capacity(self.segments.len());
        let mut use_ambient = ambient.is_some();

        for segment in &self.segments {
            let (name, catch_all) = match segment {
                Segment::Literal(literal) => {
                    rendered.push(RenderedSegment {
                        text: literal.clone(),
                        is_parameter: false,
                        omittable: false,
                    });
                    continue;
                }
                Segment::Parameter(name) => (name, false),
                Segment::CatchAll(name) => (name, true),
            };

            let ambient_value = ambient
                .filter(|_| use_ambient)
                .and_then(|ambient| ambient.get(name));

            let value = match (values.get(name), ambient_value) {
                (Some(explicit), ambient_value) => {
                    let explicit = explicit.to_invariant_string();
                    if !ambient_value.is_some_and(|ambient| ambient.eq_ignore_case(&explicit)) {
                        use_ambient = false;
                    }
                    explicit
                }
                (None, Some(ambient_value)) => ambient_value.to_invariant_string(),
                (None, None) => {
                    use_ambient = false;
                    match self.defaults.get(name) {
                        Some(default) => default.to_invariant_string(),
                        None if catch_all => String::new(),
                        None => return None,
                    }
                }
            };

            // exact match only: parsing an omitted segment yields the default's spelling
            let omittable = (catch_all && value.is_empty())
                || self
                    .defaults
                    .get(name)
                    .is_some_and(|default| default.to_invariant_string() == value);

            let text = if catch_all {
                encode_catch_all(&value)?
            } else {
                utf8_percent_encode(&value, PATH_SEGMENT).to_string()
            };

            rendered.push(RenderedSegment {
                text,
                is_parameter: true,
                omittable,
            });
            if !value.is_empty() || !catch_all {
                route_values.insert(name.clone(), value);
            }
        }

        for (key, default) in &self.defaults {
            if self.is_parameter(key) {
                continue;
            }
            if let Some(supplied) = values.get(key) {
                if !supplied.eq_ignore_case(&default.to_invariant_string()) {
                    return None;
                }
            }
            route_values.insert(key.clone(), default.clone());
        }

        while rendered
            .last()
            .is_some_and(|segment| segment.is_parameter && segment.omittable)
        {
            rendered.pop();
        }
        if rendered
            .iter()
            .any(|segment| segment.is_parameter && segment.text.is_empty())
        {
            return None;
        }

        let mut path = rendered
            .into_iter()
            .map(|segment| segment.text)
            .collect::<Vec<_>>()
            .join("/");

        let query = values
            .iter()
            .filter(|(key, _)| !self.is_parameter(key) && !self.defaults.contains_key(key))
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_COMPONENT),
                    utf8_percent_encode(&value.to_invariant_string(), QUERY_COMPONENT)
                )
            })
            .collect::<Vec<_>>();
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query.join("&"));
        }

        Some(VirtualPath { path, route_values })
    }
}

impl Route for PatternRoute {
    fn route_data(&self, context: &dyn RequestContext) -> Option<RouteValueDictionary> {
        self.match_path(context.request_path()?)
    }

    fn virtual_path(
        &self,
        context: &dyn RequestContext,
        values: &RouteValueDictionary,
    ) -> Option<VirtualPath> {
        self.generate(context.route_values(), values)
    }
}

fn parse_template(template: &str) -> Result<Vec<Segment>, RoutePatternError> {
    let trimmed = template.trim_matches('/');
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let parts: Vec<&str> = trimmed.split('/').collect();
    let mut segments: Vec<Segment> = Vec::with_capacity(parts.len());

    for (index, part) in parts.iter().enumerate() {
        if part.is_empty() {
            return Err(RoutePatternError::EmptySegment {
                template: template.to_string(),
            });
        }

        if !part.contains(&['{', '}'][..]) {
            segments.push(Segment::Literal(part.to_string()));
            continue;
        }

        let inner = part
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .filter(|inner| !inner.contains(&['{', '}'][..]))
            .ok_or_else(|| RoutePatternError::InvalidSegment {
                segment: part.to_string(),
            })?;

        let segment = match inner.strip_prefix('*') {
            Some(name) => {
                if index + 1 != parts.len() {
                    return Err(RoutePatternError::CatchAllNotLast {
                        name: name.to_string(),
                    });
                }
                Segment::CatchAll(name.to_string())
            }
            None => Segment::Parameter(inner.to_string()),
        };

        let name = segment.parameter_name().unwrap_or_default();
        if name.is_empty() {
            return Err(RoutePatternError::EmptyParameterName {
                segment: part.to_string(),
            });
        }
        if segments
            .iter()
            .filter_map(Segment::parameter_name)
            .any(|existing| existing.eq_ignore_ascii_case(name))
        {
            return Err(RoutePatternError::DuplicateParameter {
                name: name.to_string(),
            });
        }

        segments.push(segment);
    }

    Ok(segments)
}

fn decode_segment(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

fn encode_catch_all(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some(String::new());
    }
    let pieces: Vec<&str> = value.split('/').collect();
    if pieces.iter().any(|piece| piece.is_empty()) {
        return None;
    }
    Some(
        pieces
            .into_iter()
            .map(|piece| utf8_percent_encode(piece, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/"),
    )
}

#[cfg(test)]
mod tests {
    use super::{PatternRoute, RoutePatternError};
    use crate::matching::request_context::SyntheticRequestContext;
    use crate::matching::route::Route;
    use crate::route_values::{RouteValueDictionary, RouteValues};

    fn dictionary(pairs: &[(&str, &str)]) -> RouteValueDictionary {
        pairs.iter().copied().collect()
    }

    fn stored(pairs: &[(&str, &str)]) -> RouteValues {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn parse(route: &PatternRoute, path: &str) -> Option<RouteValues> {
        route
            .route_data(&SyntheticRequestContext::for_path(path))
            .map(|values| values.to_route_values())
    }

    fn generate(route: &PatternRoute, pairs: &[(&str, &str)]) -> Option<String> {
        route
            .virtual_path(&SyntheticRequestContext::empty(), &dictionary(pairs))
            .map(|generated| generated.path)
    }

    fn default_route() -> PatternRoute {
        PatternRoute::new(
            "{controller}/{action}/{id}",
            dictionary(&[("action", "Index"), ("id", "0")]),
        )
        .expect("default route should parse")
    }

    #[test]
    fn template_rejects_malformed_segments() {
        assert_eq!(
            PatternRoute::new("a//b", RouteValueDictionary::new()).unwrap_err(),
            RoutePatternError::EmptySegment {
                template: "a//b".to_string()
            }
        );
        assert!(matches!(
            PatternRoute::new("item-{id}", RouteValueDictionary::new()),
            Err(RoutePatternError::InvalidSegment { .. })
        ));
        assert!(matches!(
            PatternRoute::new("{}", RouteValueDictionary::new()),
            Err(RoutePatternError::EmptyParameterName { .. })
        ));
        assert!(matches!(
            PatternRoute::new("{id}/{Id}", RouteValueDictionary::new()),
            Err(RoutePatternError::DuplicateParameter { .. })
        ));
        assert!(matches!(
            PatternRoute::new("{*rest}/tail", RouteValueDictionary::new()),
            Err(RoutePatternError::CatchAllNotLast { .. })
        ));
    }

    #[test]
    fn match_fills_missing_trailing_parameters_from_defaults() {
        let route = default_route();

        assert_eq!(
            parse(&route, "/Blog/"),
            Some(stored(&[("controller", "Blog"), ("action", "Index"), ("id", "0")]))
        );
        assert_eq!(
            parse(&route, "Blog/Item/42?page=2"),
            Some(stored(&[("controller", "Blog"), ("action", "Item"), ("id", "42")]))
        );
        assert_eq!(parse(&route, ""), None);
        assert_eq!(parse(&route, "Blog/Item/42/extra"), None);
        assert_eq!(parse(&route, "Blog//42"), None);
    }

    #[test]
    fn match_requires_literals_and_adds_default_only_keys() {
        let route = PatternRoute::new(
            "blog/{slug}",
            dictionary(&[("area", "Blogs"), ("controller", "Blog"), ("action", "Item")]),
        )
        .unwrap();

        assert_eq!(
            parse(&route, "BLOG/my%20post"),
            Some(stored(&[
                ("action", "Item"),
                ("area", "Blogs"),
                ("controller", "Blog"),
                ("slug", "my post")
            ]))
        );
        assert_eq!(parse(&route, "news/my-post"), None);
        assert_eq!(parse(&route, "blog"), None);
    }

    #[test]
    fn catch_all_consumes_the_remaining_path() {
        let route = PatternRoute::new("media/{*path}", RouteValueDictionary::new()).unwrap();

        assert_eq!(
            parse(&route, "media/images/2024/cat.png"),
            Some(stored(&[("path", "images/2024/cat.png")]))
        );
        assert_eq!(parse(&route, "media"), Some(RouteValues::new()));
        assert_eq!(
            generate(&route, &[("path", "images/2024/cat.png")]),
            Some("media/images/2024/cat.png".to_string())
        );
        assert_eq!(generate(&route, &[("path", "images//cat.png")]), None);
    }

    #[test]
    fn generate_omits_trailing_defaults_and_encodes_values() {
        let route = default_route();

        assert_eq!(
            generate(&route, &[("controller", "Home"), ("action", "Index"), ("id", "0")]),
            Some("Home".to_string())
        );
        assert_eq!(
            generate(&route, &[("controller", "Home"), ("action", "Index"), ("id", "a/b")]),
            Some("Home/Index/a%2Fb".to_string())
        );
        assert_eq!(generate(&route, &[("action", "Index")]), None);
        assert_eq!(generate(&route, &[("controller", ""), ("action", "About")]), None);
    }

    #[test]
    fn generate_keeps_trailing_values_that_differ_from_defaults_only_by_case() {
        let route = PatternRoute::new(
            "{controller}/{action}",
            dictionary(&[("action", "Index")]),
        )
        .unwrap();

        let path = generate(&route, &[("controller", "Home"), ("action", "index")])
            .expect("route should generate");

        assert_eq!(path, "Home/index");
        assert_eq!(
            parse(&route, &path),
            Some(stored(&[("controller", "Home"), ("action", "index")]))
        );
        assert_eq!(
            generate(&route, &[("controller", "Home"), ("action", "Index")]),
            Some("Home".to_string())
        );
    }

    #[test]
    fn generate_appends_unknown_values_as_query_string() {
        let route = default_route();

        assert_eq!(
            generate(
                &route,
                &[("controller", "Blog"), ("action", "List"), ("page", "2"), ("q", "a&b")]
            ),
            Some("Blog/List?page=2&q=a%26b".to_string())
        );
    }

    #[test]
    fn generate_rejects_conflicting_default_only_keys() {
        let route = PatternRoute::new(
            "blog/{slug}",
            dictionary(&[("area", "Blogs"), ("controller", "Blog")]),
        )
        .unwrap();

        assert_eq!(
            generate(&route, &[("slug", "hello"), ("controller", "blog")]),
            Some("blog/hello".to_string())
        );
        assert_eq!(
            generate(&route, &[("slug", "hello"), ("controller", "Page")]),
            None
        );
    }

    #[test]
    fn generate_reuses_ambient_values_until_one_changes() {
        let route = default_route();
        let ambient = dictionary(&[("controller", "Blog"), ("action", "Item"), ("id", "42")]);
        let context = SyntheticRequestContext::empty().with_route_values(ambient);

        let same_controller = route
            .virtual_path(&context, &dictionary(&[("action", "Item")]))
            .map(|generated| generated.path);
        assert_eq!(same_controller, Some("Blog/Item/42".to_string()));

        let new_controller = route
            .virtual_path(&context, &dictionary(&[("controller", "Page")]))
            .map(|generated| generated.path);
        assert_eq!(new_controller, Some("Page".to_string()));
    }

    #[test]
    fn generated_paths_parse_back_to_the_same_values() {
        let route = PatternRoute::new(
            "shop/{category}/{product}",
            dictionary(&[("controller", "Shop"), ("product", "all")]),
        )
        .unwrap();
        let values = [("category", "tea & coffee"), ("product", "green?tea"), ("controller", "Shop")];

        let path = generate(&route, &values).expect("route should generate");

        assert_eq!(parse(&route, &path), Some(stored(&values)));
    }
}
