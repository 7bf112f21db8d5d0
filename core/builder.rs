//! Runtime renderer: tree -> live builder structure.
//!
//! This is the library-facing half of the dual-target synthesizer. The
//! emitted-source half lives in `emit`; both walk the classification from
//! `shape` and render paths through the primitives at the top of this
//! module, so a path produced by a generated module and one produced here
//! from the same tree are always identical.

use std::collections::BTreeMap;
use std::fmt;

use crate::shape::{NamingStyle, NodeShape, classified_children, display_name};
use crate::tree::RouteNode;

/// A single path-segment value supplied at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentValue {
    Text(String),
    Int(i64),
}

impl fmt::Display for SegmentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentValue::Text(s) => f.write_str(s),
            SegmentValue::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for SegmentValue {
    fn from(value: &str) -> Self {
        SegmentValue::Text(value.to_string())
    }
}

impl From<String> for SegmentValue {
    fn from(value: String) -> Self {
        SegmentValue::Text(value)
    }
}

impl From<i32> for SegmentValue {
    fn from(value: i32) -> Self {
        SegmentValue::Int(i64::from(value))
    }
}

impl From<i64> for SegmentValue {
    fn from(value: i64) -> Self {
        SegmentValue::Int(value)
    }
}

impl From<u32> for SegmentValue {
    fn from(value: u32) -> Self {
        SegmentValue::Int(i64::from(value))
    }
}

/// Normalize a configured base prefix: no trailing slash, a leading slash
/// when non-empty, and the empty string when there is nothing to prepend.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Append one raw segment to an accumulated path.
///
/// `base` is either a normalized prefix or a previous `join_segment` result,
/// so separators can never double up or go missing.
pub fn join_segment(base: &str, segment: &str) -> String {
    format!("{base}/{segment}")
}

/// Render a full path from raw segment values and a base prefix.
pub fn build_route_path(segments: &[SegmentValue], prefix: &str) -> String {
    let path = segments.iter().fold(normalize_prefix(prefix), |acc, seg| {
        join_segment(&acc, &seg.to_string())
    });
    if path.is_empty() { "/".to_string() } else { path }
}

/// The nested structure synthesized for one tree level.
///
/// Entries are keyed by display name; `path` is the own-path (`$`) accessor,
/// present only when this level is itself a route.
#[derive(Debug, Clone)]
pub struct RouteSet {
    path: Option<String>,
    entries: BTreeMap<String, RouteBuilder>,
}

impl RouteSet {
    /// Path to this level itself, if this level is a route.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&RouteBuilder> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteBuilder)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One callable entry of a [`RouteSet`], tagged by shape.
#[derive(Debug, Clone)]
pub enum RouteBuilder {
    /// Fixed endpoint path.
    Leaf(String),
    /// Nested structure of children (plus own path when also a route).
    Group(RouteSet),
    /// Awaiting one parameter value; yields a fixed path.
    ParamLeaf { base: String },
    /// Awaiting one parameter value; yields the nested structure with the
    /// value substituted into the accumulated path.
    ParamGroup {
        base: String,
        node: RouteNode,
        style: NamingStyle,
    },
}

impl RouteBuilder {
    /// Fixed path of this entry: the leaf path, or a group's own path.
    /// Parameter shapes have no path until a value is supplied.
    pub fn render(&self) -> Option<String> {
        match self {
            RouteBuilder::Leaf(path) => Some(path.clone()),
            RouteBuilder::Group(set) => set.path().map(str::to_string),
            _ => None,
        }
    }

    /// Substitute a parameter value. Substitution happens before the
    /// resulting group's own path is evaluated.
    pub fn with(&self, value: impl Into<SegmentValue>) -> Option<RouteBuilder> {
        match self {
            RouteBuilder::ParamLeaf { base } => Some(RouteBuilder::Leaf(join_segment(
                base,
                &value.into().to_string(),
            ))),
            RouteBuilder::ParamGroup { base, node, style } => {
                let fixed = join_segment(base, &value.into().to_string());
                Some(RouteBuilder::Group(build_set(node, fixed, *style)))
            }
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&RouteSet> {
        match self {
            RouteBuilder::Group(set) => Some(set),
            _ => None,
        }
    }
}

/// Build the live structure for a tree with camelCase display names, the
/// convention used by generated structure literals.
pub fn create_route_builder(tree: &RouteNode, prefix: &str) -> RouteSet {
    create_route_builder_with(tree, prefix, NamingStyle::Camel)
}

/// As [`create_route_builder`], with an explicit naming transform.
pub fn create_route_builder_with(tree: &RouteNode, prefix: &str, style: NamingStyle) -> RouteSet {
    build_set(tree, normalize_prefix(prefix), style)
}

/// Path of a route level given its accumulated base. Only the root of an
/// empty prefix has an empty base, which still has to render as `/`.
pub fn own_path(base: &str) -> String {
    if base.is_empty() {
        "/".to_string()
    } else {
        base.to_string()
    }
}

fn build_set(node: &RouteNode, base: String, style: NamingStyle) -> RouteSet {
    let path = node.route.then(|| own_path(&base));

    let mut entries = BTreeMap::new();
    for entry in classified_children(node) {
        let name = display_name(entry.raw_key, style);
        let builder = match entry.shape {
            NodeShape::Leaf => RouteBuilder::Leaf(join_segment(&base, entry.raw_key)),
            NodeShape::Group => {
                RouteBuilder::Group(build_set(entry.node, join_segment(&base, entry.raw_key), style))
            }
            NodeShape::ParamLeaf => RouteBuilder::ParamLeaf { base: base.clone() },
            NodeShape::ParamGroup => RouteBuilder::ParamGroup {
                base: base.clone(),
                node: entry.node.clone(),
                style,
            },
        };
        entries.insert(name, builder);
    }

    RouteSet { path, entries }
}
