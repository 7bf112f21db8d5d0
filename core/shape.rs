//! The single branching table shared by both synthesis targets.
//!
//! Each node's shape is derived once from `(has_param, has_children,
//! is_route)`; the runtime renderer (`builder`) and the text renderer
//! (`emit`) both consume the classification produced here, which is what
//! keeps the live structure and the generated source behaviorally
//! identical.

use crate::naming::{camel_case, snake_case};
use crate::tree::{PARAM_KEY_MARKER, RouteNode};

/// The four builder shapes a retained node can take.
///
/// A node that is simultaneously a route and a parent is always rendered as
/// the group shape; its own path is reachable only through the group's
/// own-path accessor, never by treating the key itself as callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// No parameter, no children, route: zero-arg, returns the fixed path.
    Leaf,
    /// No parameter, children: nested structure (own-path accessor if the
    /// node is also a route).
    Group,
    /// Parameter, no children: one-arg, returns the substituted path.
    ParamLeaf,
    /// Parameter and children: one-arg, returns the nested structure with
    /// the value fixed (own-path accessor if also a route).
    ParamGroup,
}

/// Derive the shape for a node, or `None` for a meaningless empty stub.
pub fn classify(node: &RouteNode) -> Option<NodeShape> {
    match (node.param.is_some(), node.has_children(), node.route) {
        (false, false, false) => None,
        (false, false, true) => Some(NodeShape::Leaf),
        (false, true, _) => Some(NodeShape::Group),
        (true, false, _) => Some(NodeShape::ParamLeaf),
        (true, true, _) => Some(NodeShape::ParamGroup),
    }
}

/// A classified child entry, in deterministic sibling order.
#[derive(Debug, Clone, Copy)]
pub struct ShapeEntry<'a> {
    pub raw_key: &'a str,
    pub node: &'a RouteNode,
    pub shape: NodeShape,
}

/// List a node's children with their shapes, omitting empty stubs entirely.
pub fn classified_children(node: &RouteNode) -> Vec<ShapeEntry<'_>> {
    node.children
        .iter()
        .filter_map(|(raw_key, child)| {
            classify(child).map(|shape| ShapeEntry {
                raw_key,
                node: child,
                shape,
            })
        })
        .collect()
}

/// Accessor-name convention for a synthesis target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingStyle {
    /// camelCase keys with the `$` marker preserved (runtime structures).
    Camel,
    /// snake_case identifiers with the marker rendered as a `by_` prefix
    /// (emitted Rust).
    Snake,
}

/// Compute the display name exposed for a raw child key.
///
/// For synthesized dynamic keys the transform applies to the part after the
/// marker and the marker survives as a literal prefix, keeping dynamic
/// accessors visually distinct from static ones.
pub fn display_name(raw_key: &str, style: NamingStyle) -> String {
    match raw_key.strip_prefix(PARAM_KEY_MARKER) {
        Some(rest) => match style {
            NamingStyle::Camel => format!("{}{}", PARAM_KEY_MARKER, camel_case(rest)),
            NamingStyle::Snake => format!("by_{}", snake_case(rest)),
        },
        None => match style {
            NamingStyle::Camel => camel_case(raw_key),
            NamingStyle::Snake => snake_case(raw_key),
        },
    }
}
