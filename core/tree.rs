use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::naming::camel_case;

/// Marker prefixed to child keys that hold a dynamic segment, so dynamic and
/// static children can never collide in the same map.
pub const PARAM_KEY_MARKER: char = '$';

/// One level of the scanned route tree.
///
/// `children` is keyed by the *original* directory name for static segments
/// and by `$` + camelCase(param) for dynamic ones. `BTreeMap` keeps sibling
/// order lexical, so repeated scans of an unchanged directory produce
/// identical trees and identical generated output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    #[serde(
        rename = "$route",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub route: bool,

    #[serde(rename = "$param", default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,

    #[serde(flatten)]
    pub children: BTreeMap<String, RouteNode>,
}

impl RouteNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// A node that is neither a route nor a parent carries no information;
    /// the scanner drops these and the synthesizer skips them.
    pub fn is_empty_stub(&self) -> bool {
        !self.route && self.children.is_empty()
    }

    /// Map key for a dynamic child declared with the given parameter name.
    pub fn param_key(param: &str) -> String {
        format!("{}{}", PARAM_KEY_MARKER, camel_case(param))
    }

    /// Number of reachable endpoints in this subtree (including this node).
    pub fn route_count(&self) -> usize {
        let own = usize::from(self.route);
        own + self.children.values().map(RouteNode::route_count).sum::<usize>()
    }

    /// Number of dynamic parameters declared in this subtree.
    pub fn param_count(&self) -> usize {
        let own = usize::from(self.param.is_some());
        own + self.children.values().map(RouteNode::param_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_route() -> RouteNode {
        RouteNode {
            route: true,
            ..RouteNode::default()
        }
    }

    #[test]
    fn param_key_is_marker_plus_camel_case() {
        assert_eq!(RouteNode::param_key("userId"), "$userId");
        assert_eq!(RouteNode::param_key("user-id"), "$userId");
    }

    #[test]
    fn empty_stub_detection() {
        assert!(RouteNode::new().is_empty_stub());
        assert!(!leaf_route().is_empty_stub());

        let mut parent = RouteNode::new();
        parent.children.insert("users".into(), leaf_route());
        assert!(!parent.is_empty_stub());
    }

    #[test]
    fn counts_walk_the_whole_subtree() {
        let mut user = RouteNode {
            route: true,
            param: Some("userId".into()),
            ..RouteNode::default()
        };
        user.children.insert("posts".into(), leaf_route());

        let mut users = leaf_route();
        users.children.insert(RouteNode::param_key("userId"), user);

        let mut root = RouteNode::new();
        root.children.insert("users".into(), users);

        assert_eq!(root.route_count(), 3);
        assert_eq!(root.param_count(), 1);
    }

    #[test]
    fn serializes_with_original_metadata_keys() {
        let mut node = leaf_route();
        node.children.insert(
            RouteNode::param_key("userId"),
            RouteNode {
                route: true,
                param: Some("userId".into()),
                ..RouteNode::default()
            },
        );

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["$route"], true);
        assert_eq!(json["$userId"]["$param"], "userId");
        assert!(json.get("$param").is_none());
    }
}
