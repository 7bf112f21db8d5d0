//! Text renderer: tree -> generated Rust module.
//!
//! Walks the same classification as the runtime renderer in `builder` and
//! declares the same shapes as concrete types: one struct per group level,
//! a method per child entry, and a `Lazy` constant holding the root. The
//! shaped text is handed to the formatting collaborator (`syn` +
//! `prettyplease`) before it is returned; this module only decides
//! declaration shape, never layout.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::naming::{pascal_case, sanitize_ident, snake_case};
use crate::shape::{NamingStyle, NodeShape, classified_children, display_name};
use crate::tree::RouteNode;

/// Parameter type used when a name has no entry in the configured map.
pub const DEFAULT_PARAM_TYPE: &str = "impl std::fmt::Display";

/// Render the complete generated module for a scanned tree.
///
/// Output is deterministic for a given tree and config; the generated text
/// carries no timestamps or environment details.
pub fn emit_routes_module(tree: &RouteNode, config: &Config) -> Result<String> {
    let root_struct = pascal_case(&config.routes_name.to_lowercase());

    let mut state = EmitState::default();
    state.used_names.insert(root_struct.clone());

    let mut structs = String::new();
    emit_group(tree, &root_struct, "", config, &mut state, &mut structs)?;

    // Only pull in the path helpers this particular tree ends up calling,
    // so the generated module compiles warning-free.
    let mut helpers = vec!["normalize_prefix"];
    if state.needs_join {
        helpers.insert(0, "join_segment");
    }
    if state.needs_own_path {
        helpers.push("own_path");
    }

    let mut code = String::new();
    code.push_str("//! Route path builders generated by routegen. Do not edit by hand.\n");
    code.push_str("#![allow(dead_code)]\n\n");
    code.push_str("use routegen_core::once_cell::sync::Lazy;\n");
    let _ = writeln!(code, "use routegen_core::{{{}}};", helpers.join(", "));
    if !config.param_types.is_empty() {
        if let Some(module) = &config.param_types_module {
            let _ = writeln!(code, "use {module}::*;");
        }
    }
    for import in &config.imports {
        code.push_str(import);
        code.push('\n');
    }
    code.push('\n');
    code.push_str(&structs);

    let _ = writeln!(
        code,
        "pub static {}: Lazy<{}> = Lazy::new(|| {} {{ base: normalize_prefix({:?}) }});",
        config.routes_name, root_struct, root_struct, config.base_prefix
    );

    format_module(&code)
}

#[derive(Debug, Default)]
struct EmitState {
    used_names: BTreeSet<String>,
    needs_join: bool,
    needs_own_path: bool,
}

/// Emit the struct and impl for one group-like node, then recurse into its
/// child groups. `name_path` accumulates the PascalCase segment path used
/// to name nested structs.
fn emit_group(
    node: &RouteNode,
    struct_name: &str,
    name_path: &str,
    config: &Config,
    state: &mut EmitState,
    out: &mut String,
) -> Result<()> {
    let mut methods = String::new();
    let mut nested: Vec<(RouteNode, String, String)> = Vec::new();

    if node.route {
        state.needs_own_path = true;
        methods.push_str("    pub fn path(&self) -> String {\n        own_path(&self.base)\n    }\n");
    }

    for entry in classified_children(node) {
        state.needs_join = true;
        let method = sanitize_ident(&display_name(entry.raw_key, NamingStyle::Snake));
        match entry.shape {
            NodeShape::Leaf => {
                let _ = writeln!(
                    methods,
                    "    pub fn {method}(&self) -> String {{\n        join_segment(&self.base, {raw:?})\n    }}",
                    raw = entry.raw_key
                );
            }
            NodeShape::Group => {
                let child_path = format!("{name_path}{}", pascal_case(entry.raw_key));
                let child_struct = unique_name(&child_path, &mut state.used_names);
                let _ = writeln!(
                    methods,
                    "    pub fn {method}(&self) -> {child_struct} {{\n        {child_struct} {{ base: join_segment(&self.base, {raw:?}) }}\n    }}",
                    raw = entry.raw_key
                );
                nested.push((entry.node.clone(), child_struct, child_path));
            }
            NodeShape::ParamLeaf => {
                let param = entry.node.param.as_deref().unwrap_or_default();
                let arg = sanitize_ident(&snake_case(param));
                let ty = param_type(config, param);
                let _ = writeln!(
                    methods,
                    "    pub fn {method}(&self, {arg}: {ty}) -> String {{\n        join_segment(&self.base, &{arg}.to_string())\n    }}"
                );
            }
            NodeShape::ParamGroup => {
                let param = entry.node.param.as_deref().unwrap_or_default();
                let arg = sanitize_ident(&snake_case(param));
                let ty = param_type(config, param);
                let child_path = format!("{name_path}By{}", pascal_case(param));
                let child_struct = unique_name(&child_path, &mut state.used_names);
                let _ = writeln!(
                    methods,
                    "    pub fn {method}(&self, {arg}: {ty}) -> {child_struct} {{\n        {child_struct} {{ base: join_segment(&self.base, &{arg}.to_string()) }}\n    }}"
                );
                nested.push((entry.node.clone(), child_struct, child_path));
            }
        }
    }

    let _ = writeln!(out, "#[derive(Debug, Clone)]\npub struct {struct_name} {{\n    base: String,\n}}\n");
    let _ = writeln!(out, "impl {struct_name} {{\n{methods}}}\n");

    for (child, child_struct, child_path) in nested {
        emit_group(&child, &child_struct, &child_path, config, state, out)?;
    }
    Ok(())
}

fn param_type(config: &Config, param: &str) -> String {
    config
        .param_types
        .get(param)
        .cloned()
        .unwrap_or_else(|| DEFAULT_PARAM_TYPE.to_string())
}

/// Struct names derive from segment paths, which can collide after case
/// normalization; disambiguate deterministically.
fn unique_name(base: &str, used_names: &mut BTreeSet<String>) -> String {
    let mut candidate = base.to_string();
    let mut counter = 2;
    while !used_names.insert(candidate.clone()) {
        candidate = format!("{base}{counter}");
        counter += 1;
    }
    candidate
}

/// Formatting boundary: parse the shaped text and let the pretty-printer
/// own the layout. A parse failure means the shaping above produced
/// invalid Rust and nothing is written to disk.
fn format_module(code: &str) -> Result<String> {
    let file = syn::parse_file(code)
        .map_err(|e| AppError::Emit(format!("Generated module failed to parse: {e}")))?;
    Ok(prettyplease::unparse(&file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_tree() -> RouteNode {
        let post = RouteNode {
            route: true,
            param: Some("postId".into()),
            ..RouteNode::default()
        };

        let mut posts = RouteNode::new();
        posts.children.insert(RouteNode::param_key("postId"), post);

        let mut user = RouteNode {
            route: true,
            param: Some("userId".into()),
            ..RouteNode::default()
        };
        user.children.insert("posts".into(), posts);

        let mut users = RouteNode {
            route: true,
            ..RouteNode::default()
        };
        users.children.insert(RouteNode::param_key("userId"), user);

        let mut root = RouteNode::new();
        root.children.insert("users".into(), users);
        root.children.insert(
            "hyphened-route".into(),
            RouteNode {
                route: true,
                ..RouteNode::default()
            },
        );
        root
    }

    #[test]
    fn declares_the_same_shapes_as_the_runtime_builder() {
        let code = emit_routes_module(&fixture_tree(), &Config::default()).unwrap();

        assert!(code.contains("pub struct Routes"));
        assert!(code.contains("pub struct Users"));
        assert!(code.contains("pub struct UsersByUserId"));
        assert!(code.contains("pub struct UsersByUserIdPosts"));

        assert!(code.contains("pub fn users(&self) -> Users"));
        assert!(code.contains("pub fn by_user_id(&self, user_id: impl std::fmt::Display) -> UsersByUserId"));
        assert!(code.contains("pub fn by_post_id(&self, post_id: impl std::fmt::Display) -> String"));
        assert!(code.contains("pub fn hyphened_route(&self) -> String"));
        assert!(code.contains("\"hyphened-route\""));

        assert!(code.contains("pub static ROUTES: Lazy<Routes>"));
        assert!(code.contains("normalize_prefix(\"/api\")"));
        assert!(code.contains("use routegen_core::{join_segment, normalize_prefix, own_path};"));
    }

    #[test]
    fn helper_imports_match_what_the_tree_needs() {
        // a lone root route calls own_path but never joins a segment
        let rooted = RouteNode {
            route: true,
            ..RouteNode::default()
        };
        let code = emit_routes_module(&rooted, &Config::default()).unwrap();
        assert!(code.contains("use routegen_core::{normalize_prefix, own_path};"));
        assert!(code.contains("own_path(&self.base)"));
    }

    #[test]
    fn own_path_accessor_appears_only_on_route_groups() {
        let code = emit_routes_module(&fixture_tree(), &Config::default()).unwrap();
        // users and users/[userId] are route groups; posts is not, the root
        // has no marker, and leaves render paths directly
        assert_eq!(code.matches("pub fn path(&self) -> String").count(), 2);

        let mut rooted = fixture_tree();
        rooted.route = true;
        let code = emit_routes_module(&rooted, &Config::default()).unwrap();
        assert_eq!(code.matches("pub fn path(&self) -> String").count(), 3);
    }

    #[test]
    fn configured_param_types_substitute_verbatim() {
        let mut config = Config::default();
        config.param_types.insert("postId".into(), "u64".into());
        config.param_types_module = Some("crate::params".into());
        config.imports.push("use uuid::Uuid;".into());

        let code = emit_routes_module(&fixture_tree(), &config).unwrap();
        assert!(code.contains("post_id: u64"));
        assert!(code.contains("user_id: impl std::fmt::Display"));
        assert!(code.contains("use crate::params::*;"));
        assert!(code.contains("use uuid::Uuid;"));
    }

    #[test]
    fn emitted_module_is_deterministic() {
        let first = emit_routes_module(&fixture_tree(), &Config::default()).unwrap();
        let second = emit_routes_module(&fixture_tree(), &Config::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn routes_name_controls_constant_and_root_type() {
        let config = Config {
            routes_name: "API_PATHS".into(),
            ..Config::default()
        };
        let code = emit_routes_module(&fixture_tree(), &config).unwrap();
        assert!(code.contains("pub static API_PATHS: Lazy<ApiPaths>"));
        assert!(code.contains("pub struct ApiPaths"));
    }
}
