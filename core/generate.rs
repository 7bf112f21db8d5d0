use std::path::Path;

use crate::config::Config;
use crate::emit;
use crate::error::Result;
use crate::scanner;
use crate::tree::RouteNode;

/// Outcome of one scan-and-emit cycle.
///
/// The pipeline reports what happened instead of printing; presentation is
/// the caller's concern.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// The formatted generated module.
    pub code: String,
    /// The scanned tree the module was synthesized from.
    pub tree: RouteNode,
    /// Reachable endpoints in the tree.
    pub routes: usize,
    /// Dynamic parameters in the tree.
    pub params: usize,
}

/// Run the scan -> emit pipeline for one configuration.
///
/// Fails atomically: any scan or shaping error aborts the cycle and nothing
/// partial is produced.
pub fn build_routes_module(project_root: &Path, config: &Config) -> Result<GenerationReport> {
    let input = config.resolved_input(project_root);
    log::debug!("Generation input resolved to: {}", input.display());

    let tree = scanner::scan_route_tree(&input)?;
    let code = emit::emit_routes_module(&tree, config)?;

    let report = GenerationReport {
        routes: tree.route_count(),
        params: tree.param_count(),
        tree,
        code,
    };
    log::info!(
        "Generated routes module: {} routes, {} parameters.",
        report.routes,
        report.params
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn pipeline_produces_code_and_counts_for_a_real_layout() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let app = root.join("app/api/users/[userId]");
        fs::create_dir_all(&app).unwrap();
        fs::write(root.join("app/api/users/route.ts"), "").unwrap();
        fs::write(app.join("route.ts"), "").unwrap();

        let config = Config::default();
        let report = build_routes_module(root, &config).unwrap();

        assert_eq!(report.routes, 2);
        assert_eq!(report.params, 1);
        assert!(report.code.contains("pub fn by_user_id"));
        assert!(report.tree.children.contains_key("users"));
    }

    #[test]
    fn pipeline_fails_whole_when_the_input_is_missing() {
        let tmp = TempDir::new().unwrap();
        let config = Config::default();
        assert!(build_routes_module(tmp.path(), &config).is_err());
    }
}
