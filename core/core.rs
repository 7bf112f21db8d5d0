pub mod builder;
pub mod config;
pub mod emit;
pub mod error;
pub mod generate;
pub mod naming;
pub mod scanner;
pub mod shape;
pub mod tree;

// Generated modules import the `Lazy` constant wrapper through this crate,
// so consumers only ever depend on routegen-core.
pub use once_cell;

pub use builder::{
    RouteBuilder, RouteSet, SegmentValue, build_route_path, create_route_builder,
    create_route_builder_with, join_segment, normalize_prefix, own_path,
};
pub use config::Config;
pub use emit::emit_routes_module;
pub use error::{AppError, Result};
pub use generate::{GenerationReport, build_routes_module};
pub use scanner::{scan_directory, scan_route_tree};
pub use shape::{NamingStyle, NodeShape, classify};
pub use tree::RouteNode;
