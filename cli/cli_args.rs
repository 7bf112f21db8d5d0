use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectConfigOpts {
    #[arg(
        long,
        help = "Specify the target project directory (default: current dir).",
        help_heading = "Project Setup",
        value_name = "PATH"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(
        short = 'c',
        long,
        help = "Specify path of the TOML config file (default: routegen.toml).",
        value_name = "CONFIG_FILE",
        conflicts_with = "disable_config_file",
        help_heading = "Project Setup"
    )]
    pub config_file: Option<String>,

    #[arg(
        long,
        help = "Disable loading any TOML config file.",
        conflicts_with = "config_file",
        help_heading = "Project Setup"
    )]
    pub disable_config_file: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerationOpts {
    #[arg(
        short = 'i',
        long,
        value_name = "PATH",
        help = "Route directory to scan (overrides config).",
        help_heading = "Generation"
    )]
    pub input: Option<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "PATH",
        help = "Output path for the generated module (overrides config).",
        help_heading = "Generation"
    )]
    pub output: Option<String>,

    #[arg(
        short = 'p',
        long,
        value_name = "PREFIX",
        help = "Base prefix prepended to every route (overrides config).",
        help_heading = "Generation"
    )]
    pub prefix: Option<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Identifier of the generated routes constant (overrides config).",
        help_heading = "Generation"
    )]
    pub routes_name: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate type-safe route path builders from a route directory layout.",
    long_about = "routegen scans a framework-style route directory (nested folders as path \nsegments, [name] folders as dynamic parameters, route/page marker files as \nendpoints) and generates a typed Rust module of path builders. \nSupports one-shot generation and watch mode.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  routegen generate -i ./app/api -o ./src/routes.rs -p /api\n  routegen generate --watch\n  routegen list\n  routegen inspect --pretty",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        visible_alias = "g",
        visible_alias = "gen",
        about = "Scan the route directory and write the generated module."
    )]
    Generate(GenerateArgs),

    #[command(about = "Create a starter routegen.toml in the project root.")]
    Init(InitArgs),

    #[command(
        visible_alias = "i",
        about = "Scan the route directory and print the tree model as JSON."
    )]
    Inspect(InspectArgs),

    #[command(
        visible_alias = "ls",
        about = "Scan the route directory and list the reachable routes."
    )]
    List(ListArgs),

    #[command(about = "Generate or save shell completion scripts.")]
    Completion(CompletionArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub generation: GenerationOpts,

    #[arg(
        short = 'w',
        long,
        help = "Watch the route directory and regenerate on changes.",
        help_heading = "Watch Mode"
    )]
    pub watch: bool,

    #[arg(
        long,
        value_name = "DELAY_STRING",
        help = "Set debounce delay for watch mode [default: 300ms].",
        help_heading = "Watch Mode"
    )]
    pub watch_delay: Option<String>,

    #[arg(
        long,
        help = "Clear the terminal before each watch regeneration.",
        help_heading = "Watch Mode"
    )]
    pub clear: bool,

    #[arg(
        long,
        help = "Print the generated module to stdout instead of writing it.",
        help_heading = "Output Control",
        conflicts_with = "watch"
    )]
    pub stdout: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(
        long,
        help = "Target project directory (default: current dir).",
        value_name = "PATH"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(long, help = "Overwrite an existing config file.")]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub generation: GenerationOpts,

    #[arg(long, help = "Pretty-print the JSON output.")]
    pub pretty: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub generation: GenerationOpts,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    #[arg(
        long,
        value_name = "SHELL",
        help = "Shell to generate completions for (fish, bash, zsh) [default: fish]"
    )]
    pub shell: Option<String>,

    #[arg(
        long,
        help = "Save the completion script to its standard location instead of stdout."
    )]
    pub save: bool,

    #[arg(long, help = "Overwrite an existing completion script when saving.")]
    pub force: bool,
}
