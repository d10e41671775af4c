//! Command-line interface for jinx
//! This binary parses and resolves templates and prints the resulting tree in one of the
//! supported output formats.
//!
//! Usage:
//!   jinx `<path>` [--format `<format>`] [--root `<dir>`] [--config `<file>`]   - Resolve and print a template
//!   jinx `<path>` --unresolved                                                - Print one file's parse, references untouched
//!   jinx --list-formats                                                       - List all output formats
//!
//! Configuration is layered: built-in defaults, then `./jinx.toml` if present, then
//! `--config`, then the flags above. Set `JINX_LOG` (e.g. `JINX_LOG=debug`) to see what the
//! resolver loads.

use clap::{Arg, ArgAction, ArgMatches, Command};
use jinx_config::{JinxConfig, Loader};
use jinx_parser::jinx::formats::{format_nodes, format_template, OutputFormat};
use jinx_parser::{parse_str, ResolveOptions, Resolver, TemplateLoader};
use std::fmt::Display;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "JINX_LOG";
const LOCAL_CONFIG: &str = "jinx.toml";

fn main() {
    init_logging();

    let matches = Command::new("jinx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting Jinja-style templates")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Template path, relative to the template root")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default from configuration: ast-treeviz)"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .short('r')
                .help("Directory that template paths are resolved against"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Additional TOML configuration file"),
        )
        .arg(
            Arg::new("allow-cycles")
                .long("allow-cycles")
                .help("Do not stop on circular include/extends chains")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("unresolved")
                .long("unresolved")
                .help("Print the file's own parse without following include/extends")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_config(&matches).unwrap_or_else(|e| fail(e));
    let Some(path) = matches.get_one::<String>("path") else {
        fail("missing template path");
    };
    handle_render_command(&config, path, matches.get_flag("unresolved"));
}

/// Logs go to stderr so they never mix with the printed tree.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<JinxConfig, String> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(root) = matches.get_one::<String>("root") {
        loader = loader
            .set_override("templates.root", root.as_str())
            .map_err(|e| e.to_string())?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("output.format", format.as_str())
            .map_err(|e| e.to_string())?;
    }
    if matches.get_flag("allow-cycles") {
        loader = loader
            .set_override("resolver.detect_cycles", false)
            .map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| format!("invalid configuration: {}", e))
}

/// Handle the default command: parse, optionally resolve, print
fn handle_render_command(config: &JinxConfig, path: &str, unresolved: bool) {
    let format = config.output.format().unwrap_or_else(|e| fail(e));
    let loader = config.templates.loader();
    debug!(root = %loader.root().display(), path, %format, unresolved, "rendering");

    let formatted = if unresolved {
        let source = loader.load(path).unwrap_or_else(|e| fail(e));
        let nodes = parse_str(&source).unwrap_or_else(|e| fail(format!("{}: {}", path, e)));
        format_nodes(&nodes, format)
    } else {
        let template = Resolver::new(loader)
            .with_options(ResolveOptions::from(&config.resolver))
            .load_template(path)
            .unwrap_or_else(|e| fail(e));
        format_template(&template, format)
    };

    print!("{}", formatted.unwrap_or_else(|e| fail(e)));
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available output formats:\n");

    for format in OutputFormat::all() {
        println!("  {}", format.name());
        println!("    {}", format.description());
        println!();
    }
}

fn fail(message: impl Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
