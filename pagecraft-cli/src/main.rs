// Command-line interface for pagecraft
//
// This binary converts generated HTML pages into editable component trees and back.
//
// The core capabilities use the pagecraft-babel crate; this binary only reads files,
// layers configuration and writes results.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension, while being overwrittable by an explicit --from flag.
// Usage:
//  pagecraft <input> --to <format> [--from <format>] [--output <file>]          - Convert between formats (default)
//  pagecraft convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  pagecraft inspect <path> [<transform>]        - Execute a transform (defaults to "tree-treeviz")
//  pagecraft pages <input> -o <dir> [--to <fmt>] - Split a multi-page text into files
//  pagecraft style <class-string>                - Show the style extracted from a class string
//  pagecraft --list-transforms                   - List available transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// Configuration knobs (max-depth, id-prefix, preserve-embeds, asset-base-url, baseline,
// title, show-props, show-style) are applied to the configuration; the rest are passed
// to the format.
// Example:
//  pagecraft page.html --to html --extra-fragment --extra-max-depth 20

use pagecraft_cli::transforms::{self, TransformContext};

use clap::{Arg, ArgAction, Command, ValueHint};
use log::LevelFilter;
use pagecraft_babel::pages::split_pages;
use pagecraft_babel::{extract, BuildOptions, FormatRegistry, RenderOptions};
use pagecraft_config::{Loader, PagecraftConfig};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

const SUBCOMMANDS: &[&str] = &["inspect", "convert", "pages", "style", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("pagecraft")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert generated HTML pages into editable component trees and back")
        .long_about(
            "pagecraft turns free-form HTML with utility classes into a tree of page-builder\n\
            components (Navbar, Hero, Card, Grid, ...) and renders trees back to HTML.\n\n\
            Commands:\n  \
            - convert: Transform between html, json (node map) and treeviz\n  \
            - inspect: View the component tree or the classification trace\n  \
            - pages:   Split a multi-page text into one file per page\n  \
            - style:   Show the structured style extracted from a class string\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            pagecraft inspect page.html                   # View the component tree\n  \
            pagecraft inspect page.html classify-trace    # Why each element got its kind\n  \
            pagecraft page.html --to json -o page.json    # Import to a node map\n  \
            pagecraft page.json --to html -o out.html     # Render a node map",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a pagecraft.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log import and render decisions to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect how a page is classified and built")
                .long_about(
                    "View the component tree built from a page, or the classification trace.\n\n\
                    Transforms (stage-format):\n  \
                    - tree-treeviz:   Tree visualization (default)\n  \
                    - tree-json:      Flat node map\n  \
                    - tree-html:      Tree rendered back to HTML\n  \
                    - classify-trace: Tag, signature and decided kind per element\n\n\
                    Extra Parameters:\n  \
                    --extra-show-style   Show each node's class list\n  \
                    --extra-show-props   Show a props label (default true)\n\n\
                    Examples:\n  \
                    pagecraft inspect page.html                      # Tree visualization (default)\n  \
                    pagecraft inspect page.json tree-html            # Render a saved node map\n  \
                    pagecraft inspect page.html --extra-show-style   # Include class lists",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to an HTML page or JSON node map")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format). Defaults to 'tree-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert pages and trees between formats.\n\n\
                    Supported formats:\n  \
                    - html:    HTML page (.html, .htm), import and export\n  \
                    - json:    Flat node map (.json), import and export\n  \
                    - treeviz: Tree visualization (.tree), export only\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    pagecraft convert page.html --to json                 # Node map (stdout)\n  \
                    pagecraft convert tree.json --to html -o out.html     # Full HTML document\n  \
                    pagecraft page.html --to html --extra-fragment        # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("pages")
                .about("Split a multi-page text into one file per page")
                .long_about(
                    "Split text holding several pages, each introduced by a marker line\n\
                    such as '// about.html' or '<!-- about.html -->', into files.\n\n\
                    Without --to each page is written as-is under its own name.\n\
                    With --to each page is imported and written in the target format.\n\n\
                    Examples:\n  \
                    pagecraft pages response.txt -o site/             # Write the pages\n  \
                    pagecraft pages response.txt -o trees/ --to json  # One node map per page",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output directory")
                        .required(true)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Convert each page to this format")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("style")
                .about("Show the structured style extracted from a class string")
                .arg(
                    Arg::new("classes")
                        .help("Class string, e.g. \"p-4 text-center md:flex\"")
                        .required(true)
                        .index(1),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    // If no subcommand is provided, inject "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                exit_with("path is required");
            };
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let (Some(input), Some(to)) = (
                sub_matches.get_one::<String>("input"),
                sub_matches.get_one::<String>("to"),
            ) else {
                exit_with("input and --to are required");
            };
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => detect_format(input),
            };
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("pages", sub_matches)) => {
            let (Some(input), Some(output)) = (
                sub_matches.get_one::<String>("input"),
                sub_matches.get_one::<String>("output"),
            ) else {
                exit_with("input and --output are required");
            };
            let to = sub_matches.get_one::<String>("to").map(|s| s.as_str());
            handle_pages_command(input, output, to, &extra_params, &config);
        }
        Some(("style", sub_matches)) => {
            let Some(classes) = sub_matches.get_one::<String>("classes") else {
                exit_with("class string is required");
            };
            handle_style_command(classes);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // RUST_LOG is parsed last so it can override the defaults.
    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("pagecraft_babel", level)
        .filter_module("pagecraft_cli", level)
        .parse_default_env()
        .try_init();
}

fn exit_with(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn detect_format(input: &str) -> String {
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &PagecraftConfig,
) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let source_format = match FormatRegistry::default().detect_format_from_filename(path) {
        Some(format) if format == "json" => "json",
        _ => "html",
    };
    let context = TransformContext {
        build: build_options(config),
        render: RenderOptions::from(&config.export),
    };
    let params = build_inspect_params(transform, config, extra_params);

    let output = transforms::execute_transform(&source, source_format, transform, &context, &params)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &PagecraftConfig,
) {
    let registry = registry_from_config(config);

    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let tree = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let params = format_params(to, config, extra_params);
    let text = registry
        .serialize_with_options(&tree, to, &params)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}

/// Handle the pages command
fn handle_pages_command(
    input: &str,
    output_dir: &str,
    to: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &PagecraftConfig,
) {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let registry = registry_from_config(config);
    let extension = to.map(|format| match registry.get(format) {
        Ok(fmt) => fmt.file_extensions().first().copied().unwrap_or(format).to_string(),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    });

    let pages = split_pages(&source);
    if pages.is_empty() {
        eprintln!("No pages found in '{input}'");
        std::process::exit(1);
    }

    for page in pages {
        let Some(relative) = safe_page_path(&page.name) else {
            eprintln!("Skipping page with unsafe name '{}'", page.name);
            continue;
        };

        let (path, contents) = match (to, &extension) {
            (Some(format), Some(extension)) => {
                let tree = registry.parse(&page.content, "html").unwrap_or_else(|e| {
                    eprintln!("Parse error in '{}': {e}", page.name);
                    std::process::exit(1);
                });
                let params = format_params(format, config, extra_params);
                let text = registry
                    .serialize_with_options(&tree, format, &params)
                    .unwrap_or_else(|e| {
                        eprintln!("Serialization error in '{}': {e}", page.name);
                        std::process::exit(1);
                    });
                (relative.with_extension(extension), text)
            }
            _ => (relative, page.content),
        };

        let target = Path::new(output_dir).join(&path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                eprintln!("Error creating directory '{}': {e}", parent.display());
                std::process::exit(1);
            });
        }
        fs::write(&target, contents).unwrap_or_else(|e| {
            eprintln!("Error writing file '{}': {e}", target.display());
            std::process::exit(1);
        });
        println!("{}", target.display());
    }
}

/// Handle the style command
fn handle_style_command(classes: &str) {
    let extraction = extract(classes);
    let value = serde_json::json!({
        "style": extraction.style,
        "className": extraction.class_name(),
    });
    match serde_json::to_string_pretty(&value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("Stages:");
    println!("  classify    - One kind decision per element");
    println!("  tree        - Component tree built from the page\n");

    println!("Formats:");
    println!("  trace       - Indented decision list (classify only)");
    println!("  treeviz     - Tree visualization (tree only)");
    println!("  json        - Flat node map (tree only)");
    println!("  html        - Rendered HTML document (tree only)\n");

    println!("Available transform combinations:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }

    println!("\nConversion formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        println!("  {format_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> PagecraftConfig {
    let loader = Loader::new().with_optional_file("pagecraft.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn build_options(config: &PagecraftConfig) -> BuildOptions {
    BuildOptions::try_from(&config.import).unwrap_or_else(|err| {
        eprintln!("Invalid asset_base_url in configuration: {err}");
        std::process::exit(1);
    })
}

fn registry_from_config(config: &PagecraftConfig) -> FormatRegistry {
    FormatRegistry::with_settings(build_options(config), RenderOptions::from(&config.export))
}

fn apply_config_overrides(config: &mut PagecraftConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("max-depth") {
        config.import.max_depth = parse_usize_arg("max-depth", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["id-prefix", "prefix"]) {
        config.import.id_prefix = raw;
    }
    if let Some(raw) = take_override(extra_params, &["preserve-embeds", "embeds"]) {
        config.import.preserve_embeds = parse_bool_arg("preserve-embeds", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["asset-base-url", "base-url"]) {
        config.import.asset_base_url = Some(raw);
    }

    if let Some(raw) = extra_params.remove("baseline") {
        config.export.include_baseline_css = parse_bool_arg("baseline", &raw);
    }
    if let Some(raw) = extra_params.remove("title") {
        config.export.title = raw;
    }
    if let Some(raw) = extra_params.remove("lang") {
        config.export.lang = raw;
    }

    if let Some(raw) = extra_params.remove("show-props") {
        config.inspect.show_props = parse_bool_arg("show-props", &raw);
    }
    if let Some(raw) = extra_params.remove("show-style") {
        config.inspect.show_style = parse_bool_arg("show-style", &raw);
    }
}

/// Format options for `to`: treeviz picks up the inspect settings, everything
/// else only gets the remaining extra parameters.
fn format_params(
    to: &str,
    config: &PagecraftConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if to == "treeviz" {
        params.insert("show-props".to_string(), config.inspect.show_props.to_string());
        params.insert("show-style".to_string(), config.inspect.show_style.to_string());
    }
    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }
    params
}

fn build_inspect_params(
    transform: &str,
    config: &PagecraftConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    match transform {
        "tree-treeviz" => format_params("treeviz", config, overrides),
        _ => overrides.clone(),
    }
}

/// A relative path for a page name, or `None` if it would escape the output directory.
fn safe_page_path(name: &str) -> Option<PathBuf> {
    let path = Path::new(name);
    let safe = path
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    (safe && path.file_name().is_some()).then(|| path.to_path_buf())
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

fn parse_usize_arg(flag: &str, raw: &str) -> usize {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid number '{raw}' for --extra-{flag}");
        std::process::exit(1);
    })
}
