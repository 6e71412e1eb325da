// Command-line interface for mdocx
//
// This binary converts Markdown files into styled documents and inspects the
// intermediate block/run representation the renderers consume.
//
// Converting:
//
// The target renderer is picked with --to; the output path with -o. Text
// renderers print to stdout when no output path is given, binary renderers
// require one. When the output path has no extension, the renderer's own
// extension is appended.
// Usage:
//  mdocx <input.md> --to <renderer> [-o <file>] [--template <name>] [--dialect <name>]
//  mdocx convert <input.md> --to <renderer> ...    - Same as above (explicit)
//  mdocx inspect <input.md> [blocks|runs]          - Dump the parsed representation
//  mdocx --list-renderers                          - List renderers, dialects, templates
//
// Style overrides:
//
// Any [style] configuration key can be overridden ad hoc with
// --extra-<key> <value> (dashes map to underscores). Example:
//  mdocx report.md --to docx -o report --extra-header-text "Confidential" --extra-page-numbers

use clap::{Arg, ArgAction, Command, ValueHint};
use mdocx_config::{Loader, MdocxConfig};
use mdocx_core::{parse, Dialect};
use mdocx_render::renderers::json::document_json;
use mdocx_render::{RenderContext, RenderedDocument, Renderer, RendererRegistry, StyleSettings};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Parse extra-* arguments from the command line.
/// Returns (cleaned_args_without_extras, extra_params_map).
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = if i + 1 < args.len() {
                !args[i + 1].starts_with('-')
            } else {
                false
            };

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
    Command::new("mdocx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown into styled Word, HTML and JSON documents")
        .long_about(
            "mdocx is a command-line tool for turning Markdown into styled\n\
            word-processing documents.\n\n\
            Commands:\n  \
            - convert: Render a Markdown file (docx, html, json)\n  \
            - inspect: Dump the parsed block/run representation\n\n\
            Style overrides:\n  \
            Use --extra-<style-key> [value] to override any [style] setting.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            mdocx notes.md --to docx -o notes         # Write notes.docx\n  \
            mdocx notes.md --to html                  # HTML preview to stdout\n  \
            mdocx notes.md --to docx -o out --template academic --dialect academic\n  \
            mdocx inspect notes.md runs               # Blocks with tokenized runs",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-renderers")
                .long("list-renderers")
                .help("List available renderers, dialects and templates")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdocx.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Render a Markdown file (default command)")
                .long_about(
                    "Render a Markdown file with one of the registered renderers.\n\n\
                    Renderers:\n  \
                    - docx: styled Word document (binary, requires -o)\n  \
                    - html: standalone HTML preview\n  \
                    - json: the parsed block sequence\n\n\
                    Text output goes to stdout by default, or use -o for a file.\n\n\
                    Examples:\n  \
                    mdocx convert notes.md --to html          # HTML to stdout\n  \
                    mdocx convert notes.md --to docx -o notes # Write notes.docx\n  \
                    mdocx notes.md --to docx -o notes.docx    # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target renderer (docx, html, json)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (extension appended when missing)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("template")
                        .long("template")
                        .help("Start from a style template (default, academic, business, minimal)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("dialect")
                        .long("dialect")
                        .help("Editor profile to parse under (general, academic, developer, office)")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Dump the parsed representation of a Markdown file")
                .long_about(
                    "Show what the renderers receive: the ordered block sequence,\n\
                    optionally with the tokenized runs of every text-bearing block.\n\n\
                    Views:\n  \
                    - blocks: block sequence only (default)\n  \
                    - runs:   blocks plus styled runs\n\n\
                    Examples:\n  \
                    mdocx inspect notes.md            # Blocks as JSON\n  \
                    mdocx inspect notes.md runs       # Blocks and runs",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .help("What to dump: 'blocks' or 'runs'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(["blocks", "runs"]))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("dialect")
                        .long("dialect")
                        .help("Editor profile to parse under")
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    // Pull out --extra-* style overrides before clap sees the args.
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    // Try normal parsing first; when the first arg looks like a file, inject
    // "convert" and parse again so the subcommand can be omitted.
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "inspect"
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "help"
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

    if matches.get_flag("list-renderers") {
        handle_list_renderers_command();
        return;
    }

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &extra_params,
    );

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let template = sub_matches.get_one::<String>("template").map(|s| s.as_str());
            let dialect = sub_matches.get_one::<String>("dialect").map(|s| s.as_str());
            handle_convert_command(input, to, output, template, dialect, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let view = sub_matches.get_one::<String>("view").map(|s| s.as_str());
            let dialect = sub_matches.get_one::<String>("dialect").map(|s| s.as_str());
            handle_inspect_command(path, view, dialect, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Resolve the dialect from an explicit flag or the configuration.
fn resolve_dialect(flag: Option<&str>, config: &MdocxConfig) -> Dialect {
    let name = flag.unwrap_or(&config.convert.dialect);
    Dialect::by_name(name).unwrap_or_else(|| {
        eprintln!(
            "Error: unknown dialect '{name}' (available: {})",
            Dialect::preset_names().join(", ")
        );
        std::process::exit(1);
    })
}

/// Resolve style settings: an explicit template replaces the configured
/// style wholesale, mirroring the template picker in the editors.
fn resolve_settings(template: Option<&str>, config: &MdocxConfig) -> StyleSettings {
    match template {
        Some(name) => StyleSettings::template(name).unwrap_or_else(|| {
            eprintln!(
                "Error: unknown template '{name}' (available: {})",
                StyleSettings::template_names().join(", ")
            );
            std::process::exit(1);
        }),
        None => config.style_settings(),
    }
}

fn read_source(path: &str) -> String {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });
    if source.trim().is_empty() {
        eprintln!("Error: '{path}' is empty - nothing to convert");
        std::process::exit(1);
    }
    source
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    to: &str,
    output: Option<&str>,
    template: Option<&str>,
    dialect_flag: Option<&str>,
    config: &MdocxConfig,
) {
    let registry = RendererRegistry::default();
    let renderer = registry.get(to).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let dialect = resolve_dialect(dialect_flag, config);
    let settings = resolve_settings(template, config);
    let source = read_source(input);

    let blocks = parse(&source, &dialect);
    log::debug!("parsed {} blocks from '{input}'", blocks.len());

    let ctx = RenderContext::new(&settings, &dialect);
    let result = renderer.render(&blocks, &ctx).unwrap_or_else(|e| {
        eprintln!("Render error: {e}");
        std::process::exit(1);
    });

    match (output, result) {
        (Some(path), data) => {
            let path = resolve_output_path(path, renderer);
            fs::write(&path, data.into_bytes()).unwrap_or_else(|e| {
                eprintln!("Error writing file '{}': {e}", path.display());
                std::process::exit(1);
            });
        }
        (None, RenderedDocument::Text(text)) => {
            print!("{text}");
        }
        (None, RenderedDocument::Binary(_)) => {
            eprintln!("Binary renderers (like docx) require an output file. Use -o <path>.");
            std::process::exit(1);
        }
    }
}

/// Append the renderer's extension when the output path has none.
fn resolve_output_path(path: &str, renderer: &dyn Renderer) -> PathBuf {
    let path = PathBuf::from(path);
    if path.extension().is_some() {
        path
    } else {
        let extension = renderer.file_extensions().first().copied().unwrap_or("out");
        path.with_extension(extension)
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    view: Option<&str>,
    dialect_flag: Option<&str>,
    config: &MdocxConfig,
) {
    let dialect = resolve_dialect(dialect_flag, config);
    let source = read_source(path);
    let blocks = parse(&source, &dialect);

    let include_runs = match view {
        Some("runs") => true,
        Some(_) => false,
        None => config.inspect.runs,
    };

    let settings = config.style_settings();
    let ctx = RenderContext::new(&settings, &dialect);
    let output = document_json(&blocks, &ctx, include_runs).unwrap_or_else(|e| {
        eprintln!("Inspect error: {e}");
        std::process::exit(1);
    });

    println!("{output}");
}

/// Handle the list-renderers command
fn handle_list_renderers_command() {
    let registry = RendererRegistry::default();

    println!("Renderers:");
    for name in registry.list_renderers() {
        match registry.get(&name) {
            Ok(renderer) => println!("  {name:8} {}", renderer.description()),
            Err(_) => println!("  {name}"),
        }
    }

    println!("\nDialects:");
    for name in Dialect::preset_names() {
        println!("  {name}");
    }

    println!("\nTemplates:");
    for name in StyleSettings::template_names() {
        println!("  {name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>, extra_params: &HashMap<String, String>) -> MdocxConfig {
    let mut loader = Loader::new().with_optional_file("mdocx.toml");
    if let Some(path) = explicit_path {
        loader = loader.with_file(path);
    }

    // --extra-* keys override [style] settings (dashes map to underscores).
    for (key, value) in extra_params {
        let config_key = format!("style.{}", key.replace('-', "_"));
        loader = match value.as_str() {
            "true" => loader.set_override(&config_key, true),
            "false" => loader.set_override(&config_key, false),
            other => loader.set_override(&config_key, other),
        }
        .unwrap_or_else(|err| {
            eprintln!("Invalid override '--extra-{key}': {err}");
            std::process::exit(1);
        });
    }

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
