use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the user-facing surface from src/main.rs. Build scripts can't
// access src/ modules, so the completion command is declared again here.
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("mdocx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown into styled Word, HTML and JSON documents")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Input Markdown file")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("Target renderer (docx, html, json)")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file path")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("list-renderers")
                .long("list-renderers")
                .help("List available renderers")
                .action(ArgAction::SetTrue),
        );

    generate_to(Bash, &mut cmd, "mdocx", &outdir)?;
    generate_to(Zsh, &mut cmd, "mdocx", &outdir)?;
    generate_to(Fish, &mut cmd, "mdocx", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
