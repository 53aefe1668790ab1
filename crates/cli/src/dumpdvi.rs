//! dumpdvi - Dump the command stream of DVI files
//!
//! A command line tool that decodes a DVI file into its sequence of
//! typesetting commands, as plain text or JSON, for inspection and
//! debugging. No rendering is performed.

use clap::{ArgAction, Parser, ValueEnum};
use dviminer_core::error::Result;
use dviminer_core::{Command, Decoded, FilesystemResolver, Interpreter};
use memmap2::Mmap;
use serde_json::json;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Output format for the decoded command log.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// One human-readable line per command (default)
    #[default]
    Text,
    /// A JSON array with one object per command
    Json,
}

/// Render one command as a text line.
fn format_command(cmd: &Command) -> String {
    match cmd {
        Command::SetChar { code } => match char::from_u32(*code).filter(|c| !c.is_control()) {
            Some(c) => format!("set_char {code} '{c}'"),
            None => format!("set_char {code}"),
        },
        Command::PutChar { code } => format!("put_char {code}"),
        Command::SetRule { height, width } => format!("set_rule height={height} width={width}"),
        Command::PutRule { height, width } => format!("put_rule height={height} width={width}"),
        Command::Nop => "nop".to_string(),
        Command::Bop { counters } => {
            let list: Vec<String> = counters.iter().map(|c| c.to_string()).collect();
            format!("bop [{}]", list.join(", "))
        }
        Command::Eop => "eop".to_string(),
        Command::Push => "push".to_string(),
        Command::Pop => "pop".to_string(),
        Command::Right { delta } => format!("right {delta}"),
        Command::MoveW { delta } => format!("w {delta}"),
        Command::MoveX { delta } => format!("x {delta}"),
        Command::Down { delta } => format!("down {delta}"),
        Command::MoveY { delta } => format!("y {delta}"),
        Command::MoveZ { delta } => format!("z {delta}"),
        Command::SelectFont { id } => format!("fnt {id}"),
        Command::DefineFont(def) => format!(
            "fnt_def {} name={} checksum={} scale={} design={}",
            def.id, def, def.checksum, def.scale_factor, def.design_size
        ),
        Command::Special { data } => match std::str::from_utf8(data) {
            Ok(text) => format!("special ({} bytes) \"{text}\"", data.len()),
            Err(_) => format!("special ({} bytes)", data.len()),
        },
        Command::Preamble {
            format,
            scale,
            comment,
        } => format!(
            "pre format={format} num={} den={} mag={} comment=\"{comment}\"",
            scale.num, scale.den, scale.mag
        ),
        Command::Postamble {
            last_page,
            scale,
            tallest,
            widest,
            max_depth,
            pages,
        } => format!(
            "post last_page@{last_page} num={} den={} mag={} tallest={tallest} widest={widest} max_depth={max_depth} pages={pages}",
            scale.num, scale.den, scale.mag
        ),
        Command::PostPostamble { postamble, format } => {
            format!("post_post postamble@{postamble} format={format}")
        }
    }
}

/// Dump the command log as text, one line per command.
fn dump_text<W: Write>(out: &mut W, decoded: &Decoded) -> Result<()> {
    for (index, cmd) in decoded.commands.iter().enumerate() {
        writeln!(out, "{index}: {}", format_command(cmd))?;
    }
    if let Some(scale) = decoded.scale {
        writeln!(
            out,
            "# {} page(s), {} fill byte(s), {:.9} pt per DVI unit",
            decoded.pages,
            decoded.fill_bytes,
            scale.unit_factor()
        )?;
    }
    Ok(())
}

/// Render one command as a JSON value.
fn command_json(cmd: &Command) -> serde_json::Value {
    match cmd {
        Command::SetChar { code } => json!({"op": "set_char", "code": code}),
        Command::PutChar { code } => json!({"op": "put_char", "code": code}),
        Command::SetRule { height, width } => {
            json!({"op": "set_rule", "height": height, "width": width})
        }
        Command::PutRule { height, width } => {
            json!({"op": "put_rule", "height": height, "width": width})
        }
        Command::Nop => json!({"op": "nop"}),
        Command::Bop { counters } => json!({"op": "bop", "counters": counters.to_vec()}),
        Command::Eop => json!({"op": "eop"}),
        Command::Push => json!({"op": "push"}),
        Command::Pop => json!({"op": "pop"}),
        Command::Right { delta } => json!({"op": "right", "delta": delta}),
        Command::MoveW { delta } => json!({"op": "w", "delta": delta}),
        Command::MoveX { delta } => json!({"op": "x", "delta": delta}),
        Command::Down { delta } => json!({"op": "down", "delta": delta}),
        Command::MoveY { delta } => json!({"op": "y", "delta": delta}),
        Command::MoveZ { delta } => json!({"op": "z", "delta": delta}),
        Command::SelectFont { id } => json!({"op": "fnt", "id": id}),
        Command::DefineFont(def) => json!({
            "op": "fnt_def",
            "id": def.id,
            "name": def.name,
            "directory": def.directory,
            "checksum": def.checksum,
            "scale_factor": def.scale_factor,
            "design_size": def.design_size,
        }),
        Command::Special { data } => json!({
            "op": "special",
            "length": data.len(),
            "data": String::from_utf8_lossy(data),
        }),
        Command::Preamble {
            format,
            scale,
            comment,
        } => json!({
            "op": "pre",
            "format": format,
            "num": scale.num,
            "den": scale.den,
            "mag": scale.mag,
            "comment": comment,
        }),
        Command::Postamble {
            last_page,
            scale,
            tallest,
            widest,
            max_depth,
            pages,
        } => json!({
            "op": "post",
            "last_page": last_page,
            "num": scale.num,
            "den": scale.den,
            "mag": scale.mag,
            "tallest": tallest,
            "widest": widest,
            "max_depth": max_depth,
            "pages": pages,
        }),
        Command::PostPostamble { postamble, format } => {
            json!({"op": "post_post", "postamble": postamble, "format": format})
        }
    }
}

/// Dump the command log as a JSON document.
fn dump_json<W: Write>(out: &mut W, decoded: &Decoded) -> Result<()> {
    let doc = json!({
        "commands": decoded.commands.iter().map(command_json).collect::<Vec<_>>(),
        "pages": decoded.pages,
        "fill_bytes": decoded.fill_bytes,
        "complete": decoded.complete,
        "warnings": decoded.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
    });
    writeln!(out, "{doc:#}")?;
    Ok(())
}

/// A command line tool for dumping the command stream of DVI files.
#[derive(Parser, Debug)]
#[command(name = "dumpdvi")]
#[command(author, version, about = "Dump DVI file structure", long_about = None)]
#[command(disable_version_flag = true)]
struct Args {
    /// Path to the DVI file
    file: PathBuf,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// The maximum number of pages to decode (0 = no limit)
    #[arg(short = 'm', long, default_value = "0")]
    maxpages: usize,

    /// Directories to search for TFM metrics files
    #[arg(long = "tfm-dir")]
    tfm_dirs: Vec<PathBuf>,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Output format
    #[arg(short = 't', long = "output-format", value_enum, default_value = "text")]
    output_format: OutputFormat,
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let file = File::open(&args.file)?;
    let mmap = unsafe { Mmap::map(&file) }?;

    let resolver;
    let mut interpreter = Interpreter::new(&mmap).max_pages(args.maxpages);
    if !args.tfm_dirs.is_empty() {
        resolver = FilesystemResolver::new(args.tfm_dirs.clone());
        interpreter = interpreter.metrics(&resolver);
    }

    let decoded = interpreter.run()?;

    match args.output_format {
        OutputFormat::Text => dump_text(out, &decoded)?,
        OutputFormat::Json => dump_json(out, &decoded)?,
    }

    for warning in &decoded.warnings {
        eprintln!("warning: {warning}");
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    if args.debug {
        eprintln!("Debug mode enabled");
    }

    if !args.file.exists() {
        eprintln!("Error: File not found: {}", args.file.display());
        std::process::exit(1);
    }

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        match File::create(&args.outfile) {
            Ok(file) => Box::new(BufWriter::new(file)),
            Err(e) => {
                eprintln!("Error: cannot create {}: {e}", args.outfile);
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = run(&args, &mut output) {
        eprintln!("Error processing {}: {e}", args.file.display());
        std::process::exit(1);
    }
    if let Err(e) = output.flush() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
