//! bytevm - CLI
//!
//! Evaluates a single byte builtin against operand literals and prints the
//! value left in the output slot.

use std::process;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bytevm_core::{invoke, Builtin, CallFrame, Frame, TypeTag, Value, VmConfig};

#[derive(Parser, Debug)]
#[command(name = "bytevm")]
#[command(about = "Evaluate a byte builtin, e.g. `bytevm '[]byte.read' '[]byte:0a0b0c' i32:1`")]
struct Cli {
    /// Qualified builtin name (`[]byte.write`, `byte.lt`, ...)
    builtin: String,

    /// Operands as `tag:value`: `[]byte:<hex>`, `byte:<0-255>`, `i32:<int>`, `bool:<true|false>`
    operands: Vec<String>,

    /// Print the encoded buffer as hex instead of the decoded value
    #[arg(long)]
    raw: bool,

    /// Largest value a slot may hold, in bytes
    #[arg(long)]
    max_value_bytes: Option<usize>,

    /// Trace every builtin step
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("bytevm_core=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let builtin = Builtin::from_name(&cli.builtin)
        .ok_or_else(|| anyhow!("unknown builtin '{}'", cli.builtin))?;

    let mut config = VmConfig::new();
    if let Some(limit) = cli.max_value_bytes {
        config = config.with_max_value_bytes(limit);
    }

    // operands in slots 0..n, output in slot n
    let out = cli.operands.len();
    let mut frame = Frame::new(&config, out + 1).context("failed to create frame")?;
    for (slot, literal) in cli.operands.iter().enumerate() {
        let value = parse_operand(literal)
            .with_context(|| format!("invalid operand {} '{}'", slot + 1, literal))?;
        frame.store(slot, value)?;
    }

    let args: Vec<usize> = (0..out).collect();
    debug!(builtin = builtin.name(), ?args, out, "evaluating");
    invoke(builtin, &mut frame, &args, out)
        .with_context(|| format!("{} failed", builtin.name()))?;

    // copy writes through its destination instead of the output slot
    let shown = match builtin.result() {
        Some(_) => frame.load(out)?,
        None => frame.load(0)?,
    };

    if cli.raw {
        println!("{} {}", shown.tag(), hex::encode(shown.to_bytes()));
    } else {
        println!("{} {}", shown.tag(), shown);
    }
    Ok(())
}

fn parse_operand(literal: &str) -> Result<Value> {
    let (tag, text) = literal
        .split_once(':')
        .ok_or_else(|| anyhow!("expected `tag:value`"))?;
    let tag = TypeTag::from_name(tag).ok_or_else(|| anyhow!("unknown type '{}'", tag))?;

    let value = match tag {
        TypeTag::Byte => Value::byte(text.parse().context("expected a byte 0-255")?),
        TypeTag::I32 => Value::i32(text.parse().context("expected a 32-bit integer")?),
        TypeTag::Bool => match text {
            "true" => Value::bool(true),
            "false" => Value::bool(false),
            _ => bail!("expected `true` or `false`"),
        },
        TypeTag::ByteArray => {
            let elements = hex::decode(text).context("expected hex-encoded bytes")?;
            Value::byte_array(&elements)?
        }
    };
    Ok(value)
}
