use std::fs;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use sam32::{assemble, render_program, Machine};

#[derive(Parser)]
#[command(name = "sam32")]
#[command(version = "0.1.0")]
#[command(about = "Assembles SAM-32 assembly and runs it on the emulated machine.")]
struct Cli {
  /// Assembly source file
  source: PathBuf,

  /// Where to write the encoded program (defaults to the source path with
  /// the extension `hex`)
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Byte address at which the program is assembled and loaded
  #[arg(long, default_value_t = 0)]
  base_address: u32,

  /// Stop after writing the encoded program
  #[arg(long)]
  assemble_only: bool,
}

fn main() {
  let cli = Cli::parse();

  let text = match fs::read_to_string(&cli.source) {
    Ok(text) => text,
    Err(error) => {
      eprintln!("Failed to open {}: {}", cli.source.display(), error);
      exit(1);
    }
  };

  // Any encode error aborts before the output file is touched.
  let words = match assemble(&text, cli.base_address) {
    Ok(words) => words,
    Err(error) => {
      eprintln!("{}", error);
      exit(1);
    }
  };

  let output = match cli.output {
    Some(output) => output,
    None => cli.source.with_extension("hex"),
  };
  if let Err(error) = fs::write(&output, render_program(&words)) {
    eprintln!("Failed to write {}: {}", output.display(), error);
    exit(1);
  }

  if cli.assemble_only {
    return;
  }

  let mut machine = Machine::new(cli.base_address);
  if let Err(error) = machine.load(&output) {
    eprintln!("{}", error);
    exit(1);
  }
  if let Err(fault) = machine.run() {
    eprintln!("{}", fault);
    exit(1);
  }
}
