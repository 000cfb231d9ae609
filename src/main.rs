use std::{
    fs::{self, read_to_string},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use stacklang::{compile_source, errors::errors::CompileError, format_syntax_error, vm::vm::Vm};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Compile a program to stack machine instructions and run it.
#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    /// Source file, or an instruction file with `--bytecode`
    input: PathBuf,
    /// Where to write the instructions (default: output/<input file name>)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Stop after writing the instruction file
    #[arg(long)]
    emit_only: bool,
    /// Treat the input as an instruction file and execute it
    #[arg(long, conflicts_with = "emit_only")]
    bytecode: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn default_output(input: &Path) -> PathBuf {
    let file_name = input.file_name().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("out"));
    PathBuf::from("output").join(file_name)
}

fn execute(text: &str) -> ExitCode {
    let start = Instant::now();

    let result = Vm::from_text(text).and_then(|mut vm| vm.run());
    info!("Executed in {:?}", start.elapsed());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(runtime_error) => {
            println!("Runtime error: {}", runtime_error);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let file_contents = match read_to_string(&args.input) {
        Ok(contents) => contents,
        Err(io_error) => {
            error!(path = %args.input.display(), "{}", io_error);
            println!("Failed to read {}: {}", args.input.display(), io_error);
            return ExitCode::FAILURE;
        }
    };

    if args.bytecode {
        return execute(&file_contents);
    }

    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("shell"));

    let start = Instant::now();
    let instructions = match compile_source(&file_contents, &file_name) {
        Ok(instructions) => instructions,
        Err(CompileError::Syntax(syntax_error)) => {
            print!("{}", format_syntax_error(&syntax_error, &file_contents));
            return ExitCode::FAILURE;
        }
        Err(CompileError::Diagnostics(diagnostics)) => {
            for diagnostic in &diagnostics {
                println!("{}", diagnostic);
            }
            return ExitCode::FAILURE;
        }
    };
    info!("Compiled in {:?}", start.elapsed());

    let output_path = args.output.clone().unwrap_or_else(|| default_output(&args.input));
    if let Some(parent) = output_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        if let Err(io_error) = fs::create_dir_all(parent) {
            println!("Failed to create {}: {}", parent.display(), io_error);
            return ExitCode::FAILURE;
        }
    }
    if let Err(io_error) = fs::write(&output_path, &instructions) {
        println!("Failed to write {}: {}", output_path.display(), io_error);
        return ExitCode::FAILURE;
    }
    info!(path = %output_path.display(), "wrote instructions");

    if args.emit_only {
        return ExitCode::SUCCESS;
    }

    // Run the persisted file
    match read_to_string(&output_path) {
        Ok(text) => execute(&text),
        Err(io_error) => {
            println!("Failed to read {}: {}", output_path.display(), io_error);
            ExitCode::FAILURE
        }
    }
}
