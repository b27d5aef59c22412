//! Command-line driver: chooses stdin or `-f <path>`, reads the program in
//! chunks, optionally disassembles it, then executes it — the Rust analogue
//! of original_source's `whitespace/main.c`, with `app_from_crate!` doing
//! the argument parsing.

#[macro_use]
extern crate clap;

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Arg;

const BUFFER_SIZE: usize = 1024;
const BANNER_WIDTH: usize = 30;

#[derive(Debug)]
enum Error {
    Io(io::Error, PathBuf),
    Front(wsfront::Error),
    Run(wsvm::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err, path) => write!(f, "reading \"{}\" failed: {}", path.display(), err),
            Error::Front(err) => write!(f, "{}", err),
            Error::Run(err) => write!(f, "{}", err),
        }
    }
}

impl From<wsfront::Error> for Error {
    fn from(err: wsfront::Error) -> Error {
        Error::Front(err)
    }
}

impl From<wsvm::Error> for Error {
    fn from(err: wsvm::Error) -> Error {
        Error::Run(err)
    }
}

fn main() -> ExitCode {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("file")
                .short("f")
                .long("file")
                .takes_value(true)
                .value_name("PATH")
                .help("Reads the program from a file instead of standard input"),
        )
        .arg(
            Arg::with_name("no-disassemble")
                .long("no-disassemble")
                .help("Skips the disassembly banner before execution"),
        )
        .get_matches();

    let file_path = matches.value_of("file");
    let disassemble = !matches.is_present("no-disassemble");

    match run(file_path, disassemble) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(file_path: Option<&str>, disassemble: bool) -> Result<(), Error> {
    let source = match file_path {
        Some(path) => read_file_chunked(Path::new(path))?,
        None => read_stdin_quiet()?,
    };

    let program = wsfront::build_program(&source)?;

    if disassemble {
        banner();
        println!("{}", wsvm::disasm::disassemble(&program));
        banner();
        println!();
    }

    println!("program start");
    banner();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut processor = wsvm::Processor::new(&program, stdin.lock(), stdout.lock());
    processor.run()?;
    banner();
    println!("program finish");
    Ok(())
}

/// Reads `path` in 1024-byte chunks, printing the original's "source
/// loading" chatter and a dot every tenth chunk, matching
/// original_source's `main.c` read loop.
fn read_file_chunked(path: &Path) -> Result<Vec<u8>, Error> {
    let file = File::open(path).map_err(|err| Error::Io(err, path.to_path_buf()))?;
    let mut reader = BufReader::new(file);
    print!("source loading");
    io::stdout().flush().ok();

    let mut source = Vec::new();
    let mut chunk = [0u8; BUFFER_SIZE];
    let mut index = 0usize;
    loop {
        let count = reader
            .read(&mut chunk)
            .map_err(|err| Error::Io(err, path.to_path_buf()))?;
        if count == 0 {
            break;
        }
        source.extend_from_slice(&chunk[..count]);
        if index % 10 == 0 {
            print!(".");
            io::stdout().flush().ok();
        }
        index += 1;
    }
    println!();
    println!("load finished");
    Ok(source)
}

/// stdin mode stays quiet: no loading chatter, just the raw bytes.
fn read_stdin_quiet() -> Result<Vec<u8>, Error> {
    let mut source = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut source)
        .map_err(|err| Error::Io(err, PathBuf::from("<stdin>")))?;
    Ok(source)
}

fn banner() {
    println!("{}", "-".repeat(BANNER_WIDTH));
}
