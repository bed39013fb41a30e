// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::error::Error;
use std::fs;
use std::io;
use std::io::{BufRead, BufReader, Read};

use clap::{arg, Arg, ArgMatches, Command};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
//
use wspace::executor::Executor;
use wspace::parser;
use wspace::selftest;

fn main() -> Result<(), Box<dyn Error>> {
    // Parse command-line arguments
    let matches = Command::new("wspace")
        .about("Execute a program in the Whitespace programming language")
        .version("0.1.0")
        .arg(
            Arg::new("file")
                .help("An input file containing Whitespace code, or - for standard input")
                .multiple_values(true),
        )
        .arg(arg!(--test "Run the embedded self-test program (overrides any input)"))
        .arg(arg!(--describe "List the parsed program instead of executing it"))
        .arg(arg!(--debug "Turn on a verbose per-instruction trace on standard error"))
        .get_matches();
    // Initialise logging
    if matches.is_present("debug") {
        init_logging(LevelFilter::Debug);
    }
    // Read the program source
    let (source, source_was_stdin) = read_source(&matches);
    // Tokenize it
    let program = match parser::parse(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("wspace: syntax error: {e}");
            std::process::exit(1);
        }
    };
    // Describe mode lists the program instead of running it.
    if matches.is_present("describe") {
        for insn in &program {
            println!("{insn}");
        }
        return Ok(());
    }
    // Execute against the standard streams.
    let input = program_input(source_was_stdin);
    let mut executor = Executor::new(program, input, io::stdout());
    match executor.run() {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("wspace: runtime error: {e}");
            std::process::exit(1);
        }
    }
}

/// Determine the source text to run: the embedded self-test, standard
/// input, or a named file (in that order of precedence).  Reports a
/// usage error when none of them was requested.
fn read_source(matches: &ArgMatches) -> (String, bool) {
    let files: Vec<&String> = matches
        .get_many::<String>("file")
        .map(|values| values.collect())
        .unwrap_or_default();
    let from_stdin = files.iter().any(|f| f.as_str() == "-");
    //
    if matches.is_present("test") {
        if !matches.is_present("describe") {
            println!("Running the self test.  Expected results are:");
            println!("{}", selftest::EXPECTED_RESULTS);
            println!("Actual results are:");
        }
        return (selftest::TEST_CODE.to_string(), false);
    }
    if from_stdin {
        let mut buffer = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buffer) {
            eprintln!("wspace: error: could not read standard input: {e}");
            std::process::exit(1);
        }
        return (buffer, true);
    }
    match files.first() {
        Some(filename) => match fs::read_to_string(filename) {
            Ok(source) => (source, false),
            Err(e) => {
                eprintln!("wspace: error: could not open file {filename}: {e}");
                std::process::exit(1);
            }
        },
        None => {
            eprintln!("wspace: error: bad usage, must specify --test or - or a filename");
            std::process::exit(2);
        }
    }
}

/// The reader the running program takes its input from.  When the
/// source itself arrived on standard input that stream is exhausted,
/// so the controlling terminal stands in for it where available.
fn program_input(source_was_stdin: bool) -> Box<dyn BufRead> {
    if source_was_stdin {
        if let Ok(tty) = fs::File::open("/dev/tty") {
            return Box::new(BufReader::new(tty));
        }
    }
    Box::new(BufReader::new(io::stdin()))
}

/// Initialise logging using a suitable pattern.
fn init_logging(level: LevelFilter) {
    let encoder = PatternEncoder::new("[{l}] {m}{n}");
    //
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(encoder))
        .build();
    //
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .unwrap();
    //
    let _handle = log4rs::init_config(config).unwrap();
}
