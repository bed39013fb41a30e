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
use std::io::Read;

use clap::{Arg, ArgMatches, Command};
//
use wspace::asm;

fn main() -> Result<(), Box<dyn Error>> {
    // Parse command-line arguments
    let matches = Command::new("wsasm")
        .about("Convert an easy-to-read mnemonic program into Whitespace code")
        .version("0.1.0")
        .arg(
            Arg::new("file")
                .help("An input file containing mnemonic source, or - for standard input")
                .multiple_values(true),
        )
        .get_matches();
    // Read the mnemonic source
    let source = read_source(&matches);
    // Parse and generate
    let program = match asm::parse(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("wsasm: syntax error: {e}");
            std::process::exit(1);
        }
    };
    // The produced program goes to standard output as-is.
    print!("{}", asm::assemble(&program));
    Ok(())
}

/// Determine the source text to assemble: standard input or a named
/// file.  Reports a usage error when neither was given.
fn read_source(matches: &ArgMatches) -> String {
    let files: Vec<&String> = matches
        .get_many::<String>("file")
        .map(|values| values.collect())
        .unwrap_or_default();
    //
    if files.iter().any(|f| f.as_str() == "-") {
        let mut buffer = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buffer) {
            eprintln!("wsasm: error: could not read standard input: {e}");
            std::process::exit(1);
        }
        return buffer;
    }
    match files.first() {
        Some(filename) => match fs::read_to_string(filename) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("wsasm: error: could not open file {filename}: {e}");
                std::process::exit(1);
            }
        },
        None => {
            eprintln!("wsasm: error: bad usage, must specify - or a filename");
            std::process::exit(2);
        }
    }
}
