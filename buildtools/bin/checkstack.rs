extern crate kernel_buildtools;

use std::io::{self, Read};
use std::process;
use clap::{value_t, App, Arg};
use log::error;
use kernel_buildtools::cli::{configure_logging, ERR_IO};
use kernel_buildtools::stack::{check_stack, report};

fn main() {
    let matches = App::new("checkstack")
        .about("Warns about stack frames larger than a threshold in objdump -d output read from stdin")
        .arg(
            Arg::with_name("min-size")
                .index(1)
                .required(true)
                .help("Largest frame size in bytes that passes without a warning"),
        )
        .get_matches();
    configure_logging();

    let min_size = value_t!(matches, "min-size", u64).unwrap_or_else(|e| e.exit());

    let mut disassembly = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut disassembly) {
        error!("failed to read disassembly from stdin: {}", e);
        process::exit(ERR_IO);
    }

    print!("{}", report(&check_stack(&disassembly, min_size)));
}
