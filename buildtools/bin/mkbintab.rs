extern crate kernel_buildtools;

use std::io::{self, Read, Write};
use std::process;
use clap::{App, Arg};
use log::{error, info};
use kernel_buildtools::cli::{configure_logging, ERR_CORRELATION, ERR_IO};
use kernel_buildtools::{compile, compile_prefixed};

fn main() {
    let matches = App::new("mkbintab")
        .about("Packs the _start/_size symbols of embedded binaries into a null-delimited table")
        .arg(
            Arg::with_name("prefix")
                .index(1)
                .required(false)
                .help("Symbol prefix in front of each binary's name, e.g. _binary_obj_progs_"),
        )
        .get_matches();
    configure_logging();

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        error!("failed to read symbol table from stdin: {}", e);
        process::exit(ERR_IO);
    }

    let result = match matches.value_of("prefix") {
        Some(prefix) => compile_prefixed(&input, prefix),
        None => compile(&input),
    };
    let table = match result {
        Ok(table) => table,
        Err(e) => {
            eprintln!("{}", e.render(&input, Some("<stdin>"), true));
            error!("{}", e);
            process::exit(ERR_CORRELATION);
        }
    };
    info!("writing table of {} binaries", table.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = table.write_to(&mut out).and_then(|_| out.flush()) {
        error!("failed to write table: {}", e);
        process::exit(ERR_IO);
    }
}
