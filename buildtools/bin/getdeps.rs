extern crate kernel_buildtools;

use std::fs;
use std::process;
use clap::{App, Arg};
use log::error;
use kernel_buildtools::cli::{configure_logging, ERR_IO};
use kernel_buildtools::deps::dependency_rule;

fn main() {
    let matches = App::new("getdeps")
        .about("Prints a make rule for the extern crates of a Rust module that are built in-tree")
        .arg(Arg::with_name("target").index(1).required(true).help("Make target the rule is for"))
        .arg(Arg::with_name("rustmod").index(2).required(true).help("Crate root to scan for extern crate declarations"))
        .arg(Arg::with_name("objdir").index(3).required(true).help("Directory holding the built rlibs"))
        .arg(
            Arg::with_name("modules")
                .index(4)
                .multiple(true)
                .help("Crates built in-tree; others are ignored"),
        )
        .get_matches();
    configure_logging();

    // Required arguments; clap has already rejected the command line otherwise.
    let target = matches.value_of("target").unwrap_or_default();
    let rustmod = matches.value_of("rustmod").unwrap_or_default();
    let objdir = matches.value_of("objdir").unwrap_or_default();
    let modules = matches.values_of("modules").map(|values| values.collect::<Vec<_>>()).unwrap_or_default();

    let source = match fs::read_to_string(rustmod) {
        Ok(source) => source,
        Err(e) => {
            error!("failed to read {}: {}", rustmod, e);
            process::exit(ERR_IO);
        }
    };

    println!("{}", dependency_rule(target, &source, objdir, &modules));
}
