use itertools::Itertools;
use regex::Regex;

const EXTERN_CRATE_PATTERN: &str = r"(?m)^\s*extern crate (\w+);[ \t\r]*$";

/// Crate names from `extern crate` declarations, in source order.
pub fn extern_crates(source: &str) -> Vec<&str> {
    let regex = Regex::new(EXTERN_CRATE_PATTERN).expect("Invalid regex");
    regex.captures_iter(source)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str())
        .collect()
}

/// A make rule making `target` depend on the rlibs of every crate that
/// `source` pulls in and that is also one of the build's `modules`.
pub fn dependency_rule<S: AsRef<str>>(target: &str, source: &str, objdir: &str, modules: &[S]) -> String {
    let rlibs = extern_crates(source).into_iter()
        .filter(|krate| modules.iter().any(|module| module.as_ref() == *krate))
        .unique()
        .map(|krate| format!(" {}/lib{}.rlib", objdir, krate))
        .join("");
    format!("{}:{}", target, rlibs)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    const KERNEL_RS: &str = "\
#![no_std]

extern crate core;
extern crate util;
extern crate alloc;
// extern crate sched;
extern crate fs;
use util::logger;
";

    #[test]
    fn finds_extern_crates() {
        assert_eq!(vec!["core", "util", "alloc", "fs"], extern_crates(KERNEL_RS));
    }

    #[test]
    fn rule_keeps_only_known_modules() {
        let modules = ["fs", "sched", "util"];
        assert_eq!(
            "obj/kernel.o: obj/libutil.rlib obj/libfs.rlib",
            dependency_rule("obj/kernel.o", KERNEL_RS, "obj", &modules)
        );
    }

    #[test]
    fn rule_without_dependencies() {
        let modules: [String; 0] = [];
        assert_eq!("obj/kernel.o:", dependency_rule("obj/kernel.o", KERNEL_RS, "obj", &modules));
    }

    #[test]
    fn repeated_declarations_listed_once() {
        let source = "extern crate fs;\nextern crate fs;\n";
        assert_eq!("k: o/libfs.rlib", dependency_rule("k", source, "o", &["fs"]));
    }
}
