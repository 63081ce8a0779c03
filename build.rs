// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: recipe root
fn recipes_arg() -> Arg {
    Arg::new("recipes")
        .long("recipes")
        .value_name("DIR")
        .help("Root directory holding one subdirectory per repository")
}

/// Common argument: repository filter
fn repo_arg() -> Arg {
    Arg::new("repo")
        .long("repo")
        .value_name("NAME")
        .action(ArgAction::Append)
        .help("Repository to read, repeatable (default: core, extra, community)")
}

/// Common argument: recipe reader
fn reader_arg() -> Arg {
    Arg::new("reader")
        .long("reader")
        .value_parser(["auto", "srcinfo", "makepkg"])
        .help("Recipe metadata reader")
}

/// Common argument: architecture for suffixed keys
fn arch_arg() -> Arg {
    Arg::new("arch")
        .long("arch")
        .help("Architecture used for arch-specific keys such as depends_x86_64")
}

/// Common argument: compiled packages directory
fn built_arg() -> Arg {
    Arg::new("built")
        .long("built")
        .value_name("DIR")
        .help("Directory of compiled packages (<repo>/*.pkg.tar.*)")
}

/// Common argument: worker threads
fn jobs_arg() -> Arg {
    Arg::new("jobs")
        .short('j')
        .long("jobs")
        .help("Worker threads (default: one per core)")
}

fn build_cli() -> Command {
    Command::new("pkggraph")
        .version(env!("CARGO_PKG_VERSION"))
        .author("pkggraph contributors")
        .about("Dependency graph of an Arch-style recipe collection")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Configuration file (default: $XDG_CONFIG_HOME/pkggraph/config.toml)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("No progress bars, warnings only"),
        )
        .subcommand(
            Command::new("graph")
                .about("Read recipes, scan built packages and write the dependency graph")
                .arg(recipes_arg())
                .arg(repo_arg())
                .arg(reader_arg())
                .arg(arch_arg())
                .arg(built_arg())
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_parser(["dot", "json"])
                        .help("Output format"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Output file (default: stdout)"),
                )
                .arg(
                    Arg::new("simple")
                        .long("simple")
                        .action(ArgAction::SetTrue)
                        .help("Draw each repeated edge once, weighted by its count"),
                )
                .arg(
                    Arg::new("edge_kind")
                        .long("edge-kind")
                        .value_delimiter(',')
                        .help("Edge kinds to draw, comma separated (default: all)"),
                )
                .arg(jobs_arg()),
        )
        .subcommand(
            Command::new("built")
                .about("Print the identities confirmed by compiled packages")
                .arg(built_arg())
                .arg(jobs_arg()),
        )
        .subcommand(
            Command::new("records")
                .about("Print the parsed recipe records as JSON")
                .arg(recipes_arg())
                .arg(repo_arg())
                .arg(reader_arg())
                .arg(arch_arg())
                .arg(jobs_arg()),
        )
        .subcommand(
            Command::new("show")
                .about("Show the relationships of one package, dependency or capability")
                .arg(Arg::new("identity").required(true).help("Package name or capability"))
                .arg(recipes_arg())
                .arg(repo_arg())
                .arg(reader_arg())
                .arg(arch_arg())
                .arg(built_arg())
                .arg(jobs_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell", "elvish"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("pkggraph.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
