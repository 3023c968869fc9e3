// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("wolfi-dev")
        .version(env!("CARGO_PKG_VERSION"))
        .author("wolfi-dev Contributors")
        .about("Developer helpers for Wolfi packages and Chainguard images")
        .subcommand_required(false)
        .subcommand(
            Command::new("sandbox")
                .about("Create a fresh sandbox directory and print its path")
                .arg(Arg::new("label").help("Label embedded in the sandbox name")),
        )
        .subcommand(
            Command::new("clone")
                .about("Clone an upstream repository into a fresh sandbox")
                .arg(Arg::new("repo").default_value("os").help("Repository: os, images, images-private"))
                .arg(Arg::new("url").long("url").help("Clone URL override")),
        )
        .subcommand(
            Command::new("branch")
                .about("Set up a fork-aware branch workspace")
                .arg(Arg::new("branch").required(true).help("Branch name"))
                .arg(Arg::new("repo").default_value("os").help("Repository: os, images, images-private")),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an Alpine aports package to a melange definition")
                .arg(Arg::new("package").required(true).help("Package name in aports")),
        )
        .subcommand(
            Command::new("stats")
                .about("Print the counting metrics for a packages tree")
                .arg(Arg::new("dir").default_value(".").help("Directory to measure")),
        )
        .subcommand(
            Command::new("numbers").about("Monthly history report over the Wolfi trees"),
        )
        .subcommand(
            Command::new("sdk")
                .about("Start an interactive SDK build container")
                .arg(
                    Arg::new("args")
                        .num_args(0..)
                        .trailing_var_arg(true)
                        .help("Arguments passed through to the container"),
                ),
        )
        .subcommand(
            Command::new("build")
                .about("Build a package with make, generating a signing key if needed")
                .arg(Arg::new("package").required(true).help("Package name"))
                .arg(Arg::new("dir").default_value(".").help("Packages tree")),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

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

    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("wolfi-dev.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
