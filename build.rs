// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: optional path override read from the environment
fn path_arg(id: &'static str, long: &'static str, env_var: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(long)
        .value_name("PATH")
        .env(env_var)
        .help(help)
}

/// Common argument: boolean switch
fn flag_arg(id: &'static str, long: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(long).action(ArgAction::SetTrue).help(help)
}

fn build_cli() -> Command {
    Command::new("debrepo")
        .version(env!("CARGO_PKG_VERSION"))
        .author("debrepo Contributors")
        .about("Build an APT/Sileo repository index from a directory of .deb files")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .conflicts_with("quiet")
                .help("More log output (repeat for trace)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only log warnings and errors"),
        )
        .subcommand(
            Command::new("build")
                .about("Build the Packages index, its compressed copies and depictions")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("PATH")
                        .env("DEBREPO_CONFIG")
                        .help("TOML configuration file"),
                )
                .arg(path_arg("deb_dir", "deb-dir", "DEBREPO_DEB_DIR", "Directory scanned for archives"))
                .arg(path_arg("index_file", "index-file", "DEBREPO_INDEX_FILE", "Index output path"))
                .arg(path_arg(
                    "compressed_file",
                    "compressed-file",
                    "DEBREPO_COMPRESSED_FILE",
                    "Bzip2 index output path",
                ))
                .arg(
                    Arg::new("extra_compression")
                        .long("extra-compression")
                        .value_delimiter(',')
                        .env("DEBREPO_EXTRA_COMPRESSION")
                        .help("Extra compressed index copies (gzip, xz, zstd)"),
                )
                .arg(path_arg(
                    "depiction_dir",
                    "depiction-dir",
                    "DEBREPO_DEPICTION_DIR",
                    "Depiction output directory",
                ))
                .arg(
                    Arg::new("depiction_url_path")
                        .long("depiction-url-path")
                        .env("DEBREPO_DEPICTION_URL_PATH")
                        .help("URL path of the depiction directory"),
                )
                .arg(
                    Arg::new("base_url")
                        .long("base-url")
                        .env("DEBREPO_BASE_URL")
                        .help("Absolute URL the repository is served from"),
                )
                .arg(
                    Arg::new("icon_url")
                        .long("icon-url")
                        .env("DEBREPO_ICON_URL")
                        .help("Icon URL written into every record"),
                )
                .arg(
                    Arg::new("pool_prefix")
                        .long("pool-prefix")
                        .env("DEBREPO_POOL_PREFIX")
                        .help("Prefix of the Filename field"),
                )
                .arg(flag_arg(
                    "abort_on_error",
                    "abort-on-error",
                    "Fail on the first archive that cannot be indexed",
                ))
                .arg(flag_arg("parallel", "parallel", "Extract and hash archives in parallel"))
                .arg(flag_arg("no_html", "no-html", "Skip the HTML depiction page"))
                .arg(flag_arg(
                    "strict_exit",
                    "strict-exit",
                    "Exit non-zero when any archive was skipped",
                )),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the control fields, size and digests of an archive")
                .arg(Arg::new("archive").required(true).help("Path to the .deb file")),
        )
        .subcommand(
            Command::new("compress")
                .about("Compress a file with bzip2")
                .arg(Arg::new("input").required(true).help("File to compress"))
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Output path (default: input with .bz2 appended)"),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
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

    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("debrepo.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
