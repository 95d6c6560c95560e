use anyhow::Result;
use clap::Parser;
use pkgreq::commands::{ResolveArgs, chase, providers, resolve, scan_links};
use pkgreq::link::DEFAULT_MAX_HOPS;
use pkgreq::report::OutputFormat;
use std::path::PathBuf;

/// Exit status when `--fail-on-unresolved` is set and the closure is incomplete.
const EXIT_UNRESOLVED: i32 = 2;

/// pkgreq - Package requirement closure for installed OS images
///
/// Works on a dump of an image's package database: which packages are
/// installed, what each requires and provides, and the image's symlinks.
///
/// Examples:
///   pkgreq -d dump resolve -m bash -m systemd --unused
///   pkgreq -d dump providers /bin/sh
///   pkgreq scan-links /mnt/image --output dump/links.txt
#[derive(Parser, Debug)]
#[command(author, version = env!("PKGREQ_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dump directory (defaults to the current directory; also via PKGREQ_DUMP)
    #[arg(
        long = "dump",
        short = 'd',
        env = "PKGREQ_DUMP",
        value_name = "DIR",
        global = true
    )]
    pub dump: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Compute the packages required by a set of must-have packages
    Resolve(ResolveCliArgs),

    /// Follow a path through the image's symlinks
    Chase(ChaseArgs),

    /// List the packages providing a capability
    Providers(ProvidersArgs),

    /// Write the symlinks of an unpacked image as a links.txt listing
    ScanLinks(ScanLinksArgs),
}

#[derive(clap::Args, Debug)]
pub struct ResolveCliArgs {
    /// Must-have package name (repeatable)
    #[arg(short = 'm', long = "must-have", value_name = "NAME")]
    pub must_haves: Vec<String>,

    /// File with one must-have package name per line
    #[arg(long = "must-have-file", value_name = "FILE")]
    pub must_have_file: Option<PathBuf>,

    /// Also report installed packages that are not required
    #[arg(long)]
    pub unused: bool,

    /// Skip requirements starting with this prefix, e.g. "rpmlib(" (repeatable)
    #[arg(long = "ignore-prefix", value_name = "PREFIX")]
    pub ignore_prefixes: Vec<String>,

    /// Maximum symlink hops per path
    #[arg(long = "max-hops", value_name = "N", default_value_t = DEFAULT_MAX_HOPS)]
    pub max_hops: usize,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with status 2 if any requirement is unresolved
    #[arg(long = "fail-on-unresolved")]
    pub fail_on_unresolved: bool,
}

#[derive(clap::Args, Debug)]
pub struct ChaseArgs {
    /// Image-absolute path, e.g. /lib64/libc.so.6
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Maximum symlink hops
    #[arg(long = "max-hops", value_name = "N", default_value_t = DEFAULT_MAX_HOPS)]
    pub max_hops: usize,
}

#[derive(clap::Args, Debug)]
pub struct ProvidersArgs {
    /// Capability name or image-absolute path
    #[arg(value_name = "CAPABILITY")]
    pub capability: String,

    /// Maximum symlink hops for path capabilities
    #[arg(long = "max-hops", value_name = "N", default_value_t = DEFAULT_MAX_HOPS)]
    pub max_hops: usize,
}

#[derive(clap::Args, Debug)]
pub struct ScanLinksArgs {
    /// Root directory of the unpacked image
    #[arg(value_name = "ROOTFS")]
    pub rootfs: PathBuf,

    /// Write the listing to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = pkgreq::runtime::RealRuntime;

    match cli.command {
        Commands::Resolve(args) => {
            let fail_on_unresolved = args.fail_on_unresolved;
            let fully_resolved = resolve(
                runtime,
                cli.dump,
                ResolveArgs {
                    must_haves: args.must_haves,
                    must_have_file: args.must_have_file,
                    unused: args.unused,
                    ignore_prefixes: args.ignore_prefixes,
                    max_hops: args.max_hops,
                    format: args.format,
                    output: args.output,
                },
            )?;
            if fail_on_unresolved && !fully_resolved {
                std::process::exit(EXIT_UNRESOLVED);
            }
        }
        Commands::Chase(args) => chase(runtime, cli.dump, &args.path, args.max_hops)?,
        Commands::Providers(args) => {
            providers(runtime, cli.dump, &args.capability, args.max_hops)?
        }
        Commands::ScanLinks(args) => scan_links(runtime, &args.rootfs, args.output)?,
    }
    Ok(())
}
