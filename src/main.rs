use clap::{Parser, Subcommand};
use postmeta::{config, output, scan, urls};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "postmeta")]
#[command(about = "Filename-derived slug metadata for a markdown blog")]
#[command(long_about = "\
Filename-derived slug metadata for a markdown blog

Posts are named YYYY-MM-DD-slug.md. The extract_date_from_filename plugin
sets each item's \"filename\" metadata to the slug, which URL templates use:

  content/
  ├── blog/
  │   ├── 2024-01-15-hello-world.md   # filename = \"hello-world\"
  │   └── notes.md                    # filename = \"notes.md\" (fallback)
  └── pages/
      └── about.md                    # path_no_ext = \"about\"

Run 'postmeta gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site root (contains config.toml)
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Log more (repeat for trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List discovered content with slugs and rendered locations
    Scan {
        /// Print the manifest as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Print the slug derived from each path
    Slug {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Validate config and content; fails if any location cannot be rendered
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan { json } => {
            let manifest = scan::scan(&cli.source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                println!("==> {}", output::site_summary(&manifest.config));
                output::print_scan_output(&manifest);
            }
        }
        Command::Slug { paths } => {
            output::print_slug_lines(&paths);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let issues = urls::check_locations(&manifest.articles, &manifest.pages, &manifest.config);
            output::print_check_output(&manifest, &issues);
            if !issues.is_empty() {
                return Err(format!("{} item(s) have unrenderable locations", issues.len()).into());
            }
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the fmt subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
