//! trackerhosts CLI
//!
//! Builds DNS override rule files from a BitTorrent tracker list.

mod fetch;
mod inspect;
mod logger;
mod report;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use th_compiler::{run, Fetch, OutputSpec, PipelineConfig};
use th_core::psl::SuffixList;
use th_core::types::OrderPolicy;

use crate::fetch::HttpFetcher;
use crate::inspect::{run_inspect, InspectOptions};
use crate::logger::{init_logger, LogLevel};
use crate::report::{print_summary, print_summary_json};

const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/fengyanfengyusuisuinian/tracker-aggregator/main/TrackerServer/tracker.txt";
const DEFAULT_ALLOWLIST_URLS: &[&str] =
    &["https://raw.githubusercontent.com/fellerts/cdn-domains/master/cdn_domains.txt"];
const DEFAULT_HOSTS_OUTPUT: &str = "output/yogadns_hosts.txt";
const DEFAULT_DOMAINS_OUTPUT: &str = "output/tracker_wildcard.txt";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Parser)]
#[command(name = "trackerhosts")]
#[command(about = "Convert BitTorrent tracker lists into DNS override rules")]
struct Cli {
    /// Log level
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a tracker list and write hostname/domain rule files
    Build(BuildArgs),

    /// Parse local tracker list files and report what would be extracted
    Inspect {
        /// Tracker list files
        #[arg(short, long, required = true)]
        input: Vec<PathBuf>,

        /// List registrable domains instead of hostnames
        #[arg(long)]
        domains: bool,

        /// Print the extracted entries
        #[arg(short, long)]
        list: bool,

        /// Ordering of listed entries
        #[arg(long, value_enum, default_value_t = OrderArg::Lexical)]
        order: OrderArg,

        /// Public suffix list file to use instead of the bundled one
        #[arg(long)]
        psl: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Tracker list URL
    #[arg(short, long, default_value = DEFAULT_SOURCE_URL)]
    source: String,

    /// CDN allowlist URL (repeatable); defaults to the community CDN list
    #[arg(short, long)]
    allowlist: Vec<String>,

    /// Do not fetch any CDN allowlist
    #[arg(long, conflicts_with = "allowlist")]
    no_allowlist: bool,

    /// Raw hostname output file
    #[arg(long, default_value = DEFAULT_HOSTS_OUTPUT)]
    hosts_output: PathBuf,

    /// Registrable domain output file
    #[arg(long, default_value = DEFAULT_DOMAINS_OUTPUT)]
    domains_output: PathBuf,

    /// Skip the registrable domain output
    #[arg(long)]
    no_domains: bool,

    /// Do not add `*.` wildcard rules to the domain output
    #[arg(long)]
    no_wildcard: bool,

    /// Ordering of rules in every output
    #[arg(long, value_enum, default_value_t = OrderArg::Lexical)]
    order: OrderArg,

    /// Public suffix list file or URL to use instead of the bundled one
    #[arg(long)]
    psl: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_seconds: u64,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    /// Alphabetical
    Lexical,
    /// Shortest first, alphabetical within equal length
    Length,
}

impl From<OrderArg> for OrderPolicy {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Lexical => OrderPolicy::Lexical,
            OrderArg::Length => OrderPolicy::Length,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logger(cli.log_level) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Build(args) => cmd_build(args),
        Commands::Inspect {
            input,
            domains,
            list,
            order,
            psl,
        } => cmd_inspect(input, domains, list, order, psl),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_build(args: BuildArgs) -> Result<(), String> {
    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_seconds))?;

    let suffix_list = match args.psl.as_deref() {
        Some(source) => load_suffix_list(source, &fetcher)?,
        None => SuffixList::Bundled,
    };

    let allowlist_urls = if args.no_allowlist {
        Vec::new()
    } else if args.allowlist.is_empty() {
        DEFAULT_ALLOWLIST_URLS.iter().map(|u| u.to_string()).collect()
    } else {
        args.allowlist
    };

    let order = OrderPolicy::from(args.order);
    let mut outputs = vec![OutputSpec::hosts(args.hosts_output, order)];
    if !args.no_domains {
        outputs.push(OutputSpec::domains(args.domains_output, !args.no_wildcard, order));
    }

    let config = PipelineConfig {
        source_url: args.source,
        allowlist_urls,
        outputs,
        suffix_list,
    };

    let summary = run(&config, &fetcher).map_err(|e| e.to_string())?;

    if args.json {
        print_summary_json(&summary)?;
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn cmd_inspect(
    input: Vec<PathBuf>,
    domains: bool,
    list: bool,
    order: OrderArg,
    psl: Option<PathBuf>,
) -> Result<(), String> {
    let suffix_list = match psl {
        Some(path) => SuffixList::from_path(&path).map_err(|e| e.to_string())?,
        None => SuffixList::Bundled,
    };

    let opts = InspectOptions {
        inputs: input,
        order: order.into(),
        domains,
        list,
    };

    run_inspect(opts, &suffix_list)
}

fn load_suffix_list(source: &str, fetcher: &HttpFetcher) -> Result<SuffixList, String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let text = fetcher.fetch_text(source).map_err(|e| e.to_string())?;
        SuffixList::from_text(&text).map_err(|e| e.to_string())
    } else {
        SuffixList::from_path(source.as_ref()).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_defaults() {
        let cli = Cli::try_parse_from(["trackerhosts", "build"]).unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.source, DEFAULT_SOURCE_URL);
        assert!(args.allowlist.is_empty());
        assert_eq!(args.hosts_output, PathBuf::from(DEFAULT_HOSTS_OUTPUT));
        assert_eq!(args.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert!(!args.no_wildcard);
    }

    #[test]
    fn build_accepts_repeated_allowlists() {
        let cli = Cli::try_parse_from([
            "trackerhosts",
            "build",
            "--allowlist",
            "https://a.example/cdn.txt",
            "--allowlist",
            "https://b.example/cdn.txt",
            "--order",
            "length",
        ])
        .unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.allowlist.len(), 2);
        assert_eq!(OrderPolicy::from(args.order), OrderPolicy::Length);
    }

    #[test]
    fn no_allowlist_conflicts_with_allowlist() {
        let result = Cli::try_parse_from([
            "trackerhosts",
            "build",
            "--no-allowlist",
            "--allowlist",
            "https://a.example/cdn.txt",
        ]);
        assert!(result.is_err());
    }
}
