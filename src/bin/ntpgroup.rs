use clap::{ArgGroup, Parser};
use console::{Term, set_colors_enabled, style};
use std::io::{self, IsTerminal};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

use ntpgroup::{
    DEFAULT_NTP_VERSION, Dispatcher, FailurePolicy, QueryError, SntpClient, aggregate, fmt,
    servers::NIST_SERVERS,
};

#[derive(Parser, Debug)]
#[command(name = "ntpgroup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query a group of NTP servers concurrently and tabulate the results")]
#[command(group(
    ArgGroup::new("servers")
        .required(true)
        .args(["server_list", "nist"])
))]
struct Args {
    /// NTP servers to query
    #[arg(short = 's', long = "server-list", num_args = 1.., value_name = "HOST")]
    server_list: Option<Vec<String>>,

    /// Query the built-in list of NIST time servers
    #[arg(short = 'n', long)]
    nist: bool,

    /// Show debug logs
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Per-server timeout in seconds
    #[arg(short = 't', long, default_value_t = 3.0)]
    timeout: f64,

    /// NTP protocol version to request
    #[arg(
        long = "ntp-version",
        default_value_t = DEFAULT_NTP_VERSION,
        value_parser = clap::value_parser!(u8).range(1..=4)
    )]
    ntp_version: u8,

    /// List failed servers as error rows instead of aborting
    #[arg(long = "allow-partial")]
    allow_partial: bool,

    /// Disable colored output
    #[arg(long = "no-color", alias = "nocolor")]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let want_color =
        io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none() && !args.no_color;
    set_colors_enabled(want_color);

    let term = Term::stdout();

    let timeout = match Duration::try_from_secs_f64(args.timeout) {
        Ok(t) if !t.is_zero() => t,
        _ => {
            term.write_line(
                &style("Error: --timeout must be a positive number of seconds")
                    .red()
                    .to_string(),
            )
            .ok();
            process::exit(2);
        }
    };

    let servers: Vec<String> = if args.nist {
        NIST_SERVERS.iter().map(|s| s.to_string()).collect()
    } else {
        args.server_list.unwrap_or_default()
    };
    let policy = if args.allow_partial {
        FailurePolicy::Partial
    } else {
        FailurePolicy::FailFast
    };

    let dispatcher = Dispatcher::new(Arc::new(SntpClient::new(timeout)))
        .with_version(args.ntp_version)
        .with_timeout(timeout);
    let outcomes = dispatcher.run(servers.as_slice()).await;

    let exit_code = match aggregate(&outcomes, policy) {
        Ok(rows) => {
            term.write_line(&fmt::table::render(&rows)).ok();
            0
        }
        Err(e) => handle_error(&term, e),
    };

    // Timed-out workers may still be blocked on their socket; do not wait for them.
    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::ERROR };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_thread_names(true)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn handle_error(term: &Term, err: QueryError) -> i32 {
    term.write_line(&style(format!("Error: {}", err)).red().to_string())
        .ok();
    match err.root() {
        QueryError::Dns(_) => 2,
        QueryError::Timeout(_) => 3,
        _ => 1,
    }
}
