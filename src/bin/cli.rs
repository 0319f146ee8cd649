use std::path::PathBuf;

use colored::Colorize;
use structopt::StructOpt;

use nada::cli::base::{init_logging, print_error, Matcher};
use nada::cli::config::resolve_profile;
use nada::cli::survey::SurveySubCommand;
use nada::cli::variable::VariableSubCommand;
use nada::search_api::query::SearchParams;

static HEADER: &str = r#"
--- NADA Catalog Command Line Interface ---
"#;

#[derive(StructOpt, Debug)]
struct GlobalOpts {
    /// Profile name to use for configuration
    #[structopt(short, long)]
    profile: Option<String>,

    /// Path to the profile file
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Log requests to stderr
    #[structopt(short, long)]
    verbose: bool,
}

#[derive(StructOpt, Debug)]
#[structopt(about = "CLI to query NADA microdata catalogs")]
struct Cli {
    #[structopt(flatten)]
    global: GlobalOpts,

    #[structopt(subcommand)]
    cmd: NadaCli,
}

#[derive(StructOpt, Debug)]
enum NadaCli {
    Search(SearchParams),
    Survey(SurveySubCommand),
    Variable(VariableSubCommand),
}

fn main() {
    let cli = Cli::from_args();

    init_logging(cli.global.verbose);

    let profile = resolve_profile(cli.global.config, cli.global.profile.as_deref());
    let client = match profile.and_then(|profile| profile.build_client()) {
        Ok(client) => client,
        Err(err) => {
            print_error(err.to_string());
            std::process::exit(exitcode::CONFIG);
        }
    };

    if atty::is(atty::Stream::Stdout) {
        println!("{}", HEADER.bold());
    }

    match cli.cmd {
        NadaCli::Search(command) => command.process(&client),
        NadaCli::Survey(command) => command.process(&client),
        NadaCli::Variable(command) => command.process(&client),
    }
}
