use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "ntexplorer",
    version,
    about = "Quiz-driven travel recommendations for Northern Taiwan"
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz and get recommendations
    Quiz(commands::quiz::QuizArgs),
    /// Print the question catalog as JSON
    Questions(commands::questions::QuestionsArgs),
    /// Print the request that would be sent, without calling the service
    Prompt(commands::prompt::PromptArgs),
    /// Parse a raw service reply into recommendation cards
    Parse(commands::parse::ParseArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Quiz(args) => commands::quiz::run(args),
        Commands::Questions(args) => commands::questions::run(args),
        Commands::Prompt(args) => commands::prompt::run(args),
        Commands::Parse(args) => commands::parse::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "ntexplorer", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
