use clap::Parser;
use issue_desk::cli::commands::{self, CommandContext};
use issue_desk::cli::{Cli, Commands};
use issue_desk::logging::init_logging;
use issue_desk::{DeskError, StructuredError};
use std::io::{self, IsTerminal};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let json = cli.json;
    let mut known_ids = Vec::new();
    let result = run(cli, &mut known_ids);

    if let Err(e) = result {
        handle_error(&e, json, &known_ids);
    }
}

/// Dispatch a parsed command line. On failure `known_ids` holds the loaded
/// ids so not-found errors can suggest close matches.
fn run(cli: Cli, known_ids: &mut Vec<String>) -> Result<(), DeskError> {
    match cli.command {
        Commands::Schema => return commands::schema::execute(),
        Commands::Completions(ref args) => return commands::completions::execute(args),
        _ => {}
    }

    let ctx = CommandContext::from_cli(&cli)?;
    let mut storage = ctx.load_storage()?;

    let result = match cli.command {
        Commands::List(args) => commands::list::execute(&args, &storage, &ctx),
        Commands::Show { id } => commands::show::execute(&id, &storage, &ctx),
        Commands::Create(args) => commands::create::execute(args, &mut storage, &ctx),
        Commands::Update(args) => commands::update::execute(&args, &mut storage, &ctx),
        Commands::Delete { id } => commands::delete::execute(&id, &mut storage, &ctx),
        Commands::Export => commands::export::execute(&storage),
        Commands::Schema | Commands::Completions(_) => Ok(()),
    };

    if result.is_err() {
        *known_ids = storage.ids();
    }
    result
}

/// Handle errors with structured output support.
///
/// When --json is set or stdout is not a TTY, outputs structured JSON to stderr.
/// Otherwise, outputs human-readable error with optional color.
fn handle_error(err: &DeskError, json_mode: bool, known_ids: &[String]) -> ! {
    let structured = match err {
        DeskError::IssueNotFound { id } => StructuredError::issue_not_found(id, known_ids),
        _ => StructuredError::from_error(err),
    };
    let exit_code = structured.code.exit_code();

    let use_json = json_mode || !io::stdout().is_terminal();

    if use_json {
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        let use_color = io::stderr().is_terminal();
        eprintln!("{}", structured.to_human(use_color));
    }

    std::process::exit(exit_code);
}
