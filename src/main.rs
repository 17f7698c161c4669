use anyhow::Result;
use clap::{Parser, Subcommand};

use spendwise::cli::{
    handle_budget_command, handle_expense_command, handle_export_command, handle_history_command,
    handle_report_command, resolve_owner, OutputFormat,
};
use spendwise::config::{paths::SpendPaths, settings::Settings};
use spendwise::logging::init_tracing;
use spendwise::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendwise",
    version,
    about = "Personal expense tracking with monthly category budgets",
    long_about = "spendwise records expenses, keeps a monthly limit per category, \
                  and warns (or refuses) when a new expense would push a category \
                  over its budget."
)]
struct Cli {
    /// Act as this owner
    #[arg(long, global = true, env = "SPENDWISE_OWNER")]
    owner: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and config file
    Init,

    /// Show current configuration and paths
    Config,

    /// Budget management commands
    #[command(subcommand)]
    Budget(spendwise::cli::BudgetCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(spendwise::cli::ExpenseCommands),

    /// Reports
    #[command(subcommand)]
    Report(spendwise::cli::ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(spendwise::cli::ExportCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = SpendPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?.with_audit(settings.audit_enabled);
    storage.load_all()?;

    let output = OutputFormat::from_json_flag(cli.json);

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing spendwise at: {}", paths.base_dir().display());
            storage.save_all()?;
            if let Some(owner) = cli.owner.as_deref() {
                let owner = resolve_owner(Some(owner), &settings)?;
                settings.default_owner = Some(owner.as_str().to_string());
            }
            settings.save(&paths)?;
            println!("Initialization complete!");
            match &settings.default_owner {
                Some(owner) => println!("Default owner: {}", owner),
                None => println!("Tip: run 'spendwise init --owner <name>' to set a default owner."),
            }
        }
        Some(Commands::Config) => {
            println!("spendwise Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Default owner:   {}",
                settings.default_owner.as_deref().unwrap_or("(none)")
            );
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        Some(Commands::Budget(cmd)) => {
            let owner = resolve_owner(cli.owner.as_deref(), &settings)?;
            handle_budget_command(&storage, &settings, &owner, output, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            let owner = resolve_owner(cli.owner.as_deref(), &settings)?;
            handle_expense_command(&storage, &settings, &owner, output, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let owner = resolve_owner(cli.owner.as_deref(), &settings)?;
            handle_report_command(&storage, &settings, &owner, output, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            let owner = resolve_owner(cli.owner.as_deref(), &settings)?;
            handle_export_command(&storage, &owner, cmd)?;
        }
        Some(Commands::History { count }) => {
            let owner = resolve_owner(cli.owner.as_deref(), &settings)?;
            handle_history_command(&storage, &owner, output, count)?;
        }
        None => {
            println!("spendwise - expenses and monthly budgets");
            println!();
            println!("Run 'spendwise --help' for usage information.");
        }
    }

    Ok(())
}
