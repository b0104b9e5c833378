use anyhow::Result;
use clap::{Parser, Subcommand};

use sini::cli::{
    handle_cases_command, handle_draft_command, handle_flow_command, CasesCommands,
    DraftCommands, FlowCommands,
};
use sini::config::{SiniPaths, Settings};
use sini::logging;
use sini::storage::Storage;
use sini::wizard::FlowKind;

#[derive(Parser)]
#[command(
    name = "sini",
    author = "Pharewest",
    version,
    about = "Relocation and property intake wizards for SINI",
    long_about = "SINI rehouses households after a fire, flood or storm. This tool \
                  runs the relocation request and property listing wizards from \
                  answer files, keeps drafts of unfinished requests and shows the \
                  case dashboards."
)]
struct Cli {
    /// Log debug output to stderr (overridden by SINI_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Relocation request wizard (victims and insurers)
    #[command(subcommand)]
    Relocation(FlowCommands),

    /// Property listing wizard (hosts)
    #[command(subcommand, alias = "host")]
    Property(FlowCommands),

    /// Saved drafts
    #[command(subcommand)]
    Draft(DraftCommands),

    /// Case dashboards
    #[command(subcommand)]
    Cases(CasesCommands),

    /// Show configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = SiniPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let level = if cli.verbose { "debug" } else { settings.log_level.as_str() };
    logging::init(level)?;

    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Relocation(cmd)) => {
            handle_flow_command(&storage, &settings, FlowKind::Relocation, cmd)?;
        }
        Some(Commands::Property(cmd)) => {
            handle_flow_command(&storage, &settings, FlowKind::Property, cmd)?;
        }
        Some(Commands::Draft(cmd)) => {
            handle_draft_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Cases(cmd)) => {
            handle_cases_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("SINI Configuration");
            println!("==================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Drafts directory: {}", paths.drafts_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Default brand:  {}", settings.default_brand);
            println!("  Output format:  {}", settings.output_format);
            println!("  Log level:      {}", settings.log_level);
            match &settings.cases_fixture {
                Some(path) => println!("  Cases fixture:  {}", path.display()),
                None => println!("  Cases fixture:  (bundled)"),
            }
        }
        None => {
            println!("SINI - relocation and property intake");
            println!();
            println!("Run 'sini --help' for usage information.");
        }
    }

    Ok(())
}
