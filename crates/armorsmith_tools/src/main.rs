//! Armorsmith - Designer Tools

use std::path::PathBuf;

use armorsmith_core::catalog::{EquipmentCatalog, Location};
use armorsmith_core::chassis::TechBase;
use armorsmith_tools::commands;
use armorsmith_tools::error::ToolResult;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "armorsmith")]
#[command(about = "Design tools for powered-armor squads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum TechArg {
    Inner,
    Outer,
}

impl From<TechArg> for TechBase {
    fn from(arg: TechArg) -> Self {
        match arg {
            TechArg::Inner => Self::Inner,
            TechArg::Outer => Self::Outer,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LocationArg {
    Torso,
    Left,
    Right,
}

impl From<LocationArg> for Location {
    fn from(arg: LocationArg) -> Self {
        match arg {
            LocationArg::Torso => Self::Torso,
            LocationArg::Left => Self::LeftLimb,
            LocationArg::Right => Self::RightLimb,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog equipment
    Catalog {
        /// Only show items this lineage may use
        #[arg(long, value_enum)]
        tech: Option<TechArg>,
        /// Only show items mountable here
        #[arg(long, value_enum)]
        location: Option<LocationArg>,
    },
    /// Preview a design sheet
    Preview {
        /// Path to the sheet
        sheet: PathBuf,
    },
    /// Validate every design sheet in a directory
    Validate {
        /// Path to the design directory
        #[arg(default_value = "assets/designs")]
        path: PathBuf,
    },
    /// Commit a design sheet to a saved unit record
    Commit {
        /// Path to the sheet
        sheet: PathBuf,
        /// Directory for unit records
        #[arg(long)]
        out: PathBuf,
        /// Owning player name
        #[arg(long, requires = "roster")]
        owner: Option<String>,
        /// RON roster mapping player names to IDs
        #[arg(long, requires = "owner")]
        roster: Option<PathBuf>,
    },
    /// Show a saved unit record
    Show {
        /// Directory of unit records
        dir: PathBuf,
        /// Record name
        name: String,
    },
}

fn run(command: Commands, catalog: &EquipmentCatalog) -> ToolResult<()> {
    match command {
        Commands::Catalog { tech, location } => {
            print!(
                "{}",
                commands::catalog_listing(catalog, tech.map(Into::into), location.map(Into::into))
            );
        }
        Commands::Preview { sheet } => {
            println!("{}", commands::preview_sheet(&sheet, catalog)?);
        }
        Commands::Validate { path } => {
            tracing::info!("Validating design sheets in: {}", path.display());
            let report = armorsmith_tools::validate::validate_design_directory(&path, catalog)?;
            for outcome in &report.outcomes {
                println!("{outcome}");
            }
            report.into_result()?;
        }
        Commands::Commit {
            sheet,
            out,
            owner,
            roster,
        } => {
            let roster = roster.as_deref().map(commands::load_roster).transpose()?;
            let owner = roster.as_ref().zip(owner.as_deref());
            let record = commands::commit_sheet(&sheet, &out, owner, catalog)?;
            println!("{}", commands::describe_record(&record));
        }
        Commands::Show { dir, name } => {
            println!("{}", commands::show_record(&dir, &name)?);
        }
    }
    Ok(())
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let catalog = EquipmentCatalog::standard();

    if let Err(e) = run(cli.command, &catalog) {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("armorsmith").chain(args.iter().copied()))
    }

    #[test]
    fn test_owner_and_roster_require_each_other() {
        let commit = ["commit", "sheet.ron", "--out", "units"];
        let with = |extra: &[&'static str]| -> Vec<&'static str> { commit.iter().chain(extra).copied().collect() };

        assert!(parse(&commit).is_ok());
        assert!(parse(&with(&["--owner", "marlow", "--roster", "roster.ron"])).is_ok());
        assert!(parse(&with(&["--owner", "marlow"])).is_err());
        assert!(parse(&with(&["--roster", "roster.ron"])).is_err());
    }
}
