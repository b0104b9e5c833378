//! Dashboard CLI commands
//!
//! Victims look up their own case by reference, insurers and hosts filter
//! on their name.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::{OutputFormat, Settings};
use crate::display::format_case_list;
use crate::error::{SiniError, SiniResult};
use crate::export::{export_cases_csv, export_cases_json};
use crate::models::{CaseFilter, CaseStatus, RelocationType};
use crate::storage::{CaseRepository, Storage};

/// Filters shared by the case commands
#[derive(Args, Debug, Default)]
pub struct CaseFilterArgs {
    /// Case reference (victim dashboard)
    #[arg(long)]
    pub reference: Option<String>,
    /// Insurer name (insurer dashboard)
    #[arg(long)]
    pub insurer: Option<String>,
    /// Host name (host dashboard)
    #[arg(long)]
    pub host: Option<String>,
    /// Case status (submitted, matching, offered, relocated, closed)
    #[arg(short, long)]
    pub status: Option<String>,
    /// Two-letter canton code
    #[arg(short, long)]
    pub canton: Option<String>,
    /// Relocation type (single, multiple)
    #[arg(short = 't', long = "type")]
    pub relocation_type: Option<String>,
    /// Hide relocated and closed cases
    #[arg(long)]
    pub open: bool,
    /// Case list to read instead of the configured one
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

impl CaseFilterArgs {
    /// Turn the flags into a filter
    pub fn to_filter(&self) -> SiniResult<CaseFilter> {
        let status = self
            .status
            .as_deref()
            .map(|s| {
                CaseStatus::parse(s)
                    .ok_or_else(|| SiniError::Validation(format!("Unknown status: {}", s)))
            })
            .transpose()?;
        let relocation_type = self
            .relocation_type
            .as_deref()
            .map(|s| {
                RelocationType::parse(s)
                    .ok_or_else(|| SiniError::Validation(format!("Unknown relocation type: {}", s)))
            })
            .transpose()?;

        Ok(CaseFilter {
            reference: self.reference.clone(),
            status,
            canton: self.canton.clone(),
            relocation_type,
            insurer: self.insurer.clone(),
            host: self.host.clone(),
            open_only: self.open,
        })
    }
}

/// Case subcommands
#[derive(Subcommand)]
pub enum CasesCommands {
    /// List cases
    List {
        #[command(flatten)]
        filter: CaseFilterArgs,
    },
    /// Export cases
    Export {
        #[command(flatten)]
        filter: CaseFilterArgs,
        /// Export format (csv, json)
        #[arg(short, long, default_value = "csv")]
        format: String,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a cases command
pub fn handle_cases_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CasesCommands,
) -> SiniResult<()> {
    match cmd {
        CasesCommands::List { filter } => {
            let repo = storage.cases(settings, filter.fixture.as_deref())?;
            let cases = repo.list_cases(&filter.to_filter()?)?;
            println!("{}", format_case_list(&cases));
        }

        CasesCommands::Export {
            filter,
            format,
            output,
        } => {
            let format = OutputFormat::parse(&format)
                .filter(|f| *f != OutputFormat::Yaml)
                .ok_or_else(|| {
                    SiniError::Validation(format!("Cases can be exported as csv or json, not {}", format))
                })?;
            let repo = storage.cases(settings, filter.fixture.as_deref())?;
            let cases = repo.list_cases(&filter.to_filter()?)?;

            let mut writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(File::create(path)?),
                None => Box::new(io::stdout().lock()),
            };
            match format {
                OutputFormat::Json => export_cases_json(&cases, &mut writer)?,
                _ => export_cases_csv(&cases, writer)?,
            }

            if let Some(path) = output {
                eprintln!("Exported {} case(s) to {}", cases.len(), path.display());
            }
        }
    }

    Ok(())
}
