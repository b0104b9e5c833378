//! Draft CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_step_list;
use crate::error::SiniResult;
use crate::flows::{PropertyFlow, RelocationFlow};
use crate::services::AnswerSheet;
use crate::storage::{Storage, WizardDraft};
use crate::wizard::FlowKind;

use super::flow::{parse_payload_format, run_wizard, RunOptions};

/// Draft subcommands
#[derive(Subcommand)]
pub enum DraftCommands {
    /// List saved drafts
    List,
    /// Show a draft and where it stopped
    Show {
        /// Draft ID (full UUID or drf-xxxxxxxx)
        draft: String,
    },
    /// Continue a draft with more answers
    Resume {
        /// Draft ID (full UUID or drf-xxxxxxxx)
        draft: String,
        /// JSON or YAML answer sheet for the remaining steps
        #[arg(short, long)]
        answers: PathBuf,
        /// Payload format (json, yaml)
        #[arg(short, long)]
        format: Option<String>,
        /// Keep the draft up to date if the wizard stops again
        #[arg(long)]
        save_draft: bool,
    },
    /// Delete a draft
    Delete {
        /// Draft ID (full UUID or drf-xxxxxxxx)
        draft: String,
    },
}

/// Handle a draft command
pub fn handle_draft_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DraftCommands,
) -> SiniResult<()> {
    match cmd {
        DraftCommands::List => {
            let drafts = storage.drafts.list()?;
            if drafts.is_empty() {
                println!("No drafts found.");
                return Ok(());
            }

            println!("{:<12}  {:<10}  {:<9}  {:<6}  {}", "ID", "Wizard", "Brand", "Step", "Saved");
            println!("{}", "-".repeat(60));
            for draft in &drafts {
                println!(
                    "{:<12}  {:<10}  {:<9}  {:>6}  {}",
                    draft.id.to_string(),
                    draft.flow.to_string(),
                    draft.context.brand.to_string(),
                    draft.state.current_step_index + 1,
                    draft.saved_at.format("%Y-%m-%d %H:%M")
                );
            }
            println!("\nTotal: {} drafts", drafts.len());
        }

        DraftCommands::Show { draft } => {
            let draft = storage.drafts.find(&draft)?;
            println!("Draft:  {}", draft.id);
            println!("Wizard: {}", draft.flow);
            println!("Brand:  {}", draft.context.brand);
            if let Some(user_type) = draft.context.user_type {
                println!("User:   {}", user_type);
            }
            println!("Saved:  {}", draft.saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
            println!();
            print!("{}", steps_of(&draft)?);
        }

        DraftCommands::Resume {
            draft,
            answers,
            format,
            save_draft,
        } => {
            let draft = storage.drafts.find(&draft)?;
            let answers = AnswerSheet::from_file(&answers)?;
            let options = RunOptions {
                format: parse_payload_format(format.as_deref(), settings)?,
                save_draft,
                draft_id: Some(draft.id),
            };

            match draft.flow {
                FlowKind::Relocation => run_wizard(
                    storage,
                    draft.resume(RelocationFlow::new())?,
                    draft.context,
                    &answers,
                    &options,
                )?,
                FlowKind::Property => run_wizard(
                    storage,
                    draft.resume(PropertyFlow::new())?,
                    draft.context,
                    &answers,
                    &options,
                )?,
            }
        }

        DraftCommands::Delete { draft } => {
            let draft = storage.drafts.find(&draft)?;
            storage.drafts.delete(draft.id)?;
            println!("Deleted draft {}", draft.id);
        }
    }

    Ok(())
}

fn steps_of(draft: &WizardDraft) -> SiniResult<String> {
    Ok(match draft.flow {
        FlowKind::Relocation => format_step_list(&draft.resume(RelocationFlow::new())?),
        FlowKind::Property => format_step_list(&draft.resume(PropertyFlow::new())?),
    })
}
