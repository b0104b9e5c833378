//! Wizard CLI commands
//!
//! `sini relocation ...` and `sini property ...` share these subcommands.

use std::io;
use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;

use crate::config::{OutputFormat, Settings};
use crate::display::{format_finalization_error, format_step_errors, format_step_list};
use crate::error::{SiniError, SiniResult};
use crate::export::{export_submission_json, export_submission_yaml, SubmissionExport};
use crate::flows::{property_wizard, relocation_wizard, PropertyFlow, RelocationFlow};
use crate::models::{Brand, DraftId, IntakeContext, UserType};
use crate::services::{AnswerSheet, IntakeService, LoggingGateway, RunOutcome, SubmissionReceipt};
use crate::storage::{Storage, WizardDraft};
use crate::wizard::{FlowKind, IntakeFlow, StepData, WizardController};

/// Wizard subcommands
#[derive(Subcommand)]
pub enum FlowCommands {
    /// Fill in the wizard from an answer sheet and submit it
    Run {
        /// JSON or YAML file mapping step keys to answers
        #[arg(short, long)]
        answers: PathBuf,
        /// Landing page query, e.g. "userType=sinistre&brand=generali"
        #[arg(short, long)]
        query: Option<String>,
        /// Who is filling in the wizard (sinistre, assurance)
        #[arg(short, long)]
        user_type: Option<String>,
        /// Partner brand (sini, generali, vaudoise)
        #[arg(short, long)]
        brand: Option<String>,
        /// Payload format (json, yaml)
        #[arg(short, long)]
        format: Option<String>,
        /// Save a draft if the wizard stops before submission
        #[arg(long)]
        save_draft: bool,
    },
    /// List the steps visible for a set of answers
    Steps {
        /// JSON or YAML answer sheet; the empty form when omitted
        #[arg(short, long)]
        answers: Option<PathBuf>,
        /// Who is filling in the wizard (sinistre, assurance)
        #[arg(short, long)]
        user_type: Option<String>,
    },
    /// Validate the answers of a single step
    Validate {
        /// Step key, e.g. singlePersonalData
        step: String,
        /// JSON or YAML file holding the step's answers
        #[arg(short, long)]
        data: PathBuf,
    },
}

/// How a run reports and persists its result
pub struct RunOptions {
    pub format: OutputFormat,
    pub save_draft: bool,
    /// Draft being continued; replaced on pause, removed on submission
    pub draft_id: Option<DraftId>,
}

/// Handle `sini relocation` / `sini property`
pub fn handle_flow_command(
    storage: &Storage,
    settings: &Settings,
    kind: FlowKind,
    cmd: FlowCommands,
) -> SiniResult<()> {
    match cmd {
        FlowCommands::Run {
            answers,
            query,
            user_type,
            brand,
            format,
            save_draft,
        } => {
            let context = build_context(kind, settings, query.as_deref(), user_type, brand)?;
            let answers = AnswerSheet::from_file(&answers)?;
            let options = RunOptions {
                format: parse_payload_format(format.as_deref(), settings)?,
                save_draft,
                draft_id: None,
            };

            match kind {
                FlowKind::Relocation => {
                    run_wizard(storage, relocation_wizard(&context), context, &answers, &options)
                }
                FlowKind::Property => {
                    run_wizard(storage, property_wizard(), context, &answers, &options)
                }
            }
        }

        FlowCommands::Steps { answers, user_type } => {
            let context = build_context(kind, settings, None, user_type, None)?;
            let sheet = match answers {
                Some(path) => AnswerSheet::from_file(&path)?,
                None => AnswerSheet::new(),
            };

            let output = match kind {
                FlowKind::Relocation => {
                    let mut form = RelocationFlow::seeded(
                        context.user_type.and_then(|u| u.relocation_hint()),
                    );
                    sheet.apply_to(&mut form);
                    format_step_list(&WizardController::with_form_data(RelocationFlow::new(), form))
                }
                FlowKind::Property => format_step_list(&WizardController::with_form_data(
                    PropertyFlow::new(),
                    sheet.to_form_data(),
                )),
            };
            print!("{}", output);
            Ok(())
        }

        FlowCommands::Validate { step, data } => {
            let data: StepData = crate::storage::read_document(&data)?;
            let validation = match kind {
                FlowKind::Relocation => relocation_wizard(&IntakeContext::default())
                    .validate_step(&step, &data)?,
                FlowKind::Property => property_wizard().validate_step(&step, &data)?,
            };

            println!("{}", format_step_errors(&step, &validation).trim_end());
            if validation.is_valid() {
                Ok(())
            } else {
                Err(SiniError::Validation(format!("Step '{}' is invalid", step)))
            }
        }
    }
}

/// Feed `answers` through `wizard` and report the outcome
pub fn run_wizard<F: IntakeFlow>(
    storage: &Storage,
    mut wizard: WizardController<F>,
    context: IntakeContext,
    answers: &AnswerSheet,
    options: &RunOptions,
) -> SiniResult<()> {
    let gateway = LoggingGateway;
    let outcome = IntakeService::new(&gateway).run(&mut wizard, answers, &context)?;

    match outcome {
        RunOutcome::Submitted { payload, receipt } => {
            write_submission(&payload, receipt, options.format)?;
            if let Some(id) = options.draft_id {
                storage.drafts.delete(id)?;
            }
            Ok(())
        }
        RunOutcome::Rejected { step, validation } => {
            println!("{}", format_step_errors(&step, &validation).trim_end());
            pause(storage, &wizard, context, options)?;
            Err(SiniError::Validation(format!("Step '{}' was rejected", step)))
        }
        RunOutcome::Unanswered { step } => {
            println!("Stopped at step '{}': no answer given.", step);
            if pause(storage, &wizard, context, options)? {
                Ok(())
            } else {
                Err(SiniError::Validation(format!("No answer for step '{}'", step)))
            }
        }
        RunOutcome::Incomplete(err) => {
            println!("{}", format_finalization_error(&err).trim_end());
            pause(storage, &wizard, context, options)?;
            Err(err.into())
        }
    }
}

/// Save a draft if asked to; returns whether one was written
fn pause<F: IntakeFlow>(
    storage: &Storage,
    wizard: &WizardController<F>,
    context: IntakeContext,
    options: &RunOptions,
) -> SiniResult<bool> {
    if !options.save_draft {
        return Ok(false);
    }

    let mut draft = WizardDraft::capture(wizard, context)?;
    if let Some(id) = options.draft_id {
        draft.id = id;
    }
    storage.drafts.save(&draft)?;
    println!("Draft saved: {}", draft.id);
    Ok(true)
}

fn write_submission<P: Serialize>(
    payload: &P,
    receipt: SubmissionReceipt,
    format: OutputFormat,
) -> SiniResult<()> {
    let export = SubmissionExport::new(receipt, payload);
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Yaml => export_submission_yaml(&export, &mut stdout),
        _ => export_submission_json(&export, &mut stdout),
    }
}

/// Payload output format from a flag or the settings
pub fn parse_payload_format(flag: Option<&str>, settings: &Settings) -> SiniResult<OutputFormat> {
    let format = match flag {
        Some(value) => OutputFormat::parse(value)
            .ok_or_else(|| SiniError::Validation(format!("Unknown format: {}", value)))?,
        None => settings.output_format,
    };
    if format == OutputFormat::Csv {
        return Err(SiniError::Validation(
            "Payloads can be written as json or yaml".into(),
        ));
    }
    Ok(format)
}

/// Build the inbound context: query first, explicit flags override it
fn build_context(
    kind: FlowKind,
    settings: &Settings,
    query: Option<&str>,
    user_type: Option<String>,
    brand: Option<String>,
) -> SiniResult<IntakeContext> {
    let mut context = match query {
        Some(query) => IntakeContext::from_query(query),
        None => IntakeContext {
            brand: settings.default_brand,
            ..IntakeContext::default()
        },
    };

    if let Some(value) = user_type {
        let parsed = UserType::parse(&value)
            .ok_or_else(|| SiniError::Validation(format!("Unknown user type: {}", value)))?;
        context.user_type = Some(parsed);
    }
    if let Some(value) = brand {
        context.brand = Brand::parse(&value)
            .ok_or_else(|| SiniError::Validation(format!("Unknown brand: {}", value)))?;
    }

    if let Some(user_type) = context.user_type {
        if user_type.flow() != kind {
            return Err(SiniError::Validation(format!(
                "User type '{}' does not fill in the {} wizard",
                user_type, kind
            )));
        }
    } else if kind == FlowKind::Property {
        context.user_type = Some(UserType::Host);
    }

    Ok(context)
}
