//! Service layer for SINI intake
//!
//! Runs wizards from answer sheets and hands finalized payloads to a
//! submission gateway.

pub mod intake;
pub mod submission;

pub use intake::{AnswerSheet, IntakeService, RunOutcome};
pub use submission::{LoggingGateway, SubmissionGateway, SubmissionReceipt};
