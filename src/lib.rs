//! SINI intake - relocation and property wizards
//!
//! SINI rehouses households whose home was damaged by a fire, flood or
//! storm. Victims and insurers file relocation requests; hosts offer
//! properties. Both go through a multi-step wizard whose step sequence
//! branches on earlier answers.
//!
//! # Architecture
//!
//! - `wizard`: generic step state machine, schemas and validation
//! - `flows`: the relocation and property step lists
//! - `models`: typed payloads, inbound context, dashboard cases, IDs
//! - `services`: answer-sheet runner and submission gateway
//! - `storage`: drafts and the read-only case list
//! - `display` / `export`: terminal and file output
//! - `config`, `logging`, `error`: ambient plumbing
//!
//! # Example
//!
//! ```rust,ignore
//! use sini::flows::relocation_wizard;
//! use sini::models::IntakeContext;
//!
//! let context = IntakeContext::from_query("userType=sinistre&brand=generali");
//! let mut wizard = relocation_wizard(&context);
//! let outcome = wizard.advance(answers)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod flows;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod wizard;

pub use error::{SiniError, SiniResult};
