//! CSV export of dashboard cases

use std::io::Write;

use serde::Serialize;

use crate::error::SiniResult;
use crate::models::Case;

/// Flat CSV row; optional columns are left empty
#[derive(Debug, Serialize)]
struct CaseRecord<'a> {
    #[serde(rename = "Reference")]
    reference: &'a str,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Type")]
    relocation_type: &'static str,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "City")]
    city: &'a str,
    #[serde(rename = "Canton")]
    canton: &'a str,
    #[serde(rename = "Households")]
    households: u32,
    #[serde(rename = "Insurer")]
    insurer: &'a str,
    #[serde(rename = "Host")]
    host: &'a str,
    #[serde(rename = "Opened")]
    opened_on: String,
}

impl<'a> From<&'a Case> for CaseRecord<'a> {
    fn from(case: &'a Case) -> Self {
        Self {
            reference: &case.reference,
            status: case.status.to_string(),
            relocation_type: case.relocation_type.as_str(),
            name: &case.name,
            city: &case.city,
            canton: &case.canton,
            households: case.households,
            insurer: case.insurer.as_deref().unwrap_or(""),
            host: case.host.as_deref().unwrap_or(""),
            opened_on: case.opened_on.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Export cases to CSV with a header row
pub fn export_cases_csv<W: Write>(cases: &[Case], writer: W) -> SiniResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for case in cases {
        csv_writer.serialize(CaseRecord::from(case))?;
    }
    csv_writer.flush()?;
    Ok(())
}
