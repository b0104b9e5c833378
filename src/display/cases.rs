//! Case dashboard display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Case;

#[derive(Tabled)]
struct CaseRow {
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Type")]
    relocation_type: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Place")]
    place: String,
    #[tabled(rename = "Households")]
    households: u32,
    #[tabled(rename = "Insurer")]
    insurer: String,
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Opened")]
    opened_on: String,
}

impl From<&Case> for CaseRow {
    fn from(case: &Case) -> Self {
        Self {
            reference: case.reference.clone(),
            status: case.status.to_string(),
            relocation_type: case.relocation_type.to_string(),
            name: case.name.clone(),
            place: format!("{} ({})", case.city, case.canton),
            households: case.households,
            insurer: case.insurer.clone().unwrap_or_else(|| "-".into()),
            host: case.host.clone().unwrap_or_else(|| "-".into()),
            opened_on: case.opened_on.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Format cases as a table
pub fn format_case_list(cases: &[Case]) -> String {
    if cases.is_empty() {
        return "No cases found.".to_string();
    }

    let rows: Vec<CaseRow> = cases.iter().map(CaseRow::from).collect();
    let households: u32 = cases.iter().map(|c| c.households).sum();

    format!(
        "{}\n{} case(s), {} household(s)",
        Table::new(rows).with(Style::psql()),
        cases.len(),
        households
    )
}
