//! Validation error display formatting

use crate::wizard::{FinalizationError, StepValidation};

/// Format the errors of one step, one field per line
pub fn format_step_errors(step: &str, validation: &StepValidation) -> String {
    if validation.is_valid() {
        return format!("Step '{}' is valid.", step);
    }

    let field_width = validation
        .errors
        .keys()
        .map(|k| k.len())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = format!("Step '{}' has {} error(s):\n", step, validation.errors.len());
    for (field, message) in &validation.errors {
        output.push_str(&format!(
            "  {:<field_width$}  {}\n",
            field,
            message,
            field_width = field_width,
        ));
    }
    output
}

/// Format a refused submission, first failing step first
pub fn format_finalization_error(err: &FinalizationError) -> String {
    let mut output = String::from("Submission blocked.\n");
    if let Some(first) = err.first_failing_step() {
        output.push_str(&format!("Return to step '{}'.\n\n", first));
    }
    for failure in &err.failures {
        output.push_str(&format_step_errors(&failure.step, &failure.validation));
    }
    output
}
