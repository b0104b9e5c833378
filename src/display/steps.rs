//! Step list display formatting

use crate::wizard::{IntakeFlow, WizardController};

/// Format the visible steps of a wizard, marking the current one
pub fn format_step_list<F: IntakeFlow>(wizard: &WizardController<F>) -> String {
    let visible = wizard.visible_steps();
    if visible.is_empty() {
        return "No visible steps.".to_string();
    }

    let key_width = visible.iter().map(|s| s.key().len()).max().unwrap_or(4).max(4);
    let visited = &wizard.state().visited_steps;

    let mut output = String::new();
    output.push_str(&format!(
        "   {:>2}  {:<key_width$}  {:<28}  {}\n",
        "#",
        "Step",
        "Title",
        "Status",
        key_width = key_width,
    ));
    output.push_str(&format!(
        "   {:->2}  {:-<key_width$}  {:-<28}  {:-<10}\n",
        "",
        "",
        "",
        "",
        key_width = key_width,
    ));

    for (index, step) in visible.iter().enumerate() {
        let marker = if index == wizard.current_index() && !wizard.is_submitted() {
            ">"
        } else {
            " "
        };
        let mut status = if visited.contains(step.key()) {
            "done".to_string()
        } else {
            "pending".to_string()
        };
        if step.is_conditional() {
            status.push_str(" (conditional)");
        }

        output.push_str(&format!(
            " {} {:>2}  {:<key_width$}  {:<28}  {}\n",
            marker,
            index + 1,
            step.key(),
            step.title(),
            status,
            key_width = key_width,
        ));
    }

    output
}
