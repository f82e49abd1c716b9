use validator::ValidationErrors;

/// Flattens `validator` errors into one human-readable message for the
/// response envelope. Fields are sorted so the output is deterministic.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let detail = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            parts.push(format!("{field}: {detail}"));
        }
    }
    parts.sort();
    parts.join(", ")
}
