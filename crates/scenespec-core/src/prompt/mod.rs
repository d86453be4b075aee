//! Instruction-set builders for the three model calls
//!
//! Every enumeration literal a prompt restates comes from the Domain
//! Vocabulary module, so the instruction text and the validating schema can
//! never drift apart. Builders are pure string assembly; the compilers feed
//! them pre-serialized document JSON.

pub mod intake;
pub mod stage1;
pub mod stage2;

/// System message for the compile stages.
pub(crate) const JSON_ONLY_SYSTEM: &str =
    "Return only valid JSON. No trailing commas. No markdown.";

/// Serializes an input document for embedding into a prompt.
pub(crate) fn to_pretty_json<T: serde::Serialize>(value: &T) -> crate::error::Result<String> {
    serde_json::to_string_pretty(value).map_err(|err| {
        crate::error::PipelineError::InputValidation(format!(
            "failed to serialize prompt input: {err}"
        ))
    })
}

/// Renders `field ∈ [ "a", "b", ... ]`, one value per line, the way the
/// constraint blocks restate a vocabulary.
pub(crate) fn constraint_clause(field: &str, names: &[&'static str]) -> String {
    let values = names
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{field} \u{2208} [\n{values}\n]")
}

/// Renders `"a", "b", "c"` on one line, for inline enumerations.
pub(crate) fn quoted_inline(names: &[&'static str]) -> String {
    names
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_clause_lists_every_value() {
        let clause = constraint_clause("task_time_horizon", &["short", "medium", "long"]);
        assert!(clause.starts_with("task_time_horizon \u{2208} ["));
        assert!(clause.contains("\"short\""));
        assert!(clause.contains("\"long\""));
    }

    #[test]
    fn quoted_inline_is_comma_separated() {
        assert_eq!(quoted_inline(&["a", "b"]), "\"a\", \"b\"");
    }
}
