// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Closing instruction appended to every prompt that expects structured output.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Berikan HANYA response JSON, tanpa tambahan teks atau formatting lain.";

/// Fills `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so user text containing `{level}`
/// or stray braces comes through untouched. Unknown placeholders and literal
/// JSON braces in the template are kept as-is.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    'scan: while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        for (name, value) in vars {
            if let Some(after) = tail
                .strip_prefix(*name)
                .and_then(|t| t.strip_prefix('}'))
            {
                out.push_str(value);
                rest = after;
                continue 'scan;
            }
        }
        out.push('{');
        rest = tail;
    }
    out.push_str(rest);
    out
}
