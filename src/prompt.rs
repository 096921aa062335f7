//! Interactive input helpers.

use anyhow::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;

/// Prompt until `parse` accepts the input. An optional default is offered
/// as the initial value.
pub fn prompt_parse<T, E, F>(prompt: &str, default: Option<&str>, parse: F) -> Result<T>
where
    E: std::fmt::Display,
    F: Fn(&str) -> Result<T, E>,
{
    loop {
        let mut input = Input::<String>::new().with_prompt(format!("  {prompt}"));
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        let raw = input.interact_text()?;

        match parse(&raw) {
            Ok(value) => return Ok(value),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Prompt for a free-text value, retrying while `parse` rejects it.
pub fn prompt_text(prompt: &str, default: Option<&str>) -> Result<String> {
    prompt_parse(prompt, default, |raw: &str| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(format!("{prompt} must not be empty"))
        } else {
            Ok(trimmed.to_string())
        }
    })
}
