use std::sync::OnceLock;

use regex::{Captures, Regex};

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `{{ env.VAR }}` with an optional `| default("fallback")` clause
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("placeholder pattern is valid")
    })
}

/// Expand `{{ env.VAR }}` placeholders in raw config text
///
/// When a `default("...")` clause is present and the variable is unset,
/// the fallback substitutes instead of an error. TOML comment lines pass
/// through untouched.
pub(crate) fn expand(raw: &str) -> anyhow::Result<String> {
    let mut missing: Option<String> = None;

    let expanded = raw
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_owned();
            }
            placeholder_re()
                .replace_all(line, |caps: &Captures<'_>| {
                    let var = &caps[1];
                    std::env::var(var).unwrap_or_else(|_| match caps.get(2) {
                        Some(fallback) => fallback.as_str().to_owned(),
                        None => {
                            missing.get_or_insert_with(|| var.to_owned());
                            String::new()
                        }
                    })
                })
                .into_owned()
        })
        .collect::<Vec<_>>()
        .join("\n");

    if let Some(var) = missing {
        anyhow::bail!("environment variable not set: `{var}`");
    }

    Ok(expanded)
}
