//! Placeholder interpolation for resolved strings.

use std::collections::HashMap;

/// Named values substituted into `{{name}}` placeholders.
pub type Params = HashMap<String, String>;

/// Substitute `{{name}}` placeholders in `template` with values from
/// `params`.
///
/// A placeholder name is one or more word characters (ASCII alphanumerics or
/// `_`). Placeholders without a matching param are left verbatim so a
/// missing-parameter bug produces visible `{{name}}` text instead of a
/// silent blank. Replacement values are not re-scanned, so there is no
/// recursive interpolation.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use i18n_kit::interpolate::interpolate;
///
/// let params = HashMap::from([("name".to_string(), "Ava".to_string())]);
/// assert_eq!(interpolate("Hello, {{name}}!", &params), "Hello, Ava!");
/// assert_eq!(interpolate("Hi {{x}}", &HashMap::new()), "Hi {{x}}");
/// ```
#[must_use]
pub fn interpolate(template: &str, params: &Params) -> String {
    if params.is_empty() {
        return template.to_owned();
    }

    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(rest.get(..start).unwrap_or_default());
        let tail = rest.get(start + 2..).unwrap_or_default();

        let name_len =
            tail.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).unwrap_or(tail.len());
        let name = tail.get(..name_len).unwrap_or_default();
        let after_name = tail.get(name_len..).unwrap_or_default();

        if name.is_empty() || !after_name.starts_with("}}") {
            // Not a placeholder; emit one brace and rescan from the next, so
            // `{{{x}}}` still finds the inner token.
            result.push('{');
            rest = rest.get(start + 1..).unwrap_or_default();
            continue;
        }

        match params.get(name) {
            Some(value) => result.push_str(value),
            None => {
                // Unresolved placeholders stay visible.
                result.push_str("{{");
                result.push_str(name);
                result.push_str("}}");
            }
        }
        rest = after_name.get(2..).unwrap_or_default();
    }

    result.push_str(rest);
    result
}
