use crate::api::ApiError;

/// Field constraints checked before a form is submitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    Email,
    Digits,
    MinLength(usize),
    MaxLength(usize),
    /// Numeric value must be strictly greater.
    GreaterThan(f64),
    Max(f64),
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

fn check_rule(label: &str, value: &str, rule: Rule) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() && rule != Rule::Required {
        return Ok(());
    }
    let ok = match rule {
        Rule::Required => !trimmed.is_empty(),
        Rule::Email => is_email(trimmed),
        Rule::Digits => trimmed.chars().all(|c| c.is_ascii_digit()),
        Rule::MinLength(min) => trimmed.chars().count() >= min,
        Rule::MaxLength(max) => trimmed.chars().count() <= max,
        Rule::GreaterThan(min) => trimmed.parse::<f64>().map(|v| v > min).unwrap_or(false),
        Rule::Max(max) => trimmed.parse::<f64>().map(|v| v <= max).unwrap_or(false),
    };
    if ok {
        return Ok(());
    }
    Err(match rule {
        Rule::Required => format!("{} es obligatorio.", label),
        Rule::Email => format!("{} no es un correo válido.", label),
        Rule::Digits => format!("{} solo admite números.", label),
        Rule::MinLength(min) => format!("{} debe tener al menos {} caracteres.", label, min),
        Rule::MaxLength(max) => format!("{} admite como máximo {} caracteres.", label, max),
        Rule::GreaterThan(min) => format!("{} debe ser mayor que {}.", label, min),
        Rule::Max(max) => format!("{} no puede superar {}.", label, max),
    })
}

/// First violated rule for one field.
pub fn check(label: &str, value: &str, rules: &[Rule]) -> Result<(), String> {
    rules
        .iter()
        .try_for_each(|rule| check_rule(label, value, *rule))
}

/// Runs field checks in order and reports the first failure as a
/// `VALIDATION_ERROR`.
pub fn first_error<I>(checks: I) -> Result<(), ApiError>
where
    I: IntoIterator<Item = Result<(), String>>,
{
    checks
        .into_iter()
        .find_map(Result::err)
        .map_or(Ok(()), |msg| Err(ApiError::validation(msg)))
}
