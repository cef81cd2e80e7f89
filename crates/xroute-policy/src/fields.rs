//! Field-level presence helpers shared by the services.

use xroute_core::ValidationError;

/// Trimmed value of a required string field.
pub(crate) fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(trimmed)
}

/// Trimmed opaque amount, `"0"` when blank or absent.
pub(crate) fn amount_or_zero(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("method", "  balanceOf "), Ok("balanceOf"));
        assert_eq!(
            required("method", " \t"),
            Err(ValidationError::Required { field: "method" })
        );
    }

    #[test]
    fn amount_defaults_to_zero() {
        assert_eq!(amount_or_zero(None), "0");
        assert_eq!(amount_or_zero(Some("  ")), "0");
        assert_eq!(amount_or_zero(Some("0.25")), "0.25");
        assert_eq!(amount_or_zero(Some("not-a-number")), "not-a-number");
    }
}
