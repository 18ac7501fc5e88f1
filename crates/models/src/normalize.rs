//! Shared string normalization helpers.

use crate::errors::ModelError;

/// Trim `value`, failing when nothing is left.
pub fn required(field: &str, value: &str) -> Result<String, ModelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ModelError::invalid(field, "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Upper-case the first letter of every alphabetic run and lower-case the rest.
///
/// `"ada LOVELACE"` becomes `"Ada Lovelace"` and `"o'neil"` becomes `"O'Neil"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_alpha = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Trimmed, title-cased, non-empty person name.
pub fn person_name(field: &str, value: &str) -> Result<String, ModelError> {
    Ok(title_case(&required(field, value)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("ada LOVELACE"), "Ada Lovelace");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("jean-luc picard"), "Jean-Luc Picard");
        assert_eq!(title_case("r2d2"), "R2D2");
    }

    #[test]
    fn title_case_is_idempotent() {
        let once = title_case("  mIxEd   case ");
        assert_eq!(title_case(&once), once);
    }

    #[test]
    fn required_rejects_blank() {
        let err = required("name", "   \t").unwrap_err();
        assert_eq!(err.field(), "name");
        assert_eq!(required("name", "  bob ").unwrap(), "bob");
    }
}
