// src/normalize/area.rs
use super::NormalizeError;

/// Split a LAUS area title like `"Autauga County, AL"` into its county and
/// state parts, both trimmed.
///
/// The District of Columbia is printed without a state suffix, so it gets a
/// hardcoded fallback. Any other shape is an unparsable area name and fails
/// the run.
pub fn split_area(area: &str) -> Result<(String, String), NormalizeError> {
    let parts: Vec<&str> = area.split(',').collect();
    if parts.len() == 2 {
        return Ok((parts[0].trim().to_string(), parts[1].trim().to_string()));
    }

    if area.contains("District") {
        return Ok(("District of Columbia".to_string(), "DC".to_string()));
    }

    Err(NormalizeError::UnparsableAreaName {
        raw: area.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_the_comma() {
        let (county, state) = split_area("Autauga County, AL").unwrap();
        assert_eq!(county, "Autauga County");
        assert_eq!(state, "AL");
    }

    #[test]
    fn trims_padding_around_both_parts() {
        let (county, state) = split_area("  Kalawao County ,  HI  ").unwrap();
        assert_eq!(county, "Kalawao County");
        assert_eq!(state, "HI");
    }

    #[test]
    fn district_of_columbia_has_no_state_suffix() {
        let (county, state) = split_area("District of Columbia").unwrap();
        assert_eq!(county, "District of Columbia");
        assert_eq!(state, "DC");
    }

    #[test]
    fn anything_else_without_a_comma_is_an_error() {
        let err = split_area("Guam").unwrap_err();
        assert_eq!(
            err,
            NormalizeError::UnparsableAreaName {
                raw: "Guam".to_string()
            }
        );
    }

    #[test]
    fn extra_commas_are_an_error() {
        assert!(split_area("Doe County, Extra, XX").is_err());
    }
}
