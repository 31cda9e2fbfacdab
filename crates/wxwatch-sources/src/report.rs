//! CLI climate product text parsing.
//!
//! The product is a fixed-format text bulletin. The line of interest starts
//! with the word MAXIMUM and carries the day's max temperature and the
//! clock time it was reached; the time token sometimes omits its colon.
//! Parsing is pure string handling, kept free of any I/O so the rules are
//! testable in isolation.

/// Max temperature extracted from a climate product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimateReport {
    /// Official daily maximum in whole degrees Fahrenheit.
    pub max_temp_f: i32,
    /// Normalized clock time of the maximum, e.g. "7:36 AM". Absent when
    /// the report line carries no recognizable AM/PM time.
    pub max_time: Option<String>,
}

/// Extract the maximum-temperature line from a CLI climate product.
///
/// Only the first line whose leading token is `MAXIMUM` (case-insensitive)
/// is considered; the word repeats further down in the normals section.
/// The second token must parse as an integer temperature; the third and
/// fourth tokens, when present and ending in AM/PM, give the observation
/// time.
pub fn parse_climate_report(text: &str) -> Option<ClimateReport> {
    let line = text.lines().find(|line| {
        line.split_whitespace()
            .next()
            .is_some_and(|token| token.eq_ignore_ascii_case("MAXIMUM"))
    })?;

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let max_temp_f: i32 = tokens.get(1)?.parse().ok()?;

    let max_time = match (tokens.get(2), tokens.get(3)) {
        (Some(raw), Some(meridiem))
            if meridiem.eq_ignore_ascii_case("AM") || meridiem.eq_ignore_ascii_case("PM") =>
        {
            normalize_clock_time(raw)
                .map(|time| format!("{} {}", time, meridiem.to_ascii_uppercase()))
        }
        _ => None,
    };

    Some(ClimateReport {
        max_temp_f,
        max_time,
    })
}

/// Normalize a report clock token to `H:MM`.
///
/// A token already carrying a colon passes through unchanged; a bare
/// 3-digit run gets the colon after the first digit (`736` -> `7:36`) and a
/// 4-digit run after the second (`1136` -> `11:36`). Anything else is
/// rejected rather than displayed malformed.
pub fn normalize_clock_time(raw: &str) -> Option<String> {
    if let Some((hours, minutes)) = raw.split_once(':') {
        let well_formed = (1..=2).contains(&hours.len())
            && minutes.len() == 2
            && hours.chars().all(|c| c.is_ascii_digit())
            && minutes.chars().all(|c| c.is_ascii_digit());
        return well_formed.then(|| raw.to_string());
    }

    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    match raw.len() {
        3 => Some(format!("{}:{}", &raw[..1], &raw[1..])),
        4 => Some(format!("{}:{}", &raw[..2], &raw[2..])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_digit_time_gains_colon() {
        let report = parse_climate_report("MAXIMUM 74 736 AM").unwrap();
        assert_eq!(report.max_temp_f, 74);
        assert_eq!(report.max_time.as_deref(), Some("7:36 AM"));
    }

    #[test]
    fn test_four_digit_time_gains_colon() {
        let report = parse_climate_report("MAXIMUM 82 1136 AM").unwrap();
        assert_eq!(report.max_temp_f, 82);
        assert_eq!(report.max_time.as_deref(), Some("11:36 AM"));
    }

    #[test]
    fn test_colon_time_passes_through() {
        let report = parse_climate_report("MAXIMUM 68 1:44 PM").unwrap();
        assert_eq!(report.max_temp_f, 68);
        assert_eq!(report.max_time.as_deref(), Some("1:44 PM"));
    }

    #[test]
    fn test_missing_meridiem_keeps_temp_drops_time() {
        let report = parse_climate_report("MAXIMUM 74 736").unwrap();
        assert_eq!(report.max_temp_f, 74);
        assert_eq!(report.max_time, None);
    }

    #[test]
    fn test_temp_only_line() {
        let report = parse_climate_report("MAXIMUM 74").unwrap();
        assert_eq!(report.max_temp_f, 74);
        assert_eq!(report.max_time, None);
    }

    #[test]
    fn test_first_matching_line_wins() {
        let text = "\
CLIMATE REPORT
TEMPERATURE (F)
MAXIMUM 74 736 AM
MAXIMUM 99 100 PM
";
        let report = parse_climate_report(text).unwrap();
        assert_eq!(report.max_temp_f, 74);
    }

    #[test]
    fn test_leading_token_must_be_maximum() {
        // Lines merely containing the word do not count.
        let text = "\
RECORD MAXIMUM 101 1936
MAXIMUM 74 736 AM
";
        let report = parse_climate_report(text).unwrap();
        assert_eq!(report.max_temp_f, 74);
        assert_eq!(report.max_time.as_deref(), Some("7:36 AM"));
    }

    #[test]
    fn test_case_insensitive_keyword_and_meridiem() {
        let report = parse_climate_report("Maximum 74 736 am").unwrap();
        assert_eq!(report.max_temp_f, 74);
        assert_eq!(report.max_time.as_deref(), Some("7:36 AM"));
    }

    #[test]
    fn test_indented_line_still_matches() {
        let report = parse_climate_report("  MAXIMUM 74 736 AM").unwrap();
        assert_eq!(report.max_temp_f, 74);
    }

    #[test]
    fn test_non_numeric_temp_yields_absent() {
        assert_eq!(parse_climate_report("MAXIMUM MM 736 AM"), None);
    }

    #[test]
    fn test_no_maximum_line_yields_absent() {
        assert_eq!(parse_climate_report("MINIMUM 52 604 AM"), None);
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(normalize_clock_time("12345"), None);
        assert_eq!(normalize_clock_time("7x36"), None);
        assert_eq!(normalize_clock_time("1:4"), None);
        assert_eq!(normalize_clock_time(""), None);
    }

    #[test]
    fn test_garbage_time_token_drops_time_keeps_temp() {
        let report = parse_climate_report("MAXIMUM 74 12345 AM").unwrap();
        assert_eq!(report.max_temp_f, 74);
        assert_eq!(report.max_time, None);
    }
}
