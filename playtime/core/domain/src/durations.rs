//! Compact `PT#H#M#S` duration encodings, as reported by the remote service.

static DURATION_REGEX: ::once_cell::sync::Lazy<::regex::Regex> = ::once_cell::sync::Lazy::new(|| {
    ::regex::Regex::new(r"^PT(?:(?P<hours>[0-9]+)H)?(?:(?P<minutes>[0-9]+)M)?(?:(?P<seconds>[0-9]+)S)?").unwrap()
});

/// Total whole seconds of `encoding`, or zero when it does not start with `PT`.
pub fn parse_duration(encoding: &str) -> u64 {
    try_parse_duration(encoding).unwrap_or_default()
}

/// Like [`parse_duration`], but `None` when the `PT` prefix is missing.
///
/// Only the start of the string is matched; trailing text is ignored.
pub fn try_parse_duration(encoding: &str) -> Option<u64> {
    let captures = DURATION_REGEX.captures(encoding)?;

    let component = |name: &str| {
        captures
            .name(name)
            .map(|component| component.as_str().parse::<u64>().unwrap_or(u64::MAX))
            .unwrap_or_default()
    };

    let seconds = component("hours")
        .saturating_mul(3600)
        .saturating_add(component("minutes").saturating_mul(60))
        .saturating_add(component("seconds"));

    Some(seconds)
}

/// `HH:MM:SS`, with hours allowed past 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattedDuration(pub u64);

impl ::std::fmt::Display for FormattedDuration {
    fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        let duration = ::time::Duration::seconds(i64::try_from(self.0).unwrap_or(i64::MAX));

        let hours = duration.whole_hours();
        let minutes = duration.whole_minutes() % 60;
        let seconds = duration.whole_seconds() % 60;

        write!(formatter, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_encodings() {
        for (hours, minutes, seconds) in [(0, 0, 0), (1, 2, 3), (12, 59, 59), (100, 0, 1)] {
            let encoding = format!("PT{}H{}M{}S", hours, minutes, seconds);

            assert_eq!(parse_duration(&encoding), hours * 3600 + minutes * 60 + seconds, "{}", encoding);
        }
    }

    #[test]
    fn omitted_components_count_as_zero() {
        assert_eq!(parse_duration("PT5M"), 300);
        assert_eq!(parse_duration("PT1H30S"), 3630);
        assert_eq!(parse_duration("PT45S"), 45);
        assert_eq!(parse_duration("PT2H"), 7200);
        assert_eq!(parse_duration("PT"), 0);
    }

    #[test]
    fn unrecognised_encodings_are_zero() {
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("5M"), 0);
        assert_eq!(parse_duration("pt5m"), 0);
        assert_eq!(parse_duration("P1DT2H"), 0);
        assert_eq!(parse_duration("P0D"), 0);

        assert_eq!(try_parse_duration("P1DT2H"), None);
        assert_eq!(try_parse_duration("PT"), Some(0));
    }

    #[test]
    fn only_the_prefix_is_matched() {
        assert_eq!(parse_duration("PT5Mxyz"), 300);
        // Out-of-order components stop the match early.
        assert_eq!(parse_duration("PT5S3M"), 5);
    }

    #[test]
    fn oversized_components_saturate() {
        assert_eq!(parse_duration("PT99999999999999999999999H"), u64::MAX);
    }

    #[test]
    fn non_ascii_digits_are_not_components() {
        assert_eq!(parse_duration("PT\u{0665}M"), 0);
        assert_eq!(parse_duration("PT1H\u{0665}M"), 3600);
        assert_eq!(try_parse_duration("PT\u{0665}M"), Some(0));
    }

    #[test]
    fn formatting() {
        assert_eq!(FormattedDuration(0).to_string(), "00:00:00");
        assert_eq!(FormattedDuration(5400).to_string(), "01:30:00");
        assert_eq!(FormattedDuration(200).to_string(), "00:03:20");
        assert_eq!(FormattedDuration(100_000).to_string(), "27:46:40");
    }

    #[test]
    fn parsed_totals_format_as_clock_time() {
        let total = parse_duration("PT1H") + parse_duration("PT30M");

        assert_eq!(FormattedDuration(total).to_string(), "01:30:00");
    }
}
