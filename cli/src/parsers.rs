use jiff::SpanRelativeTo;
use route_search_core::TourLimits;

/// Accepts `30s`, `PT1M`, `1m 30s`, or a bare number of seconds.
pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_secs(seconds.abs()));
    }

    Err(format!("invalid duration '{input}'"))
}

/// Qualifying-set cap for the tour planner, `1..=HARD_MAX_CITIES`.
pub fn parse_max_cities(input: &str) -> Result<usize, String> {
    let value: usize = input
        .parse()
        .map_err(|_| format!("'{input}' is not a positive integer"))?;
    if (1..=TourLimits::HARD_MAX_CITIES).contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "max cities must be between 1 and {}, got {value}",
            TourLimits::HARD_MAX_CITIES
        ))
    }
}
