//! Console rendering for the polling loop.
//!
//! Advisory display only; the line format mirrors what a human watches in
//! a terminal and is not meant to be machine-parsed.

use std::io::stdout;

use chrono::{DateTime, Utc};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};
use wxwatch_core::Rise;
use wxwatch_sources::ClimateReport;

/// Per-city line colors, cycled in config order.
const CITY_COLORS: [Color; 7] = [
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::Cyan,
    Color::Magenta,
    Color::White,
];

/// Wipe the screen between cycles. Best effort; a terminal that rejects
/// the control sequences is not fatal.
pub fn clear_screen() {
    let _ = execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0));
}

pub fn cycle_header(now: DateTime<Utc>) -> String {
    format!("Fetching data at {} UTC", now.format("%Y-%m-%d %H:%M:%S"))
        .bold()
        .to_string()
}

pub fn cycle_footer(poll_seconds: u64) -> String {
    format!("Updating in {poll_seconds} seconds...")
        .bold()
        .to_string()
}

/// Annotation shown next to the live value after a recent rise.
pub fn live_annotation(rise: Rise) -> String {
    format!(
        "(^ from {}\u{b0}F in last {} minutes)",
        rise.from, rise.elapsed_minutes
    )
}

/// Annotation shown next to the climate value after a recent rise.
pub fn climate_annotation(rise: Rise) -> String {
    format!(
        "(Climate: ^ from {} in last {} minutes)",
        rise.from, rise.elapsed_minutes
    )
}

/// One console line per location per cycle: name, local time, climate
/// report value and time, live value, plus any rise annotations.
pub fn location_line(
    index: usize,
    name: &str,
    local_time: &str,
    live: Option<f64>,
    report: Option<&ClimateReport>,
    live_rise: Option<Rise>,
    climate_rise: Option<Rise>,
    hot_threshold: f64,
) -> String {
    let city_color = CITY_COLORS[index % CITY_COLORS.len()];
    let temp_color = match live {
        Some(t) if t > hot_threshold => Color::Red,
        _ => Color::Cyan,
    };

    let climate_text = match report {
        Some(r) => match &r.max_time {
            Some(time) => format!("Climate Report Max Temp: {} ({})", r.max_temp_f, time),
            None => format!("Climate Report Max Temp: {}", r.max_temp_f),
        },
        None => "Climate Report Max Temp: n/a".to_string(),
    };

    let live_text = match live {
        Some(t) => format!("ASOS Current Max Temp: {t}"),
        None => "ASOS Current Max Temp: n/a".to_string(),
    };

    format!(
        "{} {} {} / {} {}",
        format!("{name} (Local Time: {local_time}):").with(city_color),
        climate_text.with(temp_color),
        climate_rise.map(climate_annotation).unwrap_or_default(),
        live_text.with(temp_color),
        live_rise.map(live_annotation).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rise(from: f64, minutes: i64) -> Rise {
        Rise {
            from,
            elapsed_minutes: minutes,
            notified: false,
        }
    }

    #[test]
    fn test_live_annotation_format() {
        assert_eq!(
            live_annotation(rise(74.0, 2)),
            "(^ from 74\u{b0}F in last 2 minutes)"
        );
    }

    #[test]
    fn test_climate_annotation_format() {
        assert_eq!(
            climate_annotation(rise(74.0, 3)),
            "(Climate: ^ from 74 in last 3 minutes)"
        );
    }

    #[test]
    fn test_location_line_carries_values() {
        let report = ClimateReport {
            max_temp_f: 74,
            max_time: Some("7:36 AM".to_string()),
        };
        let line = location_line(
            0,
            "Austin, TX",
            "2024-12-05 12:00 PM",
            Some(75.5),
            Some(&report),
            Some(rise(74.0, 2)),
            None,
            80.0,
        );

        assert!(line.contains("Austin, TX"));
        assert!(line.contains("74 (7:36 AM)"));
        assert!(line.contains("75.5"));
        assert!(line.contains("in last 2 minutes"));
    }

    #[test]
    fn test_location_line_with_everything_absent() {
        let line = location_line(3, "Denver, CO", "2024-12-05 11:00 AM", None, None, None, None, 80.0);

        assert!(line.contains("Climate Report Max Temp: n/a"));
        assert!(line.contains("ASOS Current Max Temp: n/a"));
    }
}
