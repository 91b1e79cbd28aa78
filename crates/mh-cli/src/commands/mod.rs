pub mod analyse;
pub mod divine;
pub mod prompt;
pub mod reply;
pub mod tables;

use chrono::{FixedOffset, NaiveDateTime, TimeZone};
use colored::{ColoredString, Colorize};

use mh_core::{FiveElementAnalysis, Verdict};
use mh_oracle::{Diviner, FixedClock, OracleConfig};

const AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build a diviner from the shared command flags.
///
/// `at` pins the clock to a local time in the configured offset.
fn build_diviner(at: Option<&str>, seed: Option<u64>, utc_offset: i32) -> Result<Diviner, String> {
    let mut config = OracleConfig::default().with_utc_offset(utc_offset);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let offset_hours = config.utc_offset_hours;
    let diviner = Diviner::new(config);

    let Some(at) = at else {
        return Ok(diviner);
    };
    let naive = NaiveDateTime::parse_from_str(at.trim(), AT_FORMAT)
        .map_err(|e| format!("invalid --at '{at}' (expected YYYY-MM-DD HH:MM:SS): {e}"))?;
    let offset = FixedOffset::east_opt(offset_hours * 3600)
        .ok_or_else(|| format!("invalid UTC offset {offset_hours}"))?;
    let moment = offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| format!("ambiguous local time '{at}'"))?;
    Ok(diviner.with_clock(FixedClock(moment)))
}

fn colorize_verdict(verdict: Verdict) -> ColoredString {
    if verdict.is_auspicious() {
        verdict.label().green().bold()
    } else {
        verdict.label().red().bold()
    }
}

/// `用生体 小吉`, or a dash when the reading is missing.
fn reading(analysis: Option<&FiveElementAnalysis>) -> String {
    match analysis {
        Some(a) => format!("{} {}", a.relation, colorize_verdict(a.verdict)),
        None => "-".to_string(),
    }
}
