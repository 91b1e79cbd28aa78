use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use mh_core::{HostSide, Trigram, analyze};

pub fn run(upper: u32, lower: u32, host: &str, month: u32, json: bool) -> Result<(), String> {
    let host_side =
        HostSide::parse(host).ok_or_else(|| format!("invalid host '{host}' (use upper or lower)"))?;
    let analysis = analyze(upper, lower, host_side, month).map_err(|e| e.to_string())?;

    if json {
        let pretty = serde_json::to_string_pretty(&analysis).map_err(|e| e.to_string())?;
        println!("{pretty}");
        return Ok(());
    }

    let upper_t = Trigram::by_number(upper).map_err(|e| e.to_string())?;
    let lower_t = Trigram::by_number(lower).map_err(|e| e.to_string())?;
    println!(
        "  {} {}{} (上{} 下{}), {}",
        "卦".bold(),
        upper_t.nature,
        lower_t.nature,
        upper_t.name,
        lower_t.name,
        host_side
    );
    println!(
        "  {} 农历{}月, {}当令",
        "月令".bold(),
        month,
        analysis.season.governing
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "五行", "旺衰", "当令后", "生克后"]);
    table.add_row(vec![
        "体".to_string(),
        analysis.host.to_string(),
        analysis.host_state.to_string(),
        analysis.trace.seasonal.0.to_string(),
        analysis.trace.related.0.to_string(),
    ]);
    table.add_row(vec![
        "用".to_string(),
        analysis.guest.to_string(),
        analysis.guest_state.to_string(),
        analysis.trace.seasonal.1.to_string(),
        analysis.trace.related.1.to_string(),
    ]);
    println!("{table}");
    println!();

    println!("  {} {}", "旺衰".bold(), analysis.strength_summary());
    println!("  {} {}", "生克".bold(), analysis.relation);
    println!(
        "  {} {}",
        "吉凶".bold(),
        super::colorize_verdict(analysis.verdict)
    );
    Ok(())
}
