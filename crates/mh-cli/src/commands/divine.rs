use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use mh_core::{FiveElementAnalysis, Hexagram};
use mh_prompt::{DivinationSummary, OUT_OF_RANGE_MESSAGE, random_number_disclosure};

pub fn run(
    text: &str,
    at: Option<&str>,
    seed: Option<u64>,
    utc_offset: i32,
    json: bool,
) -> Result<(), String> {
    let mut diviner = super::build_diviner(at, seed, utc_offset)?;
    let consultation = diviner.consult(text);
    let extraction = &consultation.extraction;
    let result = consultation
        .result
        .as_ref()
        .ok_or_else(|| OUT_OF_RANGE_MESSAGE.to_string())?;

    if json {
        let out = serde_json::json!({
            "number": extraction.number,
            "question": extraction.question,
            "was_random": extraction.was_random,
            "summary": DivinationSummary::from(result),
            "result": result,
        });
        let pretty = serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?;
        println!("{pretty}");
        return Ok(());
    }

    if extraction.was_random {
        print!("{}", random_number_disclosure(extraction.number).yellow());
    }

    println!("  {} {}", "报数".bold(), result.number);
    if !extraction.question.is_empty() {
        println!("  {} {}", "问题".bold(), extraction.question);
    }
    println!("  {} {}", "时间".bold(), result.time_label());
    println!("  {} {}", "干支".bold(), result.ganzhi_label().dimmed());
    if let Some(analysis) = &result.primary_analysis {
        println!("  {} {}", "旺衰".bold(), analysis.strength_summary());
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "卦名", "卦象", "体用 / 吉凶"]);
    table.add_row(vec![
        "本卦".to_string(),
        result.primary.name.to_string(),
        result.primary.render(),
        super::reading(result.primary_analysis.as_ref()),
    ]);
    table.add_row(vec![
        "互卦".to_string(),
        result.nuclear_label(),
        result.nuclear.render(),
        "-".to_string(),
    ]);
    table.add_row(vec![
        "变卦".to_string(),
        result.mutated.name.to_string(),
        result.mutated.render(),
        super::reading(result.mutated_analysis.as_ref()),
    ]);
    println!("{table}");
    println!();

    println!(
        "  {} {}爻  {} {}",
        "动爻".bold(),
        result.moving_line_label(),
        "体用".bold(),
        result.host_side
    );
    if let Some(analysis) = &result.primary_analysis {
        println!("  {}", host_guest_line(&result.primary, analysis));
    }
    println!(
        "  {} {}  {} {}",
        "方位".bold(),
        result.direction,
        "应期".bold(),
        result.response_timing
    );

    Ok(())
}

/// `体 兑(金) 17 / 用 艮(土) 12`
fn host_guest_line(primary: &Hexagram, analysis: &FiveElementAnalysis) -> String {
    let (host, guest) = match analysis.host_side {
        mh_core::HostSide::Upper => (primary.upper_trigram(), primary.lower_trigram()),
        mh_core::HostSide::Lower => (primary.lower_trigram(), primary.upper_trigram()),
    };
    let name = |t: Option<&mh_core::Trigram>| t.map_or("?", |t| t.name);
    format!(
        "体 {}({}) {} / 用 {}({}) {}",
        name(host),
        analysis.host,
        analysis.host_qi(),
        name(guest),
        analysis.guest,
        analysis.guest_qi()
    )
}
