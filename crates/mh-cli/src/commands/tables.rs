use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use mh_core::{Hexagram, TRIGRAMS, Trigram, hexagram_name};

pub fn trigrams() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "卦", "象", "爻 (下→上)", "五行", "方位"]);

    for t in &TRIGRAMS {
        let lines = t
            .lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        table.add_row(vec![
            t.number.to_string(),
            t.name.to_string(),
            t.nature.to_string(),
            lines,
            t.element.to_string(),
            t.direction.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

pub fn hexagrams(name: Option<&str>) -> Result<(), String> {
    if let Some(name) = name {
        return show_hexagram(name);
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["上 \\ 下".to_string()];
    header.extend(TRIGRAMS.iter().map(|t| t.name.to_string()));
    table.set_header(header);

    for upper in &TRIGRAMS {
        let mut row = vec![upper.name.to_string()];
        row.extend(TRIGRAMS.iter().map(|lower| {
            hexagram_name(u32::from(upper.number), u32::from(lower.number)).to_string()
        }));
        table.add_row(row);
    }

    println!("{table}");
    println!();
    println!("  64 hexagrams");
    Ok(())
}

fn show_hexagram(name: &str) -> Result<(), String> {
    let hexagram =
        Hexagram::by_name(name.trim()).ok_or_else(|| format!("unknown hexagram '{name}'"))?;
    let trigram = |t: Option<&Trigram>| {
        t.map_or_else(
            || "?".to_string(),
            |t| format!("{}{} ({}, {})", t.name, t.nature, t.element, t.direction),
        )
    };

    println!("  {}", hexagram.name.bold());
    println!("  上卦 {}", trigram(hexagram.upper_trigram()));
    println!("  下卦 {}", trigram(hexagram.lower_trigram()));
    println!("  互卦 {}", hexagram.nuclear().name);
    println!();
    for line in hexagram.render().lines() {
        println!("  {line}");
    }
    Ok(())
}
