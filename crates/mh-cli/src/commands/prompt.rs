use mh_prompt::{DivinationSummary, OUT_OF_RANGE_MESSAGE, build_interpretation_prompt};

pub fn run(text: &str, at: Option<&str>, seed: Option<u64>, utc_offset: i32) -> Result<(), String> {
    let mut diviner = super::build_diviner(at, seed, utc_offset)?;
    let consultation = diviner.consult(text);
    let result = consultation
        .result
        .as_ref()
        .ok_or_else(|| OUT_OF_RANGE_MESSAGE.to_string())?;

    let summary = DivinationSummary::from(result);
    let prompt = build_interpretation_prompt(&summary, &consultation.extraction.question)
        .map_err(|e| e.to_string())?;
    println!("{prompt}");
    Ok(())
}
