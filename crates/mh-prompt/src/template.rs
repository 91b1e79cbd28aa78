//! Text templates: the interpretation prompt and the final chat reply.

use crate::error::{PromptError, PromptResult};
use crate::summary::DivinationSummary;

/// Longest interpretation, in characters, the prompt asks for.
pub const INTERPRETATION_CHAR_LIMIT: usize = 150;

/// Reply sent when the divination number is outside `[100, 999]`.
pub const OUT_OF_RANGE_MESSAGE: &str =
    "输入的数字不在指定范围内，请提供一个介于100到999之间的数字。";

/// Notice prepended to the reply when the number was machine-generated.
pub fn random_number_disclosure(number: u32) -> String {
    format!(
        "卜卦要准确提供3个数字哦，不然会影响准确率哒,下次别忘咯~\n这次我就先用随机数{number}帮你起卦叭~\n"
    )
}

fn require<'a>(value: &'a Option<String>, field: &'static str) -> PromptResult<&'a str> {
    value
        .as_deref()
        .ok_or(PromptError::ContractViolation { field })
}

fn require_number(value: Option<u32>, field: &'static str) -> PromptResult<u32> {
    value.ok_or(PromptError::ContractViolation { field })
}

/// Build the LLM instruction prompt for `question`.
///
/// Needs `ben_gua`, `hu_gua`, `bian_gua` and `dong_yao`; the remaining
/// fields are included when present.
pub fn build_interpretation_prompt(
    summary: &DivinationSummary,
    question: &str,
) -> PromptResult<String> {
    let ben_gua = require(&summary.ben_gua, "ben_gua")?;
    let hu_gua = require(&summary.hu_gua, "hu_gua")?;
    let bian_gua = require(&summary.bian_gua, "bian_gua")?;
    let dong_yao = require(&summary.dong_yao, "dong_yao")?;

    let mut prompt = String::from("你是一位精通梅花易数的占卜师。\n");
    if question.trim().is_empty() {
        prompt.push_str("求卦者没有说明具体问题，请解读整体运势。\n");
    } else {
        prompt.push_str(&format!("求卦者的问题：{question}\n"));
    }

    prompt.push_str("卦象如下：\n");
    if let Some(time) = &summary.shichen_info {
        prompt.push_str(&format!("起卦时间：{time}\n"));
    }
    if let Some(ganzhi) = &summary.ganzhi {
        prompt.push_str(&format!("干支：{ganzhi}\n"));
    }
    if let Some(strength) = &summary.wang_shuai {
        prompt.push_str(&format!("五行旺衰：{strength}\n"));
    }
    prompt.push_str(&format!(
        "本卦：{ben_gua}{}\n",
        reading(&summary.ben_gua_sheng_ke, &summary.ben_gua_ji_xiong)
    ));
    prompt.push_str(&format!("互卦：{hu_gua}\n"));
    prompt.push_str(&format!(
        "变卦：{bian_gua}{}\n",
        reading(&summary.bian_gua_sheng_ke, &summary.bian_gua_ji_xiong)
    ));
    prompt.push_str(&format!("动爻：{dong_yao}爻\n"));
    if let Some(direction) = &summary.fang_wei {
        prompt.push_str(&format!("方位：{direction}\n"));
    }
    if let Some(timing) = summary.ying_qi {
        prompt.push_str(&format!("应期数：{timing}\n"));
    }

    prompt.push_str(&format!(
        "请结合体用生克与卦象，用不超过{INTERPRETATION_CHAR_LIMIT}个汉字给出解读，语气温和，直接给出结论与建议。"
    ));
    Ok(prompt)
}

fn reading(relation: &Option<String>, verdict: &Option<String>) -> String {
    match (relation, verdict) {
        (Some(r), Some(v)) => format!("，{r}，{v}"),
        (Some(r), None) => format!("，{r}"),
        (None, Some(v)) => format!("，{v}"),
        (None, None) => String::new(),
    }
}

/// Assemble the reply shown to the user.
///
/// Every summary field except `ganzhi` is required.
pub fn format_final_reply(
    disclosure: &str,
    question: &str,
    number: u32,
    summary: &DivinationSummary,
    interpretation: &str,
) -> PromptResult<String> {
    let time = require(&summary.shichen_info, "shichen_info")?;
    let strength = require(&summary.wang_shuai, "wang_shuai")?;
    let ben_gua = require(&summary.ben_gua, "ben_gua")?;
    let ben_relation = require(&summary.ben_gua_sheng_ke, "ben_gua_sheng_ke")?;
    let ben_verdict = require(&summary.ben_gua_ji_xiong, "ben_gua_ji_xiong")?;
    let direction = require(&summary.fang_wei, "fang_wei")?;
    let hu_gua = require(&summary.hu_gua, "hu_gua")?;
    let dong_yao = require(&summary.dong_yao, "dong_yao")?;
    let bian_gua = require(&summary.bian_gua, "bian_gua")?;
    let bian_relation = require(&summary.bian_gua_sheng_ke, "bian_gua_sheng_ke")?;
    let bian_verdict = require(&summary.bian_gua_ji_xiong, "bian_gua_ji_xiong")?;
    let timing = require_number(summary.ying_qi, "ying_qi")?;

    let mut reply = String::from(disclosure);
    if !question.is_empty() {
        reply.push_str(&format!("所问之事：{question}\n"));
    }
    reply.push_str(&format!("报数：{number}\n"));
    reply.push_str(&format!("时间：{time}\n"));
    if let Some(ganzhi) = &summary.ganzhi {
        reply.push_str(&format!("干支：{ganzhi}\n"));
    }
    reply.push_str(&format!("旺衰：{strength}\n"));
    reply.push_str(&format!("本卦：{ben_gua}，{ben_relation}，{ben_verdict}\n"));
    reply.push_str(&format!("方位：{direction}\n"));
    reply.push_str(&format!("互卦：{hu_gua}\n"));
    reply.push_str(&format!("动爻：{dong_yao}爻\n"));
    reply.push_str(&format!("变卦：{bian_gua}，{bian_relation}，{bian_verdict}\n"));
    reply.push_str(&format!("应期：{timing}\n"));
    reply.push_str(&format!("\n{}", interpretation.trim()));
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn reference() -> DivinationSummary {
        let now = DateTime::parse_from_rfc3339("2024-10-30T10:00:00+08:00").unwrap();
        DivinationSummary::from(&mh_oracle::divine(746, now).unwrap())
    }

    #[test]
    fn prompt_embeds_question_and_result() {
        let prompt = build_interpretation_prompt(&reference(), "财运如何").unwrap();
        assert!(prompt.contains("财运如何"));
        assert!(prompt.contains("本卦：山泽损，用生体，小吉"));
        assert!(prompt.contains("互卦：互见坤震(地雷复)"));
        assert!(prompt.contains("变卦：山雷颐，体克用，小凶"));
        assert!(prompt.contains("动爻：五爻"));
        assert!(prompt.contains("150"));
    }

    #[test]
    fn prompt_without_question() {
        let prompt = build_interpretation_prompt(&reference(), "  ").unwrap();
        assert!(prompt.contains("整体运势"));
    }

    #[test]
    fn prompt_rejects_missing_primary() {
        let mut summary = reference();
        summary.ben_gua = None;
        assert_eq!(
            build_interpretation_prompt(&summary, "财运如何"),
            Err(PromptError::ContractViolation { field: "ben_gua" })
        );
    }

    #[test]
    fn reply_layout() {
        let reply =
            format_final_reply("", "财运如何", 746, &reference(), " 先损后益。 ").unwrap();
        let lines: Vec<&str> = reply.lines().collect();
        assert_eq!(lines[0], "所问之事：财运如何");
        assert_eq!(lines[1], "报数：746");
        assert_eq!(lines[2], "时间：2024-10-30 10:00:00 巳时");
        assert!(reply.contains("旺衰：木囚，火休，土旺，金相，水死"));
        assert!(reply.contains("方位：东北"));
        assert!(reply.contains("应期：14"));
        assert!(reply.ends_with("\n先损后益。"));
    }

    #[test]
    fn reply_rejects_missing_primary() {
        let mut summary = reference();
        summary.ben_gua = None;
        assert_eq!(
            format_final_reply("", "财运如何", 746, &summary, "x"),
            Err(PromptError::ContractViolation { field: "ben_gua" })
        );
    }

    #[test]
    fn reply_with_disclosure() {
        let disclosure = random_number_disclosure(746);
        let reply = format_final_reply(&disclosure, "", 746, &reference(), "吉").unwrap();
        assert!(reply.starts_with("卜卦要准确提供3个数字哦"));
        assert!(reply.contains("随机数746"));
        assert!(!reply.contains("所问之事"));
    }

    #[test]
    fn reply_rejects_missing_fields() {
        let mut summary = reference();
        summary.ying_qi = None;
        assert_eq!(
            format_final_reply("", "q", 746, &summary, "x"),
            Err(PromptError::ContractViolation { field: "ying_qi" })
        );
        assert_eq!(
            format_final_reply("", "q", 746, &DivinationSummary::default(), "x"),
            Err(PromptError::ContractViolation { field: "shichen_info" })
        );
    }
}
