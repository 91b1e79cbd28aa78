//! Flat, serializable record of a divination.
//!
//! Field names follow the keys chat front ends already consume
//! (`ben_gua`, `hu_gua`, ...). Every field is optional so a partial record
//! can be deserialized and rejected field by field by the formatter.

use serde::{Deserialize, Serialize};

use mh_core::FiveElementAnalysis;
use mh_oracle::DivinationResult;

/// Text-only view of a [`DivinationResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivinationSummary {
    /// 本卦 name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ben_gua: Option<String>,
    /// Seasonal strength of the five elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wang_shuai: Option<String>,
    /// Host/guest relation of the primary hexagram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ben_gua_sheng_ke: Option<String>,
    /// Verdict of the primary hexagram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ben_gua_ji_xiong: Option<String>,
    /// Direction of the primary upper trigram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fang_wei: Option<String>,
    /// 互卦 label, e.g. `互见坤震(地雷复)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hu_gua: Option<String>,
    /// 变卦 name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bian_gua: Option<String>,
    /// Host/guest relation of the mutated hexagram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bian_gua_sheng_ke: Option<String>,
    /// Verdict of the mutated hexagram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bian_gua_ji_xiong: Option<String>,
    /// Moving line position name, e.g. `五`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dong_yao: Option<String>,
    /// Response timing number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ying_qi: Option<u32>,
    /// Local time and shichen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shichen_info: Option<String>,
    /// Four pillars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ganzhi: Option<String>,
}

impl From<&DivinationResult> for DivinationSummary {
    fn from(r: &DivinationResult) -> Self {
        let relation = |a: &Option<FiveElementAnalysis>| a.as_ref().map(|a| a.relation.to_string());
        let verdict = |a: &Option<FiveElementAnalysis>| a.as_ref().map(|a| a.verdict.to_string());
        Self {
            ben_gua: Some(r.primary.name.to_string()),
            wang_shuai: r.primary_analysis.as_ref().map(|a| a.strength_summary()),
            ben_gua_sheng_ke: relation(&r.primary_analysis),
            ben_gua_ji_xiong: verdict(&r.primary_analysis),
            fang_wei: Some(r.direction.to_string()),
            hu_gua: Some(r.nuclear_label()),
            bian_gua: Some(r.mutated.name.to_string()),
            bian_gua_sheng_ke: relation(&r.mutated_analysis),
            bian_gua_ji_xiong: verdict(&r.mutated_analysis),
            dong_yao: Some(r.moving_line_label().to_string()),
            ying_qi: Some(r.response_timing),
            shichen_info: Some(r.time_label()),
            ganzhi: Some(r.ganzhi_label()),
        }
    }
}
