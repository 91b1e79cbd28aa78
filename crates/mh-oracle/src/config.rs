//! Configuration for a divination service.

/// Keywords that mark a chat message as a divination request.
pub const DEFAULT_REQUEST_KEYWORDS: &[&str] = &[
    "算卦",
    "占卜",
    "卜卦",
    "起卦",
    "梅花易数",
    "算一卦",
    "测一卦",
];

/// Configuration for a [`Diviner`](crate::Diviner).
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Offset of the divination time zone from UTC, in hours (-12 to 14).
    pub utc_offset_hours: i32,
    /// RNG seed for reproducible fallback numbers. `None` uses the clock.
    pub seed: Option<u64>,
    /// Keywords that route a message to the engine.
    pub request_keywords: Vec<String>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: 8,
            seed: None,
            request_keywords: DEFAULT_REQUEST_KEYWORDS
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
        }
    }
}

impl OracleConfig {
    /// Set the UTC offset (clamped to -12..=14).
    pub fn with_utc_offset(mut self, hours: i32) -> Self {
        self.utc_offset_hours = hours.clamp(-12, 14);
        self
    }

    /// Seed the fallback number generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the request keywords. Blank entries are dropped.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request_keywords = keywords
            .into_iter()
            .map(Into::into)
            .filter(|k: &String| !k.trim().is_empty())
            .collect();
        self
    }
}
