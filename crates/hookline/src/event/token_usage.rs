//! Integer view over the opaque `token-usage` value.

use serde_json::Value;

use super::ModelResponseCompleted;
use crate::coerce;
use crate::keys::NormalizedKeys;

/// Token counts reported with a completed model response.
///
/// Each count is coerced independently; a count the emitter omitted or sent in
/// an unusable form is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    /// Prompt tokens.
    pub input_tokens: Option<i64>,
    /// Prompt tokens served from the cache.
    pub cached_input_tokens: Option<i64>,
    /// Completion tokens.
    pub output_tokens: Option<i64>,
    /// Completion tokens spent on reasoning.
    pub reasoning_output_tokens: Option<i64>,
    /// Total tokens billed.
    pub total_tokens: Option<i64>,
}

impl TokenUsage {
    /// Reads token counts from a JSON object in either key spelling.
    ///
    /// Returns `None` when `value` is not an object.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let keys = NormalizedKeys::new(object);
        let count = |key: &str| keys.get(key).and_then(coerce::integer);
        Some(Self {
            input_tokens: count("input-tokens"),
            cached_input_tokens: count("cached-input-tokens"),
            output_tokens: count("output-tokens"),
            reasoning_output_tokens: count("reasoning-output-tokens"),
            total_tokens: count("total-tokens"),
        })
    }
}

impl ModelResponseCompleted {
    /// Returns the token counts, when `token-usage` is an object.
    #[must_use]
    pub fn token_usage_counts(&self) -> Option<TokenUsage> {
        self.token_usage().and_then(TokenUsage::from_value)
    }
}
