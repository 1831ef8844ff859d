//! Health tips from a text-generation backend
//!
//! The contract is small: given a BMI value and its category, produce a
//! summary and three tips. Backends plug in through [`TipsProvider`] and
//! return raw text; parsing and the fallback live here so every backend
//! behaves the same when it fails.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::category::BmiCategory;
use crate::error::{Result, TipsError};

/// Number of tips a response carries
pub const TIP_COUNT: usize = 3;

const FALLBACK_SUMMARY: &str = "We couldn't generate personalized tips at this moment.";
const FALLBACK_TIPS: [&str; TIP_COUNT] = [
    "Consult with a healthcare provider for personalized advice.",
    "Maintain a balanced diet rich in whole foods.",
    "Aim for regular physical activity.",
];

/// Advisory content for one BMI result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthTips {
    pub summary: String,
    pub tips: Vec<String>,
}

impl HealthTips {
    /// Fixed payload used whenever generation fails
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            tips: FALLBACK_TIPS.iter().map(|tip| (*tip).to_string()).collect(),
        }
    }
}

/// A text-generation backend
pub trait TipsProvider {
    /// Generate raw response text for a prompt
    ///
    /// # Errors
    ///
    /// Any transport or backend failure.
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Prompt asking for a summary and three tips
#[must_use]
pub fn build_prompt(bmi: f64, category: BmiCategory) -> String {
    format!(
        "The user has a BMI of {bmi:.1}, which falls into the category: {category}.\n\
         Provide a brief, encouraging summary of what this means, and {TIP_COUNT} specific, \
         actionable, and scientific health tips to help them maintain or improve their health.\n\
         Keep the tone professional yet empathetic."
    )
}

/// Remove markdown code fences around a JSON reply
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a backend reply into tips
///
/// Blank tips are dropped and anything past the third is ignored.
///
/// # Errors
///
/// * `TipsError::EmptyResponse` - Reply is empty once fences are removed
/// * `TipsError::Parse` - Reply is not a `{summary, tips}` JSON object
/// * `TipsError::InvalidResponse` - Reply has no usable tips
pub fn parse_tips(text: &str) -> Result<HealthTips> {
    let json = strip_code_fences(text);
    if json.is_empty() {
        return Err(TipsError::EmptyResponse);
    }

    let mut parsed: HealthTips =
        serde_json::from_str(&json).map_err(|e| TipsError::Parse(e.to_string()))?;

    parsed.tips.retain(|tip| !tip.trim().is_empty());
    if parsed.tips.is_empty() {
        return Err(TipsError::InvalidResponse("no tips in response".into()));
    }
    parsed.tips.truncate(TIP_COUNT);

    Ok(parsed)
}

/// Ask a provider for tips, falling back to the fixed payload on any failure
#[must_use]
pub fn fetch_tips<P: TipsProvider + ?Sized>(
    provider: &P,
    bmi: f64,
    category: BmiCategory,
) -> HealthTips {
    let prompt = build_prompt(bmi, category);

    match provider.generate(&prompt).and_then(|text| parse_tips(&text)) {
        Ok(tips) => {
            debug!(bmi, %category, count = tips.tips.len(), "generated health tips");
            tips
        }
        Err(error) => {
            warn!(%error, bmi, %category, "falling back to default health tips");
            HealthTips::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use rstest::rstest;

    struct Canned(Result<String>);

    impl TipsProvider for Canned {
        fn generate(&self, _prompt: &str) -> Result<String> {
            self.0.clone()
        }
    }

    const REPLY: &str =
        r#"{"summary": "You are in a healthy range.", "tips": ["Walk daily", "Sleep well", "Eat fiber"]}"#;

    #[test]
    fn prompt_mentions_value_and_label() {
        assert_snapshot!(build_prompt(24.21, BmiCategory::Normal), @r"
        The user has a BMI of 24.2, which falls into the category: Normal Weight.
        Provide a brief, encouraging summary of what this means, and 3 specific, actionable, and scientific health tips to help them maintain or improve their health.
        Keep the tone professional yet empathetic.
        ");
    }

    #[rstest]
    #[case::plain(REPLY)]
    #[case::fenced("```json\n{\"summary\": \"s\", \"tips\": [\"a\"]}\n```")]
    #[case::bare_fence("```{\"summary\": \"s\", \"tips\": [\"a\"]}```")]
    fn parses_with_or_without_fences(#[case] text: &str) {
        assert!(parse_tips(text).is_ok());
    }

    #[test]
    fn parse_keeps_three_non_blank_tips() {
        let tips = parse_tips(r#"{"summary": "s", "tips": ["a", " ", "b", "c", "d"]}"#).unwrap();
        assert_eq!(tips.tips, vec!["a", "b", "c"]);
    }

    #[rstest]
    #[case::empty("", TipsError::EmptyResponse)]
    #[case::only_fences("```json\n```", TipsError::EmptyResponse)]
    #[case::no_tips(r#"{"summary": "s", "tips": []}"#, TipsError::InvalidResponse("no tips in response".into()))]
    fn parse_rejects(#[case] text: &str, #[case] expected: TipsError) {
        assert_eq!(parse_tips(text), Err(expected));
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(matches!(parse_tips("not json"), Err(TipsError::Parse(_))));
        assert!(matches!(
            parse_tips(r#"{"summary": "s"}"#),
            Err(TipsError::Parse(_))
        ));
    }

    #[test]
    fn fetch_returns_provider_tips() {
        let tips = fetch_tips(&Canned(Ok(REPLY.to_string())), 22.0, BmiCategory::Normal);
        assert_eq!(tips.summary, "You are in a healthy range.");
        assert_eq!(tips.tips.len(), TIP_COUNT);
    }

    #[rstest]
    #[case::network(Err(TipsError::Network("timed out".into())))]
    #[case::api(Err(TipsError::api(500, "internal")))]
    #[case::empty(Ok(String::new()))]
    #[case::garbage(Ok("<html>".to_string()))]
    fn fetch_falls_back_on_failure(#[case] reply: Result<String>) {
        let tips = fetch_tips(&Canned(reply), 31.4, BmiCategory::Obese);
        assert_eq!(tips, HealthTips::fallback());
        assert_eq!(tips.tips.len(), TIP_COUNT);
    }
}
