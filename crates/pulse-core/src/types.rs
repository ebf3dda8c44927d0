//! Shared types for pulse-core.
//!
//! Units of work, their lifecycle states, and the typed insight payloads the
//! orchestrator stores once a fetch succeeds.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Units of Work
// ─────────────────────────────────────────────────────────────────────────────

/// Identifier of the single global briefing unit.
pub const BRIEFING_ID: &str = "briefing";

/// Kind of a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Briefing,
    Region,
}

/// One addressable fetch target: the global briefing or a single region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitId {
    Briefing,
    Region(String),
}

impl UnitId {
    /// Unit id for a region code.
    pub fn region(code: impl Into<String>) -> Self {
        UnitId::Region(code.into())
    }

    /// Stable string id (`briefing` or the region code).
    pub fn id(&self) -> &str {
        match self {
            UnitId::Briefing => BRIEFING_ID,
            UnitId::Region(code) => code,
        }
    }

    pub fn kind(&self) -> UnitKind {
        match self {
            UnitId::Briefing => UnitKind::Briefing,
            UnitId::Region(_) => UnitKind::Region,
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for UnitId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────────────────────────

/// Status of a unit's most recent fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Never fetched.
    #[default]
    Idle,
    /// Fetch in flight.
    Loading,
    /// Last fetch succeeded and its result is stored.
    Done,
    /// Last fetch failed; any earlier result is kept.
    Error,
}

impl LifecycleState {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Loading => "loading",
            LifecycleState::Done => "done",
            LifecycleState::Error => "error",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Insight Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Market sentiment reported for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }
}

/// Global market briefing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BriefingInsight {
    pub summary: String,
    /// Object exactly as returned by the service, extra fields included.
    pub raw: Value,
}

impl BriefingInsight {
    /// Build from a service payload. Requires a non-empty `summary` string.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let summary = non_empty_str(payload, "summary")?;
        Some(Self {
            summary,
            raw: payload.clone(),
        })
    }
}

/// Per-region market insight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionInsight {
    pub remark: String,
    pub sentiment: Option<Sentiment>,
    pub market_size: Option<String>,
    pub growth: Option<String>,
    /// Object exactly as returned by the service, extra fields included.
    pub raw: Value,
}

impl RegionInsight {
    /// Build from a service payload.
    ///
    /// Only `remark` is required. The remaining fields are kept when present;
    /// an unrecognised sentiment decodes to `None`, numeric sizes and growth
    /// figures are rendered as text.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let remark = non_empty_str(payload, "remark")?;
        let sentiment = payload
            .get("sentiment")
            .and_then(Value::as_str)
            .and_then(Sentiment::from_str);

        Some(Self {
            remark,
            sentiment,
            market_size: scalar_text(payload, "market_size"),
            growth: scalar_text(payload, "growth"),
            raw: payload.clone(),
        })
    }
}

/// Stored result for a unit. Replaced wholesale on each successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InsightResult {
    Briefing(BriefingInsight),
    Region(RegionInsight),
}

impl InsightResult {
    /// The payload as originally returned by the service.
    pub fn raw(&self) -> &Value {
        match self {
            InsightResult::Briefing(b) => &b.raw,
            InsightResult::Region(r) => &r.raw,
        }
    }

    pub fn as_briefing(&self) -> Option<&BriefingInsight> {
        match self {
            InsightResult::Briefing(b) => Some(b),
            InsightResult::Region(_) => None,
        }
    }

    pub fn as_region(&self) -> Option<&RegionInsight> {
        match self {
            InsightResult::Region(r) => Some(r),
            InsightResult::Briefing(_) => None,
        }
    }
}

fn non_empty_str(payload: &Value, field: &str) -> Option<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

fn scalar_text(payload: &Value, field: &str) -> Option<String> {
    match payload.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_id_conversion() {
        assert_eq!(UnitId::Briefing.id(), "briefing");
        assert_eq!(UnitId::Briefing.kind(), UnitKind::Briefing);
        assert_eq!(UnitId::region("spain").id(), "spain");
        assert_eq!(UnitId::region("spain").kind(), UnitKind::Region);
        assert_eq!(UnitId::region("italy").to_string(), "italy");
    }

    #[test]
    fn test_lifecycle_default_is_idle() {
        assert_eq!(LifecycleState::default(), LifecycleState::Idle);
        assert_eq!(LifecycleState::Error.to_string(), "error");
    }

    #[test]
    fn test_sentiment_conversion() {
        assert_eq!(Sentiment::from_str("positive"), Some(Sentiment::Positive));
        assert_eq!(Sentiment::from_str(" NEGATIVE "), Some(Sentiment::Negative));
        assert_eq!(Sentiment::from_str("bullish"), None);
        assert_eq!(Sentiment::Neutral.as_str(), "neutral");
    }

    #[test]
    fn test_briefing_requires_summary() {
        let ok = BriefingInsight::from_payload(&json!({"summary": "Prices up 2%."})).unwrap();
        assert_eq!(ok.summary, "Prices up 2%.");
        assert_eq!(ok.raw, json!({"summary": "Prices up 2%."}));

        assert!(BriefingInsight::from_payload(&json!({"summary": ""})).is_none());
        assert!(BriefingInsight::from_payload(&json!({"summary": "   "})).is_none());
        assert!(BriefingInsight::from_payload(&json!({"summary": 42})).is_none());
        assert!(BriefingInsight::from_payload(&json!({"text": "x"})).is_none());
        assert!(BriefingInsight::from_payload(&json!(["summary"])).is_none());
    }

    #[test]
    fn test_region_requires_only_remark() {
        let full = json!({
            "remark": "Functional drinks lead growth.",
            "sentiment": "positive",
            "market_size": "$250B",
            "growth": "+4.1%",
            "extra": true
        });
        let insight = RegionInsight::from_payload(&full).unwrap();
        assert_eq!(insight.remark, "Functional drinks lead growth.");
        assert_eq!(insight.sentiment, Some(Sentiment::Positive));
        assert_eq!(insight.market_size.as_deref(), Some("$250B"));
        assert_eq!(insight.growth.as_deref(), Some("+4.1%"));
        assert_eq!(insight.raw, full);

        let sparse = RegionInsight::from_payload(&json!({"remark": "x", "sentiment": "meh"})).unwrap();
        assert_eq!(sparse.sentiment, None);
        assert_eq!(sparse.market_size, None);

        assert!(RegionInsight::from_payload(&json!({"sentiment": "positive"})).is_none());
    }

    #[test]
    fn test_region_numeric_fields_become_text() {
        let insight =
            RegionInsight::from_payload(&json!({"remark": "x", "market_size": 12.5, "growth": 3}))
                .unwrap();
        assert_eq!(insight.market_size.as_deref(), Some("12.5"));
        assert_eq!(insight.growth.as_deref(), Some("3"));
    }

    #[test]
    fn test_insight_result_accessors() {
        let result = InsightResult::Briefing(
            BriefingInsight::from_payload(&json!({"summary": "s"})).unwrap(),
        );
        assert!(result.as_briefing().is_some());
        assert!(result.as_region().is_none());
        assert_eq!(result.raw(), &json!({"summary": "s"}));
    }

    #[test]
    fn test_region_serializes_raw_payload() {
        let payload = json!({"remark": "x", "sentiment": "positive", "sources": ["a", "b"]});
        let result = InsightResult::Region(RegionInsight::from_payload(&payload).unwrap());

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["remark"], "x");
        assert_eq!(value["sentiment"], "positive");
        assert_eq!(value["raw"], payload);
    }
}
