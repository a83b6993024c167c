//! Fallback policy table
//!
//! Maps each [`OperationKind`] to its deadline, fallback policy, input
//! character budget, count range and placeholder payload. The table is
//! versioned and can be overridden from a JSON file at startup; entries in
//! the file replace the built-in entries for the same kind.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{
    Component, ExtractionReport, FallbackPolicy, Flashcard, OperationKind, QuizQuestion, ResearchPaper, Video,
    WebResource, component_info,
};

use crate::error::PolicyError;
use crate::fallbacks;
use crate::input;

/// Closed range for "how many items to produce" parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBounds {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl CountBounds {
    pub const fn new(min: u32, max: u32, default: u32) -> Self {
        Self { min, max, default }
    }

    /// Requested value snapped into range; absent requests use the default
    pub fn clamp(&self, requested: Option<i64>) -> u32 {
        match requested {
            Some(value) => input::clamp_count(value, self.min, self.max),
            None => self.default,
        }
    }
}

/// Policy entry for one operation kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationPolicy {
    pub timeout_ms: u64,
    pub fallback: FallbackPolicy,
    #[serde(default)]
    pub char_budget: Option<usize>,
    #[serde(default)]
    pub count: Option<CountBounds>,
    #[serde(default)]
    pub payload: Option<Value>,
}

impl OperationPolicy {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Content substituted on degradation: `[]` for empty-list kinds
    pub fn fallback_payload(&self) -> Option<Value> {
        match self.fallback {
            FallbackPolicy::Fail => None,
            FallbackPolicy::EmptyList => Some(Value::Array(Vec::new())),
            FallbackPolicy::StaticPayload => self.payload.clone(),
        }
    }

    fn validate(&self, kind: OperationKind) -> Result<(), PolicyError> {
        let invalid = |reason: &str| PolicyError::InvalidEntry { kind, reason: reason.to_string() };

        if self.timeout_ms == 0 {
            return Err(invalid("timeout must be positive"));
        }
        if self.char_budget == Some(0) {
            return Err(invalid("character budget must be positive"));
        }
        if let Some(bounds) = &self.count {
            if bounds.min > bounds.max {
                return Err(invalid("count min exceeds max"));
            }
            if bounds.default < bounds.min || bounds.default > bounds.max {
                return Err(invalid("count default lies outside [min, max]"));
            }
        }
        match self.fallback {
            FallbackPolicy::Fail => {}
            FallbackPolicy::EmptyList if !produces_list(kind) => {
                return Err(invalid("empty_list policy requires a list-valued operation"));
            }
            FallbackPolicy::EmptyList => {}
            FallbackPolicy::StaticPayload => {
                let payload = self
                    .payload
                    .as_ref()
                    .ok_or_else(|| invalid("static_payload policy requires a payload"))?;
                check_payload_shape(kind, payload)
                    .map_err(|e| invalid(&format!("payload does not match the operation result: {e}")))?;
            }
        }
        Ok(())
    }
}

fn produces_list(kind: OperationKind) -> bool {
    !matches!(kind, OperationKind::Upload | OperationKind::Summary | OperationKind::QuestionAnswer)
}

/// Decode the payload as the kind's result type
fn check_payload_shape(kind: OperationKind, payload: &Value) -> Result<(), serde_json::Error> {
    fn decodes<T: serde::de::DeserializeOwned>(payload: &Value) -> Result<(), serde_json::Error> {
        T::deserialize(payload).map(|_| ())
    }

    match kind {
        OperationKind::Upload => decodes::<ExtractionReport>(payload),
        OperationKind::Summary | OperationKind::QuestionAnswer => decodes::<String>(payload),
        OperationKind::Flashcards => decodes::<Vec<Flashcard>>(payload),
        OperationKind::Quiz => decodes::<Vec<QuizQuestion>>(payload),
        OperationKind::ResearchPapers => decodes::<Vec<ResearchPaper>>(payload),
        OperationKind::Videos => decodes::<Vec<Video>>(payload),
        OperationKind::WebResources => decodes::<Vec<WebResource>>(payload),
    }
}

/// Kinds missing from a table are treated as fail-fast with a one minute deadline
static FAIL_SAFE: OperationPolicy = OperationPolicy {
    timeout_ms: 60_000,
    fallback: FallbackPolicy::Fail,
    char_budget: None,
    count: None,
    payload: None,
};

/// Versioned mapping from operation kind to policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyTable {
    pub version: u32,
    /// Sub-deadline for the keyword step of discovery operations
    pub keyword_timeout_ms: u64,
    pub truncation_marker: String,
    pub operations: BTreeMap<OperationKind, OperationPolicy>,
}

/// Partial table as read from a policy file
#[derive(Debug, Deserialize)]
struct PolicyOverlay {
    version: Option<u32>,
    keyword_timeout_ms: Option<u64>,
    truncation_marker: Option<String>,
    #[serde(default)]
    operations: BTreeMap<OperationKind, OperationPolicy>,
}

impl Default for PolicyTable {
    fn default() -> Self {
        fallbacks::default_table()
    }
}

impl PolicyTable {
    /// Built-in table overlaid with the entries of a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, PolicyError> {
        let overlay: PolicyOverlay = serde_json::from_str(json)?;
        let mut table = Self::default();

        if let Some(version) = overlay.version {
            table.version = version;
        }
        if let Some(timeout) = overlay.keyword_timeout_ms {
            table.keyword_timeout_ms = timeout;
        }
        if let Some(marker) = overlay.truncation_marker {
            table.truncation_marker = marker;
        }
        table.operations.extend(overlay.operations);

        table.validate()?;
        Ok(table)
    }

    /// Load and validate a policy file
    pub fn load_file(path: &Path) -> Result<Self, PolicyError> {
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&json)?;
        component_info!(
            Component::Orchestrator,
            path = %path.display(),
            version = table.version,
            "📋 Loaded policy table"
        );
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.keyword_timeout_ms == 0 {
            return Err(PolicyError::InvalidTable {
                reason: "keyword timeout must be positive".to_string(),
            });
        }
        for kind in OperationKind::ALL {
            let policy = self
                .operations
                .get(&kind)
                .ok_or(PolicyError::MissingEntry { kind })?;
            policy.validate(kind)?;
        }
        Ok(())
    }

    pub fn policy(&self, kind: OperationKind) -> &OperationPolicy {
        self.operations.get(&kind).unwrap_or(&FAIL_SAFE)
    }

    pub fn timeout(&self, kind: OperationKind) -> Duration {
        self.policy(kind).timeout()
    }

    pub fn keyword_timeout(&self) -> Duration {
        Duration::from_millis(self.keyword_timeout_ms)
    }

    /// Truncate text to the kind's character budget before it reaches a collaborator
    pub fn prepare_text<'a>(&self, kind: OperationKind, text: &'a str) -> Cow<'a, str> {
        let Some(budget) = self.policy(kind).char_budget else {
            return Cow::Borrowed(text);
        };
        let prepared = input::truncate_chars(text, budget, &self.truncation_marker);
        if let Cow::Owned(_) = prepared {
            component_info!(
                Component::Orchestrator,
                kind = %kind,
                budget,
                "✂️ Text truncated to {} characters for {}",
                budget,
                kind
            );
        }
        prepared
    }

    /// Clamp a requested item count into the kind's range
    pub fn clamp_count(&self, kind: OperationKind, requested: Option<i64>) -> u32 {
        let Some(bounds) = self.policy(kind).count else {
            return requested.map(|value| value.clamp(0, i64::from(u32::MAX)) as u32).unwrap_or(0);
        };
        let effective = bounds.clamp(requested);
        if let Some(value) = requested {
            if i64::from(effective) != value {
                component_info!(
                    Component::Orchestrator,
                    kind = %kind,
                    requested = value,
                    effective,
                    "🔧 Adjusted {} count to {}",
                    kind,
                    effective
                );
            }
        }
        effective
    }

    /// Builder-style override of one kind's deadline
    pub fn with_timeout(mut self, kind: OperationKind, timeout: Duration) -> Self {
        let millis = timeout.as_millis().max(1) as u64;
        self.operations
            .entry(kind)
            .or_insert_with(|| FAIL_SAFE.clone())
            .timeout_ms = millis;
        self
    }

    /// Builder-style override of the discovery keyword sub-deadline
    pub fn with_keyword_timeout(mut self, timeout: Duration) -> Self {
        self.keyword_timeout_ms = timeout.as_millis().max(1) as u64;
        self
    }
}
