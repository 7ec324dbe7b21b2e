//! Session metrics record — input to the status line formatter.
//!
//! Every field is optional; an absent field means "not applicable", never an
//! error. Wire names are camelCase (`inProgress`, `systemPrompts`).

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Snapshot of a single session's resource and activity counters at the
/// moment of formatting.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionMetrics {
    /// Context-window utilization.
    pub context: Option<ContextUsage>,
    /// Active model identifier.
    pub model: Option<String>,
    /// Per-tool invocation counts; document order is display order.
    pub tools: Option<OrderedMap<u64>>,
    /// Per-agent elapsed-time records; document order is display order.
    pub agents: Option<OrderedMap<AgentActivity>>,
    /// Task-queue counters.
    pub tasks: Option<TaskCounts>,
    /// Pre-formatted elapsed time, passed through verbatim.
    pub duration: Option<String>,
    /// Included system prompts; only the count is rendered.
    pub system_prompts: Option<Vec<String>>,
}

/// Context-window utilization.
///
/// `percentage` is rendered as supplied — it is not recomputed from
/// `used`/`total`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ContextUsage {
    #[serde(default)]
    pub used: u64,
    #[serde(default)]
    pub total: u64,
    pub percentage: f64,
}

/// Elapsed-time record for one sub-agent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentActivity {
    /// Elapsed seconds.
    pub elapsed: u64,
    /// Accepted on the wire but never rendered.
    #[serde(default)]
    pub description: String,
}

/// Task-queue counters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskCounts {
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub total: u64,
}

/// String-keyed map that keeps JSON document order.
///
/// Display order of tools and agents is part of the visible contract, so the
/// unordered stock map targets cannot be used for these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> OrderedMap<V> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, V)> {
        self.0.iter()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntryVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry()? {
                    entries.push(entry);
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(EntryVisitor(PhantomData))
    }
}
