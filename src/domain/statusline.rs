//! One-line status formatter — pure, total, never fails.
//!
//! Condenses session metrics into a compact display line, hiding empty
//! values. Every branch degrades to "omit the segment"; there is no error
//! path. No I/O, no async, no shared state.

use serde::Serialize;

use crate::domain::metrics::{
    AgentActivity, ContextUsage, OrderedMap, SessionMetrics, TaskCounts,
};

/// Leading marker on every rendered line.
pub const LINE_PREFIX: &str = "📊";

/// Context indicator at or below the caution threshold.
pub const INDICATOR_HEALTHY: &str = "🟢";
/// Context indicator above 60%.
pub const INDICATOR_CAUTION: &str = "🟡";
/// Context indicator above 85%.
pub const INDICATOR_ALERT: &str = "🔴";

/// Rendered status line plus its constituent segments.
///
/// `parts` is exposed for callers that need the individual segments (e.g.
/// truncation to a width budget); `line` is the display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedStatus {
    pub line: String,
    pub parts: Vec<String>,
}

/// Select the severity indicator for a context percentage.
///
/// Thresholds are strict: 60 and 85 themselves fall into the lower band.
#[must_use]
pub fn context_indicator(percentage: f64) -> &'static str {
    if percentage > 85.0 {
        INDICATOR_ALERT
    } else if percentage > 60.0 {
        INDICATOR_CAUTION
    } else {
        INDICATOR_HEALTHY
    }
}

fn context_segment(context: &ContextUsage) -> String {
    // Raw percentage, never recomputed from used/total.
    format!(
        "{} {}%",
        context_indicator(context.percentage),
        context.percentage
    )
}

fn model_segment(model: &str) -> Option<String> {
    if model.is_empty() {
        None
    } else {
        Some(format!("Model: {model}"))
    }
}

fn tools_segment(tools: &OrderedMap<u64>) -> Option<String> {
    if tools.is_empty() {
        return None;
    }
    let joined = tools
        .iter()
        .map(|(name, count)| format!("{name}×{count}"))
        .collect::<Vec<_>>()
        .join(" ");
    Some(format!("Tools: {joined}"))
}

fn agents_segment(agents: &OrderedMap<AgentActivity>) -> Option<String> {
    if agents.is_empty() {
        return None;
    }
    let joined = agents
        .iter()
        .map(|(name, activity)| format!("{name}({}s)", activity.elapsed))
        .collect::<Vec<_>>()
        .join(" ");
    Some(format!("Agents: {joined}"))
}

fn tasks_segment(tasks: &TaskCounts) -> Option<String> {
    if tasks.total == 0 {
        return None;
    }

    let mut sub = Vec::new();
    if tasks.in_progress > 0 {
        sub.push(format!("🔄 {}", tasks.in_progress));
    }
    if tasks.pending > 0 {
        sub.push(format!("⏳ {}", tasks.pending));
    }
    if tasks.completed > 0 {
        sub.push(format!("✓ {}", tasks.completed));
    }

    // All counters zero despite total > 0: no segment at all.
    if sub.is_empty() {
        None
    } else {
        Some(format!("Tasks: {}", sub.join(" ")))
    }
}

fn prompts_segment(system_prompts: &[String]) -> Option<String> {
    if system_prompts.is_empty() {
        None
    } else {
        Some(format!("Context: {} prompts", system_prompts.len()))
    }
}

/// Render session metrics into a one-line status.
///
/// Segments appear in a fixed priority order: context health, model,
/// duration, tools, agents, tasks, prompt count. The order is part of the
/// contract, not an implementation detail. With no segments at all the line
/// is the marker plus a trailing space.
#[must_use]
pub fn format_status(metrics: &SessionMetrics) -> FormattedStatus {
    let mut parts = Vec::new();

    if let Some(context) = &metrics.context {
        parts.push(context_segment(context));
    }
    if let Some(segment) = metrics.model.as_deref().and_then(model_segment) {
        parts.push(segment);
    }
    if let Some(duration) = metrics.duration.as_deref()
        && !duration.is_empty()
    {
        parts.push(duration.to_string());
    }
    if let Some(segment) = metrics.tools.as_ref().and_then(tools_segment) {
        parts.push(segment);
    }
    if let Some(segment) = metrics.agents.as_ref().and_then(agents_segment) {
        parts.push(segment);
    }
    if let Some(segment) = metrics.tasks.as_ref().and_then(tasks_segment) {
        parts.push(segment);
    }
    if let Some(segment) = metrics
        .system_prompts
        .as_deref()
        .and_then(prompts_segment)
    {
        parts.push(segment);
    }

    let line = format!("{LINE_PREFIX} {}", parts.join(" | "));
    FormattedStatus { line, parts }
}

/// True when the metrics carry something worth putting on screen.
///
/// Intentionally narrower than [`format_status`]: a record holding only a
/// model name or a duration formats to a non-trivial line yet still reports
/// false here. `model`, `duration`, and `systemPrompts` are never consulted.
#[must_use]
pub fn should_display(metrics: &SessionMetrics) -> bool {
    metrics.context.is_some()
        || metrics.tools.as_ref().is_some_and(|tools| !tools.is_empty())
        || metrics.agents.as_ref().is_some_and(|agents| !agents.is_empty())
        || metrics.tasks.is_some_and(|tasks| tasks.total > 0)
}
