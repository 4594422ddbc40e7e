use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{ParserKernel, TimeInterval, TimeSpan, Unit, default_kernel, slot_position};
use crate::error::{TimeError, TimeResult};

/// A labelled period as supplied by the host, with raw time strings.
///
/// Bars sharing an `id` are drawn on the same timeline row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub start: String,
    pub end: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl TimelineBar {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            start: start.into(),
            end: end.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

/// Visible window that slot positions are measured against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineRange {
    pub start: String,
    pub end: String,
}

impl TimelineRange {
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// One bar placed on a row. `relative_*` are unclamped fractions of the
/// visible range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub start: String,
    pub end: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub relative_start: f64,
    pub relative_end: f64,
    pub relative_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRow {
    pub row_id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub slots: Vec<TimeSlot>,
    /// Earliest start to latest end of the row, as `YYYY-MM-DD`.
    pub full_time_range: TimelineRange,
}

struct ParsedBar<'a> {
    bar: &'a TimelineBar,
    start: TimeInterval,
    end: TimeInterval,
    start_day: NaiveDateTime,
    end_day: NaiveDateTime,
}

/// Groups bars into rows with the bundled parser kernel.
pub fn process_timeline(bars: &[TimelineBar], range: &TimelineRange) -> TimeResult<Vec<TimelineRow>> {
    process_timeline_with(bars, range, default_kernel())
}

/// Groups bars by id into rows ordered by their earliest start.
///
/// Bars without an id get a row of their own (`auto-<index>`). Within a row
/// slots are sorted by start day. A bar whose start or end does not parse is
/// skipped; an unparsable visible range is an error.
pub fn process_timeline_with(
    bars: &[TimelineBar],
    range: &TimelineRange,
    kernel: &ParserKernel,
) -> TimeResult<Vec<TimelineRow>> {
    if bars.is_empty() {
        return Ok(Vec::new());
    }
    if range.start.trim().is_empty() || range.end.trim().is_empty() {
        return Err(TimeError::InvalidData(
            "timeline range start and end must be provided".to_owned(),
        ));
    }
    let visible = TimeSpan::parse(&range.start, &range.end, kernel)?;

    let mut groups: IndexMap<String, Vec<ParsedBar<'_>>> = IndexMap::new();
    for (index, bar) in bars.iter().enumerate() {
        let key = bar.id.clone().unwrap_or_else(|| format!("auto-{index}"));
        match parse_bar(bar, kernel) {
            Ok(parsed) => groups.entry(key).or_default().push(parsed),
            Err(error) => warn!(row = %key, %error, "skipping timeline bar with unparsable time"),
        }
    }

    let mut rows = Vec::with_capacity(groups.len());
    for (row_id, mut group) in groups {
        group.sort_by(|a, b| a.start_day.cmp(&b.start_day));
        let (Some(first), Some(row_start), Some(row_end)) = (
            group.first(),
            group.iter().map(|parsed| parsed.start_day).min(),
            group.iter().map(|parsed| parsed.end_day).max(),
        ) else {
            continue;
        };

        let label = first.bar.label.clone();
        let class_name = first.bar.class_name.clone();
        let slots = group
            .iter()
            .enumerate()
            .map(|(index, parsed)| build_slot(&row_id, index, parsed, &visible))
            .collect::<TimeResult<Vec<_>>>()?;

        rows.push((
            row_start,
            TimelineRow {
                row_id,
                label,
                class_name,
                slots,
                full_time_range: TimelineRange::new(
                    row_start.format("%Y-%m-%d").to_string(),
                    row_end.format("%Y-%m-%d").to_string(),
                ),
            },
        ));
    }

    rows.sort_by(|a, b| a.0.cmp(&b.0));
    debug!(rows = rows.len(), bars = bars.len(), "processed timeline");
    Ok(rows.into_iter().map(|(_, row)| row).collect())
}

fn parse_bar<'a>(bar: &'a TimelineBar, kernel: &ParserKernel) -> TimeResult<ParsedBar<'a>> {
    let start = kernel.parse(&bar.start)?;
    let end = kernel.parse(&bar.end)?;
    Ok(ParsedBar {
        bar,
        start_day: start.to_date(Unit::Day)?,
        end_day: end.to_date(Unit::Day)?,
        start,
        end,
    })
}

fn build_slot(row_id: &str, index: usize, parsed: &ParsedBar<'_>, visible: &TimeSpan) -> TimeResult<TimeSlot> {
    let relative_start = slot_position(visible, &parsed.start)?;
    let relative_end = slot_position(visible, &parsed.end)?;
    let bar = parsed.bar;
    Ok(TimeSlot {
        id: bar
            .id
            .clone()
            .unwrap_or_else(|| format!("{row_id}-slot-{index}")),
        start: bar.start.clone(),
        end: bar.end.clone(),
        label: bar.label.clone(),
        color: bar.color.clone(),
        background_color: bar.background_color.clone(),
        text_color: bar.text_color.clone(),
        class_name: bar.class_name.clone(),
        relative_start,
        relative_end,
        relative_width: relative_end - relative_start,
    })
}

/// Describes every pair of slots whose relative extents overlap.
/// Slots that merely touch are not reported.
#[must_use]
pub fn validate_slots(slots: &[TimeSlot]) -> Vec<String> {
    let mut errors = Vec::new();
    for (i, a) in slots.iter().enumerate() {
        for b in &slots[i + 1..] {
            let disjoint =
                a.relative_end <= b.relative_start || b.relative_end <= a.relative_start;
            if !disjoint {
                errors.push(format!(
                    "time slots \"{}\" ({}-{}) and \"{}\" ({}-{}) overlap",
                    a.label, a.start, a.end, b.label, b.start, b.end
                ));
            }
        }
    }
    errors
}

/// Turns rows back into the flat bar list they were built from, in row order.
#[must_use]
pub fn flatten_rows(rows: &[TimelineRow]) -> Vec<TimelineBar> {
    rows.iter()
        .flat_map(|row| &row.slots)
        .map(|slot| TimelineBar {
            id: Some(slot.id.clone()),
            start: slot.start.clone(),
            end: slot.end.clone(),
            label: slot.label.clone(),
            color: slot.color.clone(),
            background_color: slot.background_color.clone(),
            text_color: slot.text_color.clone(),
            class_name: slot.class_name.clone(),
        })
        .collect()
}
