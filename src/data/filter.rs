use std::collections::BTreeSet;

use thiserror::Error;

use super::model::{DataPoint, Dimension};
use crate::query::{Predicate, ThresholdOp};

// ---------------------------------------------------------------------------
// Filter state: the checkbox/slider selection snapshot
// ---------------------------------------------------------------------------

/// Structured selection driven by the UI's checkboxes and range sliders.
///
/// An empty set means "no restriction on this dimension", not "exclude all".
/// `value_range` is inclusive on both ends and must satisfy `min <= max`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub countries: BTreeSet<String>,
    pub continents: BTreeSet<String>,
    pub climates: BTreeSet<String>,
    pub value_range: (f64, f64),
    pub search_term: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            countries: BTreeSet::new(),
            continents: BTreeSet::new(),
            climates: BTreeSet::new(),
            // The dashboard's slider bounds; battery values are percentages.
            value_range: (0.0, 100.0),
            search_term: String::new(),
        }
    }
}

impl FilterState {
    /// The selection set for one categorical axis.
    pub fn selection(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Country => &self.countries,
            Dimension::Continent => &self.continents,
            Dimension::Climate => &self.climates,
        }
    }

    /// Mutable access, used by checkbox toggles.
    pub fn selection_mut(&mut self, dimension: Dimension) -> &mut BTreeSet<String> {
        match dimension {
            Dimension::Country => &mut self.countries,
            Dimension::Continent => &mut self.continents,
            Dimension::Climate => &mut self.climates,
        }
    }

    /// Set the inclusive value range, rejecting an inverted pair.
    pub fn set_value_range(&mut self, min: f64, max: f64) -> Result<(), FilterError> {
        if min > max {
            return Err(FilterError::InvalidRange { min, max });
        }
        self.value_range = (min, max);
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("invalid value range: min {min} exceeds max {max}")]
    InvalidRange { min: f64, max: f64 },
}

/// Which of the two mutually exclusive filter paths owns the working set.
///
/// Checkbox selections and free-text queries each *replace* the visible
/// set; they are never intersected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Structured,
    TextQuery,
}

// ---------------------------------------------------------------------------
// Structured path
// ---------------------------------------------------------------------------

/// Whether a point passes every active structured constraint.
///
/// * Non-empty dimension sets require exact (case-sensitive) membership.
/// * The value range is always applied, inclusive on both ends.
/// * A non-empty search term matches case-insensitively as a substring of
///   country, continent, or climate (logical OR across the three).
pub fn matches_filters(point: &DataPoint, filters: &FilterState) -> bool {
    let term = filters.search_term.trim().to_lowercase();
    if !term.is_empty() {
        let hit = point.country.to_lowercase().contains(&term)
            || point.continent.to_lowercase().contains(&term)
            || point.climate.to_lowercase().contains(&term);
        if !hit {
            return false;
        }
    }

    for dim in [Dimension::Country, Dimension::Continent, Dimension::Climate] {
        let selected = filters.selection(dim);
        if !selected.is_empty() && !selected.contains(dim.field_of(point)) {
            return false;
        }
    }

    let (min, max) = filters.value_range;
    point.value >= min && point.value <= max
}

/// Indices of points passing the structured filters, in input order.
pub fn filtered_indices(points: &[DataPoint], filters: &FilterState) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| matches_filters(p, filters))
        .map(|(i, _)| i)
        .collect()
}

/// Owned survivors of the structured filters (stable order).
pub fn apply(points: &[DataPoint], filters: &FilterState) -> Vec<DataPoint> {
    filtered_indices(points, filters)
        .into_iter()
        .map(|i| points[i].clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Text-query path
// ---------------------------------------------------------------------------

/// Whether a point passes a query-derived predicate.
///
/// Thresholds are strict; dimension equality is case-insensitive; a missing
/// date bound is unbounded on that side.
pub fn matches_predicate(point: &DataPoint, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::ValueThreshold { op, threshold } => match op {
            ThresholdOp::Above => point.value > *threshold,
            ThresholdOp::Below => point.value < *threshold,
        },
        Predicate::DimensionEquals { dimension, value } => {
            dimension.field_of(point).eq_ignore_ascii_case(value)
        }
        Predicate::DateRange { start, end } => {
            if let Some(start) = start {
                if point.timestamp < *start {
                    return false;
                }
            }
            if let Some(end) = end {
                if point.timestamp > *end {
                    return false;
                }
            }
            true
        }
        Predicate::Identity => true,
    }
}

/// Indices of points passing the predicate, in input order.
pub fn predicate_indices(points: &[DataPoint], predicate: &Predicate) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| matches_predicate(p, predicate))
        .map(|(i, _)| i)
        .collect()
}

/// Owned survivors of the predicate (stable order).
pub fn apply_predicate(points: &[DataPoint], predicate: &Predicate) -> Vec<DataPoint> {
    predicate_indices(points, predicate)
        .into_iter()
        .map(|i| points[i].clone())
        .collect()
}
