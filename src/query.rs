use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};
use regex::Regex;

use crate::data::model::Dimension;

// ---------------------------------------------------------------------------
// Predicate: the structured result of interpreting a free-text query
// ---------------------------------------------------------------------------

/// Comparison direction of a numeric threshold query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdOp {
    Above,
    Below,
}

/// A single filter condition derived from free text.
///
/// Exactly one predicate is produced per query (first matching rule wins);
/// predicates are never combined with each other.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Strict `value > threshold` / `value < threshold`.
    ValueThreshold { op: ThresholdOp, threshold: f64 },
    /// Case-insensitive equality on one categorical axis.
    DimensionEquals { dimension: Dimension, value: String },
    /// Inclusive timestamp bounds; a `None` bound is unbounded on that side.
    DateRange {
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    },
    /// Matches everything.
    Identity,
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// Continents the interpreter recognises.
const CONTINENT_VOCABULARY: [&str; 7] = [
    "europe",
    "asia",
    "north america",
    "south america",
    "africa",
    "oceania",
    "antarctica",
];

/// Climate zones the interpreter recognises.
const CLIMATE_VOCABULARY: [&str; 5] = ["temperate", "tropical", "arid", "continental", "polar"];

struct RuleContext<'a> {
    /// The query, already lower-cased.
    query: &'a str,
    /// Lower-cased country names from the current dataset.
    known_countries: &'a BTreeSet<String>,
}

type Rule = fn(&RuleContext) -> Option<Predicate>;

/// Interpretation rules in priority order. The first rule that produces a
/// predicate wins; rules are never combined.
const RULES: [Rule; 6] = [
    threshold_rule,
    continent_rule,
    climate_rule,
    country_rule,
    show_all_rule,
    date_range_rule,
];

/// Interpret a free-text query as a single [`Predicate`].
///
/// `known_countries` comes from the current dataset
/// ([`GeoDataset::known_countries_lowercase`](crate::data::model::GeoDataset::known_countries_lowercase)).
/// Total on arbitrary input: malformed numbers or dates degrade to rule
/// fall-through, and a query no rule understands is [`Predicate::Identity`].
pub fn parse(query: &str, known_countries: &BTreeSet<String>) -> Predicate {
    let lowered = query.to_lowercase();
    let ctx = RuleContext {
        query: &lowered,
        known_countries,
    };

    let predicate = RULES
        .iter()
        .find_map(|rule| rule(&ctx))
        .unwrap_or(Predicate::Identity);

    debug!("query {query:?} -> {predicate:?}");
    predicate
}

// ---------------------------------------------------------------------------
// Individual rules
// ---------------------------------------------------------------------------

static ABOVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:greater|more) than (\d+)").expect("hard-coded pattern"));
static BELOW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"less than (\d+)").expect("hard-coded pattern"));

/// `greater than N` / `more than N` / `less than N`.
///
/// A captured number too large for `u32` makes the rule decline so later
/// rules still get a chance.
fn threshold_rule(ctx: &RuleContext) -> Option<Predicate> {
    for (re, op) in [(&ABOVE_RE, ThresholdOp::Above), (&BELOW_RE, ThresholdOp::Below)] {
        if let Some(caps) = re.captures(ctx.query) {
            if let Ok(n) = caps[1].parse::<u32>() {
                return Some(Predicate::ValueThreshold {
                    op,
                    threshold: f64::from(n),
                });
            }
        }
    }
    None
}

fn continent_rule(ctx: &RuleContext) -> Option<Predicate> {
    CONTINENT_VOCABULARY
        .iter()
        .find(|c| ctx.query.contains(*c))
        .map(|c| Predicate::DimensionEquals {
            dimension: Dimension::Continent,
            value: (*c).to_string(),
        })
}

fn climate_rule(ctx: &RuleContext) -> Option<Predicate> {
    CLIMATE_VOCABULARY
        .iter()
        .find(|c| ctx.query.contains(*c))
        .map(|c| Predicate::DimensionEquals {
            dimension: Dimension::Climate,
            value: (*c).to_string(),
        })
}

fn country_rule(ctx: &RuleContext) -> Option<Predicate> {
    ctx.known_countries
        .iter()
        .find(|c| ctx.query.contains(c.as_str()))
        .map(|c| Predicate::DimensionEquals {
            dimension: Dimension::Country,
            value: c.clone(),
        })
}

fn show_all_rule(ctx: &RuleContext) -> Option<Predicate> {
    if ctx.query.contains("compare") || ctx.query.contains("show all") {
        Some(Predicate::Identity)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Date extraction
// ---------------------------------------------------------------------------

/// Date text accepted after a date keyword: `january 15[th][,] 2023` or a
/// bare four-digit year.
const DATE_TEXT: &str = r"(?:[a-z]+\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}|\d{4})";

static BEFORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"before\s+({DATE_TEXT})")).expect("hard-coded pattern"));
static AFTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"after\s+({DATE_TEXT})")).expect("hard-coded pattern"));
static BETWEEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"between\s+({DATE_TEXT})\s+and\s+({DATE_TEXT})"))
        .expect("hard-coded pattern")
});
static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})(?:st|nd|rd|th)\b").expect("hard-coded pattern"));

/// `before <date>` / `after <date>` / `between <date> and <date>`.
///
/// All three extractors run and accumulate bounds. Date text that does not
/// parse leaves its bound `None` rather than failing the query, so a date
/// keyword with garbage after it yields an unbounded range.
fn date_range_rule(ctx: &RuleContext) -> Option<Predicate> {
    let q = ctx.query;
    if !(q.contains("before") || q.contains("after") || q.contains("between")) {
        return None;
    }

    let mut start = None;
    let mut end = None;

    if let Some(caps) = BEFORE_RE.captures(q) {
        end = day_start(&caps[1]);
    }
    if let Some(caps) = AFTER_RE.captures(q) {
        start = day_start(&caps[1]);
    }
    if let Some(caps) = BETWEEN_RE.captures(q) {
        // Both ends must parse for a between-range to take effect.
        if let (Some(s), Some(e)) = (day_start(&caps[1]), day_start(&caps[2])) {
            start = Some(s);
            end = Some(e);
        }
    }

    if start.is_none() && end.is_none() {
        warn!("no parsable date in query {q:?}; range left unbounded");
    }
    Some(Predicate::DateRange { start, end })
}

/// Midnight UTC of the loosely parsed date, or `None` if unparsable.
fn day_start(text: &str) -> Option<DateTime<Utc>> {
    parse_loose_date(text).and_then(|d| d.and_hms_opt(0, 0, 0)).map(|dt| dt.and_utc())
}

/// Parse `january 15[th][,] 2023` or a bare `2023`.
fn parse_loose_date(text: &str) -> Option<NaiveDate> {
    let cleaned = ORDINAL_RE.replace_all(text, "$1").replace(',', " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Ok(year) = cleaned.parse::<i32>() {
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    NaiveDate::parse_from_str(&cleaned, "%B %d %Y").ok()
}
