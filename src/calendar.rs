//! Granularities, granules and the calendar conversion engine.
//!
//! A chronon is a millisecond on a timezone-free proleptic Gregorian axis,
//! counted from the Unix epoch. A [`Granularity`] names a partition of that
//! axis (day, week, month, ...), optionally relative to a coarser context
//! granularity (day-of-week vs. day-of-year). A [`Granule`] is one concrete
//! cell of such a partition: absolute `[inf, sup]` bounds plus an ordinal
//! identifier.
//!
//! The [`Calendar`] is an immutable value that is passed by reference to
//! every consumer; there is no process-wide calendar state. All conversions
//! are pure and synchronous. Conversion pairs without a well-defined
//! implementation fail with [`TemporalError::UnsupportedGranularity`] rather
//! than returning a wrong identifier.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TemporalError};

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60_000;
pub const MILLIS_PER_HOUR: i64 = 3_600_000;
pub const MILLIS_PER_DAY: i64 = 86_400_000;
pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;

// day 0 of the chronon axis (1970-01-01) is a Thursday, three days into
// its Monday-started week
const EPOCH_WEEKDAY_OFFSET: i64 = 3;

/// Marks the absence of a context granularity in raw id form.
pub const NO_GRANULARITY_ID: i32 = -1;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// ------------- GranularityKind -------------

/// The granularity kinds supported by the Gregorian calendar, ordered from
/// fine to coarse. `Calendar` has a single granule spanning the whole
/// calendar, `Top` a single granule spanning the whole of time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum GranularityKind {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
    Calendar,
    Top,
}

impl GranularityKind {
    /// The small integer id of this kind. Ids are stable but only unique
    /// within one calendar.
    pub const fn id(self) -> i32 {
        match self {
            GranularityKind::Millisecond => 0,
            GranularityKind::Second => 1,
            GranularityKind::Minute => 2,
            GranularityKind::Hour => 3,
            GranularityKind::Day => 4,
            GranularityKind::Week => 5,
            GranularityKind::Month => 6,
            GranularityKind::Quarter => 7,
            GranularityKind::Year => 8,
            GranularityKind::Calendar => 16_383,
            GranularityKind::Top => 32_767,
        }
    }

    pub fn from_id(id: i32) -> Result<GranularityKind> {
        match id {
            0 => Ok(GranularityKind::Millisecond),
            1 => Ok(GranularityKind::Second),
            2 => Ok(GranularityKind::Minute),
            3 => Ok(GranularityKind::Hour),
            4 => Ok(GranularityKind::Day),
            5 => Ok(GranularityKind::Week),
            6 => Ok(GranularityKind::Month),
            7 => Ok(GranularityKind::Quarter),
            8 => Ok(GranularityKind::Year),
            16_383 => Ok(GranularityKind::Calendar),
            32_767 => Ok(GranularityKind::Top),
            _ => Err(TemporalError::Domain(format!(
                "unknown granularity id {id}"
            ))),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            GranularityKind::Millisecond => "millisecond",
            GranularityKind::Second => "second",
            GranularityKind::Minute => "minute",
            GranularityKind::Hour => "hour",
            GranularityKind::Day => "day",
            GranularityKind::Week => "week",
            GranularityKind::Month => "month",
            GranularityKind::Quarter => "quarter",
            GranularityKind::Year => "year",
            GranularityKind::Calendar => "calendar",
            GranularityKind::Top => "top",
        }
    }
}

impl fmt::Display for GranularityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- Granularity -------------

/// A named partition of the chronon axis, optionally relative to a coarser
/// context granularity. Without context (or with the `Calendar`/`Top`
/// pseudo-contexts) identifiers are absolute, epoch-relative ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Granularity {
    kind: GranularityKind,
    context: Option<GranularityKind>,
}

impl Granularity {
    pub fn new(kind: GranularityKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    pub fn within(kind: GranularityKind, context: GranularityKind) -> Self {
        Self {
            kind,
            context: Some(context),
        }
    }

    /// Reconstructs a granularity from the raw id pair stored on a temporal
    /// element row. A context id of [`NO_GRANULARITY_ID`] means absolute.
    pub fn from_ids(granularity_id: i32, context_id: i32) -> Result<Self> {
        let kind = GranularityKind::from_id(granularity_id)?;
        let context = if context_id == NO_GRANULARITY_ID {
            None
        } else {
            Some(GranularityKind::from_id(context_id)?)
        };
        Ok(Self { kind, context })
    }

    pub fn kind(&self) -> GranularityKind {
        self.kind
    }

    pub fn context(&self) -> Option<GranularityKind> {
        self.context
    }

    pub fn id(&self) -> i32 {
        self.kind.id()
    }

    pub fn context_id(&self) -> i32 {
        self.context.map(GranularityKind::id).unwrap_or(NO_GRANULARITY_ID)
    }

    // Calendar and Top contexts carry no positional information, so they
    // behave like the absence of a context.
    fn effective_context(&self) -> Option<GranularityKind> {
        self.context.filter(|context| {
            !matches!(context, GranularityKind::Calendar | GranularityKind::Top)
        })
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.context {
            Some(context) => write!(f, "{} in {}", self.kind, context),
            None => write!(f, "{}", self.kind),
        }
    }
}

// ------------- Granule -------------

/// One cell of a granularity: inclusive chronon bounds plus the ordinal
/// identifier of the cell within its granularity/context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Granule {
    inf: i64,
    sup: i64,
    identifier: i64,
    granularity: Granularity,
}

impl Granule {
    pub fn inf(&self) -> i64 {
        self.inf
    }

    pub fn sup(&self) -> i64 {
        self.sup
    }

    pub fn identifier(&self) -> i64 {
        self.identifier
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }
}

impl fmt::Display for Granule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} [{}, {}]",
            self.granularity, self.identifier, self.inf, self.sup
        )
    }
}

/// Selects which chronon of an `[inf, sup]` pair seeds granule construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GranuleMode {
    /// Take both bounds verbatim, without snapping.
    Force,
    /// The granule enclosing `inf`.
    Inf,
    /// The granule enclosing the midpoint.
    Middle,
    /// The granule enclosing `sup`.
    Sup,
}

// ------------- Calendar -------------

/// The Gregorian calendar conversion engine. Stateless and immutable;
/// construct one and pass it by reference wherever conversions are needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calendar;

impl Calendar {
    pub fn gregorian() -> Self {
        Calendar
    }

    /// Snaps a chronon to the enclosing granule of the given granularity.
    ///
    /// Every calendar field finer than the target granularity is reset to
    /// its minimum for `inf` and its maximum for `sup`. Quarters snap the
    /// month to its 3-month block. Weeks start on Monday regardless of
    /// locale.
    pub fn granule_at(&self, chronon: i64, granularity: Granularity) -> Result<Granule> {
        let (inf, sup) = self.snap(chronon, granularity.kind())?;
        let identifier = self.identifier_of(inf, granularity)?;
        Ok(Granule {
            inf,
            sup,
            identifier,
            granularity,
        })
    }

    /// Mode-directed granule construction over an interval.
    pub fn granule_of(
        &self,
        inf: i64,
        sup: i64,
        mode: GranuleMode,
        granularity: Granularity,
    ) -> Result<Granule> {
        match mode {
            GranuleMode::Force => {
                let identifier = self.identifier_of(inf, granularity)?;
                Ok(Granule {
                    inf,
                    sup,
                    identifier,
                    granularity,
                })
            }
            GranuleMode::Inf => self.granule_at(inf, granularity),
            GranuleMode::Middle => self.granule_at(inf + (sup - inf) / 2, granularity),
            GranuleMode::Sup => self.granule_at(sup, granularity),
        }
    }

    /// Computes the ordinal identifier of the granule whose `inf` is given.
    ///
    /// With a context granularity the identifier is relative (day-of-month);
    /// without one it is absolute (days since epoch). All identifiers are
    /// zero-based. Pairs without a well-defined conversion fail closed.
    pub fn identifier_of(&self, inf: i64, granularity: Granularity) -> Result<i64> {
        type G = GranularityKind;
        match (granularity.kind(), granularity.effective_context()) {
            (G::Calendar | G::Top, _) => Ok(0),
            (kind, None) => self.absolute_identifier(inf, kind),
            (G::Millisecond, Some(G::Second)) => Ok(inf.rem_euclid(MILLIS_PER_SECOND)),
            (G::Millisecond, Some(G::Minute)) => Ok(inf.rem_euclid(MILLIS_PER_MINUTE)),
            (G::Millisecond, Some(G::Hour)) => Ok(inf.rem_euclid(MILLIS_PER_HOUR)),
            (G::Millisecond, Some(G::Day)) => Ok(inf.rem_euclid(MILLIS_PER_DAY)),
            (G::Second, Some(G::Minute)) => Ok(inf.div_euclid(MILLIS_PER_SECOND).rem_euclid(60)),
            (G::Second, Some(G::Hour)) => Ok(inf.div_euclid(MILLIS_PER_SECOND).rem_euclid(3_600)),
            (G::Second, Some(G::Day)) => Ok(inf.div_euclid(MILLIS_PER_SECOND).rem_euclid(86_400)),
            (G::Minute, Some(G::Hour)) => Ok(inf.div_euclid(MILLIS_PER_MINUTE).rem_euclid(60)),
            (G::Minute, Some(G::Day)) => Ok(inf.div_euclid(MILLIS_PER_MINUTE).rem_euclid(1_440)),
            (G::Hour, Some(G::Day)) => Ok(inf.div_euclid(MILLIS_PER_HOUR).rem_euclid(24)),
            (G::Day, Some(G::Week)) => {
                let date = datetime_of(inf)?.date();
                Ok(date.weekday().num_days_from_monday() as i64)
            }
            (G::Day, Some(G::Month)) => Ok(datetime_of(inf)?.date().day0() as i64),
            (G::Day, Some(G::Quarter)) => {
                let date = datetime_of(inf)?.date();
                let quarter_start =
                    NaiveDate::from_ymd_opt(date.year(), date.month0() / 3 * 3 + 1, 1)
                        .ok_or_else(|| out_of_range(inf))?;
                Ok((date.ordinal0() - quarter_start.ordinal0()) as i64)
            }
            (G::Day, Some(G::Year)) => Ok(datetime_of(inf)?.date().ordinal0() as i64),
            (G::Month, Some(G::Quarter)) => Ok((datetime_of(inf)?.date().month0() % 3) as i64),
            (G::Month, Some(G::Year)) => Ok(datetime_of(inf)?.date().month0() as i64),
            (G::Quarter, Some(G::Year)) => Ok((datetime_of(inf)?.date().month0() / 3) as i64),
            _ => Err(unsupported(granularity)),
        }
    }

    /// Reconstructs the lower bound of a granule from its absolute
    /// identifier. Exact left inverse of [`Calendar::identifier_of`] for
    /// every implemented absolute granularity.
    pub fn inf_of(&self, identifier: i64, granularity: Granularity) -> Result<i64> {
        self.bounds_of(identifier, granularity).map(|(inf, _)| inf)
    }

    /// Reconstructs the upper bound of a granule from its absolute
    /// identifier.
    pub fn sup_of(&self, identifier: i64, granularity: Granularity) -> Result<i64> {
        self.bounds_of(identifier, granularity).map(|(_, sup)| sup)
    }

    /// Convenience wrapper rebuilding a whole granule from its identifier.
    pub fn granule_from_identifier(
        &self,
        identifier: i64,
        granularity: Granularity,
    ) -> Result<Granule> {
        let (inf, sup) = self.bounds_of(identifier, granularity)?;
        Ok(Granule {
            inf,
            sup,
            identifier,
            granularity,
        })
    }

    /// Enumerates every granule overlapping `[inf, sup]` whose covered
    /// fraction of its own span is at least `coverage`. Only the two
    /// boundary granules are subject to exclusion; interior granules are
    /// always included.
    pub fn granules_in_range(
        &self,
        inf: i64,
        sup: i64,
        coverage: f64,
        granularity: Granularity,
    ) -> Result<Vec<Granule>> {
        if sup < inf {
            return Err(TemporalError::Domain(format!(
                "malformed range [{inf}, {sup}]"
            )));
        }
        // relative identifiers are not monotonic over the axis
        if granularity.effective_context().is_some() {
            return Err(unsupported(granularity));
        }
        let first = self.granule_at(inf, granularity)?;
        let last = self.granule_at(sup, granularity)?;
        if first.identifier == last.identifier {
            if covered_fraction(inf, sup, &first) < coverage {
                return Ok(Vec::new());
            }
            return Ok(vec![first]);
        }
        let mut from = first.identifier;
        let mut to = last.identifier;
        if covered_fraction(inf, first.sup, &first) < coverage {
            from += 1;
        }
        if covered_fraction(last.inf, sup, &last) < coverage {
            to -= 1;
        }
        let mut result = Vec::new();
        let mut cursor = first;
        while cursor.identifier < from {
            cursor = self.granule_at(cursor.sup + 1, granularity)?;
        }
        while cursor.identifier <= to {
            result.push(cursor);
            if cursor.identifier == to {
                break;
            }
            cursor = self.granule_at(cursor.sup + 1, granularity)?;
        }
        Ok(result)
    }

    /// Re-granularizes a sequence of granules (e.g. days to weeks) by
    /// mapping each source granule through [`Calendar::granules_in_range`],
    /// deduplicating by identifier and preserving ascending order.
    pub fn regranularize(
        &self,
        source: &[Granule],
        coverage: f64,
        granularity: Granularity,
    ) -> Result<Vec<Granule>> {
        let mut result: Vec<Granule> = Vec::new();
        for granule in source {
            for candidate in
                self.granules_in_range(granule.inf, granule.sup, coverage, granularity)?
            {
                match result.last() {
                    Some(last) if last.identifier >= candidate.identifier => {}
                    _ => result.push(candidate),
                }
            }
        }
        Ok(result)
    }

    /// A human-readable label for a granule. Day-in-week and month-in-year
    /// granules render fixed English names; everything else renders its
    /// one-based ordinal.
    pub fn granule_label(&self, granule: &Granule) -> String {
        let named = match (
            granule.granularity.kind(),
            granule.granularity.effective_context(),
        ) {
            (GranularityKind::Day, Some(GranularityKind::Week)) => {
                usize::try_from(granule.identifier)
                    .ok()
                    .and_then(|i| DAY_NAMES.get(i))
            }
            (GranularityKind::Month, Some(GranularityKind::Year)) => {
                usize::try_from(granule.identifier)
                    .ok()
                    .and_then(|i| MONTH_NAMES.get(i))
            }
            _ => None,
        };
        match named {
            Some(name) => (*name).to_string(),
            None => (granule.identifier + 1).to_string(),
        }
    }

    /// The finest granularity of this calendar.
    pub fn bottom(&self) -> GranularityKind {
        GranularityKind::Millisecond
    }

    /// The coarsest granularity of this calendar proper; `Top` sits above
    /// every calendar and spans the whole of time.
    pub fn top(&self) -> GranularityKind {
        GranularityKind::Calendar
    }

    pub fn supported_granularities(&self) -> &'static [GranularityKind] {
        &[
            GranularityKind::Millisecond,
            GranularityKind::Second,
            GranularityKind::Minute,
            GranularityKind::Hour,
            GranularityKind::Day,
            GranularityKind::Week,
            GranularityKind::Month,
            GranularityKind::Quarter,
            GranularityKind::Year,
            GranularityKind::Calendar,
            GranularityKind::Top,
        ]
    }

    fn snap(&self, chronon: i64, kind: GranularityKind) -> Result<(i64, i64)> {
        match kind {
            GranularityKind::Millisecond => Ok((chronon, chronon)),
            GranularityKind::Second => Ok(fixed_width(chronon, MILLIS_PER_SECOND)),
            GranularityKind::Minute => Ok(fixed_width(chronon, MILLIS_PER_MINUTE)),
            GranularityKind::Hour => Ok(fixed_width(chronon, MILLIS_PER_HOUR)),
            GranularityKind::Day => Ok(fixed_width(chronon, MILLIS_PER_DAY)),
            GranularityKind::Week => {
                let day = chronon.div_euclid(MILLIS_PER_DAY);
                let day_of_week = (day + EPOCH_WEEKDAY_OFFSET).rem_euclid(7);
                let inf = (day - day_of_week) * MILLIS_PER_DAY;
                Ok((inf, inf + MILLIS_PER_WEEK - 1))
            }
            GranularityKind::Month => {
                let date = datetime_of(chronon)?.date();
                let inf = month_start_chronon(date.year(), date.month0() as i64)?;
                let sup = month_start_chronon(date.year(), date.month0() as i64 + 1)? - 1;
                Ok((inf, sup))
            }
            GranularityKind::Quarter => {
                let date = datetime_of(chronon)?.date();
                let quarter_month = (date.month0() / 3 * 3) as i64;
                let inf = month_start_chronon(date.year(), quarter_month)?;
                let sup = month_start_chronon(date.year(), quarter_month + 3)? - 1;
                Ok((inf, sup))
            }
            GranularityKind::Year => {
                let date = datetime_of(chronon)?.date();
                let inf = date_chronon(date.year(), 1, 1)?;
                let sup = date_chronon(date.year() + 1, 1, 1)? - 1;
                Ok((inf, sup))
            }
            GranularityKind::Calendar => Ok(calendar_span()),
            GranularityKind::Top => Ok((i64::MIN, i64::MAX)),
        }
    }

    fn absolute_identifier(&self, inf: i64, kind: GranularityKind) -> Result<i64> {
        match kind {
            GranularityKind::Millisecond => Ok(inf),
            GranularityKind::Second => Ok(inf.div_euclid(MILLIS_PER_SECOND)),
            GranularityKind::Minute => Ok(inf.div_euclid(MILLIS_PER_MINUTE)),
            GranularityKind::Hour => Ok(inf.div_euclid(MILLIS_PER_HOUR)),
            GranularityKind::Day => Ok(inf.div_euclid(MILLIS_PER_DAY)),
            GranularityKind::Week => {
                Ok((inf.div_euclid(MILLIS_PER_DAY) + EPOCH_WEEKDAY_OFFSET).div_euclid(7))
            }
            GranularityKind::Month => {
                let date = datetime_of(inf)?.date();
                Ok((date.year() as i64 - 1970) * 12 + date.month0() as i64)
            }
            GranularityKind::Quarter => {
                let date = datetime_of(inf)?.date();
                Ok((date.year() as i64 - 1970) * 4 + (date.month0() / 3) as i64)
            }
            GranularityKind::Year => Ok(datetime_of(inf)?.date().year() as i64 - 1970),
            GranularityKind::Calendar | GranularityKind::Top => Ok(0),
        }
    }

    fn bounds_of(&self, identifier: i64, granularity: Granularity) -> Result<(i64, i64)> {
        // relative identifiers do not determine absolute bounds
        if granularity.effective_context().is_some() {
            return Err(unsupported(granularity));
        }
        match granularity.kind() {
            GranularityKind::Millisecond => Ok((identifier, identifier)),
            GranularityKind::Second => Ok((
                identifier * MILLIS_PER_SECOND,
                identifier * MILLIS_PER_SECOND + MILLIS_PER_SECOND - 1,
            )),
            GranularityKind::Minute => Ok((
                identifier * MILLIS_PER_MINUTE,
                identifier * MILLIS_PER_MINUTE + MILLIS_PER_MINUTE - 1,
            )),
            GranularityKind::Hour => Ok((
                identifier * MILLIS_PER_HOUR,
                identifier * MILLIS_PER_HOUR + MILLIS_PER_HOUR - 1,
            )),
            GranularityKind::Day => Ok((
                identifier * MILLIS_PER_DAY,
                identifier * MILLIS_PER_DAY + MILLIS_PER_DAY - 1,
            )),
            GranularityKind::Week => {
                let inf = (identifier * 7 - EPOCH_WEEKDAY_OFFSET) * MILLIS_PER_DAY;
                Ok((inf, inf + MILLIS_PER_WEEK - 1))
            }
            GranularityKind::Month => {
                let inf = month_start_chronon(1970, identifier)?;
                let sup = month_start_chronon(1970, identifier + 1)? - 1;
                Ok((inf, sup))
            }
            GranularityKind::Quarter => {
                let inf = month_start_chronon(1970, identifier * 3)?;
                let sup = month_start_chronon(1970, identifier * 3 + 3)? - 1;
                Ok((inf, sup))
            }
            GranularityKind::Year => {
                let year = 1970_i64 + identifier;
                let year = i32::try_from(year).map_err(|_| {
                    TemporalError::Domain(format!("year {year} outside the supported calendar range"))
                })?;
                Ok((date_chronon(year, 1, 1)?, date_chronon(year + 1, 1, 1)? - 1))
            }
            GranularityKind::Calendar => Ok(calendar_span()),
            GranularityKind::Top => Ok((i64::MIN, i64::MAX)),
        }
    }
}

// ------------- chronon helpers -------------

fn datetime_of(chronon: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp_millis(chronon)
        .map(|instant| instant.naive_utc())
        .ok_or_else(|| out_of_range(chronon))
}

fn date_chronon(year: i32, month: u32, day: u32) -> Result<i64> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        TemporalError::Domain(format!(
            "date {year:04}-{month:02}-{day:02} outside the supported calendar range"
        ))
    })?;
    Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

fn month_start_chronon(year: i32, month0: i64) -> Result<i64> {
    let year = year as i64 + month0.div_euclid(12);
    let year = i32::try_from(year).map_err(|_| {
        TemporalError::Domain(format!("year {year} outside the supported calendar range"))
    })?;
    let month0 = month0.rem_euclid(12) as u32;
    date_chronon(year, month0 + 1, 1)
}

fn fixed_width(chronon: i64, width: i64) -> (i64, i64) {
    let inf = chronon.div_euclid(width) * width;
    (inf, inf + width - 1)
}

fn calendar_span() -> (i64, i64) {
    (
        NaiveDateTime::MIN.and_utc().timestamp_millis(),
        NaiveDateTime::MAX.and_utc().timestamp_millis(),
    )
}

// f64 keeps the arithmetic safe for sentinel-sized spans
fn covered_fraction(lo: i64, hi: i64, granule: &Granule) -> f64 {
    let covered = (hi.min(granule.sup) as f64) - (lo.max(granule.inf) as f64) + 1.0;
    let span = (granule.sup as f64) - (granule.inf as f64) + 1.0;
    covered / span
}

fn unsupported(granularity: Granularity) -> TemporalError {
    TemporalError::UnsupportedGranularity {
        granularity: granularity.kind().name(),
        context: granularity
            .context()
            .map(GranularityKind::name)
            .unwrap_or("no context"),
    }
}

fn out_of_range(chronon: i64) -> TemporalError {
    TemporalError::Domain(format!(
        "chronon {chronon} outside the supported calendar range"
    ))
}
