//! Row filtering with `field__lookup` keys.
//!
//! A key is a column name with an optional comparator suffix: `sender` (exact match),
//! `date__lte`, `date__gte`. The `date` column is compared as a calendar date on both
//! sides. Any comparison between values of different kinds is simply a non-match.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::dates::parse_date;
use crate::record::TransferRecord;

const LOOKUP_SEPARATOR: &str = "__";

/// A value a row field is compared against.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Date(NaiveDate),
    Number(f64),
}

impl FilterValue {
    /// Compare `self` (the row's value) against `target` using `lookup`.
    /// Values of different kinds never match.
    pub fn compare(&self, target: &FilterValue, lookup: &Lookup) -> bool {
        let ordering = match (self, target) {
            (FilterValue::Text(a), FilterValue::Text(b)) => a.partial_cmp(b),
            (FilterValue::Date(a), FilterValue::Date(b)) => a.partial_cmp(b),
            (FilterValue::Number(a), FilterValue::Number(b)) => a.partial_cmp(b),
            _ => return false,
        };
        match ordering {
            Some(ord) => lookup.accepts(ord),
            None => false,
        }
    }

    /// Reinterpret text as a date when it parses as one; anything else is left as-is.
    fn into_date(self) -> FilterValue {
        match self {
            FilterValue::Text(s) => match parse_date(&s) {
                Ok(d) => FilterValue::Date(d),
                Err(_) => FilterValue::Text(s),
            },
            other => other,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(d: NaiveDate) -> Self {
        FilterValue::Date(d)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

/// Comparator selected by the key suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Exact,
    Lte,
    Gte,
    /// A suffix with no comparator behind it; never matches.
    Unsupported(String),
}

impl Lookup {
    fn parse(suffix: &str) -> Self {
        match suffix {
            "lte" => Lookup::Lte,
            "gte" => Lookup::Gte,
            other => Lookup::Unsupported(other.to_string()),
        }
    }

    fn accepts(&self, ord: Ordering) -> bool {
        match self {
            Lookup::Exact => ord == Ordering::Equal,
            Lookup::Lte => ord != Ordering::Greater,
            Lookup::Gte => ord != Ordering::Less,
            Lookup::Unsupported(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterKey {
    field: String,
    lookup: Lookup,
}

impl FilterKey {
    pub fn new(field: impl Into<String>, lookup: Lookup) -> Self {
        Self {
            field: field.into(),
            lookup,
        }
    }

    /// Split `field__lookup` on the first separator. No suffix means exact match.
    pub fn parse(key: &str) -> Self {
        match key.split_once(LOOKUP_SEPARATOR) {
            Some((field, suffix)) => Self::new(field, Lookup::parse(suffix)),
            None => Self::new(key, Lookup::Exact),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn lookup(&self) -> &Lookup {
        &self.lookup
    }
}

impl From<&str> for FilterKey {
    fn from(key: &str) -> Self {
        FilterKey::parse(key)
    }
}

/// Ordered set of `(key, value)` criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    criteria: Vec<(FilterKey, FilterValue)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<FilterKey>, value: impl Into<FilterValue>) -> Self {
        self.criteria.push((key.into(), value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FilterKey, &FilterValue)> {
        self.criteria.iter().map(|(k, v)| (k, v))
    }
}

/// Inclusive cutoff date for a query.
///
/// Text that is empty or only whitespace means no bound. Any other value becomes a
/// `date__lte` criterion, so something that is not a date selects nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Until {
    #[default]
    Unbounded,
    Bound(FilterValue),
}

impl Until {
    /// The `date__lte` filter for this cutoff, if there is one.
    pub fn cutoff(self) -> Option<Filters> {
        match self {
            Until::Unbounded => None,
            Until::Bound(value) => Some(Filters::new().with("date__lte", value)),
        }
    }
}

impl From<FilterValue> for Until {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Text(s) if s.trim().is_empty() => Until::Unbounded,
            other => Until::Bound(other),
        }
    }
}

impl From<&str> for Until {
    fn from(s: &str) -> Self {
        FilterValue::from(s).into()
    }
}

impl From<String> for Until {
    fn from(s: String) -> Self {
        FilterValue::from(s).into()
    }
}

impl From<NaiveDate> for Until {
    fn from(d: NaiveDate) -> Self {
        FilterValue::from(d).into()
    }
}

impl<T: Into<Until>> From<Option<T>> for Until {
    fn from(value: Option<T>) -> Self {
        value.map_or(Until::Unbounded, Into::into)
    }
}

/// Does a single criterion hold for `record`?
pub fn matches(record: &TransferRecord, key: &FilterKey, value: &FilterValue) -> bool {
    let Some(raw) = record.field(key.field()) else {
        return false;
    };

    let current = FilterValue::from(raw);
    if key.field() == "date" {
        current.into_date().compare(&value.clone().into_date(), key.lookup())
    } else {
        current.compare(value, key.lookup())
    }
}

/// Evaluate every criterion; `strict` requires all of them, otherwise any one suffices.
pub fn filter_row(record: &TransferRecord, filters: &Filters, strict: bool) -> bool {
    let mut results = filters.iter().map(|(k, v)| matches(record, k, v));
    if strict {
        results.all(|m| m)
    } else {
        results.any(|m| m)
    }
}

pub fn lazy_filter_row(record: &TransferRecord, filters: &Filters) -> bool {
    filter_row(record, filters, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, sender: &str, recipient: &str, amount: &str) -> TransferRecord {
        TransferRecord::new(date, sender, recipient, amount)
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(FilterKey::parse("sender"), FilterKey::new("sender", Lookup::Exact));
        assert_eq!(FilterKey::parse("date__lte"), FilterKey::new("date", Lookup::Lte));
        assert_eq!(FilterKey::parse("date__gte"), FilterKey::new("date", Lookup::Gte));
        assert_eq!(
            FilterKey::parse("date__lt"),
            FilterKey::new("date", Lookup::Unsupported("lt".to_string()))
        );
    }

    #[test]
    fn test_strict_date_bound() {
        let filters = Filters::new().with("date__lte", "2021-09-29");
        assert!(filter_row(&row("2021-09-28", "bob", "mary", "154.74"), &filters, true));
        assert!(filter_row(&row("2021-09-29", "mary", "supermarket", "130.87"), &filters, true));
        assert!(!filter_row(&row("2021-09-30", "bob", "mary", "362.01"), &filters, true));
    }

    #[test]
    fn test_non_strict_either_side() {
        let filters = Filters::new().with("sender", "bob").with("recipient", "bob");
        assert!(!lazy_filter_row(&row("2021-10-01", "john", "alice", "473.13"), &filters));
        assert!(lazy_filter_row(&row("2021-10-02", "bob", "supermarket", "251.10"), &filters));
        assert!(lazy_filter_row(&row("2021-10-03", "mary", "bob", "67.54"), &filters));
    }

    #[test]
    fn test_strict_requires_all() {
        let filters = Filters::new().with("sender", "bob").with("recipient", "bob");
        assert!(!filter_row(&row("2021-10-02", "bob", "supermarket", "251.10"), &filters, true));
        assert!(filter_row(&row("2021-10-02", "bob", "bob", "1.00"), &filters, true));
    }

    #[test]
    fn test_date_values_accept_parsed_dates() {
        let bound = NaiveDate::from_ymd_opt(2021, 10, 1).unwrap();
        let rec = row("2021-10-01", "bob", "alice", "31.79");
        assert!(matches(&rec, &"date__lte".into(), &bound.into()));
        assert!(matches(&rec, &"date__gte".into(), &bound.into()));
        assert!(matches(&rec, &"date".into(), &bound.into()));
        assert!(!matches(&rec, &"date__gte".into(), &"2021-10-02".into()));
    }

    #[test]
    fn test_type_mismatch_fails_closed() {
        let rec = row("2021-10-01", "bob", "alice", "31.79");
        // amount stays text, a number never equals it
        assert!(!matches(&rec, &"amount".into(), &FilterValue::Number(31.79)));
        assert!(!matches(&rec, &"amount__lte".into(), &FilterValue::Number(100.0)));
        // a non-date value against the date column
        assert!(!matches(&rec, &"date__lte".into(), &"tomorrow".into()));
        assert!(!matches(&rec, &"date__lte".into(), &FilterValue::Number(20211001.0)));
        // a date against a text column
        let d = NaiveDate::from_ymd_opt(2021, 10, 1).unwrap();
        assert!(!matches(&rec, &"sender".into(), &d.into()));
    }

    #[test]
    fn test_unparseable_row_date_never_matches() {
        let rec = row("01/10/2021", "bob", "alice", "31.79");
        assert!(!matches(&rec, &"date__lte".into(), &"2099-01-01".into()));
    }

    #[test]
    fn test_unknown_field_and_lookup() {
        let rec = row("2021-10-01", "bob", "alice", "31.79");
        assert!(!matches(&rec, &"currency".into(), &"USD".into()));
        assert!(!matches(&rec, &"date__lt".into(), &"2099-01-01".into()));
    }

    #[test]
    fn test_empty_filters() {
        let rec = row("2021-10-01", "bob", "alice", "31.79");
        assert!(filter_row(&rec, &Filters::new(), true));
        assert!(!filter_row(&rec, &Filters::new(), false));
    }

    #[test]
    fn test_until_conversions() {
        let d = NaiveDate::from_ymd_opt(2021, 10, 5).unwrap();
        assert_eq!(Until::from(""), Until::Unbounded);
        assert_eq!(Until::from("   "), Until::Unbounded);
        assert_eq!(Until::from(None::<&str>), Until::Unbounded);
        assert_eq!(Until::from(Some("")), Until::Unbounded);
        assert_eq!(Until::from(d), Until::Bound(FilterValue::Date(d)));
        assert_eq!(Until::from(Some(d)), Until::Bound(FilterValue::Date(d)));
        assert_eq!(
            Until::from("2021-10-05".to_string()),
            Until::Bound(FilterValue::Text("2021-10-05".to_string()))
        );
        assert_eq!(Until::Unbounded.cutoff(), None);
    }

    #[test]
    fn test_until_cutoff_is_inclusive() {
        let cutoff = Until::from("2021-10-01").cutoff().unwrap();
        assert!(filter_row(&row("2021-10-01", "bob", "alice", "31.79"), &cutoff, true));
        assert!(!filter_row(&row("2021-10-02", "bob", "alice", "31.79"), &cutoff, true));
    }

    #[test]
    fn test_number_ordering() {
        let a = FilterValue::Number(10.0);
        assert!(a.compare(&FilterValue::Number(10.0), &Lookup::Exact));
        assert!(a.compare(&FilterValue::Number(11.0), &Lookup::Lte));
        assert!(!a.compare(&FilterValue::Number(11.0), &Lookup::Gte));
        assert!(!FilterValue::Number(f64::NAN).compare(&FilterValue::Number(1.0), &Lookup::Lte));
    }
}
