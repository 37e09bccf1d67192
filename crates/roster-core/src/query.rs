//! Query/filter engine shared by every listing.
//!
//! A [`Filter`] combines free-text search, a status, a category and an
//! inclusive date range. All active predicates are ANDed and the result keeps
//! the source order; there is no paging or re-sorting.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::store::Record;

/// Per-entity hooks the filter engine reads.
pub trait Queryable: Record {
    /// Fields matched by free-text search. `None` marks an absent optional
    /// field, which never matches.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Value compared against the category filter.
    fn category(&self) -> Option<&str>;

    /// Date compared against the date-range filter.
    fn filter_date(&self) -> Option<NaiveDate>;
}

/// Filter criteria for a listing.
///
/// All fields are optional. When multiple fields are set, they are combined
/// with AND semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter<S> {
    /// Case-insensitive substring matched against the searchable fields.
    pub text: Option<String>,
    /// Exact status match.
    pub status: Option<S>,
    /// Exact category match.
    pub category: Option<String>,
    /// Lower bound of the date range (inclusive).
    pub date_from: Option<NaiveDate>,
    /// Upper bound of the date range (inclusive).
    pub date_to: Option<NaiveDate>,
}

impl<S> Default for Filter<S> {
    fn default() -> Self {
        Self {
            text: None,
            status: None,
            category: None,
            date_from: None,
            date_to: None,
        }
    }
}

impl<S: Copy + PartialEq> Filter<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: S) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn with_date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    /// The date range only applies when both bounds are present.
    #[must_use]
    pub const fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }

    /// True when no predicate is active.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.needle().is_none()
            && self.status.is_none()
            && self.category.is_none()
            && self.date_range().is_none()
    }

    /// Whether `record` satisfies every active predicate.
    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: Queryable<Status = S>,
    {
        self.matches_text(record)
            && self.status.is_none_or(|status| record.status() == status)
            && self
                .category
                .as_deref()
                .is_none_or(|category| record.category() == Some(category))
            && self.date_range().is_none_or(|(from, to)| {
                record
                    .filter_date()
                    .is_some_and(|date| from <= date && date <= to)
            })
    }

    /// Ordered subsequence of `records` matching this filter.
    pub fn apply<'a, T, I>(&self, records: I) -> Vec<&'a T>
    where
        T: Queryable<Status = S> + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        records
            .into_iter()
            .filter(|record| self.matches(*record))
            .collect()
    }

    fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase)
    }

    fn matches_text<T: Queryable>(&self, record: &T) -> bool {
        let Some(needle) = self.needle() else {
            return true;
        };
        record
            .search_fields()
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Parse a categorical choice where `"all"` or a blank value means "no filter".
///
/// # Errors
///
/// Propagates the value type's parse error for anything else.
pub fn parse_choice<S: FromStr>(raw: Option<&str>) -> Result<Option<S>, S::Err> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

/// Free-form category choice with the same `"all"` convention.
#[must_use]
pub fn parse_category(raw: Option<&str>) -> Option<String> {
    match raw.map(str::trim) {
        None | Some("") => None,
        Some(value) if value.eq_ignore_ascii_case("all") => None,
        Some(value) => Some(value.to_string()),
    }
}

/// Assertions shared by the per-entity filter tests.
#[cfg(test)]
pub(crate) mod check {
    use super::{Filter, Queryable};
    use chrono::NaiveDate;

    /// Each of `hits` finds `record` by free text; none of `misses` does.
    pub fn searchable<T: Queryable>(record: &T, hits: &[&str], misses: &[&str]) {
        for needle in hits {
            let filter = Filter::<T::Status>::new().with_text(*needle);
            assert!(filter.matches(record), "{needle:?} should find {}", record.id());
        }
        for needle in misses {
            let filter = Filter::<T::Status>::new().with_text(*needle);
            assert!(!filter.matches(record), "{needle:?} should not find {}", record.id());
        }
    }

    /// The category hook returns `category` and only that exact literal matches.
    pub fn category<T: Queryable>(record: &T, category: &str) {
        assert_eq!(record.category(), Some(category));
        assert!(Filter::<T::Status>::new().with_category(category).matches(record));
        let other = format!("{category} (other)");
        assert!(!Filter::<T::Status>::new().with_category(other).matches(record));
    }

    /// The date hook returns `date`; a one-day range on it matches, the next day does not.
    pub fn dated<T: Queryable>(record: &T, date: NaiveDate) {
        assert_eq!(record.filter_date(), Some(date));
        assert!(Filter::<T::Status>::new().with_date_range(date, date).matches(record));
        let next = date.succ_opt().expect("next day");
        assert!(!Filter::<T::Status>::new().with_date_range(next, next).matches(record));
    }
}
