//! Lease overlap and referential delete guards.
//!
//! Both guards are pure: the caller loads the rows inside its unit of work
//! and acts on the verdict before writing.

use chrono::NaiveDate;

use crate::error::{PortfolioError, PortfolioResult};

pub const OVERLAP_ON_CREATE: &str =
    "Cannot create lease: property has overlapping lease for the specified dates";
pub const OVERLAP_ON_UPDATE: &str =
    "Cannot update lease: property has overlapping lease for the specified dates";

/// Closed date interval: both `start` and `end` belong to the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Rejects a range whose end precedes its start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> PortfolioResult<Self> {
        if end < start {
            return Err(PortfolioError::Validation(format!(
                "leaseEnd ({}) must not be before leaseStart ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A lease as seen by the overlap guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedLease {
    pub id: i32,
    pub property_id: i32,
    pub term: DateRange,
}

/// True when `candidate` shares at least one day with `existing`.
///
/// Either endpoint of the candidate falling inside the existing term, or
/// the candidate covering the existing term entirely, counts as overlap.
/// A lease ending on 2024-12-31 therefore overlaps one starting that same day.
pub fn leases_overlap(candidate: &DateRange, existing: &DateRange) -> bool {
    existing.contains(candidate.start)
        || existing.contains(candidate.end)
        || (candidate.start <= existing.start && existing.end <= candidate.end)
}

/// First lease on `property_id`, other than `exclude`, whose term overlaps `candidate`.
pub fn find_conflicting_lease<'a, I>(
    property_id: i32,
    candidate: &DateRange,
    exclude: Option<i32>,
    leases: I,
) -> Option<&'a BookedLease>
where
    I: IntoIterator<Item = &'a BookedLease>,
{
    leases.into_iter().find(|lease| {
        lease.property_id == property_id
            && Some(lease.id) != exclude
            && leases_overlap(candidate, &lease.term)
    })
}

/// Fails with a conflict naming every non-zero dependent count.
///
/// `ensure_no_dependents("property", 3, &[(2, "lease(s)"), (1, "maintenance task(s)")])`
/// yields `Cannot delete property 3: referenced by 2 lease(s) and 1 maintenance task(s)`.
pub fn ensure_no_dependents(
    resource: &str,
    id: i32,
    dependents: &[(u64, &str)],
) -> PortfolioResult<()> {
    let blockers: Vec<String> = dependents
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, noun)| format!("{} {}", count, noun))
        .collect();

    if blockers.is_empty() {
        return Ok(());
    }

    tracing::warn!(resource, id, blockers = ?blockers, "Delete blocked by dependent rows");
    Err(PortfolioError::Conflict(format!(
        "Cannot delete {} {}: referenced by {}",
        resource,
        id,
        blockers.join(" and ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end)).unwrap()
    }

    fn lease(id: i32, property_id: i32, start: &str, end: &str) -> BookedLease {
        BookedLease {
            id,
            property_id,
            term: range(start, end),
        }
    }

    #[test]
    fn test_shared_boundary_day_overlaps() {
        let existing = range("2024-01-01", "2024-12-31");
        assert!(leases_overlap(&range("2024-12-31", "2025-06-30"), &existing));
        assert!(leases_overlap(&range("2023-06-01", "2024-01-01"), &existing));
    }

    #[test]
    fn test_adjacent_ranges_do_not_overlap() {
        let existing = range("2024-01-01", "2024-12-31");
        assert!(!leases_overlap(&range("2025-01-01", "2025-12-31"), &existing));
        assert!(!leases_overlap(&range("2023-01-01", "2023-12-31"), &existing));
    }

    #[test]
    fn test_containment_both_ways() {
        let outer = range("2024-01-01", "2024-12-31");
        let inner = range("2024-03-01", "2024-04-30");
        assert!(leases_overlap(&inner, &outer));
        assert!(leases_overlap(&outer, &inner));
    }

    #[test]
    fn test_single_day_lease() {
        let existing = range("2024-05-05", "2024-05-05");
        assert!(leases_overlap(&range("2024-05-01", "2024-05-05"), &existing));
        assert!(!leases_overlap(&range("2024-05-06", "2024-05-06"), &existing));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = DateRange::new(date("2024-02-01"), date("2024-01-31")).unwrap_err();
        assert!(matches!(err, PortfolioError::Validation(_)));
    }

    #[test]
    fn test_conflict_only_on_same_property() {
        let leases = vec![lease(1, 10, "2024-01-01", "2024-12-31")];
        let candidate = range("2024-06-01", "2024-06-30");

        assert_eq!(
            find_conflicting_lease(10, &candidate, None, &leases).map(|l| l.id),
            Some(1)
        );
        assert!(find_conflicting_lease(11, &candidate, None, &leases).is_none());
    }

    #[test]
    fn test_excluded_lease_is_ignored() {
        let leases = vec![
            lease(1, 10, "2024-01-01", "2024-12-31"),
            lease(2, 10, "2025-01-01", "2025-12-31"),
        ];

        // Extending lease 1 up to the start of lease 2 collides with lease 2 only
        let candidate = range("2024-01-01", "2025-01-01");
        assert_eq!(
            find_conflicting_lease(10, &candidate, Some(1), &leases).map(|l| l.id),
            Some(2)
        );

        let shifted = range("2024-02-01", "2024-12-31");
        assert!(find_conflicting_lease(10, &shifted, Some(1), &leases).is_none());
    }

    #[test]
    fn test_dependents_message_lists_every_count() {
        let err = ensure_no_dependents(
            "property",
            3,
            &[(2, "lease(s)"), (1, "maintenance task(s)")],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot delete property 3: referenced by 2 lease(s) and 1 maintenance task(s)"
        );

        let err = ensure_no_dependents("property", 3, &[(0, "lease(s)"), (4, "maintenance task(s)")])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot delete property 3: referenced by 4 maintenance task(s)"
        );
    }

    #[test]
    fn test_no_dependents_passes() {
        assert!(ensure_no_dependents("tenant", 7, &[(0, "lease(s)")]).is_ok());
    }
}
