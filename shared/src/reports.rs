//! Report list query state and client-side ordering.

use crate::Report;
use crate::date::parse_timestamp;

/// Which of the two report collections a list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportScope {
    #[default]
    Active,
    Deactivated,
}

impl ReportScope {
    pub fn path(&self) -> &'static str {
        match self {
            ReportScope::Active => "/api/manual-reports",
            ReportScope::Deactivated => "/api/deactivated-reports",
        }
    }

    pub fn from_show_deactivated(show: bool) -> Self {
        if show {
            ReportScope::Deactivated
        } else {
            ReportScope::Active
        }
    }
}

/// Filter inputs of the reports page. Dates are `YYYY-MM-DD` as produced by
/// a date input; the server treats `date_to` as inclusive of the whole day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilters {
    pub city: String,
    pub postcode: String,
    pub date_from: String,
    pub date_to: String,
}

impl ReportFilters {
    /// Query pairs in a stable order, skipping blank inputs.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        [
            ("city", &self.city),
            ("postcode", &self.postcode),
            ("date_from", &self.date_from),
            ("date_to", &self.date_to),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value.trim();
            (!value.is_empty()).then(|| (key, value.to_string()))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unparsable report timestamp: {0:?}")]
pub struct UnparsableTimestamp(pub String);

/// Orders reports newest first.
///
/// All timestamps are parsed before anything moves: if any of them is
/// malformed the slice is left exactly in fetch order and the offending
/// value is returned. Equal timestamps keep their relative order.
pub fn sort_newest_first(reports: &mut Vec<Report>) -> Result<(), UnparsableTimestamp> {
    let mut keys = Vec::with_capacity(reports.len());
    for report in reports.iter() {
        match parse_timestamp(&report.timestamp) {
            Some(ts) => keys.push(ts),
            None => return Err(UnparsableTimestamp(report.timestamp.clone())),
        }
    }

    let mut order: Vec<usize> = (0..reports.len()).collect();
    order.sort_by(|&a, &b| keys[b].cmp(&keys[a]));

    let mut slots: Vec<Option<Report>> = reports.drain(..).map(Some).collect();
    reports.extend(order.into_iter().filter_map(|i| slots[i].take()));
    Ok(())
}

impl Report {
    /// Key used to address the report in delete/deactivate calls.
    ///
    /// The server id when present, otherwise the timestamp. Two reports
    /// filed in the same instant collide under the fallback.
    pub fn mutation_key(&self) -> Option<&str> {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => Some(id),
            _ if !self.timestamp.is_empty() => Some(self.timestamp.as_str()),
            _ => None,
        }
    }

    pub fn uses_fallback_key(&self) -> bool {
        self.id.as_deref().is_none_or(str::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Location;

    fn report(name: &str, timestamp: &str) -> Report {
        Report {
            name: name.into(),
            email: format!("{name}@example.com"),
            latitude: 0.0,
            longitude: 0.0,
            location: Location::default(),
            comments: String::new(),
            timestamp: timestamp.into(),
            id: None,
            status: None,
            deactivated_by: None,
            deactivated_at: None,
        }
    }

    fn names(reports: &[Report]) -> Vec<&str> {
        reports.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_sort_descending() {
        let mut list = vec![
            report("t1", "2025-10-01T08:00:00+00:00"),
            report("t3", "2025-10-03T08:00:00+00:00"),
            report("t2", "Thu, 02 Oct 2025 08:00:00 GMT"),
        ];
        sort_newest_first(&mut list).unwrap();
        assert_eq!(names(&list), ["t3", "t2", "t1"]);
    }

    #[test]
    fn test_sort_keeps_fetch_order_on_bad_timestamp() {
        let mut list = vec![
            report("a", "2025-10-01T08:00:00+00:00"),
            report("b", "garbage"),
            report("c", "2025-10-03T08:00:00+00:00"),
        ];
        let err = sort_newest_first(&mut list).unwrap_err();
        assert_eq!(err, UnparsableTimestamp("garbage".into()));
        assert_eq!(names(&list), ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let ts = "2025-10-01T08:00:00+00:00";
        let mut list = vec![report("x", ts), report("y", ts), report("z", ts)];
        sort_newest_first(&mut list).unwrap();
        assert_eq!(names(&list), ["x", "y", "z"]);
    }

    #[test]
    fn test_filters_skip_blank_values() {
        let filters = ReportFilters {
            city: "Pune".into(),
            postcode: "  ".into(),
            date_from: String::new(),
            date_to: "2025-10-31".into(),
        };
        assert_eq!(
            filters.to_query(),
            vec![
                ("city", "Pune".to_string()),
                ("date_to", "2025-10-31".to_string())
            ]
        );
        assert!(ReportFilters::default().is_empty());
    }

    #[test]
    fn test_mutation_key_prefers_id() {
        let mut r = report("a", "2025-10-01T08:00:00+00:00");
        assert_eq!(r.mutation_key(), Some("2025-10-01T08:00:00+00:00"));
        assert!(r.uses_fallback_key());

        r.id = Some("66f1c0".into());
        assert_eq!(r.mutation_key(), Some("66f1c0"));
        assert!(!r.uses_fallback_key());

        r.id = Some(String::new());
        assert_eq!(r.mutation_key(), Some("2025-10-01T08:00:00+00:00"));

        let blank = report("b", "");
        assert_eq!(blank.mutation_key(), None);
    }

    #[test]
    fn test_scope_from_toggle() {
        assert_eq!(ReportScope::from_show_deactivated(true), ReportScope::Deactivated);
        assert_eq!(ReportScope::from_show_deactivated(false), ReportScope::Active);
    }
}
