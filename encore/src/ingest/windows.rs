use chrono::{Months, NaiveDate};

/// A one-month ingestion window: inclusive start, exclusive end.
/// Consecutive windows share a boundary (`end == next.start`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Lower bound for the upstream `startDateTime` parameter.
    pub fn start_date_time(&self) -> String {
        format!("{}T00:00:00Z", self.start)
    }

    /// Upper bound for the upstream `endDateTime` parameter. The bound
    /// names the end of the boundary day, so adjacent windows overlap by
    /// one day upstream; the run-wide dedup set absorbs the overlap.
    pub fn end_date_time(&self) -> String {
        format!("{}T23:59:59Z", self.end)
    }
}

/// Contiguous one-month windows covering `[start, end)`, stepping one
/// calendar month at a time. The last window may extend past `end`.
pub fn month_windows(start: NaiveDate, end: NaiveDate) -> Vec<DateWindow> {
    let mut windows = Vec::new();
    let mut current = start;

    while current < end {
        let next = current.checked_add_months(Months::new(1)).unwrap_or(end);
        windows.push(DateWindow {
            start: current,
            end: next,
        });
        current = next;
    }

    windows
}
