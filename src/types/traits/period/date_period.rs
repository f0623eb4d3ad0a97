use crate::types::traits::types::{StartEndDate, Year};
use chrono::NaiveDate;

/// Resolves a period into a pair of boundary dates.
///
/// Whether the boundaries are inclusive depends on the implementor; see
/// [`SeasonalWindow`], whose bounds are both exclusive.
pub trait DatePeriod {
    fn get_date_period(self) -> Option<StartEndDate>;
}

/// The spring window of one year: strictly after April 1st and strictly
/// before July 1st.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SeasonalWindow {
    pub year: Year,
}

impl SeasonalWindow {
    const START: (u32, u32) = (4, 1);
    const END: (u32, u32) = (7, 1);

    pub fn new(year: Year) -> Self {
        Self { year }
    }

    /// Returns `true` when `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.get_date_period()
            .map(|bounds| date > bounds.start && date < bounds.end)
            .unwrap_or(false)
    }
}

impl DatePeriod for SeasonalWindow {
    fn get_date_period(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: NaiveDate::from_ymd_opt(self.year.0, Self::START.0, Self::START.1)?,
            end: NaiveDate::from_ymd_opt(self.year.0, Self::END.0, Self::END.1)?,
        })
    }
}
