use crate::error::DashboardError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Year(pub i32);
impl Year {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A month of the year, always within `1..=12`.
///
/// This is the value carried by the month slider widget. Construct it with
/// [`MonthOfYear::new`], which rejects anything outside the calendar range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize)]
pub struct MonthOfYear(u32);

impl MonthOfYear {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 12;

    pub fn new(month: u32) -> Result<Self, DashboardError> {
        if (Self::MIN..=Self::MAX).contains(&month) {
            Ok(Self(month))
        } else {
            Err(DashboardError::InvalidMonth(month))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for MonthOfYear {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl Display for MonthOfYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

pub struct StartEndDate {
    pub start: NaiveDate,
    pub end: NaiveDate,
}
