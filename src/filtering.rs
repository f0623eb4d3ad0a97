use crate::types::traits::period::date_period::{DatePeriod, SeasonalWindow};
use crate::types::traits::types::MonthOfYear;
use polars::prelude::{col, lit, DataType, LazyFrame};

pub(crate) const COL_DATE: &str = "DATE";
pub(crate) const COL_MONTH: &str = "MONTH";

pub trait WeatherFrameFilterExt {
    /// Keeps rows whose parsed `DATE` lies strictly inside the seasonal window.
    ///
    /// Assumes `DATE` is already `DataType::Date`. A window that cannot be
    /// resolved to calendar dates keeps no rows.
    fn filter_seasonal(self, window: SeasonalWindow) -> LazyFrame;

    /// Keeps rows whose `MONTH` equals `month`, preserving row order.
    fn filter_month(self, month: MonthOfYear) -> LazyFrame;
}

impl WeatherFrameFilterExt for LazyFrame {
    fn filter_seasonal(self, window: SeasonalWindow) -> LazyFrame {
        match window.get_date_period() {
            Some(bounds) => self.filter(
                col(COL_DATE)
                    .cast(DataType::Date)
                    .gt(lit(bounds.start))
                    .and(col(COL_DATE).cast(DataType::Date).lt(lit(bounds.end))),
            ),
            None => self.filter(lit(false)),
        }
    }

    fn filter_month(self, month: MonthOfYear) -> LazyFrame {
        self.filter(col(COL_MONTH).eq(lit(i64::from(month.get()))))
    }
}
