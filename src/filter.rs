use chrono::NaiveDate;

use crate::record::ScheduleRecord;

/// 指定年の 3/21〜3/31（両端含む）のレコードだけを残す
pub fn filter_march_tail(records: Vec<ScheduleRecord>, year: i32) -> Vec<ScheduleRecord> {
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(year, 3, 21),
        NaiveDate::from_ymd_opt(year, 3, 31),
    ) else {
        return Vec::new();
    };

    records
        .into_iter()
        .filter(|r| (start..=end).contains(&r.date))
        .collect()
}
