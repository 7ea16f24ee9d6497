// 助産統合（4年生 → 4年助産の補完）
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::record::ScheduleRecord;
use crate::sheet_map::{GRADE_4, GRADE_4_MIDWIFERY};

/// 4年生にあって4年助産にない (日付, 時限) を、4年生のコピーで埋める
///
/// 追加した件数を返す。同じキーの4年生レコードが複数あれば最後の1件を、
/// そのキーが最初に現れた位置の順で追加する。
pub fn backfill_midwifery(records: &mut Vec<ScheduleRecord>) -> usize {
    let covered: HashSet<(NaiveDate, u8)> = records
        .iter()
        .filter(|r| r.grade == GRADE_4_MIDWIFERY)
        .map(|r| (r.date, r.period))
        .collect();

    // キーの初出順と、キーごとの最新レコード
    let mut order: Vec<(NaiveDate, u8)> = Vec::new();
    let mut latest: HashMap<(NaiveDate, u8), usize> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        if record.grade != GRADE_4 {
            continue;
        }
        let key = (record.date, record.period);
        if latest.insert(key, idx).is_none() {
            order.push(key);
        }
    }

    let additions: Vec<ScheduleRecord> = order
        .iter()
        .filter(|key| !covered.contains(*key))
        .map(|key| records[latest[key]].relabeled(GRADE_4_MIDWIFERY))
        .collect();

    let added = additions.len();
    records.extend(additions);
    added
}
