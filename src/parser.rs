// 時間割シートの解析
//
// シートの列配置（0始まり、A列=0）:
//   1      : 日付
//   2p+1   : p限の授業名 (p = 1..=5)
//   2p+2   : p限の教室
//   13     : その日のコメント
use calamine::{Data, Range};
use chrono::{NaiveDate, NaiveDateTime};

use crate::record::ScheduleRecord;

pub const DATE_COLUMN: usize = 1;
pub const COMMENT_COLUMN: usize = 13;
pub const PERIODS: std::ops::RangeInclusive<u8> = 1..=5;

pub fn course_column(period: u8) -> usize {
    period as usize * 2 + 1
}

pub fn room_column(period: u8) -> usize {
    period as usize * 2 + 2
}

/// シート全体をレコードに変換する
pub fn parse_range(range: &Range<Data>, grade: &str) -> Vec<ScheduleRecord> {
    // 使用範囲がA列から始まらない場合に備えて列番号を絶対位置に揃える
    let start_col = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let mut records = Vec::new();
    for row in range.rows() {
        if start_col == 0 {
            records.extend(row_to_records(row, grade));
        } else {
            let mut absolute = vec![Data::Empty; start_col];
            absolute.extend_from_slice(row);
            records.extend(row_to_records(&absolute, grade));
        }
    }
    records
}

/// 1行分のセルをレコードに変換する
///
/// 日付列が日付として読めない行（見出し・空行）は何も返さない。
pub fn row_to_records(row: &[Data], grade: &str) -> Vec<ScheduleRecord> {
    let Some(date) = row.get(DATE_COLUMN).and_then(parse_date) else {
        return Vec::new();
    };

    let mut records = Vec::new();

    if let Some(cell) = row.get(COMMENT_COLUMN).filter(|c| !is_empty_cell(c)) {
        records.push(ScheduleRecord::comment(grade, date, cell_text(cell)));
    }

    for period in PERIODS {
        let (course_col, room_col) = (course_column(period), room_column(period));
        if room_col >= row.len() {
            continue;
        }
        if is_empty_cell(&row[course_col]) {
            continue;
        }
        let course = cell_text(&row[course_col]);
        let room = cell_text(&row[room_col]);
        records.push(ScheduleRecord::lesson(grade, date, period, course, room));
    }

    records
}

/// 日付セルを解釈する（Excelの日付型・ISO文字列・日付文字列）
pub fn parse_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(dt) => dt.as_datetime().map(|d| d.date()),
        Data::DateTimeIso(s) | Data::String(s) => parse_date_text(s),
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// セルの値を文字列にする（空セルは空文字）
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // 教室番号などは数値セルになりがち: 101.0 → "101"
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
    }
}

/// 授業・コメントとして扱わないセル
///
/// 空・エラー・0・FALSE、空白だけの文字列。
fn is_empty_cell(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::Int(i) => *i == 0,
        Data::Float(f) => *f == 0.0,
        Data::Bool(b) => !b,
        _ => cell_text(cell).trim().is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    /// 14列（A〜N）の空行を作り、日付を入れる
    fn blank_row(date: &str) -> Vec<Data> {
        let mut row = vec![Data::Empty; 14];
        row[DATE_COLUMN] = text(date);
        row
    }

    #[test]
    fn test_column_offsets() {
        assert_eq!((course_column(1), room_column(1)), (3, 4));
        assert_eq!((course_column(5), room_column(5)), (11, 12));
    }

    #[test]
    fn test_row_without_date_is_skipped() {
        let mut row = blank_row("日付");
        row[3] = text("基礎看護学");
        assert!(row_to_records(&row, "1年生").is_empty());

        let mut row = blank_row("");
        row[13] = text("備考");
        assert!(row_to_records(&row, "1年生").is_empty());
    }

    #[test]
    fn test_lessons_and_comment() {
        let mut row = blank_row("2025-10-06");
        row[3] = text("解剖学");
        row[4] = Data::Float(101.0);
        row[7] = text("生理学");
        // 教室が空でも授業名があればレコードになる
        row[13] = text("午後休講");

        let records = row_to_records(&row, "2年生");
        assert_eq!(records.len(), 3);

        let date = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
        assert_eq!(records[0], ScheduleRecord::comment("2年生", date, "午後休講".into()));
        assert_eq!(
            records[1],
            ScheduleRecord::lesson("2年生", date, 1, "解剖学".into(), "101".into())
        );
        assert_eq!(
            records[2],
            ScheduleRecord::lesson("2年生", date, 3, "生理学".into(), String::new())
        );
    }

    #[test]
    fn test_short_row_skips_slots_past_end() {
        // 8列: 1限(3,4)と2限(5,6)は読めるが、3限の教室列(8)は範囲外
        let mut row = vec![Data::Empty; 8];
        row[DATE_COLUMN] = text("2025/04/07");
        row[3] = text("英語");
        row[4] = text("A棟");
        row[5] = text("化学");
        row[6] = text("B棟");
        row[7] = text("物理");

        let records = row_to_records(&row, "1年生");
        let periods: Vec<u8> = records.iter().map(|r| r.period).collect();
        assert_eq!(periods, vec![1, 2]);
        assert!(records.iter().all(|r| r.comment.is_empty()));
    }

    #[test]
    fn test_parse_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 25);
        assert_eq!(parse_date(&text("2026-03-25")), expected);
        assert_eq!(parse_date(&text("2026/03/25")), expected);
        assert_eq!(parse_date(&text("2026-03-25 00:00:00")), expected);
        assert_eq!(
            parse_date(&Data::DateTimeIso("2026-03-25T00:00:00".into())),
            expected
        );
        assert_eq!(parse_date(&Data::Float(46106.0)), None);
        assert_eq!(parse_date(&text("3月25日")), None);
        assert_eq!(parse_date(&Data::Empty), None);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Int(305)), "305");
        assert_eq!(cell_text(&Data::Float(101.0)), "101");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&text("講堂")), "講堂");
    }

    #[test]
    fn test_whitespace_course_is_blank() {
        let mut row = blank_row("2025-10-06");
        row[3] = text("  ");
        row[4] = text("101");
        assert!(row_to_records(&row, "3年生").is_empty());
    }

    #[test]
    fn test_zero_and_false_cells_are_empty() {
        let mut row = blank_row("2025-10-06");
        row[3] = Data::Int(0);
        row[4] = text("201");
        row[5] = Data::Bool(false);
        row[6] = text("202");
        row[7] = Data::Float(0.0);
        row[8] = text("203");
        row[13] = Data::Int(0);
        assert!(row_to_records(&row, "1年生").is_empty());

        // 0以外の数値・TRUE は授業名として残る
        row[3] = Data::Int(7);
        row[5] = Data::Bool(true);
        let records = row_to_records(&row, "1年生");
        let courses: Vec<&str> = records.iter().map(|r| r.courses.as_str()).collect();
        assert_eq!(courses, vec!["7", "true"]);
    }

    #[test]
    fn test_parse_range_is_repeatable() {
        let mut range: Range<Data> = Range::new((0, 0), (2, 13));
        range.set_value((0, 1), text("日付"));
        range.set_value((1, 1), text("2025-10-06"));
        range.set_value((1, 3), text("看護倫理"));
        range.set_value((1, 4), text("301"));
        range.set_value((2, 1), text("2025-10-07"));
        range.set_value((2, 13), text("学園祭"));

        let first = parse_range(&range, "3年生");
        let second = parse_range(&range, "3年生");
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_range_rebases_columns() {
        // 使用範囲がB列から始まるシート
        let mut range: Range<Data> = Range::new((0, 1), (0, 13));
        range.set_value((0, 1), text("2025-10-06"));
        range.set_value((0, 3), text("看護倫理"));
        range.set_value((0, 4), text("301"));

        let records = parse_range(&range, "3年生");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].period, 1);
        assert_eq!(records[0].courses, "看護倫理");
        assert_eq!(records[0].room, "301");
    }
}
