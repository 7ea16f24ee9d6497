use anyhow::{Context, Result};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

use crate::parser::parse_range;
use crate::record::ScheduleRecord;
use crate::sheet_map::{sheet_names_for_year, SheetMapping};
use crate::source::Term;

pub struct Workbook {
    inner: Xlsx<BufReader<File>>,
}

impl Workbook {
    pub fn open(path: &Path) -> Result<Self> {
        let inner: Xlsx<_> = open_workbook(path)
            .with_context(|| format!("Failed to open workbook: {}", path.display()))?;
        Ok(Self { inner })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    pub fn range(&mut self, sheet_name: &str) -> Result<Range<Data>> {
        self.inner
            .worksheet_range(sheet_name)
            .with_context(|| format!("Failed to read sheet: {}", sheet_name))
    }
}

/// 1ファイル・1学期分の読み込み結果
#[derive(Debug, Clone, Default)]
pub struct TermLoad {
    pub records: Vec<ScheduleRecord>,
    /// 実際に使った年度（見つからなければ None）
    pub year_used: Option<i32>,
}

fn has_any_sheet(sheet_names: &[String], mappings: &[SheetMapping]) -> bool {
    mappings
        .iter()
        .any(|m| sheet_names.iter().any(|name| name == &m.sheet_name))
}

/// 指定年度 → 前年度 の順で、対象シートが1枚でもある年度を探す
pub fn select_year(sheet_names: &[String], preferred_year: i32, term: Term) -> Option<i32> {
    [preferred_year, preferred_year - 1]
        .into_iter()
        .find(|&year| has_any_sheet(sheet_names, &sheet_names_for_year(year, term)))
}

/// 年度フォールバック付きで1学期分を読み込む
///
/// ファイルがない・開けない・シートが見つからない場合は警告を出して空を返す。
pub fn load_term_with_fallback(path: &Path, preferred_year: i32, term: Term) -> TermLoad {
    if !path.exists() {
        warn!("{} がありません（スキップ）", path.display());
        return TermLoad::default();
    }

    let mut workbook = match Workbook::open(path) {
        Ok(workbook) => workbook,
        Err(e) => {
            warn!("{:#}（スキップ）", e);
            return TermLoad::default();
        }
    };

    let Some(year) = select_year(&workbook.sheet_names(), preferred_year, term) else {
        warn!(
            "{} に {}/{} の {} シートが見つかりません（スキップ）",
            path.display(),
            preferred_year,
            preferred_year - 1,
            term
        );
        return TermLoad::default();
    };

    info!("{} : 使用する{}年度 = {}年度", path.display(), term, year);

    let mut records = Vec::new();
    for mapping in sheet_names_for_year(year, term) {
        match workbook.range(&mapping.sheet_name) {
            Ok(range) => records.extend(parse_range(&range, mapping.grade)),
            Err(e) => warn!("シート読み込みエラー：{} / {:#}", path.display(), e),
        }
    }

    TermLoad {
        records,
        year_used: Some(year),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook as XlsxWriter;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// (日付, 1限授業名, 1限教室, コメント)
    pub(crate) type Row<'a> = (&'a str, &'a str, &'a str, &'a str);

    /// シートごとの行からブックを作る（1行目は見出し）
    pub(crate) fn write_workbook(
        dir: &TempDir,
        file_name: &str,
        sheets: &[(&str, Vec<Row>)],
    ) -> PathBuf {
        let path = dir.path().join(file_name);
        let mut book = XlsxWriter::new();
        for (name, rows) in sheets {
            let sheet = book.add_worksheet();
            sheet.set_name(*name).unwrap();
            sheet.write_string(0, 1, "日付").unwrap();
            sheet.write_string(0, 3, "1限").unwrap();
            for (i, (date, course, room, comment)) in rows.iter().enumerate() {
                let row = i as u32 + 1;
                sheet.write_string(row, 1, *date).unwrap();
                if !course.is_empty() {
                    sheet.write_string(row, 3, *course).unwrap();
                    sheet.write_string(row, 4, *room).unwrap();
                }
                if !comment.is_empty() {
                    sheet.write_string(row, 13, *comment).unwrap();
                }
            }
        }
        book.save(&path).unwrap();
        path
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_year_prefers_target() {
        let sheets = names(&["2026年度(1年前期)", "2025年度(1年前期)"]);
        assert_eq!(select_year(&sheets, 2026, Term::Spring), Some(2026));
    }

    #[test]
    fn test_select_year_falls_back_one_year() {
        let sheets = names(&["2025年度(M1前期)", "メモ"]);
        assert_eq!(select_year(&sheets, 2026, Term::Spring), Some(2025));
    }

    #[test]
    fn test_select_year_none() {
        let sheets = names(&["2024年度(1年前期)", "2026年度(1年後期)"]);
        assert_eq!(select_year(&sheets, 2026, Term::Spring), None);
    }

    #[test]
    fn test_missing_file_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        let load = load_term_with_fallback(&dir.path().join("none.xlsx"), 2025, Term::Fall);
        assert!(load.records.is_empty());
        assert_eq!(load.year_used, None);
    }

    #[test]
    fn test_load_with_fallback() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(
            &dir,
            "spring.xlsx",
            &[
                (
                    "2025年度(1年前期)",
                    vec![("2025-04-07", "英語", "A101", "オリエンテーション")],
                ),
                ("2025年度(D23前期)", vec![("2025-04-08", "研究法", "D棟", "")]),
                ("集計", vec![("2025-04-07", "無関係", "X", "")]),
            ],
        );

        let load = load_term_with_fallback(&path, 2026, Term::Spring);
        assert_eq!(load.year_used, Some(2025));
        assert_eq!(load.records.len(), 3);
        assert_eq!(load.records[0].grade, "1年生");
        assert_eq!(load.records[0].period, 0);
        assert_eq!(load.records[1].courses, "英語");
        assert_eq!(load.records[2].grade, "D2/D3");
        assert!(load.records.iter().all(|r| r.courses != "無関係"));
    }

    #[test]
    fn test_no_matching_year_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(
            &dir,
            "fall.xlsx",
            &[("2023年度(1年後期)", vec![("2023-10-02", "英語", "A101", "")])],
        );
        let load = load_term_with_fallback(&path, 2025, Term::Fall);
        assert!(load.records.is_empty());
        assert_eq!(load.year_used, None);
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip").unwrap();
        let load = load_term_with_fallback(&path, 2025, Term::Fall);
        assert!(load.records.is_empty());
    }

    #[test]
    fn test_excel_date_cells() {
        use rust_xlsxwriter::{ExcelDateTime, Format};

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dates.xlsx");
        let mut book = XlsxWriter::new();
        let format = Format::new().set_num_format("yyyy-mm-dd");
        let sheet = book.add_worksheet();
        sheet.set_name("2025年度(2年後期)").unwrap();
        let date = ExcelDateTime::from_ymd(2025, 10, 6).unwrap();
        sheet.write_datetime_with_format(1, 1, &date, &format).unwrap();
        sheet.write_string(1, 3, "病理学").unwrap();
        sheet.write_number(1, 4, 205).unwrap();
        book.save(&path).unwrap();

        let load = load_term_with_fallback(&path, 2025, Term::Fall);
        assert_eq!(load.records.len(), 1);
        let record = &load.records[0];
        assert_eq!(record.date, chrono::NaiveDate::from_ymd_opt(2025, 10, 6).unwrap());
        assert_eq!(record.room, "205");
    }
}
