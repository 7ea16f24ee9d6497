// シート名 → 学年ラベルの対応表
use crate::source::Term;

pub const GRADE_4: &str = "4年生";
pub const GRADE_4_MIDWIFERY: &str = "4年助産";

/// (シート名中の学年キー, 出力用の学年ラベル)
pub const COHORTS: [(&str, &str); 9] = [
    ("1年", "1年生"),
    ("2年", "2年生"),
    ("3年", "3年生"),
    ("4年", GRADE_4),
    ("助産", GRADE_4_MIDWIFERY),
    ("M1", "M1"),
    ("M2", "M2"),
    ("D1", "D1"),
    ("D23", "D2/D3"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetMapping {
    pub sheet_name: String,
    pub grade: &'static str,
}

/// 例: `2025年度(4年後期)` → `4年生`
pub fn sheet_names_for_year(year: i32, term: Term) -> Vec<SheetMapping> {
    COHORTS
        .iter()
        .map(|(key, grade)| SheetMapping {
            sheet_name: format!("{}年度({}{})", year, key, term.label()),
            grade,
        })
        .collect()
}
