// 年度・モード判定
use chrono::{Datelike, NaiveDate};

/// 当年度と次年度（年度は4月始まり、開始年で表す）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcademicYears {
    pub current: i32,
    pub next: i32,
}

impl AcademicYears {
    /// 1〜3月なら前年が当年度
    pub fn from_date(date: NaiveDate) -> Self {
        let current = if date.month() <= 3 {
            date.year() - 1
        } else {
            date.year()
        };
        Self {
            current,
            next: current + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 当年度の前期＋後期
    CurrentOnly,
    /// 当年度後期の3/21〜31 ＋ 次年度の前期＋後期
    Mix,
}

impl Mode {
    pub fn from_date(date: NaiveDate) -> Self {
        if date.month() == 3 && (21..=31).contains(&date.day()) {
            Mode::Mix
        } else {
            Mode::CurrentOnly
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::CurrentOnly => f.write_str("current_only"),
            Mode::Mix => f.write_str("mix"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcademicContext {
    pub today: NaiveDate,
    pub years: AcademicYears,
    pub mode: Mode,
}

impl AcademicContext {
    pub fn resolve(today: NaiveDate) -> Self {
        Self {
            today,
            years: AcademicYears::from_date(today),
            mode: Mode::from_date(today),
        }
    }

    /// 当年度の最終3月（＝後期の末尾）の暦年
    pub fn march_tail_year(&self) -> i32 {
        self.years.current + 1
    }
}
