use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 時間割の1コマ（または1日分のコメント）
///
/// `period` が0のときはコメント行で、`courses`/`room` は常に空。
/// 1〜5のときは授業名が空でないコマだけが作られる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub grade: String,
    /// `YYYY-MM-DD` でシリアライズされる
    pub date: NaiveDate,
    pub period: u8,
    pub courses: String,
    pub room: String,
    pub comment: String,
}

impl ScheduleRecord {
    pub fn comment(grade: &str, date: NaiveDate, comment: String) -> Self {
        Self {
            grade: grade.to_string(),
            date,
            period: 0,
            courses: String::new(),
            room: String::new(),
            comment,
        }
    }

    pub fn lesson(grade: &str, date: NaiveDate, period: u8, courses: String, room: String) -> Self {
        Self {
            grade: grade.to_string(),
            date,
            period,
            courses,
            room,
            comment: String::new(),
        }
    }

    /// 学年だけ差し替えたコピー
    pub fn relabeled(&self, grade: &str) -> Self {
        Self {
            grade: grade.to_string(),
            ..self.clone()
        }
    }
}

/// 元ファイルの更新日時（ファイルがなければ null）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_path: String,
    pub last_modified: Option<String>,
}
