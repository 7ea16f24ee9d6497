// 時間割ファイルの役割（前期/後期 × 当年度/次年度）

/// 学期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    Spring,
    Fall,
}

impl Term {
    /// シート名に埋め込まれるラベル
    pub fn label(self) -> &'static str {
        match self {
            Term::Spring => "前期",
            Term::Fall => "後期",
        }
    }

    /// SharePoint上のファイル名に使われる期間表記
    pub fn month_span(self) -> &'static str {
        match self {
            Term::Spring => "04～09月 前期",
            Term::Fall => "10～03月 後期",
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFile {
    SpringCurrent,
    FallCurrent,
    SpringNext,
    FallNext,
}

impl SourceFile {
    /// ダウンロード順・info出力順
    pub const ALL: [SourceFile; 4] = [
        SourceFile::SpringCurrent,
        SourceFile::FallCurrent,
        SourceFile::SpringNext,
        SourceFile::FallNext,
    ];

    pub fn term(self) -> Term {
        match self {
            SourceFile::SpringCurrent | SourceFile::SpringNext => Term::Spring,
            SourceFile::FallCurrent | SourceFile::FallNext => Term::Fall,
        }
    }

    pub fn is_next(self) -> bool {
        matches!(self, SourceFile::SpringNext | SourceFile::FallNext)
    }

    /// fetchとconvertで共有するローカルファイル名
    pub fn file_name(self) -> &'static str {
        match self {
            SourceFile::SpringCurrent => "schedule_spring_CURRENT.xlsx",
            SourceFile::FallCurrent => "schedule_fall_CURRENT.xlsx",
            SourceFile::SpringNext => "schedule_spring_NEXT.xlsx",
            SourceFile::FallNext => "schedule_fall_NEXT.xlsx",
        }
    }

    pub fn info_name(self) -> &'static str {
        match self {
            SourceFile::SpringCurrent => "info_spring_current.json",
            SourceFile::FallCurrent => "info_fall_current.json",
            SourceFile::SpringNext => "info_spring_next.json",
            SourceFile::FallNext => "info_fall_next.json",
        }
    }
}
