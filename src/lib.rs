// schedule-feedライブラリのエントリポイント
// fetch（SharePoint → Excel）と convert（Excel → JSON）の2ステップ

pub mod academic;
pub mod completion;
pub mod config;
pub mod convert;
pub mod error_helper;
pub mod exporter;
pub mod fetcher;
pub mod filter;
pub mod loader;
pub mod parser;
pub mod record;
pub mod reporter;
pub mod sheet_map;
pub mod source;

// 再エクスポート
pub use academic::{AcademicContext, AcademicYears, Mode};
pub use config::{Config, Credentials};
pub use convert::{run_convert, ConvertSummary};
pub use fetcher::{run_fetch, FetchSummary};
pub use record::{FileInfo, ScheduleRecord};
pub use source::{SourceFile, Term};
