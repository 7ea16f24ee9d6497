// Excel → JSON 変換ステップ
use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

use crate::academic::{AcademicContext, Mode};
use crate::completion::backfill_midwifery;
use crate::config::Config;
use crate::exporter::{write_file_info, write_schedule};
use crate::filter::filter_march_tail;
use crate::loader::load_term_with_fallback;
use crate::record::{FileInfo, ScheduleRecord};
use crate::source::SourceFile;

/// 1ファイル分の読み込み結果（レポート用）
#[derive(Debug, Clone)]
pub struct SourceOutcome {
    pub source: SourceFile,
    pub preferred_year: i32,
    pub year_used: Option<i32>,
    pub record_count: usize,
}

#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub context: AcademicContext,
    pub sources: Vec<SourceOutcome>,
    pub backfilled: usize,
    pub records: Vec<ScheduleRecord>,
    pub schedule_path: PathBuf,
    pub infos: Vec<FileInfo>,
}

fn load_source(
    config: &Config,
    source: SourceFile,
    year: i32,
) -> (SourceOutcome, Vec<ScheduleRecord>) {
    let load = load_term_with_fallback(&config.source_path(source), year, source.term());
    let outcome = SourceOutcome {
        source,
        preferred_year: year,
        year_used: load.year_used,
        record_count: load.records.len(),
    };
    (outcome, load.records)
}

/// 変換を実行する
///
/// 元ファイルが1つもなくても `schedule.json`（空配列）と info は必ず書き出す。
pub fn run_convert(config: &Config, today: NaiveDate) -> Result<ConvertSummary> {
    let context = AcademicContext::resolve(today);
    let years = context.years;
    info!("Today: {} / Mode: {}", today, context.mode);
    info!("current_year={}, next_year={}", years.current, years.next);

    let parts = match context.mode {
        Mode::CurrentOnly => {
            info!("current_only（当年度 前期＋後期）");
            vec![
                load_source(config, SourceFile::SpringCurrent, years.current),
                load_source(config, SourceFile::FallCurrent, years.current),
            ]
        }
        Mode::Mix => {
            info!("mix（当年度 後期 3/21〜31 + 次年度 前期 + 次年度 後期）");
            let (mut outcome, fall) = load_source(config, SourceFile::FallCurrent, years.current);
            let tail = filter_march_tail(fall, context.march_tail_year());
            outcome.record_count = tail.len();
            vec![
                (outcome, tail),
                load_source(config, SourceFile::SpringNext, years.next),
                load_source(config, SourceFile::FallNext, years.next),
            ]
        }
    };

    let mut sources = Vec::new();
    let mut records = Vec::new();
    for (outcome, part) in parts {
        sources.push(outcome);
        records.extend(part);
    }

    let backfilled = backfill_midwifery(&mut records);

    let schedule_path = config.schedule_path();
    write_schedule(&records, &schedule_path)?;

    let mut infos = Vec::new();
    for source in SourceFile::ALL {
        infos.push(write_file_info(
            &config.source_path(source),
            &config.info_path(source),
        )?);
    }

    Ok(ConvertSummary {
        context,
        sources,
        backfilled,
        records,
        schedule_path,
        infos,
    })
}
