use colored::*;
use std::collections::BTreeMap;

use crate::convert::ConvertSummary;
use crate::fetcher::FetchSummary;
use crate::record::ScheduleRecord;
use crate::sheet_map::COHORTS;

/// 学年ごとの件数（対応表の順）
pub fn count_by_grade(records: &[ScheduleRecord]) -> Vec<(&'static str, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.grade.as_str()).or_insert(0) += 1;
    }
    COHORTS
        .iter()
        .map(|(_, grade)| (*grade, counts.get(grade).copied().unwrap_or(0)))
        .collect()
}

pub fn print_convert_report(summary: &ConvertSummary) {
    let ctx = &summary.context;

    println!("\n{}", "📅 時間割変換結果".bold());
    println!("{}", "━".repeat(50));
    println!();
    println!("🗓️  基準日: {} / モード: {}", ctx.today, ctx.mode);
    println!(
        "📚 当年度: {}年度 / 次年度: {}年度",
        ctx.years.current, ctx.years.next
    );
    println!();

    for outcome in &summary.sources {
        let label = format!("[{}]", outcome.source.file_name());
        match outcome.year_used {
            Some(year) if year == outcome.preferred_year => {
                println!("{} {}年度 {}件", label.green(), year, outcome.record_count);
            }
            Some(year) => {
                println!(
                    "{} {}年度（{}年度のシートなし）{}件",
                    label.yellow(),
                    year,
                    outcome.preferred_year,
                    outcome.record_count
                );
            }
            None => println!("{} スキップ", label.red()),
        }
    }
    println!();

    for (grade, count) in count_by_grade(&summary.records) {
        if count > 0 {
            println!("├─ {}: {}件", grade, count);
        }
    }
    if summary.backfilled > 0 {
        println!("└─ 4年助産の補完: {}件", summary.backfilled);
    }
    println!();

    println!(
        "💾 {} ({}件)",
        summary.schedule_path.display(),
        summary.records.len()
    );
    for info in &summary.infos {
        match &info.last_modified {
            Some(ts) => println!("📄 {} (更新: {})", info.file_path, ts),
            None => println!("📄 {} {}", info.file_path, "(なし)".dimmed()),
        }
    }
}

pub fn print_fetch_report(summary: &FetchSummary) {
    println!("\n{}", "📥 ダウンロード結果".bold());
    println!("{}", "━".repeat(50));
    println!();
    for download in &summary.downloads {
        let mark = if download.saved {
            "✓".green()
        } else {
            "✗".red()
        };
        println!(
            "{} {}年度 {} → {}",
            mark,
            download.year,
            download.source.term(),
            download.save_path.display()
        );
    }
    let saved = summary.downloads.iter().filter(|d| d.saved).count();
    println!();
    println!("✅ {}/{} ファイルを保存", saved, summary.downloads.len());
}
