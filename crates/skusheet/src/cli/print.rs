use chrono::{DateTime, Utc};
use colored::Colorize;
use skusheetapp::columns::STATUS_COLUMN;
use skusheetapp::commands::{CmdMessage, MessageLevel, TableSummary};
use skusheetapp::config::SheetConfig;
use skusheetapp::index::DisplayRow;
use skusheetapp::model::Row;
use skusheetapp::view::ValueCount;
use std::path::Path;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const DEFAULT_COLUMNS: &[&str] = &["商品名称", "商品编码", "SKU编码", "SKU规格", "价格"];
const MAX_CELL_WIDTH: usize = 24;
const BAR_WIDTH: usize = 30;
const VERIFIED_MARKER: &str = "✓";
const UNVERIFIED_MARKER: &str = "·";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_rows(rows: &[DisplayRow], extra_columns: &[String]) {
    if rows.is_empty() {
        println!("No rows. Import a file or add one with `skusheet add`.");
        return;
    }

    let mut columns: Vec<&str> = DEFAULT_COLUMNS.to_vec();
    for column in extra_columns {
        if !columns.contains(&column.as_str()) {
            columns.push(column);
        }
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|dr| {
            columns
                .iter()
                .map(|c| truncate_to_width(&cell_text(&dr.row, c), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(c.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let idx_width = rows
        .iter()
        .map(|dr| dr.position.to_string().len() + 1)
        .max()
        .unwrap_or(2);

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| pad_to_width(c, *w))
        .collect();
    println!(
        "{}   {}",
        " ".repeat(idx_width),
        header.join("  ").bold()
    );

    for (dr, row_cells) in rows.iter().zip(&cells) {
        let idx = format!("{:>width$}", format!("{}.", dr.position), width = idx_width);
        let marker = if dr.row.is_verified() {
            VERIFIED_MARKER.green()
        } else {
            UNVERIFIED_MARKER.dimmed()
        };
        let line: Vec<String> = row_cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad_to_width(cell, *w))
            .collect();
        println!("{} {} {}", idx.yellow(), marker, line.join("  ").trim_end());
    }
}

fn cell_text(row: &Row, column: &str) -> String {
    if column == STATUS_COLUMN {
        return row.check_status.label().to_string();
    }
    row.get(column)
        .map(|v| v.replace('\n', " "))
        .unwrap_or_default()
}

pub(super) fn print_stats(column: &str, stats: &[ValueCount]) {
    if stats.is_empty() {
        return;
    }
    let total: usize = stats.iter().map(|s| s.count).sum();
    let labels: Vec<String> = stats
        .iter()
        .map(|s| truncate_to_width(&s.value, MAX_CELL_WIDTH))
        .collect();
    let label_width = labels
        .iter()
        .map(|l| l.width())
        .chain(std::iter::once(column.width()))
        .max()
        .unwrap_or(0);
    let count_width = total.to_string().len();

    println!("{}", column.bold());
    for (stat, label) in stats.iter().zip(&labels) {
        let padded = pad_to_width(label, label_width);
        let label = if stat.is_blank() {
            padded.dimmed()
        } else {
            padded.normal()
        };
        let bar_len = (stat.count * BAR_WIDTH).div_ceil(total);
        println!(
            "  {}  {:>cw$}  {}",
            label,
            stat.count,
            "▇".repeat(bar_len).cyan(),
            cw = count_width
        );
    }
    println!(
        "{}",
        format!("{} values, {} rows", stats.len(), total).dimmed()
    );
}

pub(super) fn print_summary(summary: &TableSummary, data_dir: &Path) {
    let saved = summary
        .saved_at
        .map(format_time_ago)
        .unwrap_or_else(|| "never".to_string());
    println!("{:<10}{}", "Rows", summary.rows);
    println!(
        "{:<10}{} {}",
        "Verified",
        summary.verified,
        format!("({} unverified)", summary.rows - summary.verified).dimmed()
    );
    println!("{:<10}{}", "Products", summary.products);
    println!("{:<10}{}", "Saved", saved);
    println!("{:<10}{}", "Data", data_dir.display().to_string().dimmed());
}

pub(super) fn print_config(config: &SheetConfig, data_dir: &Path) {
    let key = match config.api_key() {
        Some(key) => mask_key(key),
        None => "(not set)".dimmed().to_string(),
    };
    let export_dir = config
        .export_dir
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(current directory)".to_string());
    let prompt = if config.extract_prompt.is_some() {
        "custom"
    } else {
        "built in"
    };

    println!("{:<22}{}", "api_base_url", config.api_base_url);
    println!("{:<22}{}", "model", config.model);
    println!("{:<22}{}", "api_key", key);
    println!("{:<22}{}", "temperature", config.temperature);
    println!("{:<22}{}", "max_tokens", config.max_tokens);
    println!("{:<22}{}", "request_timeout_secs", config.request_timeout_secs);
    println!("{:<22}{}", "export_dir", export_dir);
    println!("{:<22}{}", "extract_prompt", prompt);
    println!(
        "{}",
        format!("Config file: {}", data_dir.join(skusheetapp::config::CONFIG_FILE).display())
            .dimmed()
    );
}

fn mask_key(key: &str) -> String {
    let tail: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("****{}", tail)
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
