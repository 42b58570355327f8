use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{CleanResult, ExtractResult, RunResult};

pub fn print_extract_summary(result: &ExtractResult) {
    println!("Output: {}", result.output_dir.display());
    println!(
        "Unresolved names: {} ({})",
        result.unresolved_count,
        result.unresolved_names.display()
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Records"),
        header_cell("Resolved"),
        header_cell("Failed"),
        header_cell("Table"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_records = 0usize;
    let mut total_resolved = 0usize;
    let mut total_failures = 0usize;
    for file in &result.files {
        total_records += file.records;
        total_resolved += file.resolved;
        total_failures += file.failures;
        table.add_row(vec![
            Cell::new(file_name(&file.source))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(file.records),
            Cell::new(file.resolved),
            count_cell(file.failures, Color::Yellow),
            Cell::new(file_name(&file.output)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        Cell::new(total_resolved).add_attribute(Attribute::Bold),
        count_cell(total_failures, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    if result.has_errors() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn print_clean_summary(result: &CleanResult) {
    println!("Cleaned table: {}", result.output.display());
    println!(
        "Batches: {}  Columns: {}  Rarity passes: {}",
        result.batches, result.columns, result.report.rarity.passes
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows"),
        header_cell("Removed"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let mut previous: Option<usize> = None;
    for stage in &result.report.stages {
        let removed = previous.map(|rows| rows.saturating_sub(stage.rows));
        previous = Some(stage.rows);
        table.add_row(vec![
            Cell::new(stage.stage),
            Cell::new(stage.rows),
            match removed {
                Some(count) => count_cell(count, Color::Red),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
    if result.report.rarity.values_rewritten > 0 {
        println!(
            "Rewritten to \"other\": {}",
            result.report.rarity.values_rewritten
        );
    }
}

pub fn print_run_summary(result: &RunResult) {
    print_extract_summary(&result.extract);
    println!();
    print_clean_summary(&result.clean);
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
