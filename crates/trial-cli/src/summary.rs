use std::path::{Path, PathBuf};

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use trial_model::{
    FindingSeverity, RunSummary, StageOutcome, StageStatus, TableName, ValidationReport,
};

pub fn print_run_summary(summary: &RunSummary) {
    println!("Run: {}", summary.run_id);
    println!("Study: {}", summary.study_id);
    for path in &summary.skipped_sources {
        println!("Skipped source: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Status"),
        header_cell("Records"),
        header_cell("Duration"),
        header_cell("Detail"),
    ]);
    apply_stage_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for outcome in &summary.stages {
        table.add_row(stage_row(outcome));
    }
    println!("{table}");

    if let Some(report) = &summary.validation {
        print_report(report);
    }
    print_exports(&summary.exports);
}

pub fn print_report(report: &ValidationReport) {
    println!();
    if report.is_clean() {
        println!("All checks passed");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rule"),
        header_cell("Severity"),
        header_cell("Violations"),
        header_cell("Message"),
    ]);
    apply_finding_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for finding in &report.findings {
        table.add_row(vec![
            Cell::new(finding.table.as_str()),
            Cell::new(&finding.rule),
            severity_cell(finding.severity),
            Cell::new(finding.violation_count)
                .fg(severity_color(finding.severity))
                .add_attribute(Attribute::Bold),
            Cell::new(&finding.message),
        ]);
    }
    println!(
        "Findings: {} error(s), {} warning(s)",
        report.error_count(),
        report.warning_count()
    );
    println!("{table}");
}

pub fn print_exports(paths: &[PathBuf]) {
    if paths.is_empty() {
        return;
    }
    println!();
    println!("Exports:");
    for path in paths {
        println!("  {}", path.display());
    }
}

/// Row counts per canonical table; `None` for a table never written.
pub fn print_tables(store_dir: &Path, tables: &[(TableName, Option<usize>)]) {
    println!("Store: {}", store_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Columns"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (name, rows) in tables {
        table.add_row(vec![
            Cell::new(name.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(name.columns().join(", ")),
            match rows {
                Some(count) => Cell::new(count),
                None => dim_cell("not written"),
            },
        ]);
    }
    println!("{table}");
}

fn stage_row(outcome: &StageOutcome) -> Vec<Cell> {
    let records = match outcome.records {
        Some(count) => Cell::new(count),
        None => dim_cell("-"),
    };
    let duration = match outcome.status {
        StageStatus::Skipped => dim_cell("-"),
        _ => Cell::new(format!("{} ms", outcome.duration_ms)),
    };
    let detail = match &outcome.detail {
        Some(detail) => Cell::new(detail),
        None => dim_cell("-"),
    };
    vec![
        Cell::new(outcome.stage.as_str()),
        status_cell(outcome.status),
        records,
        duration,
        detail,
    ]
}

fn status_cell(status: StageStatus) -> Cell {
    match status {
        StageStatus::Succeeded => Cell::new("ok")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        StageStatus::Failed => Cell::new("failed")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        StageStatus::Skipped => dim_cell("skipped"),
    }
}

fn severity_cell(severity: FindingSeverity) -> Cell {
    Cell::new(severity.label())
        .fg(severity_color(severity))
        .add_attribute(Attribute::Bold)
}

fn severity_color(severity: FindingSeverity) -> Color {
    match severity {
        FindingSeverity::Error => Color::Red,
        FindingSeverity::Warning => Color::Yellow,
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_stage_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ColumnConstraint::UpperBoundary(Width::Percentage(60)),
    ]);
}

fn apply_finding_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(16)),
        ColumnConstraint::UpperBoundary(Width::Fixed(26)),
        ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ColumnConstraint::UpperBoundary(Width::Percentage(50)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
