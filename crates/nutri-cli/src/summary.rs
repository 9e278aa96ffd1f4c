use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use nutri_cli::types::PipelineReport;

pub fn print_summary(report: &PipelineReport) {
    println!("Table: {}", report.table);
    if report.downloaded {
        let end = if report.source_exhausted {
            " (no more products)"
        } else {
            ""
        };
        println!(
            "Pages: {} fetched, {} failed{end}",
            report.pages_fetched, report.pages_failed
        );
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let extracted = report.downloaded.then_some(report.products_extracted);
    table.add_row(vec![
        Cell::new("Extract"),
        count_cell(extracted),
        path_cell(report.downloaded.then_some(&report.original_csv)),
    ]);
    table.add_row(vec![
        Cell::new("Clean"),
        count_cell(report.rows_cleaned),
        path_cell(report.cleaned_csv.as_ref()),
    ]);
    table.add_row(vec![
        Cell::new("Load"),
        count_cell(report.load.map(|l| l.rows_loaded)),
        match report.load {
            Some(load) if load.bad_records > 0 => Cell::new(format!(
                "{} columns, {} bad records skipped",
                load.columns, load.bad_records
            ))
            .fg(Color::Yellow),
            Some(load) => Cell::new(format!("{} columns", load.columns)),
            None => Cell::new("failed").fg(Color::Red),
        },
    ]);
    table.add_row(vec![
        Cell::new("Fetch"),
        count_cell(report.rows_fetched),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        Cell::new("Transform")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(report.rows_transformed).add_attribute(Attribute::Bold),
        path_cell(report.transformed_csv.as_ref()),
    ]);
    println!("{table}");

    for error in &report.errors {
        eprintln!("error: {error}");
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
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

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn path_cell(path: Option<&PathBuf>) -> Cell {
    match path {
        Some(path) => Cell::new(path.display()).fg(Color::Green),
        None => dim_cell("-"),
    }
}
