use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use songplay_cli::types::{RunSummary, TableSummary};

pub fn print_summary(result: &RunSummary) {
    if result.dry_run {
        println!("Dry run: nothing written");
    } else {
        println!("Output: {}", result.output.display());
    }
    println!(
        "Catalog: {} records from {} files",
        result.stats.catalog_records, result.catalog_files
    );
    println!(
        "Activity: {} records from {} files, {} plays",
        result.stats.activity_records, result.activity_files, result.stats.plays
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Partitions"),
        header_cell("Files"),
        header_cell("Path"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for summary in &result.tables {
        table.add_row(vec![
            table_cell(summary),
            Cell::new(summary.rows),
            count_cell(summary.partitions),
            count_cell(summary.files),
            path_cell(summary),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.total_rows()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    let dropped = [
        ("Non-play records", result.stats.non_play_records()),
        ("Unmatched plays", result.stats.unmatched_plays),
        ("Conflicting artist records", result.stats.conflicting_artists),
    ];
    if dropped.iter().any(|(_, count)| *count > 0) {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Dropped"), header_cell("Count")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for (label, count) in dropped {
            table.add_row(vec![Cell::new(label), warn_cell(count)]);
        }
        println!("{table}");
    }
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn table_cell(summary: &TableSummary) -> Cell {
    Cell::new(summary.table.name())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn path_cell(summary: &TableSummary) -> Cell {
    match &summary.path {
        Some(path) => Cell::new(path.display()),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell("-")
    }
}

fn warn_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
