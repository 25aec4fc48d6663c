use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Table};

use songplay_cli::pipeline::run_pipeline;
use songplay_cli::types::RunSummary;
use songplay_model::{PipelineConfig, SaveMode, TableKind};
use songplay_output::ParquetTableWriter;

use crate::cli::RunArgs;
use crate::summary::{apply_table_style, header_cell};

pub fn run_tables() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Directory"),
        header_cell("Columns"),
        header_cell("Partitioned by"),
        header_cell("Unique key"),
    ]);
    apply_table_style(&mut table);
    for kind in TableKind::ALL {
        let schema = kind.schema();
        let columns = schema
            .columns
            .iter()
            .map(|column| {
                let marker = if column.nullable { "?" } else { "" };
                format!("{}: {}{marker}", column.name, column.column_type)
            })
            .collect::<Vec<_>>()
            .join("\n");
        let partitions = if schema.is_partitioned() {
            schema.partition_by.join(", ")
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            Cell::new(kind.name()),
            Cell::new(kind.dir_name()),
            Cell::new(columns),
            Cell::new(partitions),
            Cell::new(schema.unique_key.unwrap_or("-")),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_etl(args: &RunArgs) -> Result<RunSummary> {
    let config = resolve_config(args)?;
    let writer = ParquetTableWriter::new(&config.output, config.save_mode);
    run_pipeline(&config, &writer)
}

/// Builds the pipeline configuration from the config file, if any, and the flags.
fn resolve_config(args: &RunArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = PipelineConfig::from_json_file(path)
                .with_context(|| format!("load config {}", path.display()))?;
            if let Some(input) = &args.input {
                config.catalog.location = input.clone();
                config.activity.location = input.clone();
            }
            if let Some(output) = &args.output {
                config.output = output.clone();
            }
            config
        }
        None => {
            let (Some(input), Some(output)) = (&args.input, &args.output) else {
                bail!("INPUT and --output are required unless --config is given");
            };
            PipelineConfig::new(input, output)
        }
    };

    if let Some(pattern) = &args.catalog_pattern {
        config.catalog.pattern = pattern.clone();
    }
    if let Some(pattern) = &args.activity_pattern {
        config.activity.pattern = pattern.clone();
    }
    if let Some(action) = &args.play_action {
        config = config.with_play_action(action.clone());
    }
    if args.overwrite {
        config = config.with_save_mode(SaveMode::Overwrite);
    }
    if args.dry_run {
        config = config.with_dry_run(true);
    }
    Ok(config)
}
