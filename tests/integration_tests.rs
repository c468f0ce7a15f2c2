use auto_report::analysis::{
    advanced_aggregates, correlation_matrix, descriptive_stats, grouped_mean, percentile,
};
use auto_report::charts::{ScatterSpec, render_bar_chart, render_scatter};
use auto_report::cleaning::clean_table;
use auto_report::config::PipelineConfig;
use auto_report::features::build_features;
use auto_report::loader::load_table;
use auto_report::output::{read_enriched_table, write_table};
use auto_report::pipeline::{Artifacts, PipelineOutcome, run};
use auto_report::records::{CategoryColumn, EnrichedVehicle, NumericColumn};
use auto_report::report::layout::EmbeddedImage;
use auto_report::report::{ReportInputs, assemble_report, generate_report, layout};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/automobile_sample.csv")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn enriched_fixture() -> Vec<EnrichedVehicle> {
    let raw = load_table(&fixture_path())
        .expect("Failed to read fixture")
        .expect("Fixture is missing");
    build_features(&clean_table(&raw))
}

#[test]
fn test_cleaning_imputes_missing_horsepower_with_mean() {
    let raw = load_table(&fixture_path()).unwrap().unwrap();
    let present: Vec<f64> = raw
        .iter()
        .filter_map(|r| r.horsepower.trim().parse::<f64>().ok())
        .collect();
    let expected = present.iter().sum::<f64>() / present.len() as f64;

    let cleaned = clean_table(&raw);

    assert_eq!(cleaned.len(), raw.len());
    assert!(cleaned.iter().all(|v| !v.horsepower.is_nan()));
    for (before, after) in raw.iter().zip(&cleaned) {
        if before.horsepower.trim().parse::<f64>().is_err() {
            assert!((after.horsepower - expected).abs() < 1e-9);
        }
    }
}

#[test]
fn test_analysis_over_fixture() {
    let table = enriched_fixture();

    let grouped = grouped_mean(&table, CategoryColumn::Origin, NumericColumn::Mpg);
    assert_eq!(grouped.groups.len(), 3);
    assert_eq!(grouped.groups.iter().map(|g| g.count).sum::<usize>(), table.len());
    assert_eq!(grouped.groups[0].key, "japan");

    let stats = descriptive_stats(&table, &[NumericColumn::Mpg, NumericColumn::Horsepower]);
    assert_eq!(stats.get(NumericColumn::Mpg).unwrap().count, table.len());
    assert_eq!(stats.get(NumericColumn::Mpg).unwrap().max, 46.6);

    let ranking = correlation_matrix(
        &table,
        &[NumericColumn::Mpg, NumericColumn::Weight, NumericColumn::Horsepower],
    )
    .column_ranking(NumericColumn::Mpg)
    .unwrap();
    assert_eq!(ranking.entries[0].0, NumericColumn::Mpg);
    assert!(ranking.entries.iter().skip(1).all(|(_, r)| *r < 0.0));

    let p95 = percentile(&table, NumericColumn::Acceleration, 95.0).unwrap();
    assert!((11.0..=20.5).contains(&p95));

    let aggs = advanced_aggregates(&table).unwrap();
    assert_eq!(aggs.unique_origins, 3);
    assert_eq!(aggs.best.row.name, "mazda glc");
    assert_eq!(aggs.worst.row.name, "ford f250");
}

#[test]
fn test_enriched_csv_round_trip() {
    let table = enriched_fixture();
    let path = std::env::temp_dir().join("auto_report_it_round_trip.csv");

    write_table(&path, &table).unwrap();
    let reloaded = read_enriched_table(&path).unwrap();

    assert_eq!(reloaded.len(), table.len());
    for (a, b) in table.iter().zip(&reloaded) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.full_model_year, b.full_model_year);
        assert!((a.weight_per_hp - b.weight_per_hp).abs() < 1e-9);
        assert_eq!(a.efficacite_mpg, b.efficacite_mpg);
    }

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_report_with_one_missing_chart() {
    let table = enriched_fixture();
    let dir = std::env::temp_dir();
    let scatter = dir.join("auto_report_it_scatter.png");
    let missing = dir.join("auto_report_it_missing_bar.png");
    let report_path = dir.join("auto_report_it_report.pdf");
    let _ = std::fs::remove_file(&missing);

    let root = BitMapBackend::new(&scatter, (300, 180)).into_drawing_area();
    root.fill(&WHITE).unwrap();
    root.present().unwrap();
    drop(root);

    let columns = [NumericColumn::Mpg, NumericColumn::Horsepower, NumericColumn::Weight];
    let stats = descriptive_stats(&table, &columns);
    let grouped = grouped_mean(&table, CategoryColumn::Origin, NumericColumn::Mpg);
    let correlation = correlation_matrix(&table, &columns)
        .column_ranking(NumericColumn::Mpg)
        .unwrap();
    let aggregates = advanced_aggregates(&table).unwrap();
    let inputs = ReportInputs {
        stats: &stats,
        grouped: &grouped,
        correlation: &correlation,
        percentile_column: NumericColumn::Acceleration,
        percentile_rank: 95.0,
        percentile_value: percentile(&table, NumericColumn::Acceleration, 95.0).unwrap(),
        aggregates: &aggregates,
        scatter_chart: &scatter,
        bar_chart: &missing,
    };

    let pages = layout(&assemble_report(&inputs));
    let texts: Vec<&str> = pages.iter().flat_map(|p| p.texts()).collect();
    assert_eq!(texts.iter().filter(|t| t.starts_with("Error: image not found")).count(), 1);
    assert!(texts.iter().any(|t| t.contains("mazda glc")));

    generate_report(&inputs, &report_path).unwrap();
    assert!(std::fs::read(&report_path).unwrap().starts_with(b"%PDF"));

    std::fs::remove_file(&scatter).unwrap();
    std::fs::remove_file(&report_path).unwrap();
}

#[test]
fn test_run_with_missing_input() {
    let config = PipelineConfig {
        input_path: std::env::temp_dir().join("auto_report_it_absent.csv"),
        ..Default::default()
    };
    assert_eq!(run(&config).unwrap(), PipelineOutcome::InputMissing);
}

#[test]
fn test_charts_write_decodable_pngs() {
    let table = enriched_fixture();
    let dir = scratch_dir("auto_report_it_charts");
    let scatter = dir.join("scatter.png");
    let bar = dir.join("bar.png");

    render_scatter(&table, &ScatterSpec::default(), &scatter).unwrap();
    let grouped = grouped_mean(&table, CategoryColumn::Origin, NumericColumn::Mpg);
    render_bar_chart(&grouped, &bar).unwrap();

    let scatter_png = EmbeddedImage::load(&scatter).unwrap();
    assert_eq!((scatter_png.width_px, scatter_png.height_px), (1000, 600));
    let bar_png = EmbeddedImage::load(&bar).unwrap();
    assert!(bar_png.width_px > 0 && bar_png.height_px > 0);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_run_writes_every_artifact() {
    let dir = scratch_dir("auto_report_it_full_run");
    let config = PipelineConfig {
        input_path: fixture_path(),
        output_csv_path: dir.join("data/out.csv"),
        scatter_chart_path: dir.join("img/scatter.png"),
        bar_chart_path: dir.join("img/bar.png"),
        report_path: dir.join("pdf/report.pdf"),
        ..Default::default()
    };

    let outcome = run(&config).unwrap();

    assert_eq!(
        outcome,
        PipelineOutcome::Completed(Artifacts {
            rows: 12,
            csv_saved: true,
            report_saved: true,
        })
    );
    assert_eq!(read_enriched_table(&config.output_csv_path).unwrap().len(), 12);
    assert!(config.scatter_chart_path.is_file());
    assert!(config.bar_chart_path.is_file());
    assert!(std::fs::read(&config.report_path).unwrap().starts_with(b"%PDF"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_run_survives_unwritable_csv_and_pdf() {
    let dir = scratch_dir("auto_report_it_blocked_run");
    let blocker = dir.join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let config = PipelineConfig {
        input_path: fixture_path(),
        output_csv_path: blocker.join("out.csv"),
        scatter_chart_path: dir.join("scatter.png"),
        bar_chart_path: dir.join("bar.png"),
        report_path: blocker.join("report.pdf"),
        ..Default::default()
    };

    let outcome = run(&config).unwrap();

    assert_eq!(
        outcome,
        PipelineOutcome::Completed(Artifacts {
            rows: 12,
            csv_saved: false,
            report_saved: false,
        })
    );
    assert!(config.scatter_chart_path.is_file());
    assert!(config.bar_chart_path.is_file());
    assert!(!config.output_csv_path.exists());
    assert!(!config.report_path.exists());

    std::fs::remove_dir_all(&dir).unwrap();
}
