//! Integration tests for eda-cli.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::uninlined_format_args,
    clippy::cast_lossless,
    clippy::unwrap_used,
    clippy::float_cmp
)]

use std::{io::Write, path::PathBuf, sync::Arc};

use arrow::{
    array::{Float64Array, Int32Array, RecordBatch, StringArray},
    datatypes::{DataType, Field, Schema},
};
use eda_cli::{
    compute_quality_flags, compute_quality_flags_with, correlation_matrix,
    flatten_summary_for_print, missing_table, summarize_dataset, top_categories, ArrowDataset,
    CsvOptions, Dataset, DtypeKind, Error, QualityConfig,
};

const SAMPLE_CSV: &str = "age,height,city\n10,140,A\n20,150,B\n30,160,A\n,170,\n";

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

/// Creates a test dataset with the given number of rows.
fn create_test_dataset(rows: usize) -> ArrowDataset {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int32, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("score", DataType::Float64, false),
    ]));

    let ids: Vec<i32> = (0..rows as i32).collect();
    let names: Vec<String> = ids.iter().map(|i| format!("item_{}", i % 7)).collect();
    let scores: Vec<f64> = ids.iter().map(|i| *i as f64 * 1.5).collect();

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int32Array::from(ids)),
            Arc::new(StringArray::from(names)),
            Arc::new(Float64Array::from(scores)),
        ],
    )
    .ok()
    .unwrap_or_else(|| panic!("Should create batch"));

    ArrowDataset::from_batch(batch)
        .ok()
        .unwrap_or_else(|| panic!("Should create dataset"))
}

#[test]
fn test_end_to_end_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "people.csv", SAMPLE_CSV);

    // 1. Load
    let dataset = ArrowDataset::from_csv(&path).unwrap();
    assert_eq!(dataset.len(), 4);

    // 2. Summarize
    let summary = summarize_dataset(&dataset).unwrap();
    assert_eq!((summary.n_rows, summary.n_cols), (4, 3));
    assert_eq!(summary.columns[0].dtype_kind, DtypeKind::Numeric);
    assert_eq!(summary.columns[2].dtype_kind, DtypeKind::Categorical);

    // 3. Missing values
    let missing = missing_table(&dataset).unwrap();
    assert_eq!(missing.get("age").unwrap().missing_count, 1);
    assert_eq!(missing.get("city").unwrap().missing_count, 1);
    assert_eq!(missing.get("height").unwrap().missing_count, 0);

    // 4. Correlation
    let corr = correlation_matrix(&dataset).unwrap();
    assert_eq!(corr.len(), 2);
    assert!((corr.get("age", "height").unwrap() - 1.0).abs() < 1e-9);

    // 5. Top categories
    let top = top_categories(&dataset, 5, 2).unwrap();
    let city = top.get("city").unwrap();
    assert_eq!(city.rows[0].value, "A");
    assert_eq!(city.rows[0].count, 2);

    // 6. Quality flags
    let flags = compute_quality_flags(&summary, &missing).unwrap();
    assert!((0.0..=1.0).contains(&flags.quality_score));
    assert!(!flags.has_constant_columns);

    // 7. Flat view
    let table = flatten_summary_for_print(&summary);
    let batch = table.to_record_batch().unwrap();
    assert_eq!(batch.num_rows(), 3);
}

#[test]
fn test_quality_heuristics_from_csv() {
    let dataset = ArrowDataset::from_csv_str(
        "user_id,constant_col,high_card_cat,normal_cat,numeric\n\
         u1,42,a,X,1.0\n\
         u2,42,b,X,2.0\n\
         u3,42,c,Y,3.0\n\
         u2,42,d,Y,4.0\n",
    )
    .unwrap();

    let summary = summarize_dataset(&dataset).unwrap();
    let missing = missing_table(&dataset).unwrap();
    let flags = compute_quality_flags(&summary, &missing).unwrap();

    assert!(flags.has_constant_columns);
    assert!(flags.has_suspicious_id_duplicates);
    assert!(flags.has_high_cardinality_categoricals);

    let user_id = summary.column("user_id").unwrap();
    assert_eq!(user_id.unique, 3);
    assert!(user_id.unique < summary.n_rows);
}

#[test]
fn test_parquet_round_trip_profiles_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.parquet");
    let dataset = create_test_dataset(250);

    let file = std::fs::File::create(&path).unwrap();
    let mut writer =
        parquet::arrow::ArrowWriter::try_new(file, dataset.schema(), None).unwrap();
    for batch in dataset.iter() {
        writer.write(batch).unwrap();
    }
    writer.close().unwrap();

    let loaded = ArrowDataset::from_parquet(&path).unwrap();
    assert_eq!(loaded.len(), 250);

    let original = summarize_dataset(&dataset).unwrap();
    let reloaded = summarize_dataset(&loaded).unwrap();
    assert_eq!(original, reloaded);

    let name = reloaded.column("name").unwrap();
    assert_eq!(name.unique, 7);
    assert_eq!(name.example_values, vec!["item_0", "item_1", "item_2"]);
}

#[test]
fn test_json_lines_with_nulls() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "rows.jsonl",
        "{\"x\": 1.5, \"tag\": \"a\", \"ok\": true}\n\
         {\"x\": null, \"tag\": \"b\", \"ok\": false}\n\
         {\"x\": 3.5, \"ok\": true}\n",
    );

    let dataset = ArrowDataset::from_json(&path).unwrap();
    let summary = summarize_dataset(&dataset).unwrap();
    let missing = missing_table(&dataset).unwrap();

    assert_eq!(summary.column("x").unwrap().missing, 1);
    assert_eq!(summary.column("tag").unwrap().missing, 1);
    assert_eq!(summary.column("ok").unwrap().dtype_kind, DtypeKind::Boolean);
    for column in &summary.columns {
        assert_eq!(missing.get(&column.name).unwrap().missing_count, column.missing);
    }

    let top = top_categories(&dataset, 5, 5).unwrap();
    assert_eq!(top.get("ok").unwrap().rows[0].value, "true");
    assert_eq!(top.get("ok").unwrap().rows[0].count, 2);
}

#[test]
fn test_header_only_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "empty.csv", "a,b,c\n");

    let dataset = ArrowDataset::from_csv(&path).unwrap();
    assert!(dataset.is_empty());

    let summary = summarize_dataset(&dataset).unwrap();
    assert_eq!((summary.n_rows, summary.n_cols), (0, 3));

    let missing = missing_table(&dataset).unwrap();
    let flags = compute_quality_flags(&summary, &missing).unwrap();
    assert_eq!(flags.quality_score, 1.0);
}

#[test]
fn test_semicolon_csv_with_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "semi.csv", "a;b\n1;x\n1;y\n");

    let dataset =
        ArrowDataset::from_csv_with_options(&path, CsvOptions::new().with_delimiter(b';'))
            .unwrap();
    let summary = summarize_dataset(&dataset).unwrap();
    assert_eq!(summary.n_cols, 2);
    assert!(summary.column("a").unwrap().is_constant());
}

#[test]
fn test_multi_batch_csv_matches_single_batch() {
    let dir = tempfile::tempdir().unwrap();
    let mut contents = String::from("k,v\n");
    for i in 0..100 {
        contents.push_str(&format!("key_{},{}\n", i % 9, i));
    }
    let path = write_file(&dir, "big.csv", &contents);

    let batched =
        ArrowDataset::from_csv_with_options(&path, CsvOptions::new().with_batch_size(7)).unwrap();
    let single = ArrowDataset::from_csv(&path).unwrap();
    assert!(batched.num_batches() > 1);

    assert_eq!(
        summarize_dataset(&batched).unwrap(),
        summarize_dataset(&single).unwrap()
    );
    assert_eq!(
        top_categories(&batched, 5, 3).unwrap(),
        top_categories(&single, 5, 3).unwrap()
    );
}

#[test]
fn test_presets_order_scores() {
    let dataset = ArrowDataset::from_csv_str(
        "order_id,status,amount\n1,paid,10\n2,paid,\n2,paid,30\n4,,40\n",
    )
    .unwrap();
    let summary = summarize_dataset(&dataset).unwrap();
    let missing = missing_table(&dataset).unwrap();

    let score = |config: QualityConfig| {
        compute_quality_flags_with(&summary, &missing, &config)
            .unwrap()
            .quality_score
    };

    let strict = score(QualityConfig::strict());
    let default = score(QualityConfig::default());
    let lenient = score(QualityConfig::lenient());
    assert!(strict <= default);
    assert!(default <= lenient);
}

#[test]
fn test_inconsistent_pairing_is_rejected() {
    let a = ArrowDataset::from_csv_str(SAMPLE_CSV).unwrap();
    let b = ArrowDataset::from_csv_str("age,height\n1,2\n3,4\n5,6\n7,8\n").unwrap();

    let summary = summarize_dataset(&a).unwrap();
    let missing = missing_table(&b).unwrap();
    let result = compute_quality_flags(&summary, &missing);
    assert!(matches!(result, Err(Error::InconsistentInput { .. })));
}
