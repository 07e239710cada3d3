//! Integration tests for the normalization pipelines
//!
//! Runs both pipelines over World Bank shaped fixtures and checks the
//! normalized tables on disk.

use globefin::config::{
    GlobefinConfig, PipelineConfig, EXCHANGE_RATE_INDICATOR, INFLATION_INDICATOR,
};
use globefin::error::GlobefinError;
use globefin::normalize::{
    run_all, run_exchange_rate_pipeline, run_inflation_pipeline, PipelineKind,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_exchange_rate_table_from_fixture() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("output").join("fx.csv");
    let config = PipelineConfig::new(
        fixture("API_PA.NUS.FCRF_sample.csv"),
        &output,
        EXCHANGE_RATE_INDICATOR,
    );

    let report = run_exchange_rate_pipeline(&config).unwrap();

    // 1989 and 1990 fall before 1991; India has no 1993 value
    assert_eq!(report.rows, 4);
    assert_eq!(report.first_year, 1991);
    assert_eq!(report.last_year, 1995);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Year,SGD-to-INR,USD-to-SGD,USD-to-INR\n\
         1991,13.1642,1.7276,22.7424\n\
         1992,15.9104,1.6290,25.9181\n\
         1994,20.5392,1.5275,31.3737\n\
         1995,22.8779,1.4174,32.4271\n"
    );
}

#[test]
fn test_inflation_table_from_fixture() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("cpi.csv");
    let config = PipelineConfig::new(
        fixture("API_FP.CPI.TOTL.ZG_sample.csv"),
        &output,
        INFLATION_INDICATOR,
    );

    let report = run_inflation_pipeline(&config).unwrap();

    assert_eq!(report.rows, 5);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Year,SGD Inflation (%),INR Inflation (%),USD Inflation (%)\n\
         1991,3.4300,13.8702,4.2400\n\
         1992,2.2700,11.7878,3.0300\n\
         1993,2.2900,6.3269,2.9500\n\
         1994,3.1000,10.2479,2.6100\n\
         1995,1.7200,10.2249,2.8100\n"
    );
}

#[test]
fn test_min_year_is_configurable() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("cpi.csv");
    let config = PipelineConfig::new(
        fixture("API_FP.CPI.TOTL.ZG_sample.csv"),
        &output,
        INFLATION_INDICATOR,
    )
    .with_min_year(1990);

    let report = run_inflation_pipeline(&config).unwrap();
    assert_eq!(report.first_year, 1990);
    assert_eq!(report.rows, 6);
}

#[test]
fn test_missing_source_is_hard_failure() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("fx.csv");
    let config = PipelineConfig::new(
        dir.path().join("API_missing.csv"),
        &output,
        EXCHANGE_RATE_INDICATOR,
    );

    let err = run_exchange_rate_pipeline(&config).unwrap_err();

    assert!(matches!(err, GlobefinError::MissingSource { .. }));
    assert!(!output.exists());
}

#[test]
fn test_no_aligned_data_leaves_existing_table() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("fx.csv");
    fs::write(&output, "Year,SGD-to-INR,USD-to-SGD,USD-to-INR\n1980,1.0,1.0,1.0\n").unwrap();

    let config = PipelineConfig::new(
        fixture("API_PA.NUS.FCRF_sample.csv"),
        &output,
        EXCHANGE_RATE_INDICATOR,
    )
    .with_min_year(2100);

    let err = run_exchange_rate_pipeline(&config).unwrap_err();

    assert!(matches!(err, GlobefinError::NoAlignedData { min_year: 2100, .. }));
    assert!(fs::read_to_string(&output).unwrap().contains("1980"));
}

#[test]
fn test_no_aligned_data_writes_nothing() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out").join("cpi.csv");

    // Wrong indicator code: no rows match, so no year can align
    let config = PipelineConfig::new(
        fixture("API_FP.CPI.TOTL.ZG_sample.csv"),
        &output,
        EXCHANGE_RATE_INDICATOR,
    );

    let err = run_inflation_pipeline(&config).unwrap_err();
    assert!(matches!(err, GlobefinError::NoAlignedData { .. }));
    assert!(!output.exists());
}

#[test]
fn test_zero_singapore_rate() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("API_zero.csv");
    let output = dir.path().join("fx.csv");
    fs::write(
        &input,
        "\"Data Source\",\"World Development Indicators\",\n\n\"Last Updated Date\",\"2024-06-28\",\n\n\
         \"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\",\"2010\",\n\
         \"Singapore\",\"SGP\",\"x\",\"PA.NUS.FCRF\",\"0\",\n\
         \"India\",\"IND\",\"x\",\"PA.NUS.FCRF\",\"70\",\n\
         \"United States\",\"USA\",\"x\",\"PA.NUS.FCRF\",\"1\",\n",
    )
    .unwrap();

    let config = PipelineConfig::new(&input, &output, EXCHANGE_RATE_INDICATOR);
    run_exchange_rate_pipeline(&config).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Year,SGD-to-INR,USD-to-SGD,USD-to-INR\n2010,,0.0000,70.0000\n"
    );
}

#[test]
fn test_run_all_from_config() {
    let dir = tempdir().unwrap();
    let config = GlobefinConfig {
        input_dir: fixture(""),
        output_dir: dir.path().join("output"),
        exchange_rate_input: PathBuf::from("API_PA.NUS.FCRF_sample.csv"),
        inflation_input: PathBuf::from("API_FP.CPI.TOTL.ZG_sample.csv"),
        ..GlobefinConfig::default()
    };

    let results = run_all(&config);

    assert_eq!(results.len(), 2);
    for (kind, result) in &results {
        let report = result.as_ref().unwrap();
        match kind {
            PipelineKind::ExchangeRate => assert_eq!(report.output, config.exchange_rate_table()),
            PipelineKind::Inflation => assert_eq!(report.output, config.inflation_table()),
        }
        assert!(report.output.exists());
    }
}

#[test]
fn test_run_all_continues_after_failure() {
    let dir = tempdir().unwrap();
    let config = GlobefinConfig {
        input_dir: fixture(""),
        output_dir: dir.path().to_path_buf(),
        exchange_rate_input: PathBuf::from("API_not_there.csv"),
        inflation_input: PathBuf::from("API_FP.CPI.TOTL.ZG_sample.csv"),
        ..GlobefinConfig::default()
    };

    let results = run_all(&config);

    assert!(matches!(
        results[0],
        (PipelineKind::ExchangeRate, Err(GlobefinError::MissingSource { .. }))
    ));
    assert!(results[1].1.is_ok());
    assert!(config.inflation_table().exists());
}
