//! End-to-end workflow tests for the regression analysis driver.
//!
//! These exercise the full extraction → solve → errors → checks → fill
//! sequence over small synthetic records with known answers.

use assert_approx_eq::assert_approx_eq;
use hydro_regression::*;

/// X = 1..=12 over Jan..Dec of one year; Y = 2t with months 1 and 4 missing.
fn matched_scenario() -> (RegularSeries, RegularSeries) {
    let x = RegularSeries::monthly(2000, 1, (1..=12).map(f64::from).collect()).unwrap();
    let mut observed: Vec<f64> = (1..=12).map(|t| 2.0 * f64::from(t)).collect();
    observed[0] = DEFAULT_MISSING_SENTINEL;
    observed[3] = DEFAULT_MISSING_SENTINEL;
    let y = RegularSeries::monthly(2000, 1, observed).unwrap();
    (x, y)
}

#[test]
fn matched_extraction_pairs_only_where_both_are_present() {
    let (x, y) = matched_scenario();
    let config = AnalysisConfig::default().with_scopes(ScopeSelection::both());
    let analysis = RegressionAnalysis::new(&x, &y, config).unwrap();

    let single = analysis.dataset().single_equation_samples().unwrap();
    assert_eq!(
        single.x1(),
        &[2.0, 3.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0]
    );
    assert_eq!(
        single.y1(),
        &[4.0, 6.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0]
    );
    assert_eq!(single.n1(), 10);

    // Months whose only observation is missing have empty paired samples.
    let january = analysis.dataset().monthly_equation_samples(1).unwrap();
    assert_eq!(january.n1(), 0);
    let april = analysis.dataset().monthly_equation_samples(4).unwrap();
    assert_eq!(april.n1(), 0);
    let february = analysis.dataset().monthly_equation_samples(2).unwrap();
    assert_eq!(february.x1(), &[2.0]);
    assert_eq!(february.y1(), &[4.0]);
}

#[test]
fn monthly_mode_always_yields_twelve_records() {
    let (x, y) = matched_scenario();
    let config = AnalysisConfig::default().with_scopes(ScopeSelection::both());
    let analysis = RegressionAnalysis::new(&x, &y, config).unwrap();
    let outcome = analysis.analyze(&CheckCriteria::default()).unwrap();

    for month in 1..=12 {
        assert!(outcome.results.monthly_equation(month).is_some());
        assert!(outcome.errors.monthly_equation(month).is_some());
        assert!(outcome.checks.monthly_equation(month).is_some());
    }

    // Sparse months are undefined, never absent and never an error.
    assert!(!outcome.results.monthly_equation(1).unwrap().is_defined());
    assert!(!outcome.results.monthly_equation(4).unwrap().is_defined());

    // Month 2 has one pair: below the default minimum sample size.
    let february = outcome.checks.monthly_equation(2).unwrap();
    assert_eq!(february.n1(), 1);
    assert!(!february.sample_size_ok());
    assert!(!february.passed());
}

#[test]
fn pairing_invariant_holds_across_configurations() {
    let (x, y) = matched_scenario();
    for months in [vec![], vec![2, 3, 5], vec![12]] {
        let config = AnalysisConfig::default()
            .with_scopes(ScopeSelection::both())
            .with_analysis_months(months);
        let analysis = RegressionAnalysis::new(&x, &y, config).unwrap();
        let dataset = analysis.dataset();
        let single = dataset.single_equation_samples().unwrap();
        assert_eq!(single.x1().len(), single.y1().len());
        for month in 1..=12 {
            let samples = dataset.monthly_equation_samples(month).unwrap();
            assert_eq!(samples.x1().len(), samples.y1().len());
        }
    }
}

#[test]
fn single_equation_fit_recovers_the_generating_line() {
    let (x, y) = matched_scenario();
    let analysis = RegressionAnalysis::new(&x, &y, AnalysisConfig::default()).unwrap();
    let results = analysis.solve().unwrap();
    let record = results.single_equation().unwrap();
    let fit = record.statistics().unwrap();
    assert_approx_eq!(fit.slope, 2.0, 1e-10);
    assert_approx_eq!(fit.intercept, 0.0, 1e-10);
    assert_approx_eq!(fit.correlation, 1.0, 1e-10);
    assert_eq!(record.n1(), 10);

    let errors = analysis.estimate_errors(&results);
    let stats = errors.single_equation().unwrap().statistics().unwrap();
    assert_approx_eq!(stats.standard_error_of_estimate, 0.0, 1e-9);
    assert_approx_eq!(stats.mean_bias, 0.0, 1e-9);
}

#[test]
fn fill_estimates_missing_values_and_counts_skips() {
    let (x, y) = matched_scenario();
    let analysis = RegressionAnalysis::new(&x, &y, AnalysisConfig::default()).unwrap();
    let outcome = analysis.analyze(&CheckCriteria::default()).unwrap();

    assert_eq!(outcome.filled.filled_count(), 2);
    assert_approx_eq!(outcome.filled.values()[0], 2.0, 1e-9);
    assert_approx_eq!(outcome.filled.values()[3], 8.0, 1e-9);
    assert_eq!(outcome.filled.fills()[0].scope, EquationScope::Single);
    assert_eq!(outcome.filled.skipped_missing_independent(), 0);
}

#[test]
fn move2_independent_sample_ignores_dependent_missingness() {
    // X spans two years; Y exists only in the first.
    let x = RegularSeries::monthly(2000, 1, (1..=24).map(f64::from).collect()).unwrap();
    let mut observed: Vec<f64> = (1..=24).map(|t| 2.0 * f64::from(t)).collect();
    for value in observed.iter_mut().skip(12) {
        *value = DEFAULT_MISSING_SENTINEL;
    }
    let y = RegularSeries::monthly(2000, 1, observed).unwrap();

    let config = AnalysisConfig::default()
        .with_method(AnalysisMethod::Move2)
        .with_dependent_period(PeriodRange::new(
            chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2000, 12, 1).unwrap(),
        ));
    let analysis = RegressionAnalysis::new(&x, &y, config).unwrap();

    let samples = analysis.dataset().single_equation_samples().unwrap();
    assert_eq!(samples.n1(), 12);
    // The independent sample covers X's full record, including the year
    // where Y is entirely missing.
    assert_eq!(samples.n2(), 24);

    // With Y = 2X exactly, the MOVE.2 line coincides with the OLS line.
    let results = analysis.solve().unwrap();
    let fit = results.single_equation().unwrap().statistics().unwrap();
    assert_approx_eq!(fit.slope, 2.0, 1e-9);
    assert_approx_eq!(fit.intercept, 0.0, 1e-9);
}

#[test]
fn move2_with_entirely_missing_dependent_is_undefined_not_an_error() {
    let x = RegularSeries::monthly(2000, 1, (1..=20).map(f64::from).collect()).unwrap();
    let y = RegularSeries::monthly(2000, 1, vec![DEFAULT_MISSING_SENTINEL; 20]).unwrap();

    let config = AnalysisConfig::default().with_method(AnalysisMethod::Move2);
    let analysis = RegressionAnalysis::new(&x, &y, config).unwrap();
    let samples = analysis.dataset().single_equation_samples().unwrap();
    assert_eq!(samples.n1(), 0);
    assert_eq!(samples.n2(), 20);

    let results = analysis.solve().unwrap();
    let record = results.single_equation().unwrap();
    assert!(!record.is_defined());
    assert_eq!(record.n2(), 20);
}

#[test]
fn log_transform_fit_and_fill_stay_in_base_ten() {
    // Y = X² is linear in log10 space. March is missing and must be filled
    // with 3² = 9 after inverting the transform.
    let x = RegularSeries::monthly(2000, 1, (1..=8).map(f64::from).collect()).unwrap();
    let mut observed: Vec<f64> = (1..=8).map(|t| f64::from(t * t)).collect();
    observed[2] = DEFAULT_MISSING_SENTINEL;
    let y = RegularSeries::monthly(2000, 1, observed).unwrap();

    let config = AnalysisConfig::default().with_transform(DataTransform::Log10);
    let analysis = RegressionAnalysis::new(&x, &y, config).unwrap();
    let outcome = analysis.analyze(&CheckCriteria::default()).unwrap();

    let fit = outcome.results.single_equation().unwrap().statistics().unwrap();
    assert_approx_eq!(fit.slope, 2.0, 1e-9);
    assert_approx_eq!(fit.intercept, 0.0, 1e-9);

    assert_eq!(outcome.filled.filled_count(), 1);
    assert_approx_eq!(outcome.filled.values()[2], 9.0, 1e-6);
}

#[test]
fn checks_with_thresholds_gate_on_fit_quality() {
    let (x, y) = matched_scenario();
    let analysis = RegressionAnalysis::new(&x, &y, AnalysisConfig::default()).unwrap();
    let results = analysis.solve().unwrap();

    let criteria = CheckCriteria {
        minimum_sample_size: 5,
        minimum_correlation: Some(0.9),
        confidence_level: Some(0.95),
    };
    let checks = analysis.evaluate_checks(&results, &criteria).unwrap();
    let record = checks.single_equation().unwrap();
    assert!(record.sample_size_ok());
    assert!(record.correlation_ok());
    assert!(record.confidence_ok());
    assert!(record.passed());
    assert!(checks.all_passed());
}
