use std::env;

use approx::assert_relative_eq;

use crate::drivers::liquid_loading::{
    LiquidLoadingDriver, LiquidLoadingParams, LiquidLoadingResult, LiquidRecordFailure,
};
use crate::drivers::LiquidhamDriver;
use crate::integrals::canonicalize;
use crate::io::{read_liquidham_binary, LiquidhamFileType};
use crate::liquid::{LiquidParseParams, ParseError};

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_drivers_liquid_loading_text() {
    init_logger();
    let params = LiquidLoadingParams::default();
    let mut driver = LiquidLoadingDriver::builder()
        .parameters(&params)
        .text(Some("nuc=0.5 0,1=0.25 tst 0,0,1,1=0.125 1,1,0,0=0.125".to_string()))
        .build()
        .unwrap();
    assert!(driver.result().is_err());
    driver.run().unwrap();

    let res = driver.result().unwrap();
    assert_eq!(res.n_records, 2);
    assert_eq!(res.hamiltonians.len(), 2);
    assert!(res.failures.is_empty());

    let ham_0 = res.hamiltonian(0).unwrap();
    assert_eq!(ham_0.identity_term(), Some(0.5));
    assert_eq!(ham_0.coefficient(&canonicalize(&[1, 0]).unwrap()), Some(0.25));

    let ham_1 = res.hamiltonian(1).unwrap();
    assert_eq!(ham_1.n_terms(), 1);
    assert_eq!(
        ham_1.coefficient(&canonicalize(&[0, 0, 1, 1]).unwrap()),
        Some(0.125)
    );
}

#[test]
fn test_drivers_liquid_loading_file() {
    init_logger();
    let path = format!("{ROOT}/tests/liquid/h2_sto3g.dat");
    let params = LiquidLoadingParams::builder()
        .parse(
            LiquidParseParams::builder()
                .strict_nuclear_term(true)
                .build()
                .unwrap(),
        )
        .verbose(1)
        .build()
        .unwrap();
    let mut driver = LiquidLoadingDriver::builder()
        .parameters(&params)
        .path(Some(path.into()))
        .build()
        .unwrap();
    driver.run().unwrap();

    let res = driver.result().unwrap();
    assert_eq!(res.n_records, 3);
    let n_terms = res
        .hamiltonians
        .iter()
        .map(|(_, ham)| ham.n_terms())
        .collect::<Vec<_>>();
    assert_eq!(n_terms, vec![7, 7, 8]);
    assert!(res
        .hamiltonians
        .iter()
        .all(|(_, ham)| ham.n_orbitals() == 2));
    assert_relative_eq!(
        res.hamiltonian(2).unwrap().identity_term().unwrap(),
        0.211670884
    );
    assert_relative_eq!(
        res.hamiltonian(0)
            .unwrap()
            .coefficient(&canonicalize(&[0, 1, 1, 0]).unwrap())
            .unwrap(),
        0.181287535
    );
}

#[test]
fn test_drivers_liquid_loading_failed_record_aborts() {
    init_logger();
    let path = format!("{ROOT}/tests/liquid/h2_inconsistent.dat");
    let params = LiquidLoadingParams::default();
    let mut driver = LiquidLoadingDriver::builder()
        .parameters(&params)
        .path(Some(path.into()))
        .build()
        .unwrap();
    let err = driver.run().unwrap_err();
    assert!(err.to_string().contains("record #1"));
    assert!(matches!(
        err.downcast_ref::<ParseError>(),
        Some(ParseError::InconsistentIntegral { .. })
    ));
    assert!(driver.result().is_err());
}

#[test]
fn test_drivers_liquid_loading_failed_record_skipped() {
    init_logger();
    let path = format!("{ROOT}/tests/liquid/h2_inconsistent.dat");
    let params = LiquidLoadingParams::builder()
        .skip_failed_records(true)
        .build()
        .unwrap();
    let mut driver = LiquidLoadingDriver::builder()
        .parameters(&params)
        .path(Some(path.into()))
        .build()
        .unwrap();
    driver.run().unwrap();

    let res = driver.result().unwrap();
    assert_eq!(res.n_records, 3);
    let indices = res
        .hamiltonians
        .iter()
        .map(|(index, _)| *index)
        .collect::<Vec<_>>();
    assert_eq!(indices, vec![0, 2]);
    assert!(res.hamiltonian(1).is_none());
    assert_eq!(res.failures.len(), 1);
    assert_eq!(res.failures[0].record_index, 1);
    assert!(res.failures[0].reason.contains("inconsistent two-electron integral"));
    assert!(res.to_string().contains("Records failed: 1"));
}

#[test]
fn test_drivers_liquid_loading_source_ambiguity() {
    let params = LiquidLoadingParams::default();

    let mut driver = LiquidLoadingDriver::builder()
        .parameters(&params)
        .build()
        .unwrap();
    assert!(driver.run().is_err());

    let mut driver = LiquidLoadingDriver::builder()
        .parameters(&params)
        .text(Some("0,0=1.0".to_string()))
        .path(Some(format!("{ROOT}/tests/liquid/h2_sto3g.dat").into()))
        .build()
        .unwrap();
    assert!(driver.run().is_err());
}

#[test]
fn test_drivers_liquid_loading_missing_file() {
    let params = LiquidLoadingParams::default();
    let mut driver = LiquidLoadingDriver::builder()
        .parameters(&params)
        .path(Some(format!("{ROOT}/tests/liquid/does_not_exist.dat").into()))
        .build()
        .unwrap();
    let err = driver.run().unwrap_err();
    assert!(err.to_string().contains("does_not_exist.dat"));
}

#[test]
fn test_drivers_liquid_loading_save_result() {
    init_logger();
    let save_name = env::temp_dir().join(format!(
        "liquidham_loading_save_{}",
        std::process::id()
    ));
    let params = LiquidLoadingParams::builder()
        .result_save_name(Some(save_name.clone()))
        .build()
        .unwrap();
    let mut driver = LiquidLoadingDriver::builder()
        .parameters(&params)
        .text(Some("nuc=1.5 0,0=-1.0 tst 0,1,0,1=0.5".to_string()))
        .build()
        .unwrap();
    driver.run().unwrap();

    let saved: LiquidLoadingResult =
        read_liquidham_binary(&save_name, LiquidhamFileType::Ham).unwrap();
    let res = driver.result().unwrap();
    assert_eq!(saved.n_records, res.n_records);
    assert_eq!(saved.hamiltonians, res.hamiltonians);
    assert_eq!(saved.failures, Vec::<LiquidRecordFailure>::new());

    let mut saved_path = save_name;
    saved_path.set_extension(LiquidhamFileType::Ham.ext());
    std::fs::remove_file(saved_path).unwrap();
}

#[test]
fn test_drivers_liquid_loading_params_yaml() {
    let params: LiquidLoadingParams = serde_yaml::from_str(
        "parse:\n  strict_nuclear_term: true\nskip_failed_records: true\nverbose: 2\n",
    )
    .unwrap();
    assert!(params.parse.strict_nuclear_term);
    assert!(params.skip_failed_records);
    assert_eq!(params.verbose, 2);
    assert!(params.result_save_name.is_none());

    let display = params.to_string();
    assert!(display.contains("Skip failed records: yes"));
    assert!(display.contains("Save parsed Hamiltonians to file: no"));
}
