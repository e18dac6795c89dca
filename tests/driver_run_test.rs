use anyhow::Result;
use fedem_driver::{
    run, Driver, DriverConfig, DriverError, SolveOptions, Solver, SolverError,
};
use serial_test::serial;
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 回傳固定狀態碼的假求解器，並記錄呼叫次數
struct FakeSolver<'a> {
    code: i32,
    calls: &'a Cell<usize>,
}

impl Solver for FakeSolver<'_> {
    fn solve_all(&mut self, model_file: &Path, _options: SolveOptions) -> fedem_driver::Result<i32> {
        assert!(model_file.is_absolute());
        self.calls.set(self.calls.get() + 1);
        Ok(self.code)
    }
}

fn write_model(work: &Path, name: &str) {
    fs::write(work.join(name), "FEDEMMODELFILE {R7.0 ASCII}\n").unwrap();
}

fn write_results_tree(work: &Path) -> PathBuf {
    let response = work.join("crane_RDB").join("response_0001");
    fs::create_dir_all(response.join("timehist_prim_0001")).unwrap();
    fs::write(response.join("th_p_1.frs"), [0x46u8, 0x52, 0x53, 0x00, 0xff]).unwrap();
    fs::write(
        response.join("timehist_prim_0001").join("th_p_1.res"),
        "solver log\n",
    )
    .unwrap();
    response
}

fn config_for(work: &Path, out: &Path) -> DriverConfig {
    DriverConfig::new(work).with_output_root(Some(out.to_string_lossy().into_owned()))
}

#[test]
fn test_successful_run_copies_results_tree() -> Result<()> {
    let work = TempDir::new()?;
    let out = TempDir::new()?;
    write_model(work.path(), "crane.fmm");
    write_results_tree(work.path());

    let calls = Cell::new(0);
    let report = Driver::new(config_for(work.path(), out.path())).run(&|| FakeSolver {
        code: 0,
        calls: &calls,
    })?;

    assert_eq!(calls.get(), 1);
    assert_eq!(report.return_code, 0);
    assert!(report.results_copied());

    let results = out.path().join("results");
    assert_eq!(
        fs::read(results.join("th_p_1.frs"))?,
        vec![0x46u8, 0x52, 0x53, 0x00, 0xff]
    );
    assert_eq!(
        fs::read_to_string(results.join("timehist_prim_0001").join("th_p_1.res"))?,
        "solver log\n"
    );
    Ok(())
}

#[test]
fn test_missing_model_never_constructs_solver() -> Result<()> {
    let work = TempDir::new()?;
    let out = TempDir::new()?;
    fs::write(work.path().join("readme.txt"), "no model here")?;

    let constructed = Cell::new(0);
    let calls = Cell::new(0);
    let err = Driver::new(config_for(work.path(), out.path()))
        .run(&|| {
            constructed.set(constructed.get() + 1);
            FakeSolver {
                code: 0,
                calls: &calls,
            }
        })
        .unwrap_err();

    assert!(matches!(
        err,
        DriverError::Solver(SolverError::NoModelFile { .. })
    ));
    assert!(err.to_string().contains("No model file found"));
    assert_eq!(constructed.get(), 0);
    assert_eq!(calls.get(), 0);
    Ok(())
}

#[test]
fn test_nonzero_code_fails_after_copying_partial_results() -> Result<()> {
    let work = TempDir::new()?;
    let out = TempDir::new()?;
    write_model(work.path(), "crane.fmm");
    write_results_tree(work.path());

    let calls = Cell::new(0);
    let err = Driver::new(config_for(work.path(), out.path()))
        .run(&|| FakeSolver {
            code: 7,
            calls: &calls,
        })
        .unwrap_err();

    assert_eq!(err.as_solver_error(), Some(&SolverError::Failed { code: 7 }));
    assert!(err.to_string().contains('7'));
    // 失敗時不回滾已複製的結果
    assert!(out.path().join("results").join("th_p_1.frs").exists());
    Ok(())
}

#[test]
fn test_nonzero_code_without_results_tree() -> Result<()> {
    let work = TempDir::new()?;
    let out = TempDir::new()?;
    write_model(work.path(), "crane.fmm");

    let calls = Cell::new(0);
    let err = Driver::new(config_for(work.path(), out.path()))
        .run(&|| FakeSolver {
            code: 7,
            calls: &calls,
        })
        .unwrap_err();

    assert_eq!(err.to_string(), "solver failed with code 7");
    assert!(!out.path().join("results").exists());
    Ok(())
}

#[test]
fn test_no_results_tree_is_not_an_error() -> Result<()> {
    let work = TempDir::new()?;
    let out = TempDir::new()?;
    write_model(work.path(), "crane.fmm");
    fs::create_dir_all(work.path().join("crane_RDB"))?;

    let calls = Cell::new(0);
    let report = Driver::new(config_for(work.path(), out.path())).run(&|| FakeSolver {
        code: 0,
        calls: &calls,
    })?;

    assert!(!report.results_copied());
    assert!(report.results_source.is_none());
    assert!(!out.path().join("results").exists());
    Ok(())
}

#[test]
fn test_missing_output_root_is_created() -> Result<()> {
    let work = TempDir::new()?;
    let out = TempDir::new()?;
    write_model(work.path(), "crane.fmm");
    write_results_tree(work.path());
    let root = out.path().join("storage").join("jobs").join("42");

    let calls = Cell::new(0);
    run(
        work.path(),
        Some(root.to_string_lossy().into_owned()),
        &|| FakeSolver {
            code: 0,
            calls: &calls,
        },
    )?;

    assert!(root.is_dir());
    assert!(root.join("results").join("th_p_1.frs").is_file());
    Ok(())
}

#[test]
fn test_second_run_collides_with_existing_results() -> Result<()> {
    let work = TempDir::new()?;
    let out = TempDir::new()?;
    write_model(work.path(), "crane.fmm");
    write_results_tree(work.path());
    let driver = Driver::new(config_for(work.path(), out.path()));

    let calls = Cell::new(0);
    let factory = || FakeSolver {
        code: 0,
        calls: &calls,
    };
    driver.run(&factory)?;
    let err = driver.run(&factory).unwrap_err();

    match err {
        DriverError::IoError(e) => assert_eq!(e.kind(), std::io::ErrorKind::AlreadyExists),
        other => panic!("expected a filesystem error, got {:?}", other),
    }
    assert_eq!(calls.get(), 2);
    Ok(())
}

#[test]
fn test_first_model_in_lexicographic_order_is_used() -> Result<()> {
    let work = TempDir::new()?;
    let out = TempDir::new()?;
    write_model(work.path(), "winch.fmm");
    write_model(work.path(), "boom.fmm");
    write_model(work.path(), "crane.fmm");

    let calls = Cell::new(0);
    let report = Driver::new(config_for(work.path(), out.path())).run(&|| FakeSolver {
        code: 0,
        calls: &calls,
    })?;

    assert_eq!(report.model_file.file_name().unwrap(), "boom.fmm");
    Ok(())
}

#[test]
#[serial]
fn test_unset_output_root_uses_current_directory() -> Result<()> {
    let work = TempDir::new()?;
    let cwd = TempDir::new()?;
    write_model(work.path(), "crane.fmm");
    write_results_tree(work.path());

    let previous = std::env::current_dir()?;
    std::env::set_current_dir(cwd.path())?;

    let calls = Cell::new(0);
    let outcome = run(work.path(), None, &|| FakeSolver {
        code: 0,
        calls: &calls,
    });
    std::env::set_current_dir(previous)?;

    let report = outcome?;
    assert_eq!(report.results_destination, Some(PathBuf::from("./results")));
    assert!(cwd.path().join("results").join("th_p_1.frs").is_file());
    Ok(())
}

#[test]
#[serial]
fn test_missing_working_dir_falls_back_to_current_directory() -> Result<()> {
    let cwd = TempDir::new()?;
    let out = TempDir::new()?;
    write_model(cwd.path(), "fallback.fmm");

    let previous = std::env::current_dir()?;
    std::env::set_current_dir(cwd.path())?;

    let calls = Cell::new(0);
    let outcome = Driver::new(config_for(&cwd.path().join("does-not-exist"), out.path()))
        .run(&|| FakeSolver {
            code: 0,
            calls: &calls,
        });
    std::env::set_current_dir(previous)?;

    let report = outcome?;
    assert_eq!(report.model_file.file_name().unwrap(), "fallback.fmm");
    Ok(())
}
