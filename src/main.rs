use clap::Parser;
use fedem_driver::utils::{logger, validation::Validate};
use fedem_driver::{CliConfig, Driver, DriverError, ProcessSolver, Settings};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_service_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting fedem-driver");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = execute(&config) {
        tracing::error!(
            "❌ Driver failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}

fn execute(config: &CliConfig) -> Result<(), DriverError> {
    let settings = config.resolve()?;
    settings.validate()?;

    let Settings { driver, solver } = settings;
    let driver = Driver::new(driver);

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the solver will not be started");
        let plan = driver.plan()?;
        if config.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            println!("Model file:  {}", plan.model_file.display());
            for ignored in &plan.other_model_files {
                println!("Ignored:     {}", ignored.display());
            }
            match &plan.results_source {
                Some(source) => println!("Results:     {}", source.display()),
                None => println!("Results:     (none yet)"),
            }
            println!("Destination: {}", plan.results_destination.display());
            println!("Solver:      {} {}", solver.program, solver.args.join(" "));
        }
        return Ok(());
    }

    let report = driver.run(&|| ProcessSolver::new(solver.clone()))?;
    tracing::info!("✅ Solve completed successfully");

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
