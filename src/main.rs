use clap::Parser;
use std::path::Path;
use std::process::ExitCode;

use credprov::breach::HttpBreachOracle;
use credprov::cli::{Args, InquirePrompter, PromptError};
use credprov::core::accounts::{ensure_outputs, load_accounts};
use credprov::{exit, logging, run_batch, Config, CredentialMode, ProvisionError};

fn main() -> ExitCode {
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();

    let (mut config, mut warnings) = Config::load();
    warnings.extend(args.apply(&mut config));

    if let Err(e) = logging::init(config.log_level, config.log_file.as_deref()) {
        eprintln!("Failed to initialise logging: {}", e);
    }
    for warning in &warnings {
        log::warn!("{}", warning);
    }
    log::debug!("Loaded config: {:?}", config);

    if let Err(e) = ctrlc::set_handler(|| {
        log::info!("Ctrl+C received, aborting provisioning");
        println!();
        std::process::exit(i32::from(exit::INTERRUPTED));
    }) {
        log::warn!("Failed to set Ctrl+C handler: {}", e);
    }

    let accounts = match load_accounts(&args.config_file)
        .and_then(|accounts| ensure_outputs(&accounts, args.output_file.as_deref()).map(|_| accounts))
    {
        Ok(accounts) => accounts,
        Err(e) => {
            println!("{}", e);
            log::error!("{}", e);
            return ExitCode::from(exit::for_config_error(&e));
        }
    };

    let mode = if args.prompt {
        CredentialMode::Interactive
    } else {
        CredentialMode::Autofill
    };
    log::info!("Provisioning {} account(s) in {:?} mode", accounts.len(), mode);

    let oracle = match HttpBreachOracle::new(&config.breach_api_url, config.breach_timeout) {
        Ok(oracle) => oracle,
        Err(e) => {
            eprintln!("Failed to build breach check client: {}", e);
            return ExitCode::from(exit::BREACH_CHECK);
        }
    };

    println!();
    match run_batch(&config, &accounts, args.output_file.as_deref(), mode, oracle, InquirePrompter::new()) {
        Ok(report) => {
            for failure in &report.failed {
                eprintln!("Skipped {}", failure);
            }
            log::info!(
                "Done: {} file(s) written, {} skipped",
                report.written.len(),
                report.failed.len()
            );
            ExitCode::SUCCESS
        }
        Err(ProvisionError::Prompt(PromptError::Interrupted)) => {
            log::info!("Provisioning interrupted by operator, nothing written");
            ExitCode::from(exit::INTERRUPTED)
        }
        Err(e) => {
            eprintln!("{}", e);
            log::error!("Provisioning aborted, nothing written: {}", e);
            ExitCode::from(exit::for_provision_error(&e))
        }
    }
}
