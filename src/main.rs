use clap::Parser;
use enroll_session::config::{CliConfig, Command};
use enroll_session::core::session::RandomizeOutcome;
use enroll_session::core::timer::format_mm_ss;
use enroll_session::core::{ConfigProvider, EnrollmentInput, Gender, Ledger};
use enroll_session::utils::{logger, validation::Validate};
use enroll_session::{
    EnrollmentStore, GroupAssigner, HttpLedger, LocalStorage, SessionManager, SessionTimer,
    TokioTicker,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    if let Err(e) = config.apply_settings() {
        tracing::error!("Failed to load settings file: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let storage = LocalStorage::new(config.data_path().to_string());
    let store = EnrollmentStore::new(storage);
    let assigner = GroupAssigner::from_entropy();
    let (timer, mut completions) = SessionTimer::new(TokioTicker);
    let mut session = SessionManager::new(store, assigner, timer);

    match config.command.clone() {
        Command::Enroll {
            name,
            phone,
            email,
            age,
            gender,
            attachment,
        } => {
            let input = EnrollmentInput {
                name: name.clone(),
                phone,
                email,
                age,
                gender: gender.parse::<Gender>()?,
                attachment_name: attachment,
            };
            let record = session.enroll(input).await?;
            println!("✅ Enrolled {} ({})", record.name, record.id);

            // Out-of-band ledger submission: the local append already
            // succeeded and is never rolled back on failure here.
            if let Some(endpoint) = config.ledger_endpoint() {
                let ledger = HttpLedger::new(endpoint.to_string());
                match ledger.submit_participant(&name).await {
                    Ok(()) => println!("📒 Recorded on the ledger"),
                    Err(e) => {
                        tracing::warn!("ledger submission failed (enrollment kept): {}", e);
                    }
                }
            }
        }
        Command::List => {
            let roster = session.roster().await?;
            if roster.is_empty() {
                println!("No enrollments yet");
            }
            for record in roster {
                println!(
                    "{}  {:<20} {:<14} {:<26} {:>3}  {:<6}  {}",
                    record.id,
                    record.name,
                    record.phone,
                    record.email,
                    record.age,
                    record.gender,
                    record.attachment_name.as_deref().unwrap_or("-"),
                );
            }
        }
        Command::Randomize => match session.randomize().await? {
            RandomizeOutcome::NothingToAssign => {
                println!("There are no users to randomize.");
            }
            RandomizeOutcome::Assigned { group_a, group_b } => {
                println!("✅ {} users in Group A, {} users in Group B", group_a, group_b);
                for record in &session.groups().group_a {
                    println!("A  {}", record.name);
                }
                for record in &session.groups().group_b {
                    println!("B  {}", record.name);
                }
            }
        },
        Command::Clear => {
            session.reset().await?;
            println!("✅ All enrollment data has been cleared.");
        }
        Command::Timer { minutes, seconds } => {
            session.set_timer(minutes, seconds)?;
            session.start_timer()?;
            println!("⏱  {}", format_mm_ss(session.timer().remaining_seconds()));

            loop {
                tokio::select! {
                    _ = completions.recv() => {
                        println!("⏱  00:00");
                        println!("✅ Timer complete!");
                        break;
                    }
                    _ = tokio::time::sleep(Duration::from_secs(1)) => {
                        println!("⏱  {}", format_mm_ss(session.timer().remaining_seconds()));
                    }
                }
            }
        }
    }

    Ok(())
}
