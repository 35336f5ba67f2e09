use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use panel_core::*;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "pumppanel")]
#[command(about = "Patient control panel for the sensor-pump device", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive control panel (default)
    Run,

    /// Print the 7-day medication calendar window
    Week {
        /// Whole weeks to shift from the current week (negative = past)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },

    /// List the screening questionnaire conditions
    Conditions,
}

fn main() -> Result<()> {
    // Initialize logging
    panel_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Week { offset }) => cmd_week(offset, &config),
        Some(Commands::Conditions) => cmd_conditions(),
        Some(Commands::Run) | None => cmd_run(&config),
    }
}

fn cmd_week(offset: i64, config: &Config) -> Result<()> {
    // An empty scheduler prints the bare calendar window.
    let meds = MedicationScheduler::new();
    print_week(offset, &meds, config);
    Ok(())
}

fn cmd_conditions() -> Result<()> {
    for entry in condition_catalog() {
        let effect = if entry.dangerous {
            "blocks pump access"
        } else {
            "allows pump access"
        };
        println!("{:<12} {}", entry.id, effect);
    }
    Ok(())
}

/// The hosting shell: screening first, dashboard on a pass, back to
/// screening after a block's redirect.
fn cmd_run(config: &Config) -> Result<()> {
    let stdin = io::stdin();

    loop {
        match run_screening(&stdin)? {
            ScreeningOutcome::Passed => break,
            ScreeningOutcome::Blocked => continue,
            ScreeningOutcome::Quit => return Ok(()),
        }
    }

    run_dashboard(&stdin, config)
}

enum ScreeningOutcome {
    Passed,
    Blocked,
    Quit,
}

fn run_screening(stdin: &io::Stdin) -> Result<ScreeningOutcome> {
    let mut gate = ScreeningGate::new();

    println!("Safety screening - select every condition that applies.");
    print_gate(&gate);
    println!("Commands: toggle <id> | terms on|off | submit | quit");

    let mut line = String::new();
    loop {
        print!("screening> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            return Ok(ScreeningOutcome::Quit); // EOF
        }

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("toggle"), Some(id)) => {
                gate.toggle_condition(id);
                print_gate(&gate);
            }
            (Some("terms"), Some("on")) => gate.set_terms_accepted(true),
            (Some("terms"), Some("off")) => gate.set_terms_accepted(false),
            (Some("submit"), _) => match gate.submit(Instant::now()) {
                Some(GateDecision::Passed) => {
                    println!("Screening passed.");
                    return Ok(ScreeningOutcome::Passed);
                }
                Some(GateDecision::Blocked) => {
                    println!("For your safety, the pump cannot be used with the selected conditions.");
                    println!("Returning to the start shortly...");
                    return wait_out_block(gate);
                }
                None => println!("Accept the terms and select at least one option first."),
            },
            (Some("quit"), _) => return Ok(ScreeningOutcome::Quit),
            (None, _) => {}
            (Some(other), _) => {
                tracing::debug!("unknown screening command {:?}", other);
                println!("Unknown command.");
            }
        }
    }
}

/// Sit on the blocked screen until the gate's redirect fires.
fn wait_out_block(mut gate: ScreeningGate) -> Result<ScreeningOutcome> {
    loop {
        std::thread::sleep(Duration::from_millis(100));
        if let Some(GateEvent::ReturnToEntry) = gate.poll(Instant::now()) {
            return Ok(ScreeningOutcome::Blocked);
        }
    }
}

fn print_gate(gate: &ScreeningGate) {
    for entry in condition_catalog() {
        let mark = if gate.is_selected(entry.id) { "x" } else { " " };
        println!("  [{}] {}", mark, entry.id);
    }
}

fn run_dashboard(stdin: &io::Stdin, config: &Config) -> Result<()> {
    let link = HttpDeviceLink::new(config.device.host.clone(), config.device.timeout());
    let mut session = PumpSession::new(link);
    let mut meds = MedicationScheduler::new();
    seed_demo_medications(&mut meds);
    let mut week_offset: i64 = 0;

    println!("Dashboard.");
    println!("Commands: start | stop | intensity low|medium|high | status");
    println!("          add <name> <dosage> <HH:MM> <0-6> | remove <id>");
    println!("          week | prev | next | today | quit");

    let mut line = String::new();
    loop {
        let now = Instant::now();
        session.poll(now);
        meds.poll(now);

        print!("panel> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["start"] => {
                if session.is_active() {
                    println!("Pump is already running.");
                } else {
                    session.toggle(Instant::now());
                    println!("Pump started.");
                }
            }
            ["stop"] => {
                if session.is_active() {
                    session.toggle(Instant::now());
                    println!("Pump stopped.");
                } else {
                    println!("Pump is not running.");
                }
            }
            ["intensity", level] => match *level {
                "low" => session.set_intensity(PumpIntensity::Low),
                "medium" => session.set_intensity(PumpIntensity::Medium),
                "high" => session.set_intensity(PumpIntensity::High),
                other => println!("Unknown intensity: {}", other),
            },
            ["add", name, dosage, schedule, day] => {
                let weekday = day.parse().unwrap_or(u8::MAX);
                meds.add(Instant::now(), name, dosage, schedule, weekday);
            }
            ["remove", id] => match Uuid::parse_str(id) {
                Ok(id) => meds.remove(id),
                Err(_) => println!("Medication ids are UUIDs; see 'week'."),
            },
            ["week"] => print_week(week_offset, &meds, config),
            ["prev"] => {
                week_offset -= 1;
                print_week(week_offset, &meds, config);
            }
            ["next"] => {
                week_offset += 1;
                print_week(week_offset, &meds, config);
            }
            ["today"] => {
                week_offset = 0;
                print_week(week_offset, &meds, config);
            }
            ["status"] => print_status(&session, &meds),
            ["quit"] => break,
            [] => {}
            _ => println!("Unknown command."),
        }
    }

    Ok(())
}

fn print_status<D: DeviceLink>(session: &PumpSession<D>, meds: &MedicationScheduler) {
    if session.is_active() {
        println!(
            "Pump: RUNNING  {}  intensity {:?}",
            format_elapsed(session.elapsed_seconds()),
            session.intensity()
        );
    } else {
        println!("Pump: ready  intensity {:?}", session.intensity());
    }

    if meds.success_visible() {
        println!("Medication added.");
    }
    println!("{} medications scheduled", meds.medications().len());
}

fn print_week(offset: i64, meds: &MedicationScheduler, config: &Config) {
    const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

    let cells = week_dates(offset, config.display.locale);
    let today_column = (offset == 0).then(|| week::calendar_column(Local::now().weekday()));

    for (idx, cell) in cells.iter().enumerate() {
        let marker = if today_column == Some(idx as u8) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {} {:>2} {}",
            marker, DAY_NAMES[idx], cell.day_number, cell.month_label
        );

        for med in meds.by_weekday(idx as u8) {
            println!("      {} {} @ {}  [{}]", med.name, med.dosage, med.schedule, med.id);
        }
    }
}

/// The starter list the panel ships with for demonstration.
fn seed_demo_medications(meds: &mut MedicationScheduler) {
    let now = Instant::now();
    meds.add(now, "Alprazolam", "0.25mg", "08:00", 1);
    meds.add(now, "Lisinopril", "10mg", "21:00", 3);
    meds.add(now, "Vitamin C", "500mg", "10:00", 0);

    // Seeding is not a user action; clear the success indicator.
    meds.poll(now + Duration::from_secs(3));
}
