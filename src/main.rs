use chrono::NaiveDate;
use clap::Parser;
use crewsched::data::{Fleet, PassengerNumbers, Roster, RouteCatalog};
use crewsched::flight::FlightId;
use crewsched::route::FlightNumber;
use crewsched::view::{assignment_rows, flight_rows, CrewRow, Listing, RouteRow};
use crewsched::{generate_schedule, Schedule};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

#[derive(Parser)]
#[command(about = "Staffs a weekly airline timetable with aircraft and crew")]
struct Args {
    /// Fleet inventory CSV; repeat to load several files
    #[arg(long, value_name = "FILE", default_value = "data/aircraft.csv")]
    aircraft: Vec<PathBuf>,

    /// Crew roster JSON; repeat to load several files
    #[arg(long, value_name = "FILE", default_value = "data/crew.json")]
    crew: Vec<PathBuf>,

    /// Route timetable XML; repeat to load several files
    #[arg(long, value_name = "FILE", default_value = "data/routes.xml")]
    routes: Vec<PathBuf>,

    /// Passenger forecast SQLite database
    #[arg(long, value_name = "FILE")]
    passengers: Vec<PathBuf>,

    /// First day to schedule (YYYY-MM-DD)
    #[arg(long, default_value = "2021-07-01")]
    start: NaiveDate,

    /// Last day to schedule, inclusive (YYYY-MM-DD)
    #[arg(long, default_value = "2021-08-31")]
    end: NaiveDate,

    /// Inspect the generated schedule in a shell
    #[arg(short, long)]
    interactive: bool,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

fn paginate(content: &str) -> std::io::Result<()> {
    let mut pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn())?;

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e);
            }
        }
    }

    pager.wait()?;
    Ok(())
}

fn print_table<T: Tabled>(rows: &[T], empty: &str) {
    if rows.is_empty() {
        println!("{}", empty);
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.with(Alignment::left());
    let content = table.to_string();
    if rows.len() > 20 {
        if let Err(e) = paginate(&content) {
            log::warn!("pager unavailable: {}", e);
            println!("{}", content);
        }
    } else {
        println!("{}", content);
    }
}

fn parse_flight(number: Option<&&str>, date: Option<&&str>) -> Option<FlightId> {
    let number = number?.parse::<FlightNumber>().ok()?;
    let date = NaiveDate::parse_from_str(date?, "%Y-%m-%d").ok()?;
    Some(FlightId::new(number, date))
}

struct Data {
    fleet: Fleet,
    roster: Roster,
    routes: RouteCatalog,
    passengers: PassengerNumbers,
}

impl Data {
    fn load(args: &Args) -> Result<Data, crewsched::error::DataLoadingError> {
        let mut data = Data {
            fleet: Fleet::default(),
            roster: Roster::default(),
            routes: RouteCatalog::default(),
            passengers: PassengerNumbers::default(),
        };
        for path in &args.aircraft {
            data.fleet.load(path)?;
        }
        for path in &args.crew {
            data.roster.load(path)?;
        }
        for path in &args.routes {
            data.routes.load(path)?;
        }
        for path in &args.passengers {
            data.passengers.load(path)?;
        }
        Ok(data)
    }
}

fn print_summary(schedule: &Schedule) {
    println!("Remaining allocations: {}", schedule.remaining_count());
    println!("Completed allocations: {}", schedule.completed_count());
}

fn print_help() {
    println!("\nAvailable Commands:");
    println!("  ls [r|c|a]           - List remaining, completed or all flights");
    println!("  show <flight> <date> - Show who and what is assigned to one flight");
    println!("  routes [day|airport] - List the timetable for a day code or departure airport");
    println!("  crew <airport>       - List pilots and cabin crew based at an airport");
    println!("  pax <flight> <date>  - Show the passenger forecast for one flight");
    println!("  summary              - Print remaining and completed counts");
    println!("  help / ?             - Show this help menu");
    println!("  exit / quit          - Exit the inspector\n");
}

fn run_command(parts: &[&str], schedule: &Schedule, data: &Data) -> Result<(), Box<dyn std::error::Error>> {
    match parts[0] {
        "ls" => match Listing::parse(parts.get(1).copied()) {
            Some(listing) => print_table(&flight_rows(schedule, listing)?, "No matching flights found."),
            None => println!("Usage: ls [r|c|a]"),
        },
        "show" => match parse_flight(parts.get(1), parts.get(2)) {
            Some(flight) => {
                if let Some(occurrence) = schedule.flight(&flight) {
                    println!("{} {} ({})", occurrence.route, occurrence.interval, schedule.status_of(&flight)?);
                }
                print_table(&assignment_rows(schedule, &data.roster, &flight)?, "Nothing assigned.");
            }
            None => println!("Usage: show <flight> <YYYY-MM-DD>"),
        },
        "routes" => {
            let routes = match parts.get(1) {
                None => data.routes.all().iter().map(|r| r.as_ref()).collect(),
                Some(arg) => data
                    .routes
                    .on_day(arg)
                    .unwrap_or_else(|| data.routes.departing(&arg.to_uppercase())),
            };
            let rows = routes.into_iter().map(RouteRow::from).collect::<Vec<_>>();
            print_table(&rows, "No matching routes found.");
        }
        "crew" => match parts.get(1) {
            Some(airport) => {
                let airport = airport.to_uppercase();
                let rows = data
                    .roster
                    .pilots_based_at(&airport)
                    .into_iter()
                    .map(CrewRow::from)
                    .chain(data.roster.cabin_crew_based_at(&airport).into_iter().map(CrewRow::from))
                    .collect::<Vec<_>>();
                print_table(&rows, "Nobody is based there.");
            }
            None => println!("Usage: crew <airport>"),
        },
        "pax" => match parse_flight(parts.get(1), parts.get(2)) {
            Some(flight) => match data.passengers.forecast(flight.flight_number, flight.date) {
                Some(estimate) => println!("{}: {} passengers expected", flight, estimate),
                None => println!("{}: no forecast", flight),
            },
            None => println!("Usage: pax <flight> <YYYY-MM-DD>"),
        },
        "summary" => print_summary(schedule),
        "help" | "?" => print_help(),
        _ => println!("Unknown command: {}", parts[0]),
    }
    Ok(())
}

fn inspect(schedule: &Schedule, data: &Data) -> Result<(), Box<dyn std::error::Error>> {
    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: ["ls", "show", "routes", "crew", "pax", "summary", "help", "exit"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                if matches!(parts[0], "exit" | "quit") {
                    break;
                }
                if let Err(e) = run_command(&parts, schedule, data) {
                    println!("Error: {}", e);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let data = Data::load(&args)?;
    println!(
        "Loaded {} aircraft, {} crew, {} routes",
        data.fleet.len(),
        data.roster.all_crew_count(),
        data.routes.len()
    );

    let schedule = generate_schedule(
        &data.fleet,
        &data.roster,
        &data.routes,
        &data.passengers,
        args.start,
        args.end,
    )?;
    print_summary(&schedule);

    if args.interactive {
        print_help();
        inspect(&schedule, &data)?;
    }
    Ok(())
}
