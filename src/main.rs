use std::sync::LazyLock;

use directories::ProjectDirs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use water_tracker::{
    App, AppEvent, DesktopNotifier, DesktopPermissions, Feedback, ReminderScheduler,
};

static PROJECT_DIR: LazyLock<ProjectDirs> =
    LazyLock::new(|| ProjectDirs::from("fyi", "angelo", "water-tracker").unwrap());

const HELP: &str = "commands: drink [ml] | goal <ml> | theme | quit (empty line = tap)";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Event(AppEvent),
    Quit,
}

/// One line of host input. `None` means the line was not understood --
/// notably a goal or drink amount that does not parse as a positive
/// integer never becomes an event.
fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    match words.next() {
        // Bare enter: a tap on the surface.
        None => Some(Command::Event(AppEvent::Tap { x: 0.0, y: 0.0 })),
        Some("drink") => match words.next() {
            None => Some(Command::Event(AppEvent::Drink { amount_ml: None })),
            Some(amount) => amount.parse().ok().map(|ml| {
                Command::Event(AppEvent::Drink {
                    amount_ml: Some(ml),
                })
            }),
        },
        Some("goal") => words
            .next()?
            .parse()
            .ok()
            .map(|goal_ml| Command::Event(AppEvent::SetGoal { goal_ml })),
        Some("theme") => Some(Command::Event(AppEvent::ToggleTheme)),
        Some("quit") | Some("q") => Some(Command::Quit),
        Some(_) => None,
    }
}

fn render(app: &App, feedback: &[Feedback]) {
    for item in feedback {
        match item {
            Feedback::PepTalk { message } => println!("{message}"),
            Feedback::Splash { at } => println!("~ splash at ({:.0}, {:.0}) ~", at.x, at.y),
        }
    }

    let state = app.state();
    println!(
        "[{}] {} ml / {} ml",
        app.render_bar(),
        state.current_intake_ml,
        state.daily_goal_ml
    );
}

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = PROJECT_DIR.data_dir().join("logs");
    std::fs::create_dir_all(&log_dir).expect("Unable to create log directory!");

    let (log_file, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        log_dir,
        "water-tracker.log",
    ));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_file),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() {
    let _log_guard = init_tracing();
    info!("water-tracker starting");

    let scheduler = ReminderScheduler::new(DesktopPermissions, DesktopNotifier::new());
    scheduler.run_pass().await;

    let mut app = App::new();
    println!("🥛 water-tracker");
    println!("{HELP}");
    render(&app, &[]);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Event(event)) => {
                let feedback = app.apply(event);
                render(&app, &feedback);
            }
            None => println!("{HELP}"),
        }
    }

    info!(
        intake_ml = app.state().current_intake_ml,
        "water-tracker exiting"
    );
}
