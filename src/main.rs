// Entry point and high-level CLI flow.
//
// Without a subcommand the binary runs the interactive loop:
// - the selector screen lists states, then districts for the chosen state;
// - confirming a district opens its dashboard;
// - from the dashboard the user can toggle details, jump to another
//   district, switch language, export, or go back to the selector.
// The subcommands render a single screen and exit.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nrega_dashboard::dashboard::DashboardScreen;
use nrega_dashboard::lang::Language;
use nrega_dashboard::notice::Notice;
use nrega_dashboard::output;
use nrega_dashboard::selector::SelectorScreen;
use nrega_dashboard::session::{LanguageSetting, Route};
use nrega_dashboard::{ApiClient, Config};

/// District performance dashboard for the rural employment programme.
#[derive(Parser, Debug)]
#[command(name = "nrega-dashboard", version, about, long_about = None)]
struct Args {
    /// Backend API root, e.g. http://localhost:8000/api
    #[arg(long, env = "NREGA_API_URL")]
    api_url: Option<String>,

    /// Interface language: en, hi, ta, te or bn (anything else shows English)
    #[arg(short, long, default_value = "en")]
    lang: String,

    /// Directory for exports made from the interactive dashboard
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List states
    States,
    /// List the districts of a state
    Districts { state_code: String },
    /// Show a district's dashboard
    Dashboard {
        district_code: String,
        /// Include job-card and expenditure details
        #[arg(long)]
        details: bool,
        /// Write history CSV and summary JSON into this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Read one line after the common "Enter choice:" prompt. `None` on EOF.
fn read_choice() -> Option<String> {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn print_notices(notices: Vec<Notice>) {
    for n in notices {
        println!("! {}\n", n);
    }
}

/// Parse a 1-based menu index into a list of `len` entries.
fn pick(choice: &str, len: usize) -> Option<usize> {
    match choice.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}

fn choose_language(setting: &LanguageSetting) {
    println!();
    for (i, lang) in Language::ALL.iter().enumerate() {
        println!("[{}] {} ({})", i + 1, lang.native_name(), lang.code());
    }
    let Some(choice) = read_choice() else {
        return;
    };
    match pick(&choice, Language::ALL.len()) {
        Some(idx) => {
            setting.set(Language::ALL[idx]);
        }
        None => println!("Invalid choice. Keeping {}.\n", setting.get()),
    }
}

/// Selector screen loop. `None` means the user quit.
async fn selector_flow(client: &ApiClient, setting: &LanguageSetting) -> Option<Route> {
    let mut screen = SelectorScreen::new(setting);
    screen.mount(client).await;
    loop {
        println!("\n{}\n", screen.labels().get("app_title"));
        print_notices(screen.take_notices());
        print!("{}", output::render_states(&screen));
        println!("[L] Language  [Q] Quit\n");
        let choice = read_choice()?;
        let idx = match choice.to_uppercase().as_str() {
            "Q" => return None,
            "L" => {
                choose_language(setting);
                screen.refresh_language(client).await;
                continue;
            }
            other => match pick(other, screen.states().len()) {
                Some(idx) => idx,
                None => {
                    println!("Invalid choice.\n");
                    continue;
                }
            },
        };
        let state_code = screen.states()[idx].state_code.clone();
        screen.select_state(client, &state_code).await;
        print_notices(screen.take_notices());

        println!();
        print!("{}", output::render_districts(&screen));
        println!("[0] Back\n");
        let choice = read_choice()?;
        if choice == "0" {
            continue;
        }
        if let Some(idx) = pick(&choice, screen.districts().len()) {
            let code = screen.districts()[idx].district_code.clone();
            screen.select_district(&code);
        }
        match screen.confirm() {
            Ok(route) => return Some(route),
            Err(_) => continue,
        }
    }
}

/// Dashboard screen loop. `None` means the user quit.
async fn dashboard_flow(
    config: &Config,
    client: &ApiClient,
    setting: &LanguageSetting,
    district_code: &str,
) -> Option<Route> {
    let mut screen = DashboardScreen::new(setting, district_code)
        .with_limits(config.fetch_limit, config.history_len);
    screen.mount(client).await;
    loop {
        println!();
        print_notices(screen.take_notices());
        print!("{}", output::render_dashboard(&screen));
        println!(
            "\n[D] {}  [G] Go to district  [L] Language  [E] Export  [B] Back  [Q] Quit\n",
            screen.labels().get("view_details")
        );
        let choice = read_choice()?;
        match choice.to_uppercase().as_str() {
            "D" => {
                screen.toggle_details();
            }
            "L" => {
                choose_language(setting);
                screen.refresh_language(client).await;
            }
            "G" => {
                println!("District code:");
                let code = read_choice()?;
                if !code.is_empty() {
                    screen.change_district(client, &code).await;
                }
            }
            "E" => match output::export_dashboard(&screen, &config.export_dir) {
                Ok(Some(paths)) => println!(
                    "Exported {} and {}",
                    paths.history_csv.display(),
                    paths.summary_json.display()
                ),
                Ok(None) => println!("Nothing to export."),
                Err(e) => eprintln!("Write error: {}", e),
            },
            "B" => return Some(Route::Selector),
            "Q" => return None,
            _ => println!("Invalid choice."),
        }
    }
}

async fn run_interactive(config: &Config, client: &ApiClient, setting: &LanguageSetting) {
    let mut route = Route::Selector;
    loop {
        info!(path = %route.path(), "route");
        let next = match &route {
            Route::Selector => selector_flow(client, setting).await,
            Route::Dashboard(code) => dashboard_flow(config, client, setting, code).await,
        };
        match next {
            Some(r) => route = r,
            None => {
                println!("Exiting the program.");
                break;
            }
        }
    }
}

async fn run_command(
    command: Command,
    config: &Config,
    client: &ApiClient,
    setting: &LanguageSetting,
) -> Result<()> {
    match command {
        Command::States => {
            let mut screen = SelectorScreen::new(setting);
            screen.mount(client).await;
            report_notices(screen.take_notices());
            print!("{}", output::render_states(&screen));
        }
        Command::Districts { state_code } => {
            let mut screen = SelectorScreen::new(setting);
            screen.mount(client).await;
            screen.select_state(client, &state_code).await;
            report_notices(screen.take_notices());
            print!("{}", output::render_districts(&screen));
        }
        Command::Dashboard {
            district_code,
            details,
            export,
        } => {
            let mut screen = DashboardScreen::new(setting, &district_code)
                .with_limits(config.fetch_limit, config.history_len);
            screen.mount(client).await;
            if details {
                screen.toggle_details();
            }
            report_notices(screen.take_notices());
            print!("{}", output::render_dashboard(&screen));
            if let Some(dir) = export {
                match output::export_dashboard(&screen, &dir)
                    .with_context(|| format!("exporting to {}", dir.display()))?
                {
                    Some(paths) => println!(
                        "\n(History exported to {}, summary to {})",
                        paths.history_csv.display(),
                        paths.summary_json.display()
                    ),
                    None => println!("\n(Nothing to export)"),
                }
            }
        }
    }
    Ok(())
}

fn report_notices(notices: Vec<Notice>) {
    for n in notices {
        eprintln!("{}", n);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::new(args.api_url, &args.lang)
        .context("invalid configuration")?
        .with_export_dir(args.export_dir);
    let client = config.client().context("could not build API client")?;
    let setting = LanguageSetting::new(config.language);
    info!(api = client.base_url(), language = %config.language, "starting");

    match args.command {
        Some(command) => run_command(command, &config, &client, &setting).await,
        None => {
            run_interactive(&config, &client, &setting).await;
            Ok(())
        }
    }
}
