// crates/planscope/src/main.rs
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use planscope::planscope_router::normalize_path;
use planscope::{
    app_routes, enforce, load_detail, AuthState, Config, Dashboard, DetailView, FixtureStore,
    GuardDecision, MemoryHistory, NavigationState, Navigator, Plan, RecordKind, User, WatchKind,
    Watchlist,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "planscope", version, about = "PlanScope dashboard route and navigation tool")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "planscope.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered routes in matching order
    Routes,
    /// Resolve a path and print the navigation state
    Resolve { path: String },
    /// Replay navigation steps; `back` and `forward` press the history buttons
    Navigate {
        steps: Vec<String>,
        /// Signed-in user's plan; anonymous when omitted
        #[arg(long, value_enum)]
        plan: Option<PlanArg>,
    },
    /// List one dashboard feed, optionally filtered by a search query
    Dashboard {
        /// Feed tab: meetings, permits, applications or plans
        #[arg(long, default_value = "meetings")]
        feed: String,
        #[arg(long)]
        search: Option<String>,
        /// Open the paid dashboard as a user on this plan; the demo dashboard otherwise
        #[arg(long, value_enum)]
        plan: Option<PlanArg>,
    },
    /// Resolve a detail path and load its record from the fixtures
    Show { path: String },
    /// Add or remove a record from the watchlist
    Watch {
        /// Feed name (meetings, permits, applications, plans) or `decision`
        feed: String,
        id: String,
    },
    /// Print watched records with their dashboard links
    Watchlist,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlanArg {
    Free,
    Pro,
    Enterprise,
}

impl From<PlanArg> for Plan {
    fn from(arg: PlanArg) -> Self {
        match arg {
            PlanArg::Free => Plan::Free,
            PlanArg::Pro => Plan::Pro,
            PlanArg::Enterprise => Plan::Enterprise,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    planscope::logging::init_tracing(&config.logging.level);

    info!(app = %config.app.name, "starting");

    match cli.command {
        Commands::Routes => list_routes(),
        Commands::Resolve { path } => {
            let path = normalize_path(&path).into_owned();
            print_json(&NavigationState::resolve(&app_routes(), path))
        }
        Commands::Navigate { steps, plan } => replay(&config, &steps, plan),
        Commands::Dashboard { feed, search, plan } => {
            dashboard(&config, &feed, search.as_deref().unwrap_or_default(), plan).await
        }
        Commands::Show { path } => show(&config, &path).await,
        Commands::Watch { feed, id } => toggle_watch(&config, &feed, &id),
        Commands::Watchlist => print_watchlist(&config).await,
    }
}

fn list_routes() -> Result<()> {
    for route in app_routes().routes() {
        println!(
            "{:<32} {:<20} {:<8} {:?}",
            route.pattern().as_str(),
            route.name().unwrap_or("-"),
            if route.pattern().is_static() { "static" } else { "dynamic" },
            route.handler()
        );
    }
    Ok(())
}

fn replay(config: &Config, steps: &[String], plan: Option<PlanArg>) -> Result<()> {
    let history = Arc::new(MemoryHistory::new(&config.routing.initial_path));
    let navigator = Navigator::new(app_routes(), history.clone());
    navigator.listen();

    let auth = auth_for(plan);

    print_json(&navigator.state())?;
    for step in steps {
        match step.as_str() {
            "back" => {
                history.back();
            }
            "forward" => {
                history.forward();
            }
            path => navigator.navigate(path),
        }

        if let GuardDecision::Redirect(target) = enforce(&navigator, &auth) {
            eprintln!("guard redirect -> {}", target);
        }
        print_json(&navigator.state())?;
    }
    Ok(())
}

fn auth_for(plan: Option<PlanArg>) -> AuthState {
    match plan {
        Some(plan) => AuthState::signed_in(User::new("cli", "cli@planscope.local", plan.into())),
        None => AuthState::signed_out(),
    }
}

fn fixture_store(config: &Config) -> Result<FixtureStore> {
    if !config.demo.enabled {
        bail!("demo mode is disabled and no live backend is configured");
    }
    let store = match &config.demo.fixtures {
        Some(fixtures) => FixtureStore::load(fixtures)?,
        None => FixtureStore::demo()?,
    };
    Ok(store.with_latency(config.demo.latency()))
}

async fn dashboard(config: &Config, feed: &str, search: &str, plan: Option<PlanArg>) -> Result<()> {
    let kind = RecordKind::from_feed(feed).with_context(|| format!("Unknown feed: {}", feed))?;
    let path = if plan.is_some() { "/dashboard" } else { "/demo/dashboard" };
    let navigator = Navigator::with_initial_path(app_routes(), Arc::new(MemoryHistory::new(path)), path);

    if let GuardDecision::Redirect(target) = enforce(&navigator, &auth_for(plan)) {
        bail!("{} is not available on this plan, redirected to {}", path, target);
    }

    let store = fixture_store(config)?;
    let board = Dashboard::load(&store).await?;
    let demo = navigator.page().is_demo();

    for record in board.search(kind, search) {
        let href = Dashboard::detail_path(navigator.routes(), record, demo).unwrap_or_default();
        println!("{:<40} {}", record.title(), href);
    }
    Ok(())
}

async fn show(config: &Config, path: &str) -> Result<()> {
    let store = fixture_store(config)?;
    let navigator = Navigator::with_initial_path(app_routes(), Arc::new(MemoryHistory::default()), path);
    match load_detail(&store, &navigator.state()).await {
        DetailView::Loaded(record) => print_json(&record),
        DetailView::Failed(message) => {
            eprintln!("failed to load: {}", message);
            Ok(())
        }
        DetailView::NotApplicable => {
            eprintln!("{} is not a detail page", navigator.current_path());
            Ok(())
        }
    }
}

fn toggle_watch(config: &Config, feed: &str, id: &str) -> Result<()> {
    let kind = WatchKind::parse(feed).with_context(|| format!("Unknown watch type: {}", feed))?;
    let path = &config.watchlist.path;

    let mut watchlist = Watchlist::load(path)?;
    let watched = watchlist.toggle(id, kind);
    watchlist.save(path)?;

    println!("{} {} {}", if watched { "watching" } else { "stopped watching" }, kind, id);
    Ok(())
}

async fn print_watchlist(config: &Config) -> Result<()> {
    let store = fixture_store(config)?;
    let watchlist = Watchlist::load(&config.watchlist.path)?;
    let routes = app_routes();

    for (item, record) in watchlist.resolve_items(&store).await {
        let href = Watchlist::detail_path(&routes, &item).unwrap_or_default();
        println!("{:<8} {:<40} {}", item.kind, record.title(), href);
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
