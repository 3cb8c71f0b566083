use anyhow::Context;
use campus_client::api;
use campus_client::models::{LoginCredentials, Role};
use campus_client::{AppContext, ClientConfig, FetchParams, Navigation};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "campus")]
#[command(about = "Campus collaboration platform client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session
    Login {
        /// student or teacher
        role: Role,
        account: String,
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// List projects
    Projects {
        /// research, competition, personal or all
        direction: Option<String>,
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = campus_client::stores::list::DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
    /// List conversations
    Conversations,
    /// List tags
    Tags,
    /// Show where the route guard sends a path
    Route { path: String },
    /// Print the effective config
    Config {
        /// Also write it to the config file
        #[arg(long)]
        save: bool,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Logout => "logout",
            Command::Whoami => "whoami",
            Command::Projects { .. } => "projects",
            Command::Conversations => "conversations",
            Command::Tags => "tags",
            Command::Route { .. } => "route",
            Command::Config { .. } => "config",
        }
    }
}

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(campus_common::logs_dir(), "campus.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "campus_client=debug,campus_http=debug,info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    guard
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    campus_common::init_structure().context("Failed to initialize directory structure")?;
    let _guard = init_tracing();

    let config = ClientConfig::load();
    let ctx = AppContext::from_config(config)?;
    ctx.cold_start();

    let name = cli.command.name();
    if let Err(e) = run(&ctx, cli.command).await {
        error!("[campus] {} failed: {:#}", name, e);
        return Err(e);
    }
    Ok(())
}

async fn run(ctx: &AppContext, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login {
            role,
            account,
            password,
        } => {
            let response = ctx
                .login(LoginCredentials {
                    identity: role,
                    account,
                    password,
                })
                .await?;
            info!("[campus] logged in as user {}", response.user_id);
            print_json(&ctx.session().user())
        }
        Command::Logout => {
            ctx.teardown();
            print_json(&json!({ "logged_in": false }))
        }
        Command::Whoami => {
            let session = ctx.session();
            print_json(&json!({
                "logged_in": session.is_logged_in(),
                "user": session.user(),
            }))
        }
        Command::Projects {
            direction,
            search,
            page,
            page_size,
        } => {
            let mut params = FetchParams::page(page, page_size);
            if let Some(direction) = direction {
                params = params.with_direction(direction);
            }
            if let Some(search) = search {
                params = params.with_search(search);
            }
            ctx.fetch_projects(params).await;
            let state = ctx.projects().snapshot();
            print_json(&json!({
                "direction": ctx.projects().current_direction(),
                "total": state.total,
                "page": state.page,
                "page_size": state.page_size,
                "total_pages": state.total_pages,
                "items": state.items,
            }))
        }
        Command::Conversations => {
            ctx.fetch_conversations(FetchParams::default()).await;
            print_json(&ctx.conversations().conversations())
        }
        Command::Tags => {
            let tags = api::tag::list(ctx.api()).await?;
            print_json(&tags)
        }
        Command::Route { path } => {
            match ctx.navigate(&path) {
                Navigation::Proceed => println!("{}", path),
                Navigation::Redirect(location) => println!("{} -> {}", path, location),
            }
            Ok(())
        }
        Command::Config { save } => {
            if save {
                let path = ctx.config().save()?;
                info!("[campus] wrote config to {:?}", path);
            }
            print_json(ctx.config())
        }
    }
}
