use anyhow::Context;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use user_client::{User, UserApi, UserClientHttp, UserRequest};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Parser, Debug)]
#[clap(about = "Manage users through the /api/users REST API")]
struct Cli {
    /// Base URL of the server
    #[clap(short, long, env = "USER_API_URL", default_value = DEFAULT_SERVER)]
    server: String,

    /// Print results as JSON
    #[clap(long)]
    json: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Get {
        id: i64,
    },
    Create {
        #[clap(long)]
        email: String,
        #[clap(long)]
        name: String,
    },
    Update {
        id: i64,
        #[clap(long)]
        email: String,
        #[clap(long)]
        name: String,
    },
    Delete {
        id: i64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let args = Cli::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let client = UserClientHttp::connect(&args.server).await?;
    debug!(server = %client.base_url(), command = ?args.command, "running command");

    match args.command {
        Command::List => {
            let users = client.get_all_users().await?;
            if args.json {
                println!("{}", to_json(&users)?);
            } else {
                println!("Users ({})", users.len());
                for user in &users {
                    println!("- {}", user);
                }
            }
        }
        Command::Get { id } => {
            let user = client.get_user_by_id(id).await?;
            print_user(&user, args.json)?;
        }
        Command::Create { email, name } => {
            let user = client.create_user(&UserRequest::new(email, name)).await?;
            if !args.json {
                print!("User created: ");
            }
            print_user(&user, args.json)?;
        }
        Command::Update { id, email, name } => {
            let user = client
                .update_user(id, &UserRequest::new(email, name))
                .await?;
            if !args.json {
                print!("User updated: ");
            }
            print_user(&user, args.json)?;
        }
        Command::Delete { id } => {
            client.delete_user(id).await?;
            if !args.json {
                println!("User {} deleted", id);
            }
        }
    }

    Ok(())
}

fn print_user(user: &User, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", to_json(user)?);
    } else {
        println!("{}", user);
    }
    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to encode output")
}
