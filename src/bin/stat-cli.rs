use clap::{Parser, Subcommand};
use url::Url;

#[derive(Parser)]
#[command(name = "stat-cli")]
#[command(about = "Client for the player stat server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stats for one player
    Member { id: String },
    /// Replace the pending list (comma-separated ids)
    SetUsers { ids: String },
    /// Append to the pending list (comma-separated ids)
    AddUsers { ids: String },
    /// Fetch stats for the pending list without printing them
    Run,
    /// Show stats for the pending list
    GetUsers,
    /// Write a message to the server log
    Log { message: Vec<String> },
}

impl Commands {
    fn pseudo_file(&self) -> String {
        match self {
            Commands::Member { id } => format!("{}.xml", id),
            Commands::SetUsers { ids } => format!("@SET_USERS {}", ids),
            Commands::AddUsers { ids } => format!("@ADD_USERS {}", ids),
            Commands::Run => "@RUN".to_string(),
            Commands::GetUsers => "@GET_USERS".to_string(),
            Commands::Log { message } => format!("@LOG {}", message.join(" ")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut url = Url::parse(&cli.url)?;
    url.path_segments_mut()
        .map_err(|_| format!("{} cannot be a base URL", cli.url))?
        .pop_if_empty()
        .push(&cli.command.pseudo_file());

    let res = client.get(url).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            if !text.is_empty() {
                eprintln!("Response: {}", text);
            }
        }
        return Ok(());
    }

    let bytes = res.bytes().await?;
    let body = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes[..]);
    if !body.is_empty() {
        // Payload text is Latin-1.
        println!("{}", body.iter().map(|&b| char::from(b)).collect::<String>());
    }
    Ok(())
}
