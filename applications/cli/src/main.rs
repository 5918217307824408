/// Echo Player - terminal front-end
use clap::{Parser, Subcommand};
use echo_cli::{load_catalog, AppConfig, Command, Flow, Player};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "echo")]
#[command(about = "Echo Player playback session in the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./echo.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog JSON file
    #[arg(long, env = "ECHO_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// Directory for favorites and play counts
    #[arg(long, env = "ECHO_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Refuse the first play() after each song change, like a browser autoplay policy
    #[arg(long, global = true)]
    block_autoplay: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session reading commands from stdin (default)
    Repl,
    /// Run commands from a file, one per line
    Run {
        /// Script path
        script: PathBuf,
    },
    /// Print the catalog and exit
    Catalog,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr keeps stdout for the player)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "echo_cli=info,echo_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(catalog) = cli.catalog {
        config.catalog = catalog;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    config.block_autoplay |= cli.block_autoplay;

    let catalog = load_catalog(&config.catalog)?;
    tracing::info!(
        catalog = %config.catalog.display(),
        data_dir = %config.data_dir.display(),
        songs = catalog.len(),
        "Starting Echo Player"
    );

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let player = Player::open(&config, catalog)?;
            run(player, io::stdin().lock(), true)?;
        }
        Commands::Run { script } => {
            let file = std::fs::File::open(&script)?;
            let player = Player::open(&config, catalog)?;
            run(player, io::BufReader::new(file), false)?;
        }
        Commands::Catalog => {
            for song in &catalog {
                println!("{:>3}  {} - {}  {}", song.id, song.title, song.artist_name, song.duration);
            }
        }
    }

    Ok(())
}

fn run(mut player: Player, input: impl BufRead, interactive: bool) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();

    if interactive {
        writeln!(stdout, "Echo Player - type 'help' for commands")?;
    }

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !interactive {
            writeln!(stdout, "> {line}")?;
        }

        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(e) => {
                writeln!(stdout, "{e}")?;
                continue;
            }
        };

        let (flow, lines) = player.execute(command);
        for line in lines {
            writeln!(stdout, "{line}")?;
        }
        if flow == Flow::Quit {
            break;
        }
    }

    player.shutdown();
    Ok(())
}
