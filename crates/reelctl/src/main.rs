use clap::{Parser, Subcommand};
use reel_core::protocol::{ControlCommand, SOCKET_PATH};
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "reelctl", version, about = "Drive a running reel window", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control socket of the reel host
    #[arg(short, long, default_value = SOCKET_PATH)]
    socket: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the reel window
    Show,
    /// Hide the reel window
    Hide,
    /// Rotate to the next item
    Next,
    /// Rotate to the previous item
    Prev,
    /// Select an item by index (wraps around; negative counts from the end)
    Select {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
    /// Select the item with this title (case-insensitive)
    Focus {
        #[arg(num_args = 1.., required = true)]
        label: Vec<String>,
    },
    /// Step through several items one after another; negative goes backwards
    Spin {
        #[arg(allow_negative_numbers = true)]
        count: i32,
    },
}

impl From<Commands> for ControlCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Show => Self::Show,
            Commands::Hide => Self::Hide,
            Commands::Next => Self::Next,
            Commands::Prev => Self::Prev,
            Commands::Select { index } => Self::Select(index),
            Commands::Focus { label } => Self::Focus(label.join(" ")),
            Commands::Spin { count } => Self::Spin(count),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    send_command(&cli.socket, &ControlCommand::from(cli.command))
}

fn send_command(socket: &Path, command: &ControlCommand) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(socket).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to reel at {}: {}. Is reel running?",
            socket.display(),
            e
        )
    })?;

    log::debug!("sending '{command}'");
    writeln!(stream, "{command}")?;
    Ok(())
}
