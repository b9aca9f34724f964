mod events;
mod gui;
mod sys;

use clap::{Parser, Subcommand};
use gui::app::AppModel;
use relm4::prelude::*;
use std::io::Write;
use std::os::unix::net::UnixStream;
use sys::server::SOCKET_PATH;

#[derive(Parser, Debug)]
#[command(name = "pinwheel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Open the wheel at the pointer
    Show,
    /// Close the wheel, committing the hovered item
    Hide,
    /// Write the default config file if there is none and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Show) => send_command("show"),
        Some(Commands::Hide) => send_command("hide"),
        Some(Commands::InitConfig) => {
            let path = pinwheel::config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        None => {
            run_daemon();
            Ok(())
        }
    }
}

fn run_daemon() {
    let options = pinwheel::config::load_or_default();
    let (tx, rx) = async_channel::bounded(32);

    sys::runtime::start_background_services(tx);

    let app = RelmApp::new("org.pinwheel.pinwheel").with_args(Vec::new());
    app.run::<AppModel>((options, rx));
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to pinwheel daemon at {}: {}. Is pinwheel running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
