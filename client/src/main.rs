use clap::Parser;
use client::network::{connect, Client};
use log::{error, info};
use macroquad::prelude::{is_key_down, next_frame};
use shared::render::Canvas;
use shared::Settings;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chase game client", long_about = None)]
struct Args {
    /// Server address to connect to
    address: String,

    /// Server port
    port: u16,

    /// Window width, overrides the default 640
    #[arg(short = 'w', long)]
    width: Option<f32>,

    /// Window height (no short flag to avoid conflict with --help)
    #[arg(long)]
    height: Option<f32>,
}

async fn run(mut client: Client) {
    let mut canvas = Canvas;

    while client.is_running() {
        client.update(Instant::now(), is_key_down);
        client.render(&mut canvas);

        next_frame().await;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let settings = Settings::default().with_screen(args.width, args.height);
    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(e.into());
    }

    info!("Starting client...");
    let connection = connect(format!("{}:{}", args.address, args.port))?;
    info!("Controls: arrow keys to move, Q to quit");

    let client = Client::new(connection, &settings, Instant::now());
    let conf = client.renderer().window_conf();
    macroquad::Window::from_config(conf, run(client));

    Ok(())
}
