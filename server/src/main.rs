use clap::Parser;
use log::{error, info};
use macroquad::prelude::{is_key_released, next_frame, Conf, KeyCode};
use server::engine::Engine;
use shared::render::Canvas;
use shared::Settings;
use std::time::Instant;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chase game server", long_about = None)]
struct Args {
    /// Port to listen on
    port: u16,

    /// Address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Window width, overrides the default 640
    #[arg(short = 'w', long)]
    width: Option<f32>,

    /// Window height, overrides the default 480 (no short flag to avoid conflict with --help)
    #[arg(long)]
    height: Option<f32>,
}

fn window_conf(settings: &Settings) -> Conf {
    Conf {
        window_title: "TPG Server".to_owned(),
        window_width: settings.screen_width as i32,
        window_height: settings.screen_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

async fn run(mut engine: Engine) {
    let mut canvas = Canvas;

    while engine.is_running() {
        if is_key_released(KeyCode::Q) {
            info!("Quit requested");
            engine.stop();
        }

        engine.update(Instant::now());
        engine.render(&mut canvas);

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

    let (server_tx, server_rx) = mpsc::unbounded_channel();
    let address = format!("{}:{}", args.host, args.port);
    let bound = server::network::spawn(address, server_tx)?;
    info!("Accepting clients on {}", bound);

    let engine = Engine::new(
        settings.clone(),
        server_rx,
        &mut rand::thread_rng(),
        Instant::now(),
    )?;

    info!("Controls: Q to quit");
    macroquad::Window::from_config(window_conf(&settings), run(engine));

    Ok(())
}
