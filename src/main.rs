use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};

use rustydoom::cli::{Cli, normalize_doom_args};
use rustydoom::engine::HostPlatform;
use rustydoom::present::{blit_nn_fit, write_ppm};
use rustydoom::session::InputScript;
use rustydoom::{Bridge, BridgeOptions, Config, Session, SessionOptions, TestCardEngine};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse_from(normalize_doom_args(std::env::args()));

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::get_config_path()?,
    };

    if cli.init_config {
        Config::create_default_file(&config_path)?;
        println!("Wrote default config to {}", config_path.display());
        return Ok(());
    }

    let config = Config::load_from(&config_path)?;
    let args = cli.engine_args(config.engine.iwad.clone());

    let bridge = Bridge::create_with(
        TestCardEngine::new(),
        &args,
        BridgeOptions::from(&config.input),
        HostPlatform::new(),
    )
    .context("Engine failed to start")?;

    {
        let fb = bridge.framebuffer();
        let first = fb.pixel(0, 0).unwrap_or(0);
        let mid = fb.pixel(fb.width / 2, fb.height / 2).unwrap_or(0);
        println!(
            "OK: framebuffer {}x{}, first=0x{:08X}, mid=0x{:08X}",
            fb.width, fb.height, first, mid
        );
    }

    let options = SessionOptions {
        tick_rate_hz: config.engine.tick_rate_hz,
        max_ticks: (cli.ticks > 0).then_some(cli.ticks),
    };
    let mut session = Session::new(bridge, options);

    if let Some(path) = &cli.script {
        session = session.with_script(InputScript::load(path)?);
    }

    let quit = session.quit_flag();
    signal_hook::flag::register(SIGINT, Arc::clone(&quit))
        .context("Failed to register SIGINT handler")?;
    signal_hook::flag::register(SIGTERM, quit).context("Failed to register SIGTERM handler")?;

    let summary = session.run();
    println!(
        "Ran {} ticks: {} events in, {} delivered, {} dropped, checksum {:016x}",
        summary.ticks,
        summary.canonical_events,
        summary.delivered_events,
        summary.dropped_events,
        summary.checksum
    );

    if let Some(path) = &cli.snapshot {
        let (width, height) = (cli.width as usize, cli.height as usize);
        if width == 0 || height == 0 {
            anyhow::bail!("Snapshot size must be non-zero, got {}x{}", width, height);
        }
        let mut pixels = vec![0u32; width * height];
        blit_nn_fit(&mut pixels, width, height, &session.bridge().framebuffer());
        write_ppm(path, &pixels, width, height)?;
    }

    Ok(())
}
