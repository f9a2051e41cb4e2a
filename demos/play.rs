use anyhow::Context;
use forgotten_knight::render::{draw_map, MapTextures};
use forgotten_knight::{Campaign, CampaignState, GameConfig, MoveInput};
use macroquad::prelude::*;
use std::path::Path;

fn window_conf() -> Conf {
    Conf {
        window_title: "The Forgotten Knight".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        log::error!("{err:#}");
    }
}

async fn run() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(Path::new(&path))?,
        None => GameConfig::default(),
    };
    let mut campaign = Campaign::from_config(&config)
        .with_context(|| format!("Starting campaign from {}", config.maps_dir.display()))?;

    let mut textures = MapTextures::load(campaign.map()).await?;
    let mut shown_level = campaign.level();

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::R) {
            campaign.restart_level();
        }

        campaign.update(get_frame_time(), MoveInput::from_keyboard())?;
        if campaign.level() != shown_level {
            textures = MapTextures::load(campaign.map()).await?;
            shown_level = campaign.level();
        }

        clear_background(BLACK);
        draw_map(campaign.map(), &textures);

        let stats = campaign.stats();
        draw_text(
            &format!("Level {}/{}", campaign.level(), campaign.level_count()),
            screen_width() - 200.0,
            30.0,
            24.0,
            WHITE,
        );
        if let CampaignState::Finished { won } = campaign.state() {
            let msg = if won { "You escaped!" } else { "Press R to retry" };
            draw_text(msg, 40.0, screen_height() - 80.0, 32.0, YELLOW);
            draw_text(
                &format!(
                    "{} levels in {:.1}s",
                    stats.levels_completed, stats.time_spent
                ),
                40.0,
                screen_height() - 40.0,
                24.0,
                WHITE,
            );
        }

        next_frame().await;
    }
    Ok(())
}
