//! Demo: an expo and a chef play a short match against the loopback coordinator.
//!
//! The chef cooks the first ticket correctly, forgets the sauce (or adds one) on the
//! second, and the expo judges both with the matcher.

use std::time::Duration;
use sushi_line::clients::SessionClient;
use sushi_line::lifecycle::{setup_tracing, ClientConfig, GameSystem};
use sushi_line::model::Order;
use sushi_line::session::{Phase, SessionState};
use tracing::{info, warn, Instrument};

const ROUNDS: usize = 2;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ClientConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting sushi line demo");
    let mut system = GameSystem::new(config);

    let expo = system.connect_player().await.map_err(|e| e.to_string())?;
    let chef = system.connect_player().await.map_err(|e| e.to_string())?;

    let span = tracing::info_span!("matchmaking");
    async {
        expo.create_match().await.map_err(|e| e.to_string())?;
        let waiting = wait_until(&expo, |s| s.phase == Phase::Waiting).await?;
        let code = waiting
            .match_info
            .and_then(|info| info.invite_code)
            .ok_or("no invite code")?;
        info!(%code, "Invite code received");
        chef.join_match(&code).await.map_err(|e| e.to_string())?;
        wait_until(&chef, |s| s.ticket().is_some()).await?;
        wait_until(&expo, |s| s.ticket().is_some()).await?;
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    let mut previous = None;
    for round in 0..ROUNDS {
        let ticket = wait_until(&chef, |s| s.order_id().is_some() && s.order_id() != previous.as_ref())
            .await?
            .ticket()
            .cloned()
            .ok_or("no ticket")?;
        info!(round, order_id = %ticket.id, dish = %ticket.order, table = ticket.table_number(), "Ticket up");

        let mut plate = ticket.order;
        if round % 2 == 1 {
            plate.sauce = match plate.sauce {
                Some(_) => None,
                None => Some(0),
            };
        }

        let span = tracing::info_span!("chef_round", round);
        async { cook(&chef, &plate).await }.instrument(span).await?;

        let span = tracing::info_span!("expo_round", round);
        async {
            wait_until(&expo, |s| s.plate() == Some(&plate)).await?;
            let outcome = expo.submit().await.map_err(|e| e.to_string())?;
            info!(notices = ?outcome.notices, "Expo judged the dish");
            wait_until(&expo, |s| s.order_id() != Some(&ticket.id)).await?;
            Ok::<(), String>(())
        }
        .instrument(span)
        .await?;
        previous = Some(ticket.id);
    }

    let state = expo.snapshot().await.map_err(|e| e.to_string())?;
    info!(score = state.score, stars = state.stars, "Demo finished");

    system.shutdown().await.map_err(|e| e.to_string())?;
    Ok(())
}

/// Places `plate` on the chef's station and serves it.
async fn cook(chef: &SessionClient, plate: &Order) -> Result<(), String> {
    let step = |result: Result<_, sushi_line::session_actor::SessionError>| {
        result.map(|_| ()).map_err(|e| e.to_string())
    };
    if plate.rice {
        step(chef.place_rice().await)?;
    }
    if let Some(fish) = plate.fish {
        step(chef.place_fish(fish).await)?;
    }
    if let Some(garnish) = plate.garnish {
        step(chef.place_garnish(garnish).await)?;
    }
    if let Some(sauce) = plate.sauce {
        step(chef.place_sauce(sauce).await)?;
    }
    step(chef.serve_dish().await)?;
    info!(dish = %plate, "Dish served");
    Ok(())
}

async fn wait_until(
    player: &SessionClient,
    ready: impl Fn(&SessionState) -> bool,
) -> Result<SessionState, String> {
    for _ in 0..200 {
        let state = player.snapshot().await.map_err(|e| e.to_string())?;
        if ready(&state) {
            return Ok(state);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    warn!(session = %player.id(), "Timed out waiting for state");
    Err(format!("{} timed out", player.id()))
}
