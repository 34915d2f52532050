//! The dispatch table: one input in, next state plus effects out.
//!
//! Every guard runs before any outbound message is produced, so an input that does not
//! apply leaves the state untouched and sends nothing.

use crate::kitchen::{compare, OrderBuilder, PlacementStep, Verdict};
use crate::model::Ticket;
use crate::protocol::{
    ClientMessage, CompleteOrder, CompleteOrderAck, GameOver, JoinRequest, MatchAck,
    MatchRequest, OrderUpdate, Role, ScoreUpdate, ServerMessage, Station,
};
use crate::session::{Command, Input, MatchInfo, Notice, Phase, Round, SessionState, Transition};

/// Computes the transition for one input. Never mutates `state`.
pub fn dispatch(state: &SessionState, input: Input) -> Transition {
    let mut next = Transition::unchanged(state);
    match input {
        Input::Connected => {
            next.state.connected = true;
        }
        Input::Disconnected => on_disconnected(&mut next),
        Input::Command(command) => on_command(&mut next, command),
        Input::Inbound(message) => on_message(&mut next, message),
    }
    next
}

fn on_disconnected(next: &mut Transition) {
    let was_in_match = next.state.phase != Phase::Menu;
    next.state = next.state.reset();
    next.state.connected = false;
    if was_in_match {
        next.notices.push(Notice::ReturnedToMenu);
    }
}

fn on_command(next: &mut Transition, command: Command) {
    if !next.state.connected {
        return next.ignore("not connected");
    }
    match command {
        Command::CreateMatch => {
            if next.state.phase != Phase::Menu {
                return next.ignore("already in a match");
            }
            next.state.phase = Phase::Matching;
            next.send(ClientMessage::CreateMatch(MatchRequest {
                role_hint: Role::Player1,
            }));
        }
        Command::JoinMatch(code) => {
            if next.state.phase != Phase::Menu {
                return next.ignore("already in a match");
            }
            let code = code.trim();
            if code.is_empty() {
                return next.ignore("empty invite code");
            }
            next.state.phase = Phase::Matching;
            next.send(ClientMessage::JoinMatch(JoinRequest {
                invite_code: code.to_string(),
            }));
        }
        Command::Place(step) => on_placement(next, Some(step)),
        Command::ClearPlate => on_placement(next, None),
        Command::ServeDish => {
            if let Err(reason) = check_station(&next.state, Station::Chef) {
                return next.ignore(reason);
            }
            let Some(round) = next.state.round.as_ref() else {
                return next.ignore("no open order");
            };
            let order_id = round.order_id().clone();
            let order = round.plate;
            next.send(ClientMessage::ServeDish(OrderUpdate {
                order_id: order_id.clone(),
                order,
            }));
            next.notices.push(Notice::DishServed(order_id));
        }
        Command::Submit => on_verdict(next, None),
        Command::Reject => on_verdict(next, Some(Verdict::Fail)),
    }
}

/// `None` clears the plate.
fn on_placement(next: &mut Transition, step: Option<PlacementStep>) {
    if let Err(reason) = check_station(&next.state, Station::Chef) {
        return next.ignore(reason);
    }
    let Some(round) = next.state.round.as_mut() else {
        return next.ignore("no open order");
    };

    let mut builder = OrderBuilder::from_order(round.plate);
    let placed = match step {
        Some(step) => builder.apply(step),
        None => Ok(builder.clear()),
    };
    match placed {
        Ok(placement) if placement.is_changed() => {
            round.plate = *builder.plate();
            let update = OrderUpdate {
                order_id: round.order_id().clone(),
                order: round.plate,
            };
            next.notices.push(Notice::PlateUpdated(update.order));
            next.send(ClientMessage::OrderProgress(update));
        }
        Ok(_) => {}
        Err(error) => next.notices.push(Notice::PlacementRejected(error)),
    }
}

/// `None` lets the matcher decide.
fn on_verdict(next: &mut Transition, forced: Option<Verdict>) {
    if let Err(reason) = check_station(&next.state, Station::Expo) {
        return next.ignore(reason);
    }
    let Some(round) = next.state.round.as_mut() else {
        return next.ignore("no open order");
    };
    if round.verdict.is_some() {
        return next.ignore("verdict already sent");
    }

    let mismatches = compare(&round.plate, &round.ticket.order);
    let verdict = forced.unwrap_or_else(|| Verdict::judge(&round.plate, &round.ticket.order));
    round.verdict = Some(verdict);
    let order_id = round.order_id().clone();
    next.send(ClientMessage::CompleteOrder(CompleteOrder {
        order_id,
        status: verdict,
    }));
    next.notices.push(Notice::VerdictSent {
        verdict,
        mismatches,
    });
}

fn check_station(state: &SessionState, wanted: Station) -> Result<(), &'static str> {
    if state.phase != Phase::Playing {
        return Err("not playing");
    }
    match state.role() {
        Some(role) if role.station() == wanted => Ok(()),
        _ => Err("wrong station"),
    }
}

fn on_message(next: &mut Transition, message: ServerMessage) {
    match message {
        ServerMessage::CreateMatchAck(ack) | ServerMessage::JoinMatchAck(ack) => {
            on_match_ack(next, ack)
        }
        ServerMessage::GameStart => {
            if next.state.phase != Phase::Waiting {
                return next.ignore("gameStart outside the waiting room");
            }
            next.state.phase = Phase::Playing;
            next.notices.push(Notice::GameStarted);
            next.send(ClientMessage::CreateOrder);
        }
        ServerMessage::NewOrder(ticket) => on_new_order(next, ticket),
        ServerMessage::OrderProgress(update) => on_progress(next, update, false),
        ServerMessage::ChefOrderSubmitted(update) => on_progress(next, update, true),
        ServerMessage::CompleteOrderAck(ack) => on_complete_ack(next, ack),
        ServerMessage::ScoreUpdate(update) => on_score(next, update),
        ServerMessage::GameOver(GameOver { final_score }) => {
            if next.state.phase == Phase::Menu {
                return next.ignore("gameOver outside a match");
            }
            next.state = next.state.reset();
            next.state.final_score = Some(final_score);
            next.notices.push(Notice::GameOver { final_score });
        }
    }
}

fn on_match_ack(next: &mut Transition, ack: MatchAck) {
    if next.state.phase != Phase::Matching {
        return next.ignore("match ack without a pending request");
    }
    match (ack.success, ack.match_id, ack.player_role) {
        (true, Some(match_id), Some(role)) => {
            let starting_stars = next.state.starting_stars();
            next.state.phase = Phase::Waiting;
            next.state.score = 0;
            next.state.stars = starting_stars;
            next.state.final_score = None;
            next.state.match_info = Some(MatchInfo {
                match_id: match_id.clone(),
                invite_code: ack.invite_code.clone(),
                role,
            });
            next.notices.push(Notice::MatchAssigned {
                match_id,
                invite_code: ack.invite_code,
                role,
            });
        }
        (true, _, _) => {
            next.state.phase = Phase::Menu;
            next.notices.push(Notice::MatchRefused(Some(
                "ack is missing match id or role".to_string(),
            )));
        }
        (false, _, _) => {
            next.state.phase = Phase::Menu;
            next.notices.push(Notice::MatchRefused(ack.message));
        }
    }
}

fn on_new_order(next: &mut Transition, ticket: Ticket) {
    if !next.state.is_playing() {
        return next.ignore("ticket outside play");
    }
    if next.state.order_id() == Some(&ticket.id) {
        return next.ignore("ticket already open");
    }
    let order_id = ticket.id.clone();
    next.state.round = Some(Round::new(ticket));
    next.notices.push(Notice::TicketReceived(order_id));
}

fn on_progress(next: &mut Transition, update: OrderUpdate, served: bool) {
    let is_expo = next.state.role().is_some_and(Role::is_expo);
    if !is_expo || !next.state.is_playing() {
        return next.ignore("progress is only mirrored by the expo");
    }
    let Some(round) = next.state.round.as_mut() else {
        return next.ignore("progress without an open order");
    };
    if round.order_id() != &update.order_id {
        return next.ignore("stale progress");
    }
    if round.verdict.is_some() {
        return next.ignore("progress after verdict");
    }
    round.plate = update.order;
    next.notices.push(Notice::PlateUpdated(update.order));
    if served {
        next.notices.push(Notice::DishServed(update.order_id));
    }
}

fn on_complete_ack(next: &mut Transition, ack: CompleteOrderAck) {
    let open = next
        .state
        .round
        .as_ref()
        .is_some_and(|round| round.order_id() == &ack.order_id && round.verdict.is_some());
    if !open {
        return next.ignore("ack for an order that is not awaiting one");
    }
    if !ack.success {
        // The coordinator still holds the order open, so the expo judges it again.
        if let Some(round) = next.state.round.as_mut() {
            round.verdict = None;
        }
        next.notices.push(Notice::VerdictRefused(ack.order_id));
        return;
    }
    next.state.round = None;
    next.notices.push(Notice::OrderClosed(ack.order_id));
}

fn on_score(next: &mut Transition, update: ScoreUpdate) {
    if next.state.match_info.is_none() {
        return next.ignore("score outside a match");
    }
    next.state.score = update.score;
    next.state.stars = update.stars;
    next.notices.push(Notice::ScoreChanged {
        score: update.score,
        stars: update.stars,
    });

    // A scored verdict closes the round for both stations.
    let closes_round = match (&update.order_id, next.state.order_id()) {
        (Some(scored), Some(open)) => scored == open,
        (None, Some(_)) => update.order_status.is_some(),
        (_, None) => false,
    };
    if closes_round {
        if let Some(round) = next.state.round.take() {
            next.notices.push(Notice::OrderClosed(round.ticket.id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::{Mismatch, PlacementError};
    use crate::model::{Ingredient, Order};
    use crate::protocol::{MatchId, OrderId};

    fn connected() -> SessionState {
        dispatch(&SessionState::default(), Input::Connected).state
    }

    fn seated(role: Role) -> SessionState {
        let mut state = connected();
        state.phase = Phase::Waiting;
        state.match_info = Some(MatchInfo {
            match_id: MatchId::from("match_1"),
            invite_code: Some("SUSHI-0001".to_string()),
            role,
        });
        state
    }

    fn playing(role: Role, ticket: Order) -> SessionState {
        let mut state = seated(role);
        state.phase = Phase::Playing;
        state.round = Some(Round::new(Ticket::new("o1", ticket)));
        state
    }

    fn run(state: &SessionState, inputs: impl IntoIterator<Item = Input>) -> SessionState {
        inputs
            .into_iter()
            .fold(state.clone(), |state, input| dispatch(&state, input).state)
    }

    fn place(step: PlacementStep) -> Input {
        Input::Command(Command::Place(step))
    }

    #[test]
    fn test_create_match_flow() {
        let step = dispatch(&connected(), Command::CreateMatch.into());
        assert_eq!(step.state.phase, Phase::Matching);
        assert_eq!(
            step.outbound,
            vec![ClientMessage::CreateMatch(MatchRequest {
                role_hint: Role::Player1
            })]
        );

        let ack = MatchAck::accepted(MatchId::from("match_1"), "SUSHI-0001", Role::Player1);
        let step = dispatch(&step.state, ServerMessage::CreateMatchAck(ack.clone()).into());
        assert_eq!(step.state.phase, Phase::Waiting);
        assert_eq!(step.state.role(), Some(Role::Player1));

        // A repeated ack changes nothing.
        let again = dispatch(&step.state, ServerMessage::CreateMatchAck(ack).into());
        assert!(again.is_ignored());
        assert_eq!(again.state, step.state);
    }

    #[test]
    fn test_commands_need_a_connection() {
        let step = dispatch(&SessionState::default(), Command::CreateMatch.into());
        assert!(step.is_ignored());
        assert!(step.outbound.is_empty());
        assert_eq!(step.state.phase, Phase::Menu);
    }

    #[test]
    fn test_join_with_blank_code_is_ignored() {
        let step = dispatch(&connected(), Command::JoinMatch("   ".into()).into());
        assert!(step.is_ignored());
        assert!(step.outbound.is_empty());

        let step = dispatch(&connected(), Command::JoinMatch(" SUSHI-0001 ".into()).into());
        assert_eq!(
            step.outbound,
            vec![ClientMessage::JoinMatch(JoinRequest {
                invite_code: "SUSHI-0001".into()
            })]
        );
    }

    #[test]
    fn test_refused_ack_returns_to_menu() {
        let matching = dispatch(&connected(), Command::JoinMatch("nope".into()).into()).state;
        let step = dispatch(
            &matching,
            ServerMessage::JoinMatchAck(MatchAck::refused("unknown invite code")).into(),
        );
        assert_eq!(step.state.phase, Phase::Menu);
        assert_eq!(
            step.notices,
            vec![Notice::MatchRefused(Some("unknown invite code".into()))]
        );
    }

    #[test]
    fn test_game_start_requests_an_order_once() {
        let step = dispatch(&seated(Role::Player2), ServerMessage::GameStart.into());
        assert_eq!(step.state.phase, Phase::Playing);
        assert_eq!(step.outbound, vec![ClientMessage::CreateOrder]);

        let duplicate = dispatch(&step.state, ServerMessage::GameStart.into());
        assert!(duplicate.is_ignored());
        assert!(duplicate.outbound.is_empty());
    }

    #[test]
    fn test_new_ticket_resets_plate() {
        let mut state = playing(Role::Player2, Order::new(true, 0));
        state = run(&state, [place(PlacementStep::Fish(3))]);
        assert_eq!(state.plate(), Some(&Order::new(false, 3)));

        let ticket = Ticket::new("o2", Order::new(false, 1));
        let step = dispatch(&state, ServerMessage::NewOrder(ticket.clone()).into());
        assert_eq!(step.state.ticket(), Some(&ticket));
        assert_eq!(step.state.plate(), Some(&Order::empty()));

        let duplicate = dispatch(&step.state, ServerMessage::NewOrder(ticket).into());
        assert!(duplicate.is_ignored());
    }

    #[test]
    fn test_chef_placement_broadcasts_changes_only() {
        let state = playing(Role::Player2, Order::new(true, 2));
        let step = dispatch(&state, place(PlacementStep::Rice));
        assert_eq!(
            step.outbound,
            vec![ClientMessage::OrderProgress(OrderUpdate {
                order_id: OrderId::from("o1"),
                order: Order {
                    rice: true,
                    ..Order::empty()
                },
            })]
        );

        let repeat = dispatch(&step.state, place(PlacementStep::Rice));
        assert!(repeat.outbound.is_empty());
        assert!(repeat.notices.is_empty());
    }

    #[test]
    fn test_garnish_before_fish_is_rejected_without_effects() {
        let state = playing(Role::Player2, Order::new(true, 2));
        let step = dispatch(&state, place(PlacementStep::Garnish(0)));
        assert_eq!(step.state, state);
        assert!(step.outbound.is_empty());
        assert_eq!(
            step.notices,
            vec![Notice::PlacementRejected(PlacementError::NoFish(
                Ingredient::Garnish
            ))]
        );
    }

    #[test]
    fn test_clear_then_garnish_leaves_garnish_absent() {
        let state = playing(Role::Player2, Order::new(true, 2));
        let state = run(
            &state,
            [
                place(PlacementStep::Fish(1)),
                place(PlacementStep::Garnish(0)),
                Command::ClearPlate.into(),
                place(PlacementStep::Garnish(0)),
            ],
        );
        assert_eq!(state.plate(), Some(&Order::empty()));
    }

    #[test]
    fn test_expo_cannot_build() {
        let state = playing(Role::Player1, Order::new(true, 2));
        assert!(dispatch(&state, place(PlacementStep::Rice)).is_ignored());
        assert!(dispatch(&state, Command::ServeDish.into()).is_ignored());
    }

    #[test]
    fn test_stale_progress_is_discarded() {
        let state = playing(Role::Player1, Order::new(true, 2));
        let state = run(
            &state,
            [ServerMessage::NewOrder(Ticket::new("o2", Order::new(false, 4))).into()],
        );

        let stale = ServerMessage::OrderProgress(OrderUpdate {
            order_id: OrderId::from("o1"),
            order: Order::new(true, 2),
        });
        let step = dispatch(&state, stale.into());
        assert!(step.is_ignored());
        assert_eq!(step.state.plate(), Some(&Order::empty()));

        let fresh = ServerMessage::OrderProgress(OrderUpdate {
            order_id: OrderId::from("o2"),
            order: Order::new(false, 4),
        });
        let step = dispatch(&state, fresh.into());
        assert_eq!(step.state.plate(), Some(&Order::new(false, 4)));
    }

    #[test]
    fn test_submit_judges_with_matcher() {
        let ticket = Order::new(true, 2).with_garnish(0).with_sauce(1);
        let state = run(
            &playing(Role::Player1, ticket),
            [ServerMessage::ChefOrderSubmitted(OrderUpdate {
                order_id: OrderId::from("o1"),
                order: ticket,
            })
            .into()],
        );
        let step = dispatch(&state, Command::Submit.into());
        assert_eq!(
            step.outbound,
            vec![ClientMessage::CompleteOrder(CompleteOrder {
                order_id: OrderId::from("o1"),
                status: Verdict::Pass,
            })]
        );

        // One verdict per order.
        assert!(dispatch(&step.state, Command::Submit.into()).is_ignored());
    }

    #[test]
    fn test_submit_wrong_plate_fails_with_mismatches() {
        let state = playing(Role::Player1, Order::new(true, 2));
        let step = dispatch(&state, Command::Submit.into());
        assert_eq!(
            step.notices,
            vec![Notice::VerdictSent {
                verdict: Verdict::Fail,
                mismatches: vec![Mismatch::Rice, Mismatch::Fish],
            }]
        );
    }

    #[test]
    fn test_reject_always_fails() {
        let ticket = Order::new(true, 2);
        let mut state = playing(Role::Player1, ticket);
        if let Some(round) = state.round.as_mut() {
            round.plate = ticket;
        }
        let step = dispatch(&state, Command::Reject.into());
        assert_eq!(
            step.outbound,
            vec![ClientMessage::CompleteOrder(CompleteOrder {
                order_id: OrderId::from("o1"),
                status: Verdict::Fail,
            })]
        );
    }

    #[test]
    fn test_complete_ack_clears_round_once() {
        let state = playing(Role::Player1, Order::new(true, 2));
        let state = run(&state, [Command::Reject.into()]);
        let ack = ServerMessage::CompleteOrderAck(CompleteOrderAck {
            order_id: OrderId::from("o1"),
            success: true,
        });

        let step = dispatch(&state, ack.clone().into());
        assert_eq!(step.state.round, None);
        assert_eq!(step.notices, vec![Notice::OrderClosed(OrderId::from("o1"))]);

        let duplicate = dispatch(&step.state, ack.into());
        assert!(duplicate.is_ignored());
        assert_eq!(duplicate.state, step.state);
    }

    #[test]
    fn test_refused_complete_ack_reopens_judging() {
        let state = playing(Role::Player1, Order::new(true, 2));
        let state = run(&state, [Command::Submit.into()]);
        let refused = ServerMessage::CompleteOrderAck(CompleteOrderAck {
            order_id: OrderId::from("o1"),
            success: false,
        });

        let step = dispatch(&state, refused.clone().into());
        let round = step.state.round.as_ref().unwrap();
        assert_eq!(round.order_id(), &OrderId::from("o1"));
        assert_eq!(round.verdict, None);
        assert_eq!(step.notices, vec![Notice::VerdictRefused(OrderId::from("o1"))]);
        assert!(step.outbound.is_empty());

        // A second refusal has no verdict to answer.
        assert!(dispatch(&step.state, refused.into()).is_ignored());

        let retry = dispatch(&step.state, Command::Submit.into());
        assert_eq!(
            retry.outbound,
            vec![ClientMessage::CompleteOrder(CompleteOrder {
                order_id: OrderId::from("o1"),
                status: Verdict::Fail,
            })]
        );
        assert_eq!(retry.state.round.unwrap().verdict, Some(Verdict::Fail));
    }

    #[test]
    fn test_score_update_closes_chef_round() {
        let state = playing(Role::Player2, Order::new(true, 2));
        let step = dispatch(
            &state,
            ServerMessage::ScoreUpdate(ScoreUpdate {
                score: 10,
                stars: 5,
                order_status: Some(Verdict::Pass),
                order_id: Some(OrderId::from("o1")),
            })
            .into(),
        );
        assert_eq!(step.state.score, 10);
        assert_eq!(step.state.round, None);

        // A score for some other order leaves the open one alone.
        let step = dispatch(
            &state,
            ServerMessage::ScoreUpdate(ScoreUpdate {
                score: 0,
                stars: 4,
                order_status: Some(Verdict::Fail),
                order_id: Some(OrderId::from("o0")),
            })
            .into(),
        );
        assert_eq!(step.state.stars, 4);
        assert!(step.state.round.is_some());
    }

    #[test]
    fn test_score_update_without_order_id_closes_scored_round() {
        let state = playing(Role::Player2, Order::new(true, 2));
        let step = dispatch(
            &state,
            ServerMessage::ScoreUpdate(ScoreUpdate {
                score: 0,
                stars: 4,
                order_status: Some(Verdict::Fail),
                order_id: None,
            })
            .into(),
        );
        assert_eq!(step.state.stars, 4);
        assert_eq!(step.state.round, None);
        assert_eq!(
            step.notices,
            vec![
                Notice::ScoreChanged { score: 0, stars: 4 },
                Notice::OrderClosed(OrderId::from("o1")),
            ]
        );

        // Without a status it is a plain score refresh.
        let step = dispatch(
            &state,
            ServerMessage::ScoreUpdate(ScoreUpdate {
                score: 5,
                stars: 5,
                order_status: None,
                order_id: None,
            })
            .into(),
        );
        assert_eq!(step.state.score, 5);
        assert!(step.state.round.is_some());
    }

    #[test]
    fn test_game_over_returns_to_menu_once() {
        let state = playing(Role::Player2, Order::new(true, 2));
        let over = ServerMessage::GameOver(GameOver { final_score: 40 });

        let step = dispatch(&state, over.clone().into());
        assert_eq!(step.state.phase, Phase::Menu);
        assert_eq!(step.state.final_score, Some(40));
        assert_eq!(step.state.match_info, None);
        assert!(step.state.connected);

        let duplicate = dispatch(&step.state, over.into());
        assert!(duplicate.is_ignored());
        assert_eq!(duplicate.state, step.state);
    }

    #[test]
    fn test_disconnect_from_any_phase() {
        let states = [
            connected(),
            dispatch(&connected(), Command::CreateMatch.into()).state,
            seated(Role::Player1),
            playing(Role::Player2, Order::new(false, 0)),
        ];
        for state in states {
            let step = dispatch(&state, Input::Disconnected);
            assert_eq!(step.state.phase, Phase::Menu);
            assert_eq!(step.state.match_info, None);
            assert_eq!(step.state.round, None);
            assert!(!step.state.connected);
            assert!(step.outbound.is_empty());
        }
    }
}
