use sushi_line::clients::SessionClient;
use sushi_line::framework::mock::MockClient;
use sushi_line::framework::ActorClient;
use sushi_line::kitchen::Verdict;
use sushi_line::model::{Order, Ticket};
use sushi_line::protocol::{
    ClientMessage, CompleteOrder, GameOver, MatchAck, MatchId, OrderId, OrderUpdate, Role,
    ServerMessage, SessionId,
};
use sushi_line::session::{Phase, SessionState};
use sushi_line::session_actor::{self, Session, SessionCreate, SessionError, SessionOutcome};
use tokio::sync::mpsc;

/// Real session actor, no transport: frames are read straight off the outbox.
async fn open_session() -> (SessionClient, mpsc::UnboundedReceiver<ClientMessage>) {
    let (actor, sessions) = session_actor::new(8);
    tokio::spawn(actor.run(()));

    let (outbox, frames) = mpsc::unbounded_channel();
    let id = sessions
        .create(SessionCreate {
            outbox,
            starting_stars: 5,
        })
        .await
        .expect("create session");
    let client = SessionClient::new(sessions, id);
    client.connected().await.expect("connected");
    (client, frames)
}

/// Drives a session to `Playing` in the given seat with ticket "o1".
async fn seat(client: &SessionClient, frames: &mut mpsc::UnboundedReceiver<ClientMessage>, role: Role) {
    client.create_match().await.unwrap();
    client
        .receive(ServerMessage::CreateMatchAck(MatchAck::accepted(
            MatchId::from("match_1"),
            "SUSHI-0001",
            role,
        )))
        .await
        .unwrap();
    client.receive(ServerMessage::GameStart).await.unwrap();
    client
        .receive(ServerMessage::NewOrder(Ticket::new(
            "o1",
            Order::new(true, 2).with_garnish(0).with_sauce(1),
        )))
        .await
        .unwrap();

    assert!(matches!(frames.recv().await, Some(ClientMessage::CreateMatch(_))));
    assert_eq!(frames.recv().await, Some(ClientMessage::CreateOrder));
}

#[tokio::test]
async fn test_chef_progress_frames_follow_placements() {
    let (chef, mut frames) = open_session().await;
    seat(&chef, &mut frames, Role::Player2).await;

    chef.place_rice().await.unwrap();
    chef.place_fish(2).await.unwrap();
    chef.place_garnish(0).await.unwrap();
    chef.place_sauce(1).await.unwrap();
    chef.serve_dish().await.unwrap();

    let mut last = None;
    for _ in 0..4 {
        match frames.recv().await {
            Some(ClientMessage::OrderProgress(update)) => last = Some(update),
            other => panic!("expected orderProgress, got {other:?}"),
        }
    }
    let expected = OrderUpdate {
        order_id: OrderId::from("o1"),
        order: Order::new(true, 2).with_garnish(0).with_sauce(1),
    };
    assert_eq!(last, Some(expected.clone()));
    assert_eq!(frames.recv().await, Some(ClientMessage::ServeDish(expected)));
}

#[tokio::test]
async fn test_expo_ignores_superseded_progress() {
    let (expo, mut frames) = open_session().await;
    seat(&expo, &mut frames, Role::Player1).await;

    expo.receive(ServerMessage::NewOrder(Ticket::new("o2", Order::new(false, 3))))
        .await
        .unwrap();
    let outcome = expo
        .receive(ServerMessage::OrderProgress(OrderUpdate {
            order_id: OrderId::from("o1"),
            order: Order::new(true, 2),
        }))
        .await
        .unwrap();
    assert!(outcome.was_ignored());

    let state: SessionState = expo.snapshot().await.unwrap();
    assert_eq!(state.order_id(), Some(&OrderId::from("o2")));
    assert_eq!(state.plate(), Some(&Order::empty()));
}

#[tokio::test]
async fn test_expo_verdict_and_duplicate_game_over() {
    let (expo, mut frames) = open_session().await;
    seat(&expo, &mut frames, Role::Player1).await;

    expo.receive(ServerMessage::ChefOrderSubmitted(OrderUpdate {
        order_id: OrderId::from("o1"),
        order: Order::new(true, 2).with_garnish(0),
    }))
    .await
    .unwrap();
    expo.submit().await.unwrap();
    assert_eq!(
        frames.recv().await,
        Some(ClientMessage::CompleteOrder(CompleteOrder {
            order_id: OrderId::from("o1"),
            status: Verdict::Fail,
        }))
    );

    let over = ServerMessage::GameOver(GameOver { final_score: 0 });
    let first = expo.receive(over.clone()).await.unwrap();
    assert_eq!(first.phase, Phase::Menu);
    let second = expo.receive(over).await.unwrap();
    assert!(second.was_ignored());
}

#[tokio::test]
async fn test_closed_session_is_not_found() {
    let (client, _frames) = open_session().await;
    client.close().await.unwrap();

    assert!(matches!(
        client.place_rice().await,
        Err(SessionError::NotFound(_))
    ));
    assert!(client.fetch(client.id()).await.unwrap().is_none());
}

/// Client wrapper against a mock: no actor is spawned.
#[tokio::test]
async fn test_session_client_with_mock() {
    let mut mock = MockClient::<Session>::new();
    mock.expect_action(SessionId(4))
        .return_ok(SessionOutcome {
            phase: Phase::Matching,
            notices: vec![],
            sent: 1,
        });

    let client = SessionClient::new(mock.client(), SessionId(4));
    let outcome = client.join_match("SUSHI-0004").await.unwrap();
    assert_eq!(outcome.phase, Phase::Matching);
    assert_eq!(outcome.sent, 1);
    mock.verify();
}
