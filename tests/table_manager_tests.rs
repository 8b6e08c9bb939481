use std::sync::Arc;

use poker_table::config::EngineConfig;
use poker_table::domain::{card::Card, hand::Phase};
use poker_table::engine::{
    actions::Move,
    errors::EngineError,
    game_loop::TickOutcome,
    table_manager::{ManagerError, SessionHandle, TableManager},
};
use poker_table::time_ctrl::ManualClock;

fn manager() -> TableManager {
    TableManager::new().with_clock(Arc::new(ManualClock::new()))
}

fn dealt_cards(handle: &SessionHandle) -> Vec<Vec<Card>> {
    handle.with_session(|s| s.table().seats.iter().map(|seat| seat.all_cards()).collect())
}

//
// Создание и список столов
//
#[test]
fn create_seats_configured_bots_and_lists_tables() {
    let mgr = manager();
    let mut cfg = EngineConfig::texas_holdem();
    cfg.bots.count = 3;

    let holdem = mgr.create_table("Hold'em", &cfg).unwrap();
    let stud = mgr.create_table("Stud", &EngineConfig::five_card_stud()).unwrap();
    assert_ne!(holdem, stud);

    let list = mgr.list();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, holdem);
    assert_eq!(list[0].players, 3);
    assert_eq!(list[0].phase, Phase::NoGame);
    assert_eq!(list[1].name, "Stud");
    assert_eq!(list[1].players, 0);

    let names: Vec<String> = mgr
        .get(holdem)
        .unwrap()
        .with_session(|s| s.table().seats.iter().map(|seat| seat.name.clone()).collect());
    assert_eq!(names, vec!["Clyd BOT", "Jim BOT", "Kirk BOT"]);
}

#[test]
fn unknown_table_is_reported() {
    let mgr = manager();
    assert!(matches!(mgr.get(42), Err(ManagerError::TableNotFound(42))));
    assert_eq!(mgr.remove(42), Err(ManagerError::TableNotFound(42)));

    let id = mgr.create_table("T", &EngineConfig::default()).unwrap();
    mgr.remove(id).unwrap();
    assert!(mgr.get(id).is_err());
    assert!(mgr.list().is_empty());
}

//
// Работа через SessionHandle
//
#[test]
fn poll_touches_ticks_and_projects() {
    let mgr = manager();
    let id = mgr.create_table("T", &EngineConfig::texas_holdem()).unwrap();
    let handle = mgr.get(id).unwrap();

    let alice = handle.join("Alice", false).unwrap();
    let view = handle.poll(Some(alice));
    assert_eq!(view.phase, Phase::NoGame);
    assert_eq!(view.seats.len(), 1);
    assert!(!view.spectating);

    let bob = handle.join("Bob", false).unwrap();
    assert_eq!(
        handle.join("bob", true),
        Err(EngineError::DuplicateName("bob".into()))
    );

    let view = handle.poll(Some(bob));
    assert_eq!(view.phase, Phase::Betting);
    assert_eq!(view.seats[0].name, "Bob");
    assert_eq!(view.table_id, id);
    assert!(!view.hash.is_empty());

    // Наблюдатель видит стол, но не чужие закрытые карты.
    let spectator = handle.poll(None);
    assert!(spectator.spectating);
    assert!(spectator.legal_moves.is_empty());
}

#[test]
fn moves_go_through_the_handle() {
    let mgr = manager();
    let id = mgr.create_table("T", &EngineConfig::texas_holdem()).unwrap();
    let handle = mgr.get(id).unwrap();
    let alice = handle.join("Alice", false).unwrap();
    let bob = handle.join("Bob", false).unwrap();
    assert_eq!(handle.tick(), TickOutcome::HandStarted);

    let active = handle.with_session(|s| s.table().active_seat().map(|seat| seat.player_id));
    let (actor, other) = if active == Some(alice) { (alice, bob) } else { (bob, alice) };

    assert!(handle.legal_moves(other).is_empty());
    // Колл малого блайнда: раздача продолжается, ход переходит к другому.
    let call = handle
        .legal_moves(actor)
        .into_iter()
        .find(|mv| matches!(mv, Move::Call(_)))
        .unwrap();
    handle.apply_move(actor, call).unwrap();
    assert_eq!(
        handle.apply_move(actor, call),
        Err(EngineError::NotPlayersTurn(actor))
    );
    assert!(!handle.legal_moves(other).is_empty());
}

//
// Воспроизводимость по базовому seed
//
#[test]
fn base_seed_makes_tables_reproducible() {
    let mut cfg = EngineConfig::texas_holdem();
    cfg.bots.count = 3;

    let first = TableManager::new()
        .with_seed(9)
        .with_clock(Arc::new(ManualClock::new()));
    let second = TableManager::new()
        .with_seed(9)
        .with_clock(Arc::new(ManualClock::new()));

    let a = first.get(first.create_table("A", &cfg).unwrap()).unwrap();
    let b = second.get(second.create_table("A", &cfg).unwrap()).unwrap();
    assert_eq!(a.tick(), TickOutcome::HandStarted);
    assert_eq!(b.tick(), TickOutcome::HandStarted);

    assert_eq!(dealt_cards(&a), dealt_cards(&b));
    assert_eq!(dealt_cards(&a)[0].len(), 2);
}

#[test]
fn tick_all_reports_every_table() {
    let mgr = manager();
    let mut cfg = EngineConfig::texas_holdem();
    cfg.bots.count = 2;
    let busy = mgr.create_table("Busy", &cfg).unwrap();
    let empty = mgr.create_table("Empty", &EngineConfig::default()).unwrap();

    let outcomes = mgr.tick_all();
    assert_eq!(
        outcomes,
        vec![
            (busy, TickOutcome::HandStarted),
            (empty, TickOutcome::WaitingForPlayers),
        ]
    );
}

#[test]
fn poll_with_unknown_player_is_a_spectator_view() {
    let mgr = manager();
    let id = mgr.create_table("T", &EngineConfig::texas_holdem()).unwrap();
    let handle = mgr.get(id).unwrap();
    handle.join("Alice", false).unwrap();

    let view = handle.poll(Some(999));
    assert!(view.spectating);
    assert_eq!(view.seats[0].name, "Alice");
    assert_eq!(view.phase, Phase::NoGame);
}
