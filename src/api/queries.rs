//! Проекция стола для конкретного зрителя.
//!
//! Закрытые карты чужих мест никогда не попадают в ответ, пока раздача идёт.
//! После вскрытия (не "won by default") карты претендентов видны всем.

use crate::domain::hand::Phase;
use crate::domain::player::Seat;
use crate::domain::table::{SeatIndex, Table};
use crate::domain::PlayerId;
use crate::engine::game_loop::Session;

use super::dto::{CardView, LegalMoveView, SeatView, ViewerState};

/// Собрать `ViewerState` для зрителя `viewer` (None - наблюдатель без места).
pub fn project_for(session: &Session, viewer: Option<PlayerId>) -> ViewerState {
    let table = session.table();
    let viewer_idx = viewer.and_then(|pid| table.seat_index(pid));
    let start = viewer_idx.unwrap_or(0);
    let n = table.seats.len();

    let seats = (0..n)
        .map(|offset| {
            let idx = (start + offset) % n;
            seat_view(table, &table.seats[idx], viewer_idx == Some(idx))
        })
        .collect();

    let active = match table.phase {
        Phase::Betting => table.active.filter(|&idx| idx < n),
        _ => None,
    };
    let active_seat = match active {
        Some(idx) => relative_index(idx, start, n) as i32,
        None => -1,
    };

    let viewer_is_active = active.is_some() && active == viewer_idx;
    let (move_time_secs, legal_moves) = match (viewer_is_active, viewer) {
        (true, Some(pid)) => {
            let now = session.now();
            let grace = table.config.time.display_grace();
            let secs = session.turn_clock().remaining_secs(now, grace);
            let moves = session
                .legal_moves(pid)
                .into_iter()
                .map(LegalMoveView::from)
                .collect();
            (secs, moves)
        }
        _ => (0, Vec::new()),
    };

    // После расчёта банк уже разнесён по стекам, но до новой раздачи
    // клиенту показываем разыгранную сумму.
    let pot = match (table.phase, session.last_settlement()) {
        (Phase::HandComplete, Some(report)) => report.pot,
        _ => table.pot,
    };

    ViewerState {
        table_id: table.id,
        round: table.round,
        street: table.config.variant.street_name(table.round).to_string(),
        phase: table.phase,
        pot,
        current_bet: session.betting().current_bet,
        active_seat,
        move_time_secs,
        spectating: viewer_idx.is_none(),
        seats,
        board: table.board.clone(),
        legal_moves,
        last_result: table.last_result.clone(),
        hands_played: table.hands_played,
        hash: String::new(),
    }
    .with_hash()
}

fn relative_index(idx: SeatIndex, start: SeatIndex, n: usize) -> usize {
    (idx + n - start) % n
}

fn seat_view(table: &Table, seat: &Seat, is_viewer: bool) -> SeatView {
    let revealed = table.phase == Phase::HandComplete && !table.won_by_default && seat.is_contender();
    let cards = seat
        .cards
        .iter()
        .map(|held| {
            if held.face_up || is_viewer || revealed {
                CardView::Shown(held.card)
            } else {
                CardView::Hidden
            }
        })
        .collect();

    SeatView {
        name: seat.name.clone(),
        status: seat.status,
        purse: seat.purse,
        committed: seat.committed,
        last_move: seat.last_move.clone(),
        is_bot: seat.is_bot,
        cards,
    }
}
