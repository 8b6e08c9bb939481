//! Очерёдность ходов: кто ходит первым, кто следующий, дедлайны.

use std::time::Instant;

use crate::domain::card::Card;
use crate::domain::hand::HandRank;
use crate::domain::player::Seat;
use crate::domain::table::{SeatIndex, Table};
use crate::domain::variant::VariantKind;
use crate::engine::betting::BettingState;
use crate::eval::HandEvaluator;
use crate::time_ctrl::TurnClock;

/// Найти следующее место по кругу, удовлетворяющее `pred` (включая/исключая start).
pub fn next_seat_where(
    seats: &[Seat],
    start: SeatIndex,
    include_start: bool,
    pred: impl Fn(&Seat) -> bool,
) -> Option<SeatIndex> {
    let n = seats.len();
    if n == 0 {
        return None;
    }

    let first = if include_start { 0 } else { 1 };
    (first..first + n)
        .map(|step| (start + step) % n)
        .find(|&idx| pred(&seats[idx]))
}

/// Должно ли место ещё ходить в этом раунде.
pub fn needs_to_act(seat: &Seat, betting: &BettingState) -> bool {
    seat.can_act() && (!seat.has_acted() || seat.committed < betting.current_bet)
}

/// Раунд торговли завершён: каждый претендент походил и уравнял ставку
/// (или стоит олл-ин).
pub fn is_round_complete(table: &Table, betting: &BettingState) -> bool {
    !table.seats.iter().any(|s| needs_to_act(s, betting))
}

/// Следующее место после `from`, которому нужно ходить.
pub fn next_to_act(table: &Table, betting: &BettingState, from: SeatIndex) -> Option<SeatIndex> {
    next_seat_where(&table.seats, from, false, |s| needs_to_act(s, betting))
}

/// Следующая позиция дилера среди участников раздачи:
/// - если кнопка была и её место ещё за столом – следующий участник после неё;
/// - иначе – первый участник с начала списка.
pub fn next_dealer(table: &Table) -> Option<SeatIndex> {
    let prev = table
        .dealer_button
        .and_then(|pid| table.seat_index(pid));
    match prev {
        Some(idx) => next_seat_where(&table.seats, idx, false, Seat::is_contender),
        None => next_seat_where(&table.seats, 0, true, Seat::is_contender),
    }
}

/// Места малого и большого блайнда для заданного дилера.
/// Хедз-ап: дилер ставит малый блайнд.
pub fn blind_seats(table: &Table, dealer: SeatIndex) -> Option<(SeatIndex, SeatIndex)> {
    let after_dealer = next_seat_where(&table.seats, dealer, false, Seat::is_contender)?;
    if table.contender_count() == 2 {
        return Some((dealer, after_dealer));
    }
    let bb = next_seat_where(&table.seats, after_dealer, false, Seat::is_contender)?;
    Some((after_dealer, bb))
}

/// Ключ "младшей" открытой карты: ранг, затем масть.
fn lowest_up_card(seat: &Seat) -> Option<Card> {
    seat.up_cards().into_iter().min()
}

/// Ключ силы открытой руки: ранг комбинации, затем старшая открытая карта.
fn visible_strength(seat: &Seat, evaluator: &dyn HandEvaluator) -> (HandRank, Option<Card>) {
    let up = seat.up_cards();
    (evaluator.rank(&up), up.iter().copied().max())
}

/// Первый ходящий новой улицы (раунд уже выставлен в `table.round`).
///
/// - стад, первая улица: младшая открытая карта (она же ставит bring-in);
/// - стад, дальше: сильнейшая открытая рука;
/// - холдем: первый после дилера.
pub fn first_to_act(
    table: &Table,
    betting: &BettingState,
    evaluator: &dyn HandEvaluator,
) -> Option<SeatIndex> {
    let candidates = table
        .seats
        .iter()
        .enumerate()
        .filter(|(_, s)| needs_to_act(s, betting));

    match table.config.variant.kind {
        VariantKind::Stud if table.round <= 1 => candidates
            .min_by_key(|(_, s)| lowest_up_card(s))
            .map(|(idx, _)| idx),
        VariantKind::Stud => candidates
            .max_by_key(|(_, s)| visible_strength(s, evaluator))
            .map(|(idx, _)| idx),
        VariantKind::HoldEm => {
            let dealer = table
                .dealer_button
                .and_then(|pid| table.seat_index(pid))
                .unwrap_or(0);
            next_to_act(table, betting, dealer)
        }
    }
}

/// Передать ход месту `idx` и завести его таймер.
/// `new_round` добавляет буфер первому ходящему улицы.
pub fn set_turn(
    table: &mut Table,
    clock: &mut TurnClock,
    idx: Option<SeatIndex>,
    now: Instant,
    new_round: bool,
) {
    table.active = idx;
    match idx.and_then(|i| table.seats.get(i)) {
        Some(seat) => {
            let limit = table.config.time.action_limit(seat.is_bot, new_round);
            clock.arm(now, limit);
        }
        None => clock.clear(),
    }
}

/// Сдвинуть ход к следующему месту, которому нужно ходить.
/// Возвращает новое активное место (None - ходить некому).
pub fn advance_turn(
    table: &mut Table,
    betting: &BettingState,
    clock: &mut TurnClock,
    now: Instant,
) -> Option<SeatIndex> {
    let from = table.active.unwrap_or(0);
    let next = next_to_act(table, betting, from);
    set_turn(table, clock, next, now, false);
    next
}
