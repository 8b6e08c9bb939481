use crate::domain::chips::Chips;
use crate::domain::hand::Phase;
use crate::domain::player::Seat;
use crate::domain::table::{SeatIndex, Table};
use crate::domain::variant::{BetStructure, VariantConfig};
use crate::engine::actions::Move;
use crate::engine::betting::BettingState;

/// Полный упорядоченный список допустимых ходов места.
///
/// Чистая функция: стол не меняется. Пустой список - место сейчас не может ходить
/// (нет торговли, не в раздаче, олл-ин).
pub fn legal_moves(table: &Table, betting: &BettingState, seat_idx: SeatIndex) -> Vec<Move> {
    let seat = match table.seats.get(seat_idx) {
        Some(seat) => seat,
        None => return Vec::new(),
    };
    if table.phase != Phase::Betting || !seat.can_act() {
        return Vec::new();
    }

    let variant = &table.config.variant;
    let mut moves = Vec::new();

    // Фолд - когда есть ставка или улица не первая.
    if !betting.current_bet.is_zero() || table.round > 1 {
        moves.push(Move::Fold);
    }

    if betting.current_bet.is_zero() {
        open_moves(variant, table.round, seat, &mut moves);
    } else {
        facing_bet_moves(variant, table.round, seat, betting, &mut moves);
    }

    moves.push(Move::AllIn);
    moves
}

/// Проверка, что ход есть в списке допустимых.
pub fn is_legal(table: &Table, betting: &BettingState, seat_idx: SeatIndex, mv: &Move) -> bool {
    legal_moves(table, betting, seat_idx).contains(mv)
}

/// Ставки ещё нет: bring-in (на первой улице стада) или чек, плюс открывающие ставки.
fn open_moves(variant: &VariantConfig, round: u8, seat: &Seat, moves: &mut Vec<Move>) {
    match variant.bring_in() {
        Some(bring_in) if round == 1 => {
            if seat.purse >= bring_in {
                moves.push(Move::PostForced(bring_in));
            }
        }
        _ => moves.push(Move::Check),
    }

    let unit = variant.bet_unit(round);
    let sizes: &[u64] = match variant.structure {
        BetStructure::FixedLimit { .. } => &[1],
        BetStructure::NoLimit { .. } => &[1, 2],
    };
    for &k in sizes {
        let amount = unit.times(k);
        if seat.purse >= amount {
            moves.push(Move::Bet(amount));
        }
    }
}

/// Есть ставка: чек (если торговля не открыта и уже уравнено), колл, добивание или рейзы.
fn facing_bet_moves(
    variant: &VariantConfig,
    round: u8,
    seat: &Seat,
    betting: &BettingState,
    moves: &mut Vec<Move>,
) {
    let to_call = betting.to_call(seat.committed);
    let unit = variant.bet_unit(round);

    if to_call.is_zero() && !betting.opened {
        moves.push(Move::Check);
    }
    if !to_call.is_zero() && seat.purse >= to_call {
        moves.push(Move::Call(to_call));
    }

    match variant.structure {
        BetStructure::FixedLimit { max_raises, .. } => {
            if !betting.opened && betting.current_bet < unit {
                // Поверх bring-in: добить до полной ставки.
                let complete = unit.saturating_sub(seat.committed);
                if !complete.is_zero() && seat.purse >= complete {
                    moves.push(Move::Bet(complete));
                }
            } else if betting.raise_count < max_raises {
                let amount = to_call + unit;
                if seat.purse >= amount {
                    moves.push(Move::Raise(amount));
                }
            }
        }
        BetStructure::NoLimit { min_bet } => {
            let step = betting.min_raise.max(min_bet);
            for k in 1..=2u64 {
                let amount: Chips = to_call + step.times(k);
                if seat.purse >= amount {
                    moves.push(Move::Raise(amount));
                }
            }
        }
    }
}
