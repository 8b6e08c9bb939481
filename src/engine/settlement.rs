//! Расчёт банка в конце раздачи.

use tracing::{info, warn};

use crate::domain::chips::Chips;
use crate::domain::hand::{HandRank, Phase, SettlementReport};
use crate::domain::table::{SeatIndex, Table};
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::eval::{describe_hand_detailed, HandEvaluator};

const LOG_TARGET: &str = "poker_table::engine::settlement";

/// Текст результата прерванной раздачи.
pub const ABORTED_MESSAGE: &str = "Hand aborted: no contenders remain";

/// Разыграть банк.
///
/// - один претендент – забирает весь банк без вскрытия;
/// - несколько – сравниваем руки, равные делят банк поровну,
///   остаток от целочисленного деления никому не достаётся;
/// - ни одного – банк сгорает, раздача считается прерванной.
///
/// Банк уже содержит все ставки раздачи, включая текущий раунд:
/// `committed` здесь только обнуляется.
pub fn settle(
    table: &mut Table,
    evaluator: &dyn HandEvaluator,
    history: &mut HandHistory,
) -> SettlementReport {
    table.phase = Phase::Showdown;

    let pot = table.pot;
    table.pot = Chips::ZERO;
    for seat in table.seats.iter_mut() {
        seat.committed = Chips::ZERO;
    }

    let contenders: Vec<SeatIndex> = table
        .seats
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_contender())
        .map(|(idx, _)| idx)
        .collect();

    let report = match contenders.as_slice() {
        [] => abort(table, pot, history),
        [only] => award_by_default(table, *only, pot, history),
        _ => showdown(table, &contenders, pot, evaluator, history),
    };

    table.won_by_default = report.won_by_default;
    table.last_result = report.result.clone();
    history.push(HandEventKind::HandFinished {
        hand_no: table.hands_played,
        result: report.result.clone(),
    });

    info!(
        target: LOG_TARGET,
        table_id = table.id,
        hand_no = table.hands_played,
        pot = pot.0,
        winners = report.winners.len(),
        remainder = report.remainder.0,
        result = %report.result,
        "hand settled"
    );

    report
}

fn abort(table: &Table, pot: Chips, history: &mut HandHistory) -> SettlementReport {
    warn!(target: LOG_TARGET, table_id = table.id, pot = pot.0, "hand aborted without contenders");
    history.push(HandEventKind::HandAborted { pot });
    SettlementReport {
        pot,
        winners: Vec::new(),
        share: Chips::ZERO,
        remainder: pot,
        won_by_default: false,
        result: ABORTED_MESSAGE.to_string(),
    }
}

fn award_by_default(
    table: &mut Table,
    winner: SeatIndex,
    pot: Chips,
    history: &mut HandHistory,
) -> SettlementReport {
    let seat = &mut table.seats[winner];
    seat.purse += pot;
    history.push(HandEventKind::PotAwarded {
        player_id: seat.player_id,
        amount: pot,
    });

    SettlementReport {
        pot,
        winners: vec![seat.player_id],
        share: pot,
        remainder: Chips::ZERO,
        won_by_default: true,
        result: format!("{} won by default", seat.name),
    }
}

fn showdown(
    table: &mut Table,
    contenders: &[SeatIndex],
    pot: Chips,
    evaluator: &dyn HandEvaluator,
    history: &mut HandHistory,
) -> SettlementReport {
    let board = table.board.clone();

    let ranked: Vec<(SeatIndex, HandRank)> = contenders
        .iter()
        .map(|&idx| {
            let seat = &table.seats[idx];
            let mut cards = seat.all_cards();
            cards.extend_from_slice(&board);
            let rank = evaluator.rank(&cards);
            history.push(HandEventKind::ShowdownReveal {
                player_id: seat.player_id,
                cards,
                rank_value: rank.0,
            });
            (idx, rank)
        })
        .collect();

    let best = ranked.iter().map(|(_, r)| *r).max().unwrap_or_default();
    let winners: Vec<SeatIndex> = ranked
        .iter()
        .filter(|(_, r)| *r == best)
        .map(|(idx, _)| *idx)
        .collect();

    let (share, remainder) = pot.split_even(winners.len());

    let mut names = Vec::with_capacity(winners.len());
    let mut winner_ids = Vec::with_capacity(winners.len());
    for &idx in &winners {
        let seat = &mut table.seats[idx];
        seat.purse += share;
        history.push(HandEventKind::PotAwarded {
            player_id: seat.player_id,
            amount: share,
        });
        names.push(seat.name.clone());
        winner_ids.push(seat.player_id);
    }

    if !remainder.is_zero() {
        history.push(HandEventKind::RemainderDiscarded { amount: remainder });
    }

    SettlementReport {
        pot,
        winners: winner_ids,
        share,
        remainder,
        won_by_default: false,
        result: format!(
            "{} won with {}",
            names.join(" and "),
            describe_hand_detailed(best)
        ),
    }
}
