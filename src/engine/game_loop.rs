//! Сессия одного стола: машина состояний раздачи.
//!
//! Фазы: `NoGame -> Dealing -> Betting(улица N) -> ... -> Showdown -> HandComplete`.
//! Фонового цикла нет: стол двигается только вызовами `tick` и `apply_move`.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::{BotConfig, EngineConfig};
use crate::domain::card::HeldCard;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{Phase, SettlementReport};
use crate::domain::player::{Seat, SeatStatus, LEFT_LABEL};
use crate::domain::table::{SeatIndex, Table, TableConfig, WAITING_MESSAGE};
use crate::domain::variant::ForcedBets;
use crate::domain::{PlayerId, TableId};
use crate::engine::actions::Move;
use crate::engine::betting::BettingState;
use crate::engine::bot::{passive_move, AutomatedPolicy, BaselinePolicy, DecisionContext};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{
    advance_turn, blind_seats, first_to_act, is_round_complete, needs_to_act, next_dealer,
    next_seat_where, next_to_act, set_turn,
};
use crate::engine::settlement::settle;
use crate::engine::validation::{is_legal, legal_moves};
use crate::engine::RandomSource;
use crate::eval::{HandEvaluator, StandardEvaluator};
use crate::infra::{DeterministicRng, IdGenerator, SystemRng};
use crate::time_ctrl::{Clock, SystemClock, TurnClock};

const LOG_TARGET: &str = "poker_table::engine::game_loop";

/// Что сделал один `tick`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ждём хода или конца паузы - ничего не изменилось.
    Idle,
    /// За столом меньше двух игроков, способных играть.
    WaitingForPlayers,
    /// Началась новая раздача.
    HandStarted,
    /// Истёк таймер: ход сделан за игрока (бот или таймаут человека).
    Forced { player: PlayerId, mv: Move },
    /// Активное место не может ходить (ушло, олл-ин) - ход передан дальше.
    Skipped { player: PlayerId },
    /// Остался один претендент - банк разыгран.
    Settled,
    /// Несогласованное состояние исправлено.
    Healed,
}

/// Один стол со всем, что ему принадлежит: колода, RNG, часы, боты.
pub struct Session {
    table: Table,
    deck: Deck,
    betting: BettingState,
    turn_clock: TurnClock,
    history: HandHistory,
    rng: Box<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    policy: Box<dyn AutomatedPolicy>,
    evaluator: Box<dyn HandEvaluator>,
    ids: IdGenerator,
    last_settlement: Option<SettlementReport>,
}

impl Session {
    /// Пустой стол с системными часами, системным RNG и базовым ботом.
    pub fn new(id: TableId, name: impl Into<String>, config: TableConfig) -> Self {
        let first_unit = config.variant.bet_unit(1);
        Self {
            table: Table::new(id, name.into(), config),
            deck: Deck::standard_52(),
            betting: BettingState::new(first_unit),
            turn_clock: TurnClock::new(),
            history: HandHistory::new(),
            rng: Box::new(SystemRng),
            clock: Arc::new(SystemClock),
            policy: Box::new(BaselinePolicy::default()),
            evaluator: Box::new(StandardEvaluator),
            ids: IdGenerator::new(),
            last_settlement: None,
        }
    }

    /// Стол по полному конфигу: политика ботов, seed и сразу посаженные боты.
    pub fn from_config(
        id: TableId,
        name: impl Into<String>,
        config: &EngineConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, EngineError> {
        let mut session = Session::new(id, name, config.table.clone())
            .with_clock(clock)
            .with_policy(BaselinePolicy::new(config.policy.clone()));
        if let Some(seed) = config.seed {
            session = session.with_rng(DeterministicRng::from_seed(seed));
        }
        session.seat_bots(&config.bots)?;
        Ok(session)
    }

    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_policy(mut self, policy: impl AutomatedPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn with_evaluator(mut self, evaluator: impl HandEvaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Прямой доступ к столу. Нужен для подготовки сценариев (стеки, статусы).
    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    pub fn betting(&self) -> &BettingState {
        &self.betting
    }

    pub fn turn_clock(&self) -> &TurnClock {
        &self.turn_clock
    }

    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    /// Итог последней разыгранной раздачи.
    pub fn last_settlement(&self) -> Option<&SettlementReport> {
        self.last_settlement.as_ref()
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    // ---------- места ----------

    /// Посадить ботов из конфига (по порядку имён).
    pub fn seat_bots(&mut self, bots: &BotConfig) -> Result<Vec<PlayerId>, EngineError> {
        bots.full_names()
            .into_iter()
            .take(bots.count as usize)
            .map(|name| self.join(&name, true))
            .collect()
    }

    /// Сесть за стол или вернуться на своё место.
    ///
    /// Имя сравнивается без учёта регистра. Повторный вход с тем же именем
    /// возвращает тот же id и снимает статус Left. Новое место ждёт
    /// следующей раздачи.
    pub fn join(&mut self, name: &str, is_bot: bool) -> Result<PlayerId, EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidName);
        }
        let now = self.now();

        if let Some(idx) = self.table.seat_index_by_name(name) {
            let seat = &mut self.table.seats[idx];
            if seat.is_bot != is_bot {
                return Err(EngineError::DuplicateName(name.to_string()));
            }
            seat.last_seen = now;
            if seat.status == SeatStatus::Left {
                seat.status = SeatStatus::Waiting;
                seat.last_move = None;
                info!(target: LOG_TARGET, table_id = self.table.id, player_id = seat.player_id, name = %seat.name, "player returned");
            }
            return Ok(seat.player_id);
        }

        // Посреди раздачи места не удаляем: по ним ищутся кнопка и активное место.
        let between_hands = matches!(self.table.phase, Phase::NoGame | Phase::HandComplete);
        if self.table.is_full() && between_hands {
            self.mark_stale(now);
            self.prune_left();
        }
        if self.table.is_full() {
            return Err(EngineError::TableFull(self.table.max_seats()));
        }

        let player_id = self.ids.next_player_id();
        let purse = self.table.config.starting_purse;
        self.table
            .seats
            .push(Seat::new(player_id, name.to_string(), purse, is_bot, now));

        info!(
            target: LOG_TARGET,
            table_id = self.table.id,
            player_id,
            name,
            is_bot,
            seats = self.table.seated_count(),
            "player joined"
        );
        Ok(player_id)
    }

    /// Уйти из-за стола. Место удаляется перед следующей раздачей;
    /// если сейчас его ход, ближайший `tick` передаст ход дальше.
    pub fn leave(&mut self, player: PlayerId) -> Result<(), EngineError> {
        let idx = self
            .table
            .seat_index(player)
            .ok_or(EngineError::PlayerNotAtTable(player))?;
        let seat = &mut self.table.seats[idx];
        seat.status = SeatStatus::Left;
        seat.last_move = Some(LEFT_LABEL.to_string());
        info!(target: LOG_TARGET, table_id = self.table.id, player_id = player, "player left");
        Ok(())
    }

    /// Клиент места вышел на связь.
    pub fn touch(&mut self, player: PlayerId) -> Result<(), EngineError> {
        let now = self.now();
        let idx = self
            .table
            .seat_index(player)
            .ok_or(EngineError::PlayerNotAtTable(player))?;
        self.table.seats[idx].last_seen = now;
        Ok(())
    }

    // ---------- ходы ----------

    /// Допустимые ходы игрока. Пусто, если сейчас не его ход.
    pub fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        match self.table.seat_index(player) {
            Some(idx) if self.table.active == Some(idx) => legal_moves(&self.table, &self.betting, idx),
            _ => Vec::new(),
        }
    }

    /// Применить ход игрока. При ошибке стол не меняется.
    pub fn apply_move(&mut self, player: PlayerId, mv: Move) -> Result<(), EngineError> {
        let idx = self
            .table
            .seat_index(player)
            .ok_or(EngineError::PlayerNotAtTable(player))?;
        if self.table.phase != Phase::Betting {
            return Err(EngineError::NoActiveHand);
        }
        if self.table.active != Some(idx) {
            return Err(EngineError::NotPlayersTurn(player));
        }
        if !self.table.seats[idx].can_act() {
            return Err(EngineError::SeatNotPlaying(player));
        }
        if !is_legal(&self.table, &self.betting, idx, &mv) {
            return Err(EngineError::IllegalMove(mv));
        }

        let now = self.now();
        self.table.seats[idx].last_seen = now;
        self.perform_move(idx, mv, false, now);
        Ok(())
    }

    /// Продвинуть стол. Вызывается на каждый опрос клиента.
    pub fn tick(&mut self) -> TickOutcome {
        let now = self.now();
        self.mark_stale(now);

        match self.table.phase {
            Phase::NoGame => {
                self.prune_left();
                if self.table.eligible_count() >= 2 {
                    self.start_hand(now)
                } else {
                    TickOutcome::WaitingForPlayers
                }
            }
            Phase::HandComplete => {
                if !self.turn_clock.expired(now) {
                    return TickOutcome::Idle;
                }
                if self.table.eligible_count() >= 2 {
                    self.start_hand(now)
                } else {
                    self.enter_no_game();
                    self.prune_left();
                    TickOutcome::WaitingForPlayers
                }
            }
            Phase::Betting => self.tick_betting(now),
            Phase::Dealing | Phase::Showdown => {
                warn!(target: LOG_TARGET, table_id = self.table.id, phase = ?self.table.phase, "stuck in transient phase, settling");
                self.settle_hand(now);
                TickOutcome::Healed
            }
        }
    }

    fn tick_betting(&mut self, now: Instant) -> TickOutcome {
        if self.table.contender_count() <= 1 {
            self.settle_hand(now);
            return TickOutcome::Settled;
        }

        let idx = match self.table.active.filter(|&i| i < self.table.seats.len()) {
            Some(idx) => idx,
            None => return self.heal_active(now),
        };

        let seat = &self.table.seats[idx];
        if !seat.can_act() {
            let player = seat.player_id;
            debug!(target: LOG_TARGET, table_id = self.table.id, player_id = player, status = ?seat.status, "active seat cannot act, skipping");
            self.after_move(now);
            return TickOutcome::Skipped { player };
        }

        if !self.turn_clock.expired(now) {
            return TickOutcome::Idle;
        }

        let player = seat.player_id;
        let mv = self.forced_move(idx);
        debug!(target: LOG_TARGET, table_id = self.table.id, player_id = player, mv = %mv.label(), "turn timer expired");
        self.perform_move(idx, mv, true, now);
        TickOutcome::Forced { player, mv }
    }

    /// Активное место потеряно: выводим его заново из статусов мест.
    fn heal_active(&mut self, now: Instant) -> TickOutcome {
        warn!(target: LOG_TARGET, table_id = self.table.id, active = ?self.table.active, "active seat out of range, re-deriving");
        let betting = &self.betting;
        let next = next_seat_where(&self.table.seats, 0, true, |s| needs_to_act(s, betting));
        match next {
            Some(_) => set_turn(&mut self.table, &mut self.turn_clock, next, now, false),
            None => self.finish_betting_round(now),
        }
        TickOutcome::Healed
    }

    /// Ход за игрока по таймеру: бот думает сам, человек чекает или сбрасывает.
    fn forced_move(&mut self, idx: SeatIndex) -> Move {
        let legal = legal_moves(&self.table, &self.betting, idx);
        let seat = &self.table.seats[idx];
        if !seat.is_bot {
            return passive_move(&legal);
        }

        let cards = seat.all_cards();
        let mut visible = cards.clone();
        visible.extend_from_slice(&self.table.board);
        let ctx = DecisionContext {
            round: self.table.round,
            current_bet: self.betting.current_bet,
            to_call: self.betting.to_call(seat.committed),
            purse: seat.purse,
            cards,
            board: self.table.board.clone(),
            strength: self.evaluator.rank(&visible),
        };

        let mv = self.policy.decide(&ctx, &legal, self.rng.as_mut());
        if legal.contains(&mv) {
            mv
        } else {
            warn!(target: LOG_TARGET, table_id = self.table.id, mv = %mv.label(), "policy returned illegal move, playing passive");
            passive_move(&legal)
        }
    }

    /// Фишки, метка хода, история, затем проверка конца раунда.
    fn perform_move(&mut self, idx: SeatIndex, mv: Move, forced: bool, now: Instant) {
        let table = &mut self.table;
        let seat = &mut table.seats[idx];

        match mv {
            Move::Fold => seat.status = SeatStatus::Folded,
            Move::Check => {}
            _ => {
                let paid = seat.commit(mv.chips(seat.purse));
                table.pot += paid;
            }
        }

        match mv {
            Move::PostForced(_) => self.betting.on_forced(seat.committed),
            Move::Bet(_) | Move::Raise(_) | Move::AllIn => self.betting.on_raise(seat.committed),
            _ => {}
        }
        seat.last_move = Some(mv.label());

        let player_id = seat.player_id;
        let purse_after = seat.purse;
        let pot_after = table.pot;
        self.history.push(HandEventKind::MoveApplied {
            player_id,
            mv,
            forced,
            purse_after,
            pot_after,
        });
        debug!(
            target: LOG_TARGET,
            table_id = table.id,
            round = table.round,
            player_id,
            mv = %mv.label(),
            forced,
            pot = pot_after.0,
            "move applied"
        );

        self.after_move(now);
    }

    /// Один претендент – расчёт; раунд закрыт – следующая улица; иначе ход дальше.
    fn after_move(&mut self, now: Instant) {
        if self.table.contender_count() <= 1 {
            self.settle_hand(now);
            return;
        }
        if is_round_complete(&self.table, &self.betting) {
            self.finish_betting_round(now);
            return;
        }
        if advance_turn(&mut self.table, &self.betting, &mut self.turn_clock, now).is_none() {
            self.finish_betting_round(now);
        }
    }

    /// Закрыть раунд торговли. Если ставить больше некому (олл-ины),
    /// оставшиеся улицы раздаются без торговли.
    fn finish_betting_round(&mut self, now: Instant) {
        loop {
            if self.table.round >= self.table.config.variant.final_round() {
                self.settle_hand(now);
                return;
            }
            if self.open_next_street(now) {
                return;
            }
        }
    }

    /// Следующая улица: сброс ставок раунда, раздача, первый ходящий.
    /// Возвращает `false`, если торговли на улице не будет.
    fn open_next_street(&mut self, now: Instant) -> bool {
        self.table.round += 1;
        let round = self.table.round;

        for seat in self.table.seats.iter_mut() {
            seat.committed = Chips::ZERO;
            if seat.status != SeatStatus::Left {
                seat.last_move = None;
            }
        }
        self.betting = BettingState::new(self.table.config.variant.bet_unit(round));
        self.deal_street(round);

        let name = self.table.config.variant.street_name(round).to_string();
        debug!(target: LOG_TARGET, table_id = self.table.id, round, street = %name, "street opened");
        self.history.push(HandEventKind::StreetOpened { round, name });

        if self.table.actionable_count() < 2 {
            set_turn(&mut self.table, &mut self.turn_clock, None, now, true);
            return false;
        }
        let first = first_to_act(&self.table, &self.betting, self.evaluator.as_ref());
        set_turn(&mut self.table, &mut self.turn_clock, first, now, true);
        first.is_some()
    }

    // ---------- раздача ----------

    /// Раздать карты улицы всем претендентам по кругу от места 0,
    /// по одной карте за проход, затем общие карты.
    fn deal_street(&mut self, round: u8) {
        let street = match self.table.config.variant.street(round) {
            Some(street) => street.clone(),
            None => return,
        };
        let contenders: Vec<SeatIndex> = self
            .table
            .seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_contender())
            .map(|(idx, _)| idx)
            .collect();

        let mut dealt: Vec<Vec<HeldCard>> = vec![Vec::new(); contenders.len()];
        let passes = (0..street.down)
            .map(|_| false)
            .chain((0..street.up).map(|_| true));
        for face_up in passes {
            for (slot, &idx) in contenders.iter().enumerate() {
                let Some(card) = self.deck.deal() else {
                    warn!(target: LOG_TARGET, table_id = self.table.id, "deck exhausted");
                    continue;
                };
                let held = if face_up {
                    HeldCard::up(card)
                } else {
                    HeldCard::down(card)
                };
                self.table.seats[idx].cards.push(held);
                dealt[slot].push(held);
            }
        }
        for (slot, &idx) in contenders.iter().enumerate() {
            if !dealt[slot].is_empty() {
                self.history.push(HandEventKind::CardsDealt {
                    player_id: self.table.seats[idx].player_id,
                    cards: std::mem::take(&mut dealt[slot]),
                });
            }
        }

        if street.board > 0 {
            let cards: Vec<_> = (0..street.board).filter_map(|_| self.deck.deal()).collect();
            self.table.board.extend_from_slice(&cards);
            self.history.push(HandEventKind::BoardDealt { round, cards });
        }
    }

    /// Начать раздачу: чистка мест, докупка ботов, анте/блайнды, карты первой улицы.
    fn start_hand(&mut self, now: Instant) -> TickOutcome {
        self.table.phase = Phase::Dealing;
        self.prune_left();

        let config = self.table.config.clone();
        let min_purse = config.variant.min_purse_to_play();
        for seat in self.table.seats.iter_mut() {
            seat.reset_for_hand();
            if seat.is_bot && seat.purse < config.bot_rebuy_below {
                debug!(target: LOG_TARGET, player_id = seat.player_id, purse = seat.purse.0, "bot rebuy");
                seat.purse = config.starting_purse;
            }
            seat.status = if seat.purse >= min_purse {
                SeatStatus::Playing
            } else {
                SeatStatus::Waiting
            };
        }

        self.table.board.clear();
        self.table.pot = Chips::ZERO;
        self.table.active = None;
        self.table.won_by_default = false;

        if self.table.contender_count() < 2 {
            self.enter_no_game();
            return TickOutcome::WaitingForPlayers;
        }

        self.table.hands_played += 1;
        self.table.round = 1;
        self.history = HandHistory::new();
        self.history.push(HandEventKind::HandStarted {
            table_id: self.table.id,
            hand_no: self.table.hands_played,
        });

        self.deck.reset();
        self.rng.shuffle_cards(&mut self.deck.cards);
        self.betting = BettingState::new(config.variant.bet_unit(1));

        if let ForcedBets::AnteBringIn { ante, .. } = config.variant.forced {
            self.post_antes(ante);
        }

        self.deal_street(1);
        let name = config.variant.street_name(1).to_string();
        self.history.push(HandEventKind::StreetOpened { round: 1, name });

        let first = match config.variant.forced {
            ForcedBets::Blinds { small, big } => self.post_blinds(small, big),
            ForcedBets::AnteBringIn { .. } => {
                first_to_act(&self.table, &self.betting, self.evaluator.as_ref())
            }
        };

        self.table.phase = Phase::Betting;
        info!(
            target: LOG_TARGET,
            table_id = self.table.id,
            hand_no = self.table.hands_played,
            players = self.table.contender_count(),
            pot = self.table.pot.0,
            "hand started"
        );

        match first {
            Some(_) => set_turn(&mut self.table, &mut self.turn_clock, first, now, true),
            None => self.finish_betting_round(now),
        }
        TickOutcome::HandStarted
    }

    /// Анте идут прямо в банк, не в ставку раунда.
    fn post_antes(&mut self, ante: Chips) {
        let mut antes = Vec::new();
        for seat in self.table.seats.iter_mut().filter(|s| s.is_contender()) {
            let paid = seat.purse.min(ante);
            seat.purse -= paid;
            self.table.pot += paid;
            antes.push((seat.player_id, paid));
        }
        self.history.push(HandEventKind::AntesPosted { antes });
    }

    /// Сдвинуть кнопку и поставить блайнды. Возвращает первого ходящего.
    fn post_blinds(&mut self, small: Chips, big: Chips) -> Option<SeatIndex> {
        let dealer = next_dealer(&self.table)?;
        self.table.dealer_button = Some(self.table.seats[dealer].player_id);
        let (sb, bb) = blind_seats(&self.table, dealer)?;

        let small_blind = self.post_blind(sb, small);
        let big_blind = self.post_blind(bb, big);
        self.betting.min_raise = self.betting.min_raise.max(big);

        self.history.push(HandEventKind::BlindsPosted {
            dealer: self.table.seats[dealer].player_id,
            small_blind,
            big_blind,
        });
        next_to_act(&self.table, &self.betting, bb)
    }

    /// Блайнд считается ходом места в этом раунде.
    fn post_blind(&mut self, idx: SeatIndex, amount: Chips) -> (PlayerId, Chips) {
        let seat = &mut self.table.seats[idx];
        let paid = seat.commit(amount);
        self.table.pot += paid;
        seat.last_move = Some(Move::PostForced(paid).label());
        self.betting.on_forced(seat.committed);
        (seat.player_id, paid)
    }

    fn settle_hand(&mut self, now: Instant) {
        let report = settle(&mut self.table, self.evaluator.as_ref(), &mut self.history);
        self.table.phase = Phase::HandComplete;
        self.table.active = None;
        self.turn_clock.arm(now, self.table.config.time.end_of_hand());
        self.last_settlement = Some(report);
    }

    fn enter_no_game(&mut self) {
        self.table.phase = Phase::NoGame;
        self.table.round = 0;
        self.table.active = None;
        self.table.board.clear();
        self.table.last_result = WAITING_MESSAGE.to_string();
        self.turn_clock.clear();
        for seat in self.table.seats.iter_mut() {
            if seat.status != SeatStatus::Left {
                seat.status = SeatStatus::Waiting;
            }
            seat.reset_for_hand();
        }
    }

    // ---------- активность ----------

    /// Люди, не выходившие на связь дольше таймаута, помечаются ушедшими.
    fn mark_stale(&mut self, now: Instant) {
        let timeout = self.table.config.time.liveness_timeout();
        let table_id = self.table.id;
        for seat in self
            .table
            .seats
            .iter_mut()
            .filter(|s| !s.is_bot && s.status != SeatStatus::Left)
        {
            if now.saturating_duration_since(seat.last_seen) > timeout {
                seat.status = SeatStatus::Left;
                seat.last_move = Some(LEFT_LABEL.to_string());
                info!(target: LOG_TARGET, table_id, player_id = seat.player_id, "player timed out");
            }
        }
    }

    /// Убрать ушедшие места. Активное место ищем заново по id.
    fn prune_left(&mut self) {
        if !self.table.seats.iter().any(|s| s.status == SeatStatus::Left) {
            return;
        }
        let active_player = self.table.active_seat().map(|s| s.player_id);
        self.table.seats.retain(|s| s.status != SeatStatus::Left);
        self.table.active = active_player.and_then(|pid| self.table.seat_index(pid));
    }
}
