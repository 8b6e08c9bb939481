use crate::domain::card::Rank;

/// Битовая маска рангов: бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Маски всех стритов, от wheel (A2345) до broadway (TJQKA).
/// Индекс `i` соответствует стриту со старшей картой `Five + i`.
pub const STRAIGHT_MASKS: [RankMask; 10] = [
    mask_from_ranks(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]),
    run_mask(Rank::Six),
    run_mask(Rank::Seven),
    run_mask(Rank::Eight),
    run_mask(Rank::Nine),
    run_mask(Rank::Ten),
    run_mask(Rank::Jack),
    run_mask(Rank::Queen),
    run_mask(Rank::King),
    run_mask(Rank::Ace),
];

/// Получить битовую маску для одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank.value() - 2)
}

/// Построить маску из списка рангов.
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        mask |= 1 << (ranks[i] as u8 - 2);
        i += 1;
    }
    mask
}

/// Пять подряд идущих рангов, заканчивающихся на `high`.
const fn run_mask(high: Rank) -> RankMask {
    0b1_1111 << (high as u8 - 6)
}

/// Найти стрит в битовой маске рангов.
/// Возвращает старшую карту стрита; для wheel - `Rank::Five`.
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    STRAIGHT_MASKS
        .iter()
        .enumerate()
        .rev()
        .find(|(_, &sm)| rank_mask & sm == sm)
        .and_then(|(i, _)| Rank::from_value(5 + i as u8))
}
