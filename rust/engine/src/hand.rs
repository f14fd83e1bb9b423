use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::errors::GameError;

/// Hand categories, weakest first. The derived ordering is the poker ordering.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum HandRank {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandRank::HighCard => "High Card",
            HandRank::Pair => "Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };
        f.write_str(s)
    }
}

/// The value of the best five-card hand found in a set of cards.
///
/// Equality and ordering only look at `rank` and `kickers`: two hands that
/// compare equal split the pot, whatever suits made them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandStrength {
    pub rank: HandRank,
    // kickers: ordered high -> low for tiebreaks, unused slots are 0.
    // Straights carry only their top card (5 for the wheel).
    pub kickers: [u8; 5],
    /// The five cards making the hand, most significant first.
    pub best_five: [Card; 5],
}

impl PartialEq for HandStrength {
    fn eq(&self, other: &Self) -> bool {
        compare_hands(self, other) == Ordering::Equal
    }
}

impl Eq for HandStrength {}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_hands(self, other)
    }
}

impl HandStrength {
    /// Human readable name, e.g. "Full House, Kings over Fives".
    pub fn describe(&self) -> String {
        let r = |i: usize| Rank::from_u8(self.kickers[i]).unwrap_or(Rank::Two);
        match self.rank {
            HandRank::StraightFlush if self.kickers[0] == Rank::Ace.value() => {
                "Royal Flush".to_string()
            }
            HandRank::StraightFlush => format!("Straight Flush, {} high", r(0)),
            HandRank::FourOfAKind => format!("Four of a Kind, {}", r(0).plural()),
            HandRank::FullHouse => {
                format!("Full House, {} over {}", r(0).plural(), r(1).plural())
            }
            HandRank::Flush => format!("Flush, {} high", r(0)),
            HandRank::Straight => format!("Straight, {} high", r(0)),
            HandRank::ThreeOfAKind => format!("Three of a Kind, {}", r(0).plural()),
            HandRank::TwoPair => format!("Two Pair, {} and {}", r(0).plural(), r(1).plural()),
            HandRank::Pair => format!("Pair of {}", r(0).plural()),
            HandRank::HighCard => format!("High Card, {}", r(0)),
        }
    }
}

/// Total order on hand strengths: category first, then tie-break ranks.
pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.rank.cmp(&b.rank) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Finds the best five-card hand among 5 to 7 distinct cards.
///
/// Every 5-card subset is scored independently and the maximum is kept,
/// so the result does not depend on input order.
///
/// # Errors
///
/// [`GameError::InvalidHandSize`] when fewer than 5, more than 7, or
/// duplicate cards are supplied.
///
/// # Examples
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::hand::{evaluate, HandRank};
///
/// let cards = parse_cards("As 2h 3d 4c 5s Kd Kh").unwrap();
/// let strength = evaluate(&cards).unwrap();
/// assert_eq!(strength.rank, HandRank::Straight);
/// assert_eq!(strength.kickers[0], 5);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandStrength, GameError> {
    let count = cards.len();
    let mut sorted = cards.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    let distinct = sorted.len();
    if !(5..=7).contains(&count) || distinct != count {
        return Err(GameError::InvalidHandSize { count, distinct });
    }

    let mut best: Option<HandStrength> = None;
    for a in 0..count {
        for b in a + 1..count {
            for c in b + 1..count {
                for d in c + 1..count {
                    for e in d + 1..count {
                        let hs = score_five([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        best = match best {
                            Some(cur) if compare_hands(&cur, &hs).is_ge() => Some(cur),
                            _ => Some(hs),
                        };
                    }
                }
            }
        }
    }
    best.ok_or(GameError::InvalidHandSize { count, distinct })
}

/// Hold'em convenience: hole cards plus whatever board is out (3 to 5 cards).
pub fn evaluate_holdem(hole: &[Card], board: &[Card]) -> Result<HandStrength, GameError> {
    let mut all = Vec::with_capacity(hole.len() + board.len());
    all.extend_from_slice(hole);
    all.extend_from_slice(board);
    evaluate(&all)
}

fn score_five(cards: [Card; 5]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    for c in cards.iter() {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1u16 << r;
    }
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = if rank_mask.count_ones() == 5 {
        straight_high_from_mask(rank_mask)
    } else {
        None
    };

    // (count, rank) groups, largest group first then highest rank
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let rank = match (straight_high, flush, groups[0].0, groups.get(1).map(|g| g.0)) {
        (Some(_), true, _, _) => HandRank::StraightFlush,
        (_, _, 4, _) => HandRank::FourOfAKind,
        (_, _, 3, Some(2)) => HandRank::FullHouse,
        (_, true, _, _) => HandRank::Flush,
        (Some(_), false, _, _) => HandRank::Straight,
        (_, _, 3, _) => HandRank::ThreeOfAKind,
        (_, _, 2, Some(2)) => HandRank::TwoPair,
        (_, _, 2, _) => HandRank::Pair,
        _ => HandRank::HighCard,
    };

    let mut kickers = [0u8; 5];
    match (rank, straight_high) {
        (HandRank::StraightFlush | HandRank::Straight, Some(high)) => kickers[0] = high,
        _ => {
            for (slot, &(_, r)) in kickers.iter_mut().zip(groups.iter()) {
                *slot = r;
            }
        }
    }

    HandStrength {
        rank,
        kickers,
        best_five: order_for_display(cards, &rank_counts, straight_high == Some(5)),
    }
}

fn order_for_display(mut cards: [Card; 5], rank_counts: &[u8; 15], wheel: bool) -> [Card; 5] {
    cards.sort_unstable_by(|a, b| {
        let ka = (rank_counts[a.rank.value() as usize], a.rank, a.suit);
        let kb = (rank_counts[b.rank.value() as usize], b.rank, b.suit);
        kb.cmp(&ka)
    });
    if wheel {
        // the ace plays low
        cards.rotate_left(1);
    }
    cards
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    // Treat Ace as 14 and optionally as 1
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    for high in (5..=14u8).rev() {
        let window = 0b1_1111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn eval(s: &str) -> HandStrength {
        evaluate(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn straight_mask_finds_wheel_and_broadway() {
        let wheel = (1 << 14) | (1 << 2) | (1 << 3) | (1 << 4) | (1 << 5);
        assert_eq!(straight_high_from_mask(wheel), Some(5));
        let broadway = 0b1_1111u16 << 10;
        assert_eq!(straight_high_from_mask(broadway), Some(14));
        let gap = (1 << 2) | (1 << 3) | (1 << 4) | (1 << 5) | (1 << 7);
        assert_eq!(straight_high_from_mask(gap), None);
    }

    #[test]
    fn kickers_follow_group_order() {
        assert_eq!(eval("Kh Kd 5s 5c 5h").kickers, [5, 13, 0, 0, 0]);
        assert_eq!(eval("9h 9d 4s 4c Ah").kickers, [9, 4, 14, 0, 0]);
        assert_eq!(eval("Qh Qd 7s 3c 2h").kickers, [12, 7, 3, 2, 0]);
    }

    #[test]
    fn wheel_displays_ace_last() {
        let hs = eval("As 2h 3d 4c 5s");
        assert_eq!(hs.best_five[0].rank, Rank::Five);
        assert_eq!(hs.best_five[4].rank, Rank::Ace);
    }

    #[test]
    fn describe_names_hands() {
        assert_eq!(eval("Ah Kh Qh Jh Th").describe(), "Royal Flush");
        assert_eq!(eval("Kh Kd Ks 5c 5h").describe(), "Full House, Kings over Fives");
        assert_eq!(eval("2h 2d 9s 7c 5h").describe(), "Pair of Twos");
    }

    #[test]
    fn best_of_seven_ignores_weaker_subsets() {
        // board pairs, player holds the flush
        let hs = eval("2h 7h 9h Jh Kd Kc 3h");
        assert_eq!(hs.rank, HandRank::Flush);
        assert_eq!(hs.kickers, [11, 9, 7, 3, 2]);
    }
}
