//! Pot accounting: per-seat contributions, main/side pot construction by
//! contribution tiers, and showdown settlement.
//!
//! Chips are conserved end to end: the pots built from a set of
//! contributions always sum to the contributions, and [`settle`] pays out
//! exactly the sum of every pot that has an eligible seat.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::GameError;
use crate::hand::{compare_hands, HandStrength};
use crate::player::Player;

/// One pot: its chips and the seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    /// Seats eligible to win, ascending
    pub eligible: Vec<usize>,
}

/// A seat's total chips put in for the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub seat: usize,
    pub amount: u32,
    pub folded: bool,
}

/// Chips awarded to one seat from one pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub pot_index: usize,
    pub seat: usize,
    pub amount: u32,
}

/// Tracks what every seat has put in during the current hand.
#[derive(Debug, Clone, Default)]
pub struct PotManager {
    contributions: Vec<u32>,
    folded: Vec<bool>,
}

impl PotManager {
    pub fn new(seats: usize) -> Self {
        Self {
            contributions: vec![0; seats],
            folded: vec![false; seats],
        }
    }

    /// Builds a manager from final per-seat totals, nobody folded.
    ///
    /// ```
    /// use holdem_engine::pot::PotManager;
    ///
    /// let pm = PotManager::from_contributions([500, 1000]);
    /// assert_eq!(pm.main_pot(), 1000);
    /// assert_eq!(pm.side_pots().len(), 1);
    /// ```
    pub fn from_contributions<I: IntoIterator<Item = u32>>(amounts: I) -> Self {
        let contributions: Vec<u32> = amounts.into_iter().collect();
        let folded = vec![false; contributions.len()];
        Self {
            contributions,
            folded,
        }
    }

    /// Moves `amount` chips from `player`'s stack into the pot for `seat`.
    ///
    /// Fails with [`GameError::InsufficientChips`] if the stack is short;
    /// nothing is moved in that case. Putting in the last chip marks the
    /// player all-in.
    pub fn contribute(
        &mut self,
        seat: usize,
        player: &mut Player,
        amount: u32,
    ) -> Result<(), GameError> {
        if seat >= self.contributions.len() {
            self.contributions.resize(seat + 1, 0);
            self.folded.resize(seat + 1, false);
        }
        player.commit(seat, amount)?;
        self.contributions[seat] += amount;
        Ok(())
    }

    pub fn mark_folded(&mut self, seat: usize) {
        if let Some(f) = self.folded.get_mut(seat) {
            *f = true;
        }
    }

    pub fn contribution(&self, seat: usize) -> u32 {
        self.contributions.get(seat).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.contributions.iter().sum()
    }

    pub fn contributions(&self) -> Vec<Contribution> {
        (0..self.contributions.len())
            .filter(|&seat| self.contributions[seat] > 0)
            .map(|seat| Contribution {
                seat,
                amount: self.contributions[seat],
                folded: self.folded.get(seat).copied().unwrap_or(false),
            })
            .collect()
    }

    pub fn pots(&self) -> Vec<Pot> {
        build_pots(&self.contributions())
    }

    pub fn main_pot(&self) -> u32 {
        self.pots().first().map(|p| p.amount).unwrap_or(0)
    }

    pub fn side_pots(&self) -> Vec<Pot> {
        self.pots().into_iter().skip(1).collect()
    }
}

/// Partitions hand contributions into a main pot and side pots.
///
/// Distinct contribution levels are visited in ascending order; each tier
/// holds `(level - previous level) * (contributors at or above level)` chips
/// and is won only by non-folded contributors at or above the level. A tier
/// whose contributors all folded is merged into the pot below it (or the
/// next one up when it is the lowest). If every contributor folded, the
/// chips are returned as a single pot with no eligible seat, which
/// [`settle`] leaves unpaid.
///
/// ```
/// use holdem_engine::pot::{build_pots, Contribution};
///
/// let pots = build_pots(&[
///     Contribution { seat: 0, amount: 100, folded: false },
///     Contribution { seat: 1, amount: 300, folded: false },
///     Contribution { seat: 2, amount: 50, folded: true },
/// ]);
/// let amounts: Vec<u32> = pots.iter().map(|p| p.amount).collect();
/// assert_eq!(amounts, vec![150, 100, 200]);
/// assert_eq!(pots[2].eligible, vec![1]);
/// ```
pub fn build_pots(contributions: &[Contribution]) -> Vec<Pot> {
    let mut levels: Vec<u32> = contributions
        .iter()
        .map(|c| c.amount)
        .filter(|&a| a > 0)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::with_capacity(levels.len());
    let mut carry = 0u32;
    let mut prev = 0u32;
    for level in levels {
        let contributors = contributions.iter().filter(|c| c.amount >= level).count() as u32;
        let amount = (level - prev) * contributors + carry;
        let mut eligible: Vec<usize> = contributions
            .iter()
            .filter(|c| c.amount >= level && !c.folded)
            .map(|c| c.seat)
            .collect();
        eligible.sort_unstable();
        prev = level;

        if eligible.is_empty() {
            match pots.last_mut() {
                Some(below) => below.amount += amount,
                None => {
                    carry = amount;
                    continue;
                }
            }
        } else {
            pots.push(Pot { amount, eligible });
        }
        carry = 0;
    }
    if carry > 0 {
        // every contributor folded; keep the chips in a pot nobody can win
        pots.push(Pot {
            amount: carry,
            eligible: Vec::new(),
        });
    }
    debug!(pots = pots.len(), "pots built");
    pots
}

/// Pays every pot to the best eligible hand(s).
///
/// `hands` holds the showdown hands of seats still contesting; a pot with a
/// single eligible seat needs no hand. Ties split evenly and odd chips go one
/// at a time following `payout_order` (seats missing from it come last).
/// When no eligible seat has a hand the pot is split among all eligible seats.
pub fn settle(
    pots: &[Pot],
    hands: &[(usize, HandStrength)],
    payout_order: &[usize],
) -> Vec<Payout> {
    let order_key = |seat: usize| {
        payout_order
            .iter()
            .position(|&s| s == seat)
            .unwrap_or(payout_order.len() + seat)
    };

    let mut payouts = Vec::new();
    for (pot_index, pot) in pots.iter().enumerate() {
        if pot.eligible.is_empty() || pot.amount == 0 {
            continue;
        }
        let contenders: Vec<(usize, &HandStrength)> = pot
            .eligible
            .iter()
            .filter_map(|&seat| {
                hands
                    .iter()
                    .find(|(s, _)| *s == seat)
                    .map(|(s, hs)| (*s, hs))
            })
            .collect();

        let mut winners: Vec<usize> = match contenders.iter().map(|(_, hs)| *hs).max() {
            Some(best) => contenders
                .iter()
                .filter(|(_, hs)| compare_hands(hs, best).is_eq())
                .map(|(s, _)| *s)
                .collect(),
            None => pot.eligible.clone(),
        };
        winners.sort_by_key(|&s| order_key(s));

        let n = winners.len() as u32;
        let share = pot.amount / n;
        let odd = (pot.amount % n) as usize;
        for (i, &seat) in winners.iter().enumerate() {
            let amount = share + u32::from(i < odd);
            if amount > 0 {
                payouts.push(Payout {
                    pot_index,
                    seat,
                    amount,
                });
            }
        }
    }
    payouts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::hand::evaluate;
    use crate::player::PlayerStatus;

    fn hand(s: &str) -> HandStrength {
        evaluate(&parse_cards(s).unwrap()).unwrap()
    }

    fn c(seat: usize, amount: u32, folded: bool) -> Contribution {
        Contribution {
            seat,
            amount,
            folded,
        }
    }

    #[test]
    fn folded_top_contributor_merges_down() {
        // seat 2 put in most and folded; its excess joins the pot below
        let pots = build_pots(&[c(0, 100, false), c(1, 200, false), c(2, 300, true)]);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 300);
        assert_eq!(pots[1].amount, 300);
        assert_eq!(pots[1].eligible, vec![1]);
        assert_eq!(pots.iter().map(|p| p.amount).sum::<u32>(), 600);
    }

    #[test]
    fn lowest_tier_all_folded_carries_up() {
        let pots = build_pots(&[c(0, 20, true), c(1, 50, false), c(2, 50, false)]);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 120);
        assert_eq!(pots[0].eligible, vec![1, 2]);
    }

    #[test]
    fn odd_chip_follows_payout_order() {
        let pots = vec![Pot {
            amount: 101,
            eligible: vec![0, 2],
        }];
        let hands = vec![(0, hand("As Kd Qh Jc 9s")), (2, hand("Ad Ks Qc Jh 9d"))];
        let payouts = settle(&pots, &hands, &[2, 0]);
        assert_eq!(payouts[0].seat, 2);
        assert_eq!(payouts[0].amount, 51);
        assert_eq!(payouts[1].seat, 0);
        assert_eq!(payouts[1].amount, 50);
    }

    #[test]
    fn single_eligible_needs_no_hand() {
        let pots = vec![Pot {
            amount: 40,
            eligible: vec![3],
        }];
        let payouts = settle(&pots, &[], &[]);
        assert_eq!(
            payouts,
            vec![Payout {
                pot_index: 0,
                seat: 3,
                amount: 40
            }]
        );
    }

    #[test]
    fn contribute_refuses_overdraw() {
        let mut pm = PotManager::new(2);
        let mut p = Player::new("a", 10);
        p.begin_hand();
        assert!(pm.contribute(0, &mut p, 11).is_err());
        assert_eq!(pm.total(), 0);
        pm.contribute(0, &mut p, 10).unwrap();
        assert_eq!(pm.contribution(0), 10);
        assert_eq!(p.status(), PlayerStatus::AllIn);
    }
}
