use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use holdem_engine::deck::Deck;
use holdem_engine::hand::{evaluate, HandStrength};
use holdem_engine::pot::{build_pots, settle, Contribution, PotManager};

fn c(seat: usize, amount: u32, folded: bool) -> Contribution {
    Contribution {
        seat,
        amount,
        folded,
    }
}

#[test]
fn side_pots_follow_contribution_tiers() {
    // A all-in for 100, B puts in 300, C folds after 50
    let pots = build_pots(&[c(0, 100, false), c(1, 300, false), c(2, 50, true)]);
    assert_eq!(pots.len(), 3);
    assert_eq!((pots[0].amount, pots[0].eligible.clone()), (150, vec![0, 1]));
    assert_eq!((pots[1].amount, pots[1].eligible.clone()), (100, vec![0, 1]));
    assert_eq!((pots[2].amount, pots[2].eligible.clone()), (200, vec![1]));
}

#[test]
fn equal_contributions_make_one_pot() {
    let pm = PotManager::from_contributions([40, 40, 40]);
    let pots = pm.pots();
    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].amount, 120);
    assert_eq!(pots[0].eligible, vec![0, 1, 2]);
    assert_eq!(pm.main_pot(), 120);
    assert!(pm.side_pots().is_empty());
}

#[test]
fn folded_players_are_never_eligible() {
    let mut pm = PotManager::from_contributions([200, 200, 200]);
    pm.mark_folded(1);
    for pot in pm.pots() {
        assert!(!pot.eligible.contains(&1));
    }
}

#[test]
fn short_stack_wins_only_the_main_pot() {
    let pm = PotManager::from_contributions([50, 200, 200]);
    let pots = pm.pots();
    let hands: Vec<(usize, HandStrength)> = vec![
        (0, hand(&["Ah", "Ad", "Ac", "As", "Kh"])),
        (1, hand(&["Kc", "Kd", "Qh", "Qs", "2c"])),
        (2, hand(&["Jc", "Jd", "9h", "8s", "2d"])),
    ];
    let payouts = settle(&pots, &hands, &[1, 2, 0]);
    let won = |seat| -> u32 {
        payouts
            .iter()
            .filter(|p| p.seat == seat)
            .map(|p| p.amount)
            .sum()
    };
    assert_eq!(won(0), 150);
    assert_eq!(won(1), 300);
    assert_eq!(won(2), 0);
}

fn hand(cards: &[&str]) -> HandStrength {
    let cards: Vec<_> = cards.iter().map(|s| s.parse().unwrap()).collect();
    evaluate(&cards).unwrap()
}

#[test]
fn settlement_conserves_chips() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    for round in 0..300u64 {
        let seats = rng.random_range(2..=9usize);
        let mut contributions: Vec<Contribution> = (0..seats)
            .map(|seat| {
                let amount = rng.random_range(0..=500u32);
                c(seat, amount, rng.random_bool(0.3))
            })
            .collect();
        // someone has to be left contesting
        contributions[0].folded = false;
        contributions[0].amount = contributions[0].amount.max(1);

        let total: u32 = contributions.iter().map(|c| c.amount).sum();
        let pots = build_pots(&contributions);
        assert_eq!(pots.iter().map(|p| p.amount).sum::<u32>(), total);

        let mut deck = Deck::new_with_seed(round);
        deck.shuffle();
        let hands: Vec<(usize, HandStrength)> = contributions
            .iter()
            .filter(|c| !c.folded)
            .map(|c| (c.seat, evaluate(&deck.draw_n(5).unwrap()).unwrap()))
            .collect();
        let order: Vec<usize> = (0..seats).rev().collect();
        let payouts = settle(&pots, &hands, &order);
        assert_eq!(payouts.iter().map(|p| p.amount).sum::<u32>(), total);
        for p in &payouts {
            assert!(!contributions[p.seat].folded, "folded seat {} paid", p.seat);
        }
    }
}

#[test]
fn all_folded_contributions_stay_in_an_unwinnable_pot() {
    let pots = build_pots(&[c(0, 30, true), c(1, 30, true)]);
    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].amount, 60);
    assert!(pots[0].eligible.is_empty());
    assert!(settle(&pots, &[], &[0, 1]).is_empty());

    let pots = build_pots(&[c(0, 10, true), c(1, 40, true), c(2, 25, true)]);
    assert_eq!(pots.iter().map(|p| p.amount).sum::<u32>(), 75);
    assert!(pots.iter().all(|p| p.eligible.is_empty()));
}
