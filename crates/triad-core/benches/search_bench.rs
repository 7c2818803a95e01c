use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use triad_core::{
    legal_actions, search, Battle, Duel, DuelConfig, Element, Match, MatchConfig, Policy,
    PotionTier, RosterConfig, Ruleset, SideId,
};

fn stocked_battle() -> Battle {
    let rosters = RosterConfig::default();
    let mut battle = Battle::new(
        Element::Fire,
        rosters.a.build(),
        rosters.b.build(),
        Ruleset::default(),
    );
    for side in SideId::BOTH {
        battle
            .side_mut(side)
            .wallet_mut()
            .add_potions(PotionTier::Small, 6);
    }
    battle
}

fn bench_legal_actions(c: &mut Criterion) {
    let battle = stocked_battle();

    c.bench_function("legal_actions", |b| {
        b.iter(|| legal_actions(black_box(&battle), SideId::A))
    });
}

fn bench_search_depth(c: &mut Criterion) {
    let battle = stocked_battle();
    let mut group = c.benchmark_group("search_depth");

    for depth in [1u32, 2, 3, 4] {
        for (label, policy) in [
            ("alpha_beta", Policy::fixed(depth)),
            ("minimax", Policy::fixed(depth).without_pruning()),
        ] {
            group.bench_with_input(BenchmarkId::new(label, depth), &policy, |b, policy| {
                let mut rng = ChaCha8Rng::seed_from_u64(42);
                b.iter(|| search(black_box(&battle), SideId::A, policy, &mut rng))
            });
        }
    }
    group.finish();
}

fn bench_full_duel(c: &mut Criterion) {
    c.bench_function("duel_default_policy", |b| {
        b.iter(|| {
            let mut duel = Duel::new(stocked_battle(), Policy::default(), DuelConfig::default(), 7);
            black_box(duel.run())
        })
    });
}

fn bench_full_match(c: &mut Criterion) {
    let config = MatchConfig::default();

    c.bench_function("match_default_config", |b| {
        b.iter(|| {
            let game = Match::new(config.clone(), black_box(11)).unwrap();
            black_box(game.play())
        })
    });
}

criterion_group!(
    benches,
    bench_legal_actions,
    bench_search_depth,
    bench_full_duel,
    bench_full_match
);
criterion_main!(benches);
