//! Performance benchmarks for crease-engine

use crease_engine::{
    DeliveryInput, MatchPhase, MatchScorer, TeamSheet, Toss, TossDecision,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn full_team(prefix: &str) -> TeamSheet {
    TeamSheet::new(prefix, (1..=11).map(|i| format!("{prefix} {i}"))).unwrap()
}

fn new_match(overs: u32) -> MatchScorer {
    let teams = [full_team("Lions"), full_team("Tigers")];
    MatchScorer::new(teams, overs, Toss::new("Lions", TossDecision::Bat)).unwrap()
}

/// Drive a match to completion with a fixed, wicket-free delivery script.
fn drive_to_completion(m: &mut MatchScorer) {
    let script = [
        DeliveryInput::runs(0),
        DeliveryInput::runs(1),
        DeliveryInput::runs(4),
        DeliveryInput::runs(2),
        DeliveryInput::runs(6),
        DeliveryInput::runs(1),
    ];
    let mut ball = 0usize;
    loop {
        match m.phase() {
            MatchPhase::Complete => break,
            MatchPhase::AwaitingOpeningBatsmen => {
                let striker = m.available_batsmen()[0].to_string();
                let non_striker = m.available_batsmen()[1].to_string();
                m.select_opening_batsmen(striker, non_striker).unwrap();
            }
            MatchPhase::AwaitingBowler | MatchPhase::AwaitingNewBowler => {
                let bowler = m.eligible_bowlers()[0].to_string();
                m.select_bowler(bowler).unwrap();
            }
            MatchPhase::AwaitingNewBatsman => {
                let batsman = m.available_batsmen()[0].to_string();
                m.select_next_batsman(batsman).unwrap();
            }
            MatchPhase::Scoring => {
                let input = &script[ball % script.len()];
                ball += 1;
                m.score_ball(input).unwrap();
            }
        }
    }
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");

    // Benchmark match setup
    group.bench_function("match_new", |b| {
        b.iter(|| new_match(black_box(20)))
    });

    // Benchmark one complete over, including setup
    group.bench_function("single_over", |b| {
        b.iter(|| {
            let mut m = new_match(20);
            m.select_opening_batsmen("Lions 1", "Lions 2").unwrap();
            m.select_bowler("Tigers 1").unwrap();
            for _ in 0..6 {
                m.score_ball(black_box(&DeliveryInput::runs(1))).unwrap();
            }
            m
        })
    });

    // Benchmark full matches of increasing length
    for overs in [1u32, 5, 20].iter() {
        group.bench_with_input(BenchmarkId::new("full_match", overs), overs, |b, &overs| {
            b.iter(|| {
                let mut m = new_match(overs);
                drive_to_completion(&mut m);
                m
            })
        });
    }

    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    let mut m = new_match(20);
    drive_to_completion(&mut m);

    group.bench_function("performance_ranking", |b| {
        b.iter(|| m.performance_ranking(black_box(3)))
    });

    group.bench_function("summary", |b| b.iter(|| m.summary()));

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    let mut m = new_match(5);
    drive_to_completion(&mut m);

    group.bench_function("scorer_to_json", |b| {
        b.iter(|| serde_json::to_string(black_box(&m)))
    });

    let json = serde_json::to_string(&m).unwrap();
    group.bench_function("scorer_from_json", |b| {
        b.iter(|| serde_json::from_str::<MatchScorer>(black_box(&json)))
    });

    group.finish();
}

criterion_group!(benches, bench_scoring, bench_ranking, bench_serialization);
criterion_main!(benches);
