/// Benchmarks for the response decode path: key normalization followed by
/// schema-driven entity decoding, on payloads shaped like real API responses.
use cfb_data_sdk::normalize::normalize_owned;
use cfb_data_sdk::parse_response;
use cfb_data_sdk::schema::{deserialize, deserialize_list};
use cfb_data_sdk::types::response::{Drive, Game, MatchupHistory};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Value, json};

fn game(i: i64) -> Value {
    json!({
        "id": 401_012_000 + i,
        "season": 2018,
        "week": i % 15 + 1,
        "seasonType": "regular",
        "startDate": "2018-09-01T19:00:00.000Z",
        "neutralSite": false,
        "conferenceGame": i % 2 == 0,
        "attendance": 54_000,
        "venueId": 3758,
        "venue": "Autzen Stadium",
        "homeTeam": "Oregon",
        "homeConference": "Pac-12",
        "homePoints": 58,
        "homeLineScores": [14, 21, 10, 13],
        "awayTeam": "Bowling Green",
        "awayConference": "Mid-American",
        "awayPoints": 24,
        "awayLineScores": [7, 3, 7, 7],
        "excitementIndex": 2.1
    })
}

fn drive(i: i64) -> Value {
    json!({
        "id": 4_010_123_450_i64 + i,
        "gameId": 401_012_345,
        "offense": "Oregon",
        "offenseConference": "Pac-12",
        "defense": "Bowling Green",
        "defenseConference": "Mid-American",
        "scoring": i % 3 == 0,
        "startPeriod": 1,
        "startYardline": 25,
        "startTime": { "minutes": 15, "seconds": 0 },
        "endPeriod": 1,
        "endYardline": 100,
        "endTime": { "minutes": 12, "seconds": 41 },
        "plays": 8,
        "yards": 75,
        "driveResult": "TD"
    })
}

fn bench_games(c: &mut Criterion) {
    let mut group = c.benchmark_group("entities/games");

    for count in [1_i64, 100] {
        let body = Value::Array((0..count).map(game).collect()).to_string();

        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::new("Game", count), &body, |b, body| {
            b.iter(|| {
                let value = parse_response(std::hint::black_box(body))
                    .expect("Parsing should succeed");
                let _: Vec<Game> =
                    deserialize_list(&value).expect("Deserialization should succeed");
            });
        });
    }

    group.finish();
}

fn bench_drives(c: &mut Criterion) {
    let mut group = c.benchmark_group("entities/drives");
    let body = Value::Array((0..100).map(drive).collect()).to_string();

    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("Drive", |b| {
        b.iter(|| {
            let value =
                parse_response(std::hint::black_box(&body)).expect("Parsing should succeed");
            let _: Vec<Drive> = deserialize_list(&value).expect("Deserialization should succeed");
        });
    });

    group.finish();
}

fn bench_matchup(c: &mut Criterion) {
    let mut group = c.benchmark_group("entities/matchup");
    let wire = json!({
        "team1": "Oregon",
        "team2": "Oregon State",
        "startYear": 1990,
        "endYear": 2018,
        "team1Wins": 20,
        "team2Wins": 9,
        "ties": 0,
        "games": (0..29).map(game).collect::<Vec<_>>()
    });

    group.bench_function("normalize", |b| {
        b.iter(|| normalize_owned(std::hint::black_box(wire.clone())));
    });

    let normalized = normalize_owned(wire.clone());
    group.bench_function("MatchupHistory", |b| {
        b.iter(|| {
            let _: MatchupHistory = deserialize(std::hint::black_box(&normalized))
                .expect("Deserialization should succeed");
        });
    });

    group.finish();
}

criterion_group!(entity_benches, bench_games, bench_drives, bench_matchup);
criterion_main!(entity_benches);
