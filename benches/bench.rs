// Criterion benchmarks for PlayConnect Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use playconnect_match::core::availability::recurring_overlap_minutes;
use playconnect_match::core::geo::haversine_distance;
use playconnect_match::core::Matcher;
use playconnect_match::models::{
    AvailabilitySlot, Child, ChildInterest, DayOfWeek, Household, Interest,
};

fn create_household(id: usize, latitude: f64, longitude: f64) -> Household {
    Household {
        id: format!("home-{}", id),
        city: "San Francisco".to_string(),
        state: Some("CA".to_string()),
        country: "US".to_string(),
        latitude: Some(latitude),
        longitude: Some(longitude),
        match_radius_km: 8.0,
        has_pets: id % 4 == 0,
        pet_types: if id % 4 == 0 {
            vec!["dog".to_string()]
        } else {
            vec![]
        },
        smoking_household: false,
        screen_time_policy: None,
    }
}

fn create_child(id: usize, latitude: f64, longitude: f64) -> Child {
    let catalog = ["lego", "soccer", "painting", "swimming", "chess"];
    let interests = (0..=(id % 3))
        .map(|slot| {
            let name = catalog[(id + slot) % catalog.len()];
            ChildInterest {
                interest_id: name.to_string(),
                interest: Interest {
                    id: name.to_string(),
                    name: name.to_string(),
                },
                level: None,
            }
        })
        .collect();

    Child {
        id: id.to_string(),
        first_name: format!("Child {}", id),
        age_in_months: 48 + (id % 24) as u32,
        allergies: if id % 5 == 0 {
            vec!["dog".to_string()]
        } else {
            vec![]
        },
        household: create_household(id, latitude, longitude),
        interests,
        availability_slots: vec![
            AvailabilitySlot::Recurring {
                day_of_week: DayOfWeek::Saturday,
                start_time: "09:00".to_string(),
                end_time: "12:00".to_string(),
            },
            AvailabilitySlot::Recurring {
                day_of_week: if id % 2 == 0 {
                    DayOfWeek::Sunday
                } else {
                    DayOfWeek::Wednesday
                },
                start_time: "15:00".to_string(),
                end_time: "17:00".to_string(),
            },
        ],
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(37.7749),
                black_box(-122.4194),
                black_box(37.80),
                black_box(-122.41),
            )
        });
    });
}

fn bench_recurring_overlap(c: &mut Criterion) {
    let schedule_a = create_child(1, 37.7749, -122.4194).availability_slots;
    let schedule_b = create_child(2, 37.7749, -122.4194).availability_slots;

    c.bench_function("recurring_overlap_minutes", |b| {
        b.iter(|| recurring_overlap_minutes(black_box(&schedule_a), black_box(&schedule_b)));
    });
}

fn bench_compute_match(c: &mut Criterion) {
    let matcher = Matcher::with_default_config();
    let subject = create_child(0, 37.7749, -122.4194);
    let candidate = create_child(1, 37.7800, -122.4100);

    c.bench_function("compute_match_pair", |b| {
        b.iter(|| matcher.compute_match(black_box(&subject), black_box(&candidate)));
    });
}

fn bench_find_top_matches(c: &mut Criterion) {
    let matcher = Matcher::with_default_config();
    let subject = create_child(0, 37.7749, -122.4194);

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Child> = (1..=*candidate_count)
            .map(|i| {
                let lat_offset = (i as f64 * 0.001) % 0.5;
                let lon_offset = (i as f64 * 0.001) % 0.5;
                create_child(i, 37.7749 + lat_offset, -122.4194 + lon_offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("find_top_matches", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher.find_top_matches(
                        black_box(&subject),
                        black_box(&candidates),
                        black_box(10),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_recurring_overlap,
    bench_compute_match,
    bench_find_top_matches
);

criterion_main!(benches);
