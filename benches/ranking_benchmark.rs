use criterion::{criterion_group, criterion_main, Criterion};
use missao_natal::models::stats::compute_rankings;
use missao_natal::models::{
    Goal, GoalStatus, Marathon, MarathonProgress, MarathonType, Round, Task, TaskPatch,
};
use std::hint::black_box;

const USERS: usize = 200;
const MARATHONS: usize = 10;
const ROUNDS: usize = 12;
const TASKS_PER_ROUND: usize = 5;

fn marathon(index: usize) -> Marathon {
    Marathon {
        id: format!("m{}", index),
        name: format!("Maratona {}", index),
        description: String::new(),
        marathon_type: MarathonType::DozeDias,
        start_date: None,
        end_date: None,
        rounds: (0..ROUNDS)
            .map(|r| Round {
                id: r.to_string(),
                title: format!("Dia {}", r + 1),
                tasks: (0..TASKS_PER_ROUND)
                    .map(|t| Task {
                        id: format!("{}-{}", r, t),
                        text: String::new(),
                    })
                    .collect(),
            })
            .collect(),
        created_by: format!("u{}", index % USERS),
        created_by_name: String::new(),
        created_at: "2025-12-01T00:00:00Z".to_string(),
    }
}

fn goal(index: usize) -> Goal {
    Goal {
        id: format!("g{}", index),
        title: String::new(),
        description: String::new(),
        category: String::new(),
        priority: String::new(),
        due_date: None,
        status: if index % 3 == 0 {
            GoalStatus::Concluido
        } else {
            GoalStatus::EmProgresso
        },
        completed_date: None,
        created_by: format!("u{}", index % USERS),
        created_by_name: format!("Participante {}", index % USERS),
        created_at: format!("2025-12-01T00:00:{:02}Z", index % 60),
    }
}

fn benchmark_rankings(c: &mut Criterion) {
    let marathons: Vec<Marathon> = (0..MARATHONS).map(marathon).collect();
    let goals: Vec<Goal> = (0..USERS * 5).map(goal).collect();

    // Every user joins every marathon and finishes a varying prefix of it
    let done = TaskPatch {
        completed: Some(true),
        ..TaskPatch::default()
    };
    let mut progress = Vec::with_capacity(USERS * MARATHONS);
    for u in 0..USERS {
        for m in &marathons {
            let mut record = MarathonProgress::new(&format!("u{}", u), &m.id);
            for task_id in m.task_ids().take(u % (ROUNDS * TASKS_PER_ROUND)) {
                record.apply_task_update(task_id, &done);
            }
            progress.push(record);
        }
    }

    let mut group = c.benchmark_group("rankings");

    group.bench_function("full_leaderboard", |b| {
        b.iter(|| {
            compute_rankings(
                black_box(&goals),
                black_box(&marathons),
                black_box(&progress),
            )
        })
    });

    group.bench_function("goals_only", |b| {
        b.iter(|| compute_rankings(black_box(&goals), &[], &[]))
    });

    group.finish();
}

criterion_group!(benches, benchmark_rankings);
criterion_main!(benches);
