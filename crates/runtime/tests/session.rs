use forage_content::{BrainKind, DEMO_WORLD, MonsterSpec, parse_world};
use forage_core::ForageConfig;
use runtime::{Runtime, RuntimeConfig, RuntimeError, SimEvent, Topic};

fn config(max_steps: u64) -> RuntimeConfig {
    RuntimeConfig {
        seed: 42,
        step_ms: 50,
        max_steps,
        event_buffer_size: 4096,
        ..RuntimeConfig::default()
    }
}

#[tokio::test]
async fn run_reports_steps_and_simulated_time() {
    let runtime = Runtime::builder()
        .config(config(100))
        .world(parse_world(DEMO_WORLD).unwrap())
        .build()
        .await
        .expect("runtime builds");

    let summary = runtime.run().await.expect("session runs");

    assert_eq!(summary.steps, 100);
    assert_eq!(summary.time_ms, 5000);
    assert_eq!(summary.monsters.len(), 4);
    assert_eq!(summary.food_on_grid, ForageConfig::default().initial_food);

    runtime.shutdown().await.expect("worker stops");
}

#[tokio::test]
async fn subscribers_see_setup_and_movement() {
    let runtime = Runtime::builder()
        .config(config(20))
        .world(parse_world(DEMO_WORLD).unwrap())
        .roster(vec![MonsterSpec::new("Walker", BrainKind::Wanderer)])
        .build()
        .await
        .unwrap();

    let mut world_rx = runtime.subscribe(Topic::World);
    let mut monster_rx = runtime.subscribe(Topic::Monster);
    let mut speech_rx = runtime.subscribe(Topic::Speech);

    runtime.run().await.unwrap();

    let spawned = world_rx.recv().await.unwrap();
    assert_eq!(spawned.time_ms, 0);
    assert!(matches!(spawned.payload, SimEvent::FoodSpawned { .. }));

    let greeting = speech_rx.recv().await.unwrap();
    assert_eq!(
        greeting.payload,
        SimEvent::Said {
            monster: forage_core::AgentId(0),
            message: "Hi! I am Walker".to_string(),
        }
    );

    let mut started = 0;
    while let Ok(event) = monster_rx.try_recv() {
        if matches!(event.payload, SimEvent::MoveStarted { .. }) {
            started += 1;
        }
    }
    assert!(started > 0);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn handle_renders_the_grid() {
    let runtime = Runtime::builder()
        .config(config(1))
        .world(parse_world(DEMO_WORLD).unwrap())
        .build()
        .await
        .unwrap();

    let map = runtime.handle().render().await.unwrap();
    assert_eq!(map.lines().count(), 12);
    assert!(map.lines().all(|line| line.chars().count() == 12));
    assert_eq!(map.matches('o').count(), 1);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn building_without_a_world_fails() {
    let result = Runtime::builder().config(config(1)).build().await;
    assert!(matches!(result, Err(RuntimeError::MissingWorld)));
}
