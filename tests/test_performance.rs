//! Performance smoke tests for generation, visibility and rendering.

use delve::{
    compute_fov, DelveResult, Engine, EngineConfig, GenerationConfig, Generator, InputEvent,
    KeyCode, RoomCorridorGenerator, TextDisplay,
};
use std::time::Instant;

#[test]
fn test_generation_performance() -> DelveResult<()> {
    let generator = RoomCorridorGenerator::new();
    let iterations = 50;

    let start = Instant::now();
    for seed in 0..iterations {
        let config = GenerationConfig::new(seed);
        let mut rng = delve::generation::utils::create_rng(&config);
        generator.generate(&config, &mut rng)?;
    }
    let elapsed = start.elapsed();
    let avg = elapsed / iterations as u32;

    println!("Average generation time: {:?}", avg);
    assert!(avg.as_millis() < 100, "generation too slow: {:?}", avg);

    Ok(())
}

#[test]
fn test_fov_performance() -> DelveResult<()> {
    let config = GenerationConfig::new(12345);
    let mut rng = delve::generation::utils::create_rng(&config);
    let dungeon = RoomCorridorGenerator::new().generate(&config, &mut rng)?;
    let origin = dungeon.map.entity(dungeon.player_id).unwrap().position;

    let iterations = 1000;
    let start = Instant::now();
    for _ in 0..iterations {
        compute_fov(&dungeon.map, origin, 8)?;
    }
    let avg = start.elapsed() / iterations;

    println!("Average FOV time: {:?}", avg);
    assert!(avg.as_millis() < 5, "FOV too slow: {:?}", avg);

    Ok(())
}

#[test]
fn test_turn_and_render_performance() -> DelveResult<()> {
    let config = GenerationConfig::new(777);
    let mut rng = delve::generation::utils::create_rng(&config);
    let dungeon = RoomCorridorGenerator::new().generate(&config, &mut rng)?;
    let mut engine = Engine::new(dungeon, EngineConfig::default())?;
    let display = TextDisplay::new();

    let keys = [KeyCode::Right, KeyCode::Down, KeyCode::Left, KeyCode::Up];
    let iterations = 400;
    let start = Instant::now();
    for i in 0..iterations {
        engine.handle_event(&InputEvent::KeyDown(keys[i % keys.len()]))?;
        let frame = display.render(engine.map());
        assert!(!frame.is_empty());
    }
    let avg = start.elapsed() / iterations as u32;

    println!("Average turn + frame time: {:?}", avg);
    assert!(avg.as_millis() < 10, "turn too slow: {:?}", avg);

    Ok(())
}
