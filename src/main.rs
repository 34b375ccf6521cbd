//! Note Bounce entry point
//!
//! Native builds run a headless demo: a seeded handful of nodes bounce for a
//! few simulated seconds and every triggered note is logged.
//!
//! Usage: `note-bounce [seed] [seconds] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use note_bounce::audio::LogSink;
    use note_bounce::render::FrameCounter;
    use note_bounce::{PhysicsSettings, Simulation, note_name};

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(12345u64);
    let seconds = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5.0f64);
    let settings = match args.get(3) {
        Some(path) => PhysicsSettings::load_or_default(path),
        None => PhysicsSettings::default(),
    };

    log::info!("Note Bounce (native) starting, seed {}", seed);

    let mut sim = match Simulation::new(settings, seed) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            std::process::exit(1);
        }
    };

    // C major triad over two octaves
    for note in [48, 52, 55, 60, 64, 67, 72] {
        sim.add_random_node(note, 4.0);
    }
    sim.toggle_pause();

    let mut audio = LogSink::default();
    let mut renderer = FrameCounter::default();

    // 60 Hz display
    let frame_ms = 1000.0 / 60.0;
    let frames = (seconds * 60.0) as u64;
    let mut busiest = (0usize, 0u64);
    for f in 0..frames {
        if let Some(events) = sim.on_frame(f as f64 * frame_ms, &mut audio, &mut renderer) {
            let hits = events.wall_hits.len() + events.node_hits.len();
            if hits > busiest.0 {
                busiest = (hits, sim.tick_count);
            }
        }
    }

    log::info!(
        "{} ticks, {} redraws, {} notes played (busiest tick {} with {} triggers)",
        sim.tick_count,
        renderer.frames,
        audio.played,
        busiest.1,
        busiest.0
    );
    for node in sim.nodes() {
        log::info!(
            "{:>4} at ({:7.2}, {:7.2}) speed {:.3}",
            note_name(node.note, true),
            node.position.x,
            node.position.y,
            node.velocity.length()
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is in `note_bounce::web`, this is just to satisfy the compiler
}
