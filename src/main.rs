//! Sandglass demo entry point
//!
//! Drains a sample hourglass once, the way a host would: a fixed-interval
//! driver feeds progress, the software emitter is stepped and each frame is
//! tessellated with the grains beneath the sand. Set `RUST_LOG=debug` to see
//! per-frame geometry.
//!
//! Usage: `sandglass [settings.json] [--fast]`

use sandglass::driver::{ManualTicker, ProgressDriver, SleepTicker, Ticker};
use sandglass::emitter::ParticleSystem;
use sandglass::geometry::Rect;
use sandglass::renderer::VertexSurface;
use sandglass::{SandglassLayer, Settings};

/// The sample widget: 100 wide, (48 + 5) * 2 tall
const DEMO_BOUNDS: Rect = Rect {
    origin: glam::Vec2::ZERO,
    size: glam::Vec2::new(100.0, (48.0 + 5.0) * 2.0),
};

fn main() {
    env_logger::init();
    log::info!("Sandglass demo starting...");

    let mut fast = false;
    let mut settings_path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--fast" {
            fast = true;
        } else {
            settings_path = Some(arg);
        }
    }

    let settings = match settings_path {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let mut ticker: Box<dyn Ticker> = if fast {
        Box::new(ManualTicker::default())
    } else {
        Box::new(SleepTicker)
    };

    let mut layer = SandglassLayer::from_settings(DEMO_BOUNDS, &settings);
    let mut driver = ProgressDriver::from_settings(&settings);
    let mut particles = ParticleSystem::new(settings.emitter_seed, settings.max_particles());
    let mut surface = VertexSurface::new(settings.quality.segments_per_radian());
    let dt = driver.interval().as_secs_f32();

    let mut peak_triangles = 0;
    let mut peak_particles = 0;
    let ticks = driver.run(&mut layer, ticker.as_mut(), |layer| {
        particles.step(layer.emitter(), layer.sand_color(), dt);
        surface.set_particles(particles.particles());
        surface.clear();
        layer.draw(&mut surface);

        peak_triangles = peak_triangles.max(surface.triangle_count());
        peak_particles = peak_particles.max(particles.len());
        log::debug!(
            "progress {:.2}: {} triangles, {} particles, sand area {:.1}",
            layer.progress(),
            surface.triangle_count(),
            particles.len(),
            layer.sand_area()
        );
    });

    println!("\nSandglass drained in {} ticks", ticks);
    println!("  geometry rebuilds: {}", layer.recompute_count());
    println!("  peak triangles:    {}", peak_triangles);
    println!("  peak particles:    {}", peak_particles);
    println!(
        "  bottom pile:       {:.1} (fill {:.0}%)",
        layer.bottom_sand().bottom_radius,
        layer.bottom_sand().real_progress * 100.0
    );
}
