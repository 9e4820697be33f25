//! Minimal mill demo: spawn one teal group, run it dry, export the canvas.
//!
//! ```sh
//! cargo run --example mill
//! ```

use inkbots::bot::SpawnOverrides;
use inkbots::policy::PolicyKind;
use inkbots::surface::PixelRect;
use inkbots::{Config, World};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut config = Config::default();
    config.bots.ink = 120.0;

    let mut world = World::new_with_seed(config, 12.0, 2024);
    world.spawn(PolicyKind::Mill, &SpawnOverrides::default());

    while world.active() > 0 {
        world.tick();
        if world.time % 500 == 0 {
            println!("{}", world.stats.summary());
        }
    }

    let (w, h) = (world.surface.width(), world.surface.height());
    let rgba = world.surface.sample_region(PixelRect { x: 0, y: 0, w, h });
    let img = image::RgbaImage::from_raw(w, h, rgba).ok_or("canvas buffer size mismatch")?;
    img.save("mill.png")?;
    println!("Wrote mill.png after {} ticks", world.time);

    Ok(())
}
