use anyhow::Result;
use clap::Parser;
use engine::prelude::*;
use rand::Rng;
use util::srng;

pub const GAME_NAME: &str = "emberdelve";

#[derive(Parser, Debug)]
#[command(about = "Headless dungeon level driver")]
struct Args {
    #[arg(long, help = "Game world seed")]
    seed: Option<String>,

    #[arg(long, default_value = "1", help = "Dungeon tier to generate")]
    tier: u32,

    #[arg(long, default_value = "0", help = "Random-walk turns to simulate")]
    turns: u32,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| {
        format!("{:08x}", rand::thread_rng().gen::<u32>())
    });
    log::info!("seed: {seed}");

    let receiver = Receiver::default();

    // Every fourth tier is a boss chamber.
    let mut spec = WorldSpec::new(&seed, args.tier);
    if args.tier % 4 == 0 {
        spec = spec.boss_level();
    }
    let mut world = World::new(&spec)?;

    let mut rng = srng(&seed);
    for _ in 0..args.turns {
        let cmd = match rng.gen_range(0..8) {
            0 => Command::Rest,
            1 => Command::Fire(pick_dir(&mut rng)),
            _ => Command::Move(pick_dir(&mut rng)),
        };
        world.turn(cmd);
    }

    print_level(&world);

    for entry in world.history() {
        println!("[{}] {}", entry.tone, entry.body);
    }
    for msg in receiver.drain() {
        match msg {
            Msg::Message(text) => println!("* {text}"),
            Msg::Explosion(p) => println!("* boom at {p}"),
            Msg::Dig(p) => println!("* dig at {p}"),
            Msg::Hit(p) => println!("* hit at {p}"),
            Msg::BossLevel => println!("* boss theme starts"),
        }
    }

    Ok(())
}

fn pick_dir(rng: &mut impl Rng) -> IVec2 {
    util::s4::DIR[rng.gen_range(0..util::s4::DIR.len())]
}

/// Dump the level with entity overlays.
fn print_level(world: &World) {
    let map = world.map();
    for y in 0..map.height() {
        let mut row = String::new();
        for x in 0..map.width() {
            let p = ivec2(x, y);
            let glyph = match world.entity_at(p).map(|e| &e.kind) {
                Some(EntityKind::Player(_)) => '@',
                Some(EntityKind::Monster(_)) => 'm',
                Some(EntityKind::Fireball(_)) => '*',
                Some(EntityKind::Blastwave) => '%',
                Some(EntityKind::Loot(_)) => '$',
                Some(EntityKind::Blood) => ',',
                Some(EntityKind::Prop(_)) => '>',
                None => match map.tile(p) {
                    Tile::Wall => '#',
                    Tile::Floor => '.',
                },
            };
            row.push(glyph);
        }
        println!("{row}");
    }
}
