//! zombie CLI — inspect and render zombie DNA
//!
//! Commands:
//!   zombie render   — write the SVG avatar for a DNA value
//!   zombie features — show the feature set derived from a DNA value
//!   zombie rarity   — show the rarity tier of a DNA value
//!   zombie emoji    — show the emoji form of a DNA value
//!   zombie demo     — run an in-memory ledger session end to end

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::path::Path;
use zombie_dna::ledger::{Dashboard, LogSink, MemoryLedger, ZombieLedger};
use zombie_dna::{zombie_emoji, AvatarConfig, AvatarRenderer, Dna, Rarity, ScarMode};

const DEMO_DIR: &str = "zombie-demo";
const DEMO_OWNER: &str = "0x00000000000000000000000000000000000a11ce";
const DEMO_RIVAL: &str = "0x0000000000000000000000000000000000000b0b";

fn print_usage() {
    println!(
        r#"
Zombie DNA v0.1 — procedural avatars for ledger zombies

Usage: zombie <command> [options]

Commands:
  render   <dna> [size] [--seed N] [--stable] [--out FILE]   Render an SVG avatar
  features <dna>                                             Show derived features
  rarity   <dna>                                             Show rarity tier
  emoji    <dna>                                             Show emoji form
  demo                                                       Run an in-memory ledger demo

Global options:
  --config <path>   Load palette and render settings from a JSON file

Examples:
  zombie render 1234567890123456 200 --seed 7 --out zombie.svg
  zombie render 42 --stable
  zombie rarity 0102030405060708
  zombie demo
"#
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let config = match take_option(&mut args, "--config") {
        Some(path) => match AvatarConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("  Failed to load config {}: {}", path, e);
                return;
            }
        },
        None => AvatarConfig::default(),
    };

    if args.is_empty() {
        print_usage();
        return;
    }

    match args[0].as_str() {
        "render" => cmd_render(&args[1..], config),
        "features" => cmd_features(&args[1..], config),
        "rarity" => cmd_rarity(&args[1..]),
        "emoji" => cmd_emoji(&args[1..], config),
        "demo" => cmd_demo(config),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
        }
    }
}

/// Remove `--name value` from `args` and return the value
fn take_option(args: &mut Vec<String>, name: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == name)?;
    if pos + 1 >= args.len() {
        args.remove(pos);
        return None;
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Some(value)
}

fn take_flag(args: &mut Vec<String>, name: &str) -> bool {
    match args.iter().position(|a| a == name) {
        Some(pos) => {
            args.remove(pos);
            true
        }
        None => false,
    }
}

fn parse_dna(args: &[String], usage: &str) -> Option<Dna> {
    let Some(raw) = args.first() else {
        eprintln!("Usage: {}", usage);
        return None;
    };
    match Dna::parse(raw) {
        Ok(dna) => Some(dna),
        Err(e) => {
            eprintln!("  {}", e);
            None
        }
    }
}

fn cmd_render(args: &[String], mut config: AvatarConfig) {
    let mut args = args.to_vec();
    let seed = take_option(&mut args, "--seed");
    let out = take_option(&mut args, "--out");
    if take_flag(&mut args, "--stable") {
        config.render.scars = ScarMode::Stable;
    }

    let usage = "zombie render <dna> [size] [--seed N] [--stable] [--out FILE]";
    let Some(dna) = parse_dna(&args, usage) else {
        return;
    };
    if let Some(raw) = args.get(1) {
        match raw.parse::<f64>() {
            Ok(size) => config.render.size = size,
            Err(_) => {
                eprintln!("  size must be a number, got '{}'", raw);
                return;
            }
        }
    }
    if let Err(e) = config.render.validate() {
        eprintln!("  {}", e);
        return;
    }

    let renderer = AvatarRenderer::new(config);
    let svg = match seed {
        Some(raw) => match raw.parse::<u64>() {
            Ok(seed) => renderer.render_with(&dna, &mut StdRng::seed_from_u64(seed)),
            Err(_) => {
                eprintln!("  seed must be a non-negative integer, got '{}'", raw);
                return;
            }
        },
        None => renderer.render(&dna),
    };

    match out {
        Some(path) => match std::fs::write(&path, &svg) {
            Ok(()) => println!("  Wrote {} ({} bytes)", path, svg.len()),
            Err(e) => eprintln!("  Failed to write {}: {}", path, e),
        },
        None => println!("{}", svg),
    }
}

fn cmd_features(args: &[String], config: AvatarConfig) {
    let Some(dna) = parse_dna(args, "zombie features <dna>") else {
        return;
    };
    let features = AvatarRenderer::new(config).features(&dna);
    println!("\n  DNA:       {}", dna);
    println!("  Segments:  {:?}", dna.segments());
    println!("  Skin:      {}", features.skin_color);
    println!("  Hair:      {}", features.hair_color);
    println!("  Eyes:      {}", features.eye_color);
    println!("  Clothes:   {}", features.clothes_color);
    println!("  Blood:     {}", features.blood_color);
    println!("  Head size: {}", features.head_size);
    println!("  Eye size:  {}", features.eye_size);
    println!("  Mouth:     {}", features.mouth_size);
    println!("  Wounds:    {} ({} scars)", features.wound_count, features.scar_count());
    println!("  Level:     {}", features.level);
}

fn cmd_rarity(args: &[String]) {
    let Some(dna) = parse_dna(args, "zombie rarity <dna>") else {
        return;
    };
    let rarity = Rarity::classify(&dna);
    println!(
        "\n  {} — {} ({} distinct segments)",
        dna, rarity.tier, rarity.unique_values
    );
    println!("  Color: {}", rarity.color);
}

fn cmd_emoji(args: &[String], config: AvatarConfig) {
    let Some(dna) = parse_dna(args, "zombie emoji <dna>") else {
        return;
    };
    let features = AvatarRenderer::new(config).features(&dna);
    println!("{}", zombie_emoji(&features));
}

fn cmd_demo(config: AvatarConfig) {
    println!("\n  === Zombie DNA demo ===\n");

    let mut ledger = MemoryLedger::new();
    let renderer = AvatarRenderer::new(config);

    let rival = match ledger.create_random_zombie(DEMO_RIVAL, "Groan") {
        Ok(id) => id,
        Err(e) => {
            eprintln!("  Failed to seed rival: {}", e);
            return;
        }
    };
    let mut dash = Dashboard::new(ledger, LogSink, renderer, DEMO_OWNER);

    let Ok(mine) = dash.create_zombie("Shambles") else {
        return;
    };
    // outcomes are reported through the log sink
    let _ = dash.level_up(mine);
    let _ = dash.attack(mine, rival);
    let _ = dash.rename(mine, "Sir Shambles");
    let _ = dash.feed_on_kitty(mine, 1);

    let now = dash.ledger().now();
    let cards = match dash.cards(now) {
        Ok(cards) => cards,
        Err(e) => {
            eprintln!("  Failed to load zombies: {}", e);
            return;
        }
    };

    if let Err(e) = std::fs::create_dir_all(DEMO_DIR) {
        eprintln!("  Failed to create {}: {}", DEMO_DIR, e);
        return;
    }
    println!("\n  Zombies owned by {} ({}):", dash.account(), cards.len());
    println!("  {}", "-".repeat(72));
    for card in &cards {
        println!(
            "  [{}] {} {} | DNA {} | level {} | {}W/{}L | {} | {}",
            card.id,
            card.emoji,
            card.name,
            card.dna,
            card.level,
            card.wins,
            card.losses,
            card.rarity.tier,
            card.status
        );
        let path = Path::new(DEMO_DIR).join(format!("zombie-{}.svg", card.id));
        if let Err(e) = std::fs::write(&path, &card.avatar_svg) {
            eprintln!("  Failed to write {}: {}", path.display(), e);
        }
    }
    println!("\n  Avatars written to {}/", DEMO_DIR);
}
