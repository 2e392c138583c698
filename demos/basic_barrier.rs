//! # Example: basic_barrier
//!
//! Minimal barrier: two required types, one optional, one listed.
//!
//! Demonstrates how to:
//! - Declare the type groups with [`TypeRegistry`].
//! - Subscribe per type on a [`BarrierHub`].
//! - Watch values stay buffered until every required type arrived.
//! - Reset the barrier for the next cycle.
//!
//! ## Flow
//! ```text
//! emit(Speed)      ─► slot        (no output)
//! emit(Alarm) x2   ─► queue       (no output)
//! emit(Position)   ─► slot        (Heading still missing)
//! emit(Heading)    ─► barrier opens:
//!                       Heading, Position, Speed, Alarm, Alarm
//! emit(Position)   ─► published immediately
//! reset()          ─► back to accumulating
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic_barrier
//! ```

use synchro::{BarrierHub, Subscription, TypeRegistry};

#[derive(Debug)]
struct Position(f64, f64);
#[derive(Debug)]
struct Heading(u16);
#[derive(Debug)]
struct Speed(f32);
#[derive(Debug)]
struct Alarm(&'static str);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Declare the type groups
    let registry = TypeRegistry::builder()
        .required::<Position>()
        .required::<Heading>()
        .optional::<Speed>()
        .listed::<Alarm>()
        .build()?;

    // 2. Create the hub
    let hub = BarrierHub::new(registry);

    // 3. One printer per type
    let _subs: Vec<Subscription> = vec![
        hub.subscribe::<Position, _>(|v| println!("  -> {v:?}")),
        hub.subscribe::<Heading, _>(|v| println!("  -> {v:?}")),
        hub.subscribe::<Speed, _>(|v| println!("  -> {v:?}")),
        hub.subscribe::<Alarm, _>(|v| println!("  -> {v:?}")),
    ];

    // 4. Feed the hub
    println!("send Speed, Alarm x2, Position (state: {})", hub.state());
    hub.emit(Speed(3.5));
    hub.emit(Alarm("low battery"));
    hub.emit(Alarm("gps drift"));
    hub.emit(Position(48.85, 2.35));

    println!("send Heading (required set complete)");
    hub.emit(Heading(270));

    println!("send Position (state: {})", hub.state());
    hub.emit(Position(48.86, 2.36));

    // 5. Next cycle
    hub.reset();
    println!("reset; send Position (state: {})", hub.state());
    hub.emit(Position(48.87, 2.37));
    println!("nothing printed: Heading missing again");
    Ok(())
}
