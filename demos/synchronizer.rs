//! # Example: synchronizer
//!
//! Wires one producer per type into a hub with [`Synchronizer`], using plain
//! [`Channel`]s as producers plus one custom [`Produce`] implementation.
//!
//! ## Flow
//! ```text
//! Sensor<Temperature> ──┐
//! Channel<Pressure>   ──┼──► Synchronizer ──► BarrierHub ──► subscribers
//! Channel<Event>      ──┘
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example synchronizer
//! ```

use std::sync::Arc;

use synchro::{Callback, Channel, HubConfig, Produce, Subscription, Synchronizer};

#[derive(Debug)]
struct Temperature(f32);
#[derive(Debug)]
struct Pressure(f32);
#[derive(Debug)]
struct Event(String);

/// Producer that calibrates raw readings before emitting them.
struct Sensor {
    out: Channel<Temperature>,
    offset: f32,
}

impl Sensor {
    fn read(&self, raw: f32) {
        self.out.publish(Arc::new(Temperature(raw + self.offset)));
    }
}

impl Produce<Temperature> for Sensor {
    fn connect(&self, callback: Callback<Temperature>) -> Subscription {
        self.out.subscribe_arc(callback)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sync = Synchronizer::builder()
        .required::<Temperature, _>(Sensor {
            out: Channel::new(),
            offset: -0.5,
        })
        .required_channel::<Pressure>()
        .listed_channel::<Event>()
        .config(HubConfig::named("weather"))
        .build()?;

    let _t = sync.subscribe::<Temperature, _>(|v| println!("  temperature {:.1}", v.0));
    let _p = sync.subscribe::<Pressure, _>(|v| println!("  pressure    {:.1}", v.0));
    let _e = sync.subscribe::<Event, _>(|v| println!("  event       {}", v.0));

    let sensor = sync
        .producer::<Temperature, Sensor>()
        .ok_or("temperature producer missing")?;
    let pressure = sync
        .channel_producer::<Pressure>()
        .ok_or("pressure producer missing")?;
    let events = sync
        .channel_producer::<Event>()
        .ok_or("event producer missing")?;

    println!("station booting (hub {}: {})", sync.hub().name(), sync.hub().state());
    events.publish(Arc::new(Event("boot".into())));
    sensor.read(21.0);
    sensor.read(21.4);

    println!("first pressure reading");
    pressure.publish(Arc::new(Pressure(1013.2)));

    println!("live");
    sensor.read(21.9);
    events.publish(Arc::new(Event("door open".into())));
    Ok(())
}
