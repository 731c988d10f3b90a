//! Multi-Channel Device Example
//!
//! This example wires three channels of different kinds to a simulated
//! device and drives them through the proxy the way a real deployment does:
//! a polling driver observing each channel, and a transport sweep draining
//! whatever the engine decided is worth sending.
//!
//! ## What You'll Learn
//!
//! - Registering channels with poll/delivered callbacks
//! - Mixing trigger policies: timers, thresholds, change detection
//! - Draining pending values like a transport would
//! - Delivering a remote write to an actuator channel
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_multisensor
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use valuegate_core::{
    config::{Limit, TriggerConfig},
    registry::ChannelRegistry,
    schema::{BasicPolicy, Schema},
    time::ManualClock,
    value::{Value, ValueKind},
};

const THERMO: u8 = 0;
const LED: u8 = 1;
const PLATE: u8 = 2;

fn main() {
    println!("ValueGate Multi-Channel Example");
    println!("===============================\n");

    let clock = ManualClock::new(0);
    let mut registry: ChannelRegistry<8> =
        ChannelRegistry::new(Box::new(BasicPolicy), Box::new(clock.clone()));

    // Simulated device state shared with the callbacks
    let thermo = Rc::new(RefCell::new(20_i32));
    let led = Rc::new(RefCell::new(false));

    // THERMO - sent every 5 seconds or when it gets hot
    let thermo_src = thermo.clone();
    registry
        .register(
            THERMO,
            Schema::new("THERMO", 1, ValueKind::Int32, 1),
            None,
            Some(Box::new(move |chan| {
                // Get current temperature from the simulated sensor
                let reading = *thermo_src.borrow();
                if chan.set_i32(reading) {
                    println!("  [poll]  {}: sending {}", chan.name(), reading);
                }
            })),
        )
        .expect("THERMO failed to register");
    registry
        .configure(
            THERMO,
            TriggerConfig::none()
                .with_timer(5)
                .with_upper(Limit::Int(30)),
        )
        .expect("THERMO failed to configure");

    // LED - actuator, sent after change
    let led_out = led.clone();
    let led_src = led.clone();
    registry
        .register(
            LED,
            Schema::new("LED", 2, ValueKind::Bool, 0),
            Some(Box::new(move |chan| {
                // Remote write: actuate the (simulated) hardware
                let on = chan.value().as_bool().unwrap_or(false);
                *led_out.borrow_mut() = on;
                println!("  [deliv] {}: switched {}", chan.name(), if on { "on" } else { "off" });
            })),
            Some(Box::new(move |chan| {
                let on = *led_src.borrow();
                if chan.set_bool(on) {
                    println!("  [poll]  {}: sending {}", chan.name(), on);
                }
            })),
        )
        .expect("LED failed to register");
    registry
        .configure(LED, TriggerConfig::none().on_change())
        .expect("LED failed to configure");

    // PLATE - raw identifier, refreshed every 10 seconds
    let mut counter = 0_u32;
    registry
        .register(
            PLATE,
            Schema::new("PLATE", 0, ValueKind::Raw, 0),
            None,
            Some(Box::new(move |chan| {
                counter += 1;
                let plate = format!("KNT{:04}", counter % 7);
                if chan.set_raw(plate.as_bytes()) {
                    println!("  [poll]  {}: sending {}", chan.name(), plate);
                }
            })),
        )
        .expect("PLATE failed to register");
    registry
        .configure(PLATE, TriggerConfig::none().with_timer(10))
        .expect("PLATE failed to configure");

    // Drive the proxy for a simulated minute, one sweep per second
    for second in 0..60_u64 {
        clock.set(second * 1000);
        println!("t = {:2}s", second);

        // Simulated environment: temperature climbs past the threshold
        // around half time, then cools back down
        *thermo.borrow_mut() = 20 + (30 - (second as i32 - 30).abs()) / 2;

        // Someone toggles the LED remotely at t=12s
        if second == 12 {
            registry.deliver(LED, Value::Bool(true)).expect("deliver failed");
        }

        // Polling driver: observe every channel, holding fired values
        // pending until the transport acknowledges them
        let last = registry.highest_registered_id().unwrap();
        for id in 0..=last {
            registry.observe(id, true).expect("observe failed");
        }

        // Transport: drain and acknowledge whatever the engine flagged
        for id in 0..=last {
            if registry.is_pending(id) {
                let (value, len) = registry.read_value(id).expect("read failed");
                println!("  [drain] channel {}: {:?} ({} bytes)", id, value, len);
                registry.clear_pending(id).expect("clear failed");
            }
        }
    }

    println!("\nDone.");
}
