//! Common test fixtures for the proxy integration tests
//!
//! Provides a registry builder wired to a shareable clock, plus a small
//! shared-cell helper so callbacks (boxed `FnMut` closures) and the test
//! body can exchange state.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use valuegate_core::{
    channel::ChannelCallback,
    registry::ChannelRegistry,
    schema::{BasicPolicy, Schema},
    time::ManualClock,
    value::{Value, ValueKind},
};

/// Registry with a clock the test can advance
pub fn registry<const N: usize>() -> (ChannelRegistry<N>, ManualClock) {
    let clock = ManualClock::new(0);
    let registry = ChannelRegistry::new(Box::new(BasicPolicy), Box::new(clock.clone()));
    (registry, clock)
}

/// Schema shorthand with fixed type/unit codes
pub fn schema(name: &str, kind: ValueKind) -> Schema {
    Schema::new(name, 1, kind, 0)
}

/// Shared mutable cell for exchanging values with callbacks
#[derive(Clone)]
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }
}

impl<T: Clone> Shared<T> {
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Poll callback that offers whatever the shared source currently holds
pub fn poll_from(source: &Shared<Value>) -> Option<ChannelCallback> {
    let source = source.clone();
    Some(Box::new(move |chan| {
        chan.set(source.get());
    }))
}

/// Delivered callback that records every value it sees
pub fn record_into(log: &Shared<Vec<Value>>) -> Option<ChannelCallback> {
    let log = log.clone();
    Some(Box::new(move |chan| {
        log.0.borrow_mut().push(chan.value().clone());
    }))
}
