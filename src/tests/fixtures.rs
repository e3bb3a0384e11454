//! Shared component types and constructors for unit tests.

use crate::domain::{BoxError, Configuration, Constructor};
use crate::ports::{DiscoveredComponent, DiscoveryResult, Loader};
use crate::services::Registry;
use mockall::mock;
use rstest::fixture;
use serde::Deserialize;
use std::sync::Arc;

mock! {
    pub PassLoader {}

    impl Loader for PassLoader {
        fn discover(&self) -> DiscoveryResult<Vec<DiscoveredComponent>>;
    }
}

pub trait Shape {
    fn area(&self) -> u64;
}

pub trait Labelled {
    fn label(&self) -> String;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Square {
    pub side: u64,
}

impl Shape for Square {
    fn area(&self) -> u64 {
        self.side * self.side
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rectangle {
    pub width: u64,
    pub height: u64,
}

impl Shape for Rectangle {
    fn area(&self) -> u64 {
        self.width * self.height
    }
}

impl Labelled for Rectangle {
    fn label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Teapot {
    pub capacity: u64,
}

#[derive(Debug)]
pub struct Kettle;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Whistle;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Wrapper<T> {
    pub inner: T,
}

pub fn square() -> Constructor {
    Constructor::deserialize::<Square>()
        .implements::<dyn Shape>(|square| square)
        .build()
}

pub fn rectangle() -> Constructor {
    Constructor::deserialize::<Rectangle>()
        .implements::<dyn Shape>(|rectangle| rectangle)
        .implements::<dyn Labelled>(|rectangle| rectangle)
        .build()
}

pub fn teapot() -> Constructor {
    Constructor::deserialize::<Teapot>().build()
}

pub fn whistle() -> Constructor {
    Constructor::deserialize::<Whistle>().build()
}

pub fn boiled_dry() -> Constructor {
    Constructor::from_fn(|_: &Configuration| Err::<Kettle, BoxError>("kettle boiled dry".into()))
        .build()
}

pub fn configuration(value: serde_json::Value) -> Configuration {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

#[fixture]
pub fn registry() -> Arc<Registry> {
    Arc::new(Registry::new())
}
