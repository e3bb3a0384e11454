//! Component types shared by integration tests.

use samovar::domain::Configuration;
use serde::Deserialize;

/// Capability implemented by the greeting components.
pub trait Greeter {
    fn greet(&self) -> String;
}

fn world() -> String {
    "world".to_owned()
}

/// Greets politely.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Polite {
    #[serde(default = "world")]
    pub name: String,
}

impl Greeter for Polite {
    fn greet(&self) -> String {
        format!("Good day, {}", self.name)
    }
}

/// Greets loudly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Loud {
    #[serde(default = "world")]
    pub name: String,
}

impl Greeter for Loud {
    fn greet(&self) -> String {
        format!("HELLO, {}!", self.name.to_uppercase())
    }
}

/// Registered component without the greeter capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Silent {}

/// Converts a JSON object literal into a configuration map.
pub fn configuration(value: serde_json::Value) -> Configuration {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
