use serde::Serialize;
use serde_json::{Map, Value};

pub type Record = Map<String, Value>;

// Matching records, in the order they appear in the collection.
pub type ResultSet = Vec<Record>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Click, // commit when the search icon is clicked
    Keyup, // commit on every key release in the input
}

impl Trigger {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "click" => Some(Trigger::Click),
            "keyup" => Some(Trigger::Keyup),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Click => "click",
            Trigger::Keyup => "keyup",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    Idle,
    Fetching,
    Extracting,
    Matching,
    Done,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    IconClicked,
    ClearClicked,
    KeyUp,
}
