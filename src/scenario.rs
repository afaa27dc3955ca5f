//! Scripted input scenarios for the headless harness.
//!
//! A scenario is a sparse list of steps; each step sets the stick and
//! trigger state at a tick and holds until the next step.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub at_tick: u32,
    /// Move-stick vector, `x` right / `y` forward; `[0, 0]` releases.
    #[serde(rename = "move", default)]
    pub move_vec: Option<[f32; 2]>,
    /// Look-stick vector; `[0, 0]` releases.
    #[serde(default)]
    pub look: Option<[f32; 2]>,
    /// Fire one attack trigger on this tick.
    #[serde(default)]
    pub action: bool,
}

pub fn load(path: &Path) -> Result<Scenario> {
    let txt = std::fs::read_to_string(path)
        .with_context(|| format!("read scenario: {}", path.display()))?;
    let scn: Scenario = serde_json::from_str(&txt)
        .with_context(|| format!("parse scenario: {}", path.display()))?;
    Ok(scn)
}

impl Scenario {
    /// Built-in demo: walk forward, swing once, stop.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            steps: vec![
                Step {
                    at_tick: 0,
                    move_vec: Some([0.0, 1.0]),
                    look: None,
                    action: false,
                },
                Step {
                    at_tick: 240,
                    move_vec: None,
                    look: None,
                    action: true,
                },
                Step {
                    at_tick: 360,
                    move_vec: Some([0.0, 0.0]),
                    look: None,
                    action: false,
                },
            ],
        }
    }
}
