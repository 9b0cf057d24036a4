//! Scripted commands for `reelctl simulate`, written as
//! `"t_ms:command,t_ms:command"`.

use std::{str::FromStr, time::Duration};

use anyhow::{Context, anyhow, bail};

const DEFAULT_DRAG_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptCommand {
    Next,
    Prev,
    Page(usize),
    Pause,
    Resume,
    Hover,
    Leave,
    /// Drag by `dx` px over `duration`.
    Drag { dx: f32, duration: Duration },
    /// New viewport width; the container follows with the page padding.
    Resize(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub at: Duration,
    pub command: ScriptCommand,
}

/// Steps sorted by time; consumed front to back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    steps: Vec<ScriptStep>,
    cursor: usize,
}

impl Script {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Time of the next unconsumed step.
    pub fn next_at(&self) -> Option<Duration> {
        self.steps.get(self.cursor).map(|step| step.at)
    }

    /// Pop the next step if it is due at `elapsed`.
    pub fn pop_due(&mut self, elapsed: Duration) -> Option<ScriptStep> {
        let step = *self.steps.get(self.cursor)?;
        if step.at > elapsed {
            return None;
        }
        self.cursor += 1;
        Some(step)
    }
}

impl FromStr for Script {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut steps = raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<ScriptStep>()
                    .with_context(|| format!("invalid script step `{part}`"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        // Stable: steps at the same time keep their written order.
        steps.sort_by_key(|step| step.at);
        Ok(Self { steps, cursor: 0 })
    }
}

impl FromStr for ScriptStep {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (at, command) = raw
            .split_once(':')
            .ok_or_else(|| anyhow!("expected `t_ms:command`"))?;
        let at = at
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .context("time must be whole milliseconds")?;
        Ok(Self {
            at,
            command: command.trim().parse()?,
        })
    }
}

impl FromStr for ScriptCommand {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match raw.split_once('=') {
            Some((name, arg)) => (name, Some(arg)),
            None => (raw, None),
        };
        let command = match (name, arg) {
            ("next", None) => ScriptCommand::Next,
            ("prev", None) => ScriptCommand::Prev,
            ("pause", None) => ScriptCommand::Pause,
            ("resume", None) => ScriptCommand::Resume,
            ("hover", None) => ScriptCommand::Hover,
            ("leave", None) => ScriptCommand::Leave,
            ("page", Some(page)) => {
                ScriptCommand::Page(page.parse().context("page must be >= 0")?)
            }
            ("resize", Some(width)) => {
                let width: f32 =
                    width.parse().context("resize needs a width in px")?;
                if !(width.is_finite() && width >= 0.0) {
                    bail!("resize width must be non-negative");
                }
                ScriptCommand::Resize(width)
            }
            ("drag", Some(arg)) => {
                let (dx, ms) = match arg.split_once('/') {
                    Some((dx, ms)) => (
                        dx,
                        ms.parse::<u64>()
                            .context("drag duration must be whole ms")?,
                    ),
                    None => (arg, DEFAULT_DRAG_MS),
                };
                ScriptCommand::Drag {
                    dx: dx.parse().context("drag needs a distance in px")?,
                    duration: Duration::from_millis(ms.max(1)),
                }
            }
            (other, _) => bail!("unknown command `{other}`"),
        };
        Ok(command)
    }
}
