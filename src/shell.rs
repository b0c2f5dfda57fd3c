use std::io::{BufRead, Write};

use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::config::OutputFormat;
use crate::error::PlannerError;
use crate::meals::format::diabetes_mark;
use crate::meals::{Catalog, MealPlanner, MealSlot, OccurrenceId};
use crate::state::{AppState, SessionId};

const HELP: &str = "\
commands:
  add <meal1|meal2|meal3> <food-id>
  remove <meal1|meal2|meal3> <occurrence-id>
  show [slot]
  totals [slot]
  catalog
  reset
  help
  quit";

const EMPTY_SLOT: &str = "لم يتم إضافة أي طعام لهذه الوجبة بعد";
const SLOT_TOTALS: &str = "إجمالي العناصر الغذائية";
const DAY_TOTALS: &str = "إجمالي اليوم الكامل";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Add { slot: MealSlot, food_id: i64 },
    Remove { slot: MealSlot, occurrence_id: OccurrenceId },
    Show(Option<MealSlot>),
    Totals(Option<MealSlot>),
    Catalog,
    Reset,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parses one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        if verb.starts_with('#') {
            return Ok(None);
        }
        let args: Vec<&str> = words.collect();

        let cmd = match (verb, args.as_slice()) {
            ("add", [slot, food]) => ShellCommand::Add {
                slot: slot.parse()?,
                food_id: food
                    .parse()
                    .map_err(|_| anyhow::anyhow!("food id must be a number, got {food:?}"))?,
            },
            ("remove", [slot, occurrence]) => ShellCommand::Remove {
                slot: slot.parse()?,
                occurrence_id: occurrence.parse()?,
            },
            ("show", []) => ShellCommand::Show(None),
            ("show", [slot]) => ShellCommand::Show(Some(slot.parse()?)),
            ("totals", []) => ShellCommand::Totals(None),
            ("totals", [slot]) => ShellCommand::Totals(Some(slot.parse()?)),
            ("catalog", []) => ShellCommand::Catalog,
            ("reset", []) => ShellCommand::Reset,
            ("help", _) => ShellCommand::Help,
            ("quit" | "exit", _) => ShellCommand::Quit,
            (verb, _) => anyhow::bail!("unrecognized command {verb:?}, try `help`"),
        };
        Ok(Some(cmd))
    }
}

pub enum Reply {
    Output(String),
    Quit,
}

/// Line-oriented front end over one planner session.
///
/// The session is closed when `run` returns or the shell is dropped.
pub struct Shell {
    state: AppState,
    session: SessionId,
}

impl Shell {
    pub fn new(state: AppState) -> Self {
        let session = state.sessions.open();
        Self { state, session }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: W) -> anyhow::Result<()> {
        let result = self.read_commands(input, out);
        self.state.sessions.close(self.session);
        result
    }

    fn read_commands<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> anyhow::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            // Undecodable bytes become U+FFFD and fail to parse like any other bad command.
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            let reply = ShellCommand::parse(line).and_then(|cmd| match cmd {
                Some(cmd) => self.execute(cmd),
                None => Ok(Reply::Output(String::new())),
            });
            match reply {
                Ok(Reply::Quit) => break,
                Ok(Reply::Output(text)) if text.is_empty() => {}
                Ok(Reply::Output(text)) => writeln!(out, "{text}")?,
                Err(e) => {
                    warn!(error = %e, "command failed");
                    writeln!(out, "error: {e}")?;
                }
            }
        }
        Ok(())
    }

    #[instrument(skip(self), fields(session = %self.session))]
    pub fn execute(&mut self, cmd: ShellCommand) -> anyhow::Result<Reply> {
        let json = self.state.config.output == OutputFormat::Json;
        let text = match cmd {
            ShellCommand::Quit => return Ok(Reply::Quit),
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Catalog => render_catalog(Catalog::builtin(), json)?,
            ShellCommand::Reset => {
                self.state.sessions.reset(self.session)?;
                if json {
                    json!({ "reset": true }).to_string()
                } else {
                    "ok".to_string()
                }
            }
            ShellCommand::Add { slot, food_id } => {
                let food_id = u32::try_from(food_id)
                    .map_err(|_| PlannerError::InvalidFoodReference(food_id))?;
                let entry = self.with_planner(|p| p.add_food(slot, food_id))??;
                if json {
                    serde_json::to_string(&entry)?
                } else {
                    format!("{} {}: {}", entry.slot.label(), entry.occurrence_id, entry.food.name)
                }
            }
            ShellCommand::Remove {
                slot,
                occurrence_id,
            } => {
                let removed = self.with_planner(|p| p.remove_food(slot, occurrence_id))?;
                if json {
                    json!({ "removed": removed }).to_string()
                } else if removed {
                    "removed".to_string()
                } else {
                    "nothing removed".to_string()
                }
            }
            ShellCommand::Show(slot) => self.with_planner(|p| render_plan(p, slot, json))??,
            ShellCommand::Totals(slot) => self.with_planner(|p| {
                let totals = match slot {
                    Some(s) => p.slot_totals(s),
                    None => p.grand_totals(),
                };
                if json {
                    serde_json::to_string(&totals)
                } else {
                    Ok(totals.to_string())
                }
            })??,
        };
        debug!(bytes = text.len(), "command done");
        Ok(Reply::Output(text))
    }

    fn with_planner<T>(&self, f: impl FnOnce(&mut MealPlanner) -> T) -> Result<T, PlannerError> {
        self.state.sessions.with_session(self.session, f)
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.state.sessions.close(self.session);
    }
}

fn render_catalog(catalog: &Catalog, json: bool) -> serde_json::Result<String> {
    if json {
        return serde_json::to_string(catalog.all());
    }
    let rows: Vec<String> = catalog
        .all()
        .iter()
        .map(|f| {
            format!(
                "{:>2}. {} {} ({}, {} kcal)",
                f.id,
                f.name,
                diabetes_mark(f.suitable_for_diabetes),
                f.quantity,
                f.calories
            )
        })
        .collect();
    Ok(rows.join("\n"))
}

fn render_plan(planner: &MealPlanner, only: Option<MealSlot>, json: bool) -> serde_json::Result<String> {
    let slots: Vec<MealSlot> = match only {
        Some(s) => vec![s],
        None => MealSlot::ALL.to_vec(),
    };

    if json {
        let mut body = serde_json::Map::new();
        for s in &slots {
            body.insert(
                s.as_str().to_string(),
                json!({
                    "entries": planner.slot(*s),
                    "totals": planner.slot_totals(*s),
                }),
            );
        }
        if only.is_none() {
            body.insert("grand_totals".into(), serde_json::to_value(planner.grand_totals())?);
        }
        return serde_json::to_string(&body);
    }

    let mut out = Vec::new();
    for s in &slots {
        out.push(format!("== {} ==", s.label()));
        let entries = planner.slot(*s);
        if entries.is_empty() {
            out.push(EMPTY_SLOT.to_string());
            continue;
        }
        out.extend(entries.iter().map(ToString::to_string));
        out.push(format!("{SLOT_TOTALS}: {}", planner.slot_totals(*s)));
    }
    if only.is_none() && !planner.is_empty() {
        out.push(format!("{DAY_TOTALS}: {}", planner.grand_totals()));
    }
    Ok(out.join("\n"))
}
