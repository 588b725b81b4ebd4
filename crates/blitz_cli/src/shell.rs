//! Interactive team console.

use anyhow::{bail, Result};
use blitz_core::models::format_stat_line;
use blitz_core::{ConsolePrompt, DataStore, RecruitOutcome, Roster, SaveStore};
use std::io::{BufRead, Write};

const HELP: &str = "Commands: players | show <name> | stats <name> <level> | team | \
recruit <name> | release <name> | save | load <save> | saves | help | quit";

enum Flow {
    Continue,
    Quit,
}

pub struct Shell<R, W> {
    store: DataStore,
    roster: Roster,
    saves: SaveStore,
    console: ConsolePrompt<R, W>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(
        store: DataStore,
        roster: Roster,
        saves: SaveStore,
        console: ConsolePrompt<R, W>,
    ) -> Self {
        Self { store, roster, saves, console }
    }

    /// Read and run commands until `quit` or end of input.
    pub fn run(&mut self) {
        self.console.say(&format!("{HELP}\n"));
        loop {
            let Some(line) = self.console.ask("> ") else {
                break;
            };
            if line.is_empty() {
                continue;
            }

            match self.execute(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => self.console.say(&format!("Error: {e}\n")),
            }
        }
    }

    fn execute(&mut self, line: &str) -> Result<Flow> {
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd.to_lowercase().as_str() {
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => self.console.say(&format!("{HELP}\n")),
            "players" => self.store.list_names(self.console.output_mut())?,
            "show" => {
                let name = required(rest, "show <name>")?;
                self.store.get(name)?.display_info(self.console.output_mut());
            }
            "stats" => {
                let Some((name, level)) = rest.rsplit_once(char::is_whitespace) else {
                    bail!("Usage: stats <name> <level>");
                };
                let Ok(level) = level.parse::<u32>() else {
                    bail!("Invalid level: {}", level);
                };
                let stats = self.store.get(name.trim())?.stats_at(level)?;
                let text = format_stat_line(stats);
                self.console.say(&format!("{text}\n"));
            }
            "team" => self.roster.list_team(self.console.output_mut())?,
            "recruit" => {
                let name = required(rest, "recruit <name>")?;
                let player = self.store.get(name)?.clone();
                let message = match self.roster.recruit(player, &mut self.console)? {
                    RecruitOutcome::Recruited => format!("{name} joined the team.\n"),
                    RecruitOutcome::Replaced { released } => {
                        format!("{released} was released. {name} joined the team.\n")
                    }
                    RecruitOutcome::Cancelled => {
                        format!("No one was released; {name} was not recruited.\n")
                    }
                };
                self.console.say(&message);
            }
            "release" => {
                let name = required(rest, "release <name>")?;
                let player = self.roster.release(name)?;
                self.console.say(&format!("{} left the team.\n", player.name));
            }
            "save" => match self.roster.save(&self.saves, &mut self.console)? {
                Some(path) => self.console.say(&format!("Team saved to {}\n", path.display())),
                None => self.console.say("Save cancelled.\n"),
            },
            "load" => {
                let name = required(rest, "load <save>")?;
                self.roster = Roster::load(&self.saves, name)?;
                self.console.say(&format!("Loaded team '{name}'.\n"));
            }
            "saves" => {
                let names = self.saves.list()?;
                if names.is_empty() {
                    self.console.say("No saves yet.\n");
                }
                for name in names {
                    self.console.say(&format!("{name}\n"));
                }
            }
            other => bail!("Unknown command '{}'. Type 'help' for commands.", other),
        }

        Ok(Flow::Continue)
    }

    #[cfg(test)]
    fn into_parts(self) -> (Roster, W) {
        (self.roster, self.console.into_inner().1)
    }
}

fn required<'a>(value: &'a str, usage: &str) -> Result<&'a str> {
    if value.is_empty() {
        bail!("Usage: {}", usage);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    fn body(location: &str) -> Value {
        json!({
            "location": location,
            "stats": {"1": {"HP": "100", "SH": "5"}, "3": {"HP": "140", "SH": "9"}, "start": {"level": "1"}},
            "key_techniques": [],
            "learnable_abilities": {"0": ["Nap Pass"]}
        })
    }

    fn store() -> DataStore {
        let mut data = serde_json::Map::new();
        for name in ["Tidus", "Datto", "Letty", "Jassu", "Botta", "Keepa", "Wakka", "Brother", "Kyou"] {
            data.insert(name.to_string(), body("Besaid"));
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.json");
        std::fs::write(&path, Value::Object(data).to_string()).unwrap();
        let mut store = DataStore::new();
        store.load(&path).unwrap();
        store
    }

    fn run(input: &str, saves: &Path) -> (Roster, String) {
        let store = store();
        let roster = Roster::new(&store).unwrap();
        let console = ConsolePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let mut shell = Shell::new(store, roster, SaveStore::new(saves), console);
        shell.run();
        let (roster, out) = shell.into_parts();
        (roster, String::from_utf8(out).unwrap())
    }

    fn saves_dir() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn team_lists_default_players() {
        let dir = saves_dir();
        let (_, out) = run("team\nquit\n", dir.path());
        assert!(out.contains("1. Tidus\n2. Datto\n3. Letty\n4. Jassu\n5. Botta\n6. Keepa\n"));
    }

    #[test]
    fn stats_falls_back_to_lower_level() {
        let dir = saves_dir();
        let (_, out) = run("stats Tidus 2\n", dir.path());
        assert!(out.contains("HP: 100\nSH: 5\n"));
    }

    #[test]
    fn recruit_until_full_then_replace() {
        let dir = saves_dir();
        let (roster, out) =
            run("recruit Wakka\nrecruit Brother\nrecruit Kyou\n1\nquit\n", dir.path());
        assert!(out.contains("Team is full"));
        assert!(out.contains("Tidus was released. Kyou joined the team."));
        assert_eq!(roster.len(), 8);
        assert!(!roster.contains("Tidus"));
    }

    #[test]
    fn errors_are_reported_and_loop_continues() {
        let dir = saves_dir();
        let (roster, out) = run("release Wakka\nrecruit Tidus\nfly\nteam\n", dir.path());
        assert!(out.contains("Error: Attempted to release Wakka from team, but Wakka was not on the team."));
        assert!(out.contains("Error: Tidus is already on the team."));
        assert!(out.contains("Unknown command 'fly'"));
        assert_eq!(roster.len(), 6);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = saves_dir();
        let (_, out) = run("release Keepa\nsave\nfinals\nquit\n", dir.path());
        assert!(out.contains("Team saved to"));
        assert!(dir.path().join("finals.json").exists());

        let (roster, out) = run("load finals\nsaves\n", dir.path());
        assert!(out.contains("Loaded team 'finals'."));
        assert!(out.contains("finals\n"));
        assert_eq!(roster.len(), 5);
        assert!(!roster.contains("Keepa"));
    }
}
