use std::collections::VecDeque;
use std::str::FromStr;

use tcg_core::{DieColor, GameState, Request, RequestKind, Response, ResponseKind};

use super::ResponseProvider;
use crate::error::{Result, RuntimeError};

/// One parsed script line.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    /// `sw_card i..`: hand indices to return.
    SwitchCard(Vec<usize>),
    /// `choose i`: character slot.
    Choose(usize),
    /// `reroll i..`: dice indices; none ends rerolling.
    Reroll(Vec<usize>),
    /// `skill i colors..`: skill slot of the active character.
    Skill(usize, Vec<DieColor>),
    /// `sw_char i colors..`: character slot to switch to.
    SwitchCharacter(usize, Vec<DieColor>),
    /// `card h t colors..`: hand index and target index.
    Card(usize, usize, Vec<DieColor>),
    /// `tune color h`: first die of `color` and hand index.
    Tune(DieColor, usize),
    End,
}

/// Replays a fixed list of commands, one per request answered.
///
/// Dice are named by color (`omni`, `pyro`, ...) and resolved to the first
/// unused die of that color in the pool. Runs dry with `Ok(None)`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    commands: VecDeque<(usize, Command)>,
}

impl ScriptedProvider {
    /// Parses a script, one command per line. Blank lines and `#` comments
    /// are skipped.
    pub fn new(script: &str) -> Result<Self> {
        let mut commands = VecDeque::new();
        for (index, raw) in script.lines().enumerate() {
            let line = index + 1;
            let content = raw.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }
            commands.push_back((line, parse_command(content, line)?));
        }
        Ok(Self { commands })
    }

    /// Commands not yet used.
    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

impl ResponseProvider for ScriptedProvider {
    fn respond(&mut self, player: usize, state: &GameState) -> Result<Option<Response>> {
        let Some((line, command)) = self.commands.pop_front() else {
            return Ok(None);
        };
        let response = build_response(&command, player, state).map_err(|message| {
            RuntimeError::Script { line, message }
        })?;
        tracing::debug!(
            target: "tcg::runtime",
            player,
            line,
            response = response.kind.as_ref(),
            "scripted response"
        );
        Ok(Some(response))
    }
}

fn parse_command(content: &str, line: usize) -> Result<Command> {
    let error = |message: String| RuntimeError::Script { line, message };
    let mut words = content.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();

    let index = |word: Option<&&str>, what: &str| -> Result<usize> {
        let word = word.ok_or_else(|| error(format!("'{verb}' needs {what}")))?;
        word.parse()
            .map_err(|_| error(format!("'{word}' is not a valid {what}")))
    };
    let indices = |words: &[&str]| -> Result<Vec<usize>> {
        words.iter().map(|word| index(Some(word), "index")).collect()
    };
    let colors = |words: &[&str]| -> Result<Vec<DieColor>> {
        words
            .iter()
            .map(|word| {
                DieColor::from_str(word).map_err(|_| error(format!("unknown die color '{word}'")))
            })
            .collect()
    };

    let command = match verb {
        "sw_card" => Command::SwitchCard(indices(&rest)?),
        "choose" => Command::Choose(index(rest.first(), "character")?),
        "reroll" => Command::Reroll(indices(&rest)?),
        "skill" => Command::Skill(
            index(rest.first(), "skill")?,
            colors(rest.get(1..).unwrap_or_default())?,
        ),
        "sw_char" => Command::SwitchCharacter(
            index(rest.first(), "character")?,
            colors(rest.get(1..).unwrap_or_default())?,
        ),
        "card" => Command::Card(
            index(rest.first(), "hand index")?,
            index(rest.get(1), "target")?,
            colors(rest.get(2..).unwrap_or_default())?,
        ),
        "tune" => {
            let color = colors(rest.get(..1).unwrap_or_default())?
                .first()
                .copied()
                .ok_or_else(|| error("'tune' needs a die color".to_string()))?;
            Command::Tune(color, index(rest.get(1), "hand index")?)
        }
        "end" => Command::End,
        other => return Err(error(format!("unknown command '{other}'"))),
    };
    Ok(command)
}

fn find<'a>(
    state: &'a GameState,
    player: usize,
    what: &str,
    pred: impl Fn(&RequestKind) -> bool,
) -> std::result::Result<&'a Request, String> {
    state
        .requests_for(player)
        .find(|request| pred(&request.kind))
        .ok_or_else(|| format!("player {player} has no {what} request"))
}

/// Pool indices of the first unused dice with the given colors.
fn pick_dice(
    state: &GameState,
    player: usize,
    colors: &[DieColor],
) -> std::result::Result<Vec<usize>, String> {
    let pool = &state.table(player).dice;
    let mut picked: Vec<usize> = Vec::with_capacity(colors.len());
    for color in colors {
        let index = (0..pool.len())
            .find(|index| pool[*index] == *color && !picked.contains(index))
            .ok_or_else(|| format!("no unused {color} die"))?;
        picked.push(index);
    }
    Ok(picked)
}

fn build_response(
    command: &Command,
    player: usize,
    state: &GameState,
) -> std::result::Result<Response, String> {
    let table = state.table(player);
    let (request, kind) = match command {
        Command::SwitchCard(cards) => (
            find(state, player, "switch card", |kind| matches!(kind, RequestKind::SwitchCard))?,
            ResponseKind::SwitchCard {
                cards: cards.clone(),
            },
        ),
        Command::Choose(slot) => {
            let request = find(state, player, "choose character", |kind| {
                matches!(kind, RequestKind::ChooseCharacter { .. })
            })?;
            let RequestKind::ChooseCharacter { candidates } = &request.kind else {
                return Err("choose character request expected".to_string());
            };
            let character = candidates
                .iter()
                .position(|candidate| candidate == slot)
                .ok_or_else(|| format!("character {slot} is not a candidate"))?;
            (request, ResponseKind::ChooseCharacter { character })
        }
        Command::Reroll(dice) => (
            find(state, player, "reroll", |kind| matches!(kind, RequestKind::RerollDice { .. }))?,
            ResponseKind::RerollDice { dice: dice.clone() },
        ),
        Command::Skill(slot, colors) => {
            let wanted = table
                .active_character()
                .and_then(|character| character.skills.get(*slot))
                .map(|skill| skill.kind)
                .ok_or_else(|| format!("active character has no skill {slot}"))?;
            let request = find(state, player, "matching skill", |kind| {
                matches!(kind, RequestKind::UseSkill { skill, .. } if *skill == wanted)
            })?;
            let dice = pick_dice(state, player, colors)?;
            (request, ResponseKind::UseSkill { dice })
        }
        Command::SwitchCharacter(slot, colors) => {
            let request = find(state, player, "matching switch", |kind| {
                matches!(kind, RequestKind::SwitchCharacter { character, .. } if character == slot)
            })?;
            let dice = pick_dice(state, player, colors)?;
            (request, ResponseKind::SwitchCharacter { dice })
        }
        Command::Card(hand, target, colors) => {
            let id = table
                .hand
                .get(*hand)
                .map(|card| card.id)
                .ok_or_else(|| format!("no card at hand index {hand}"))?;
            let request = find(state, player, "matching card", |kind| {
                matches!(kind, RequestKind::UseCard { position, .. } if position.id == id)
            })?;
            let target = match &request.kind {
                RequestKind::UseCard { targets, .. } if !targets.is_empty() => Some(*target),
                _ => None,
            };
            let dice = pick_dice(state, player, colors)?;
            (request, ResponseKind::UseCard { dice, target })
        }
        Command::Tune(color, hand) => {
            let request = find(state, player, "elemental tuning", |kind| {
                matches!(kind, RequestKind::ElementalTuning { .. })
            })?;
            let RequestKind::ElementalTuning { dice, cards } = &request.kind else {
                return Err("elemental tuning request expected".to_string());
            };
            let die = dice
                .iter()
                .position(|index| table.dice.get(*index) == Some(color))
                .ok_or_else(|| format!("no tunable {color} die"))?;
            let id = table
                .hand
                .get(*hand)
                .map(|card| card.id)
                .ok_or_else(|| format!("no card at hand index {hand}"))?;
            let card = cards
                .iter()
                .position(|candidate| *candidate == id)
                .ok_or_else(|| format!("hand card {hand} cannot be tuned"))?;
            (request, ResponseKind::ElementalTuning { die, card })
        }
        Command::End => (
            find(state, player, "declare round end", |kind| {
                matches!(kind, RequestKind::DeclareRoundEnd)
            })?,
            ResponseKind::DeclareRoundEnd,
        ),
    };
    Ok(Response::new(request.clone(), kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        let provider = ScriptedProvider::new(
            "
            sw_card 0 3
            choose 1   # the second character
            reroll
            skill 0 omni omni omni
            sw_char 2 omni
            card 0 1 pyro pyro
            tune hydro 4
            end
            ",
        )
        .expect("script");
        let commands: Vec<Command> = provider.commands.into_iter().map(|(_, c)| c).collect();
        assert_eq!(
            commands,
            vec![
                Command::SwitchCard(vec![0, 3]),
                Command::Choose(1),
                Command::Reroll(Vec::new()),
                Command::Skill(0, vec![DieColor::Omni; 3]),
                Command::SwitchCharacter(2, vec![DieColor::Omni]),
                Command::Card(0, 1, vec![DieColor::Pyro; 2]),
                Command::Tune(DieColor::Hydro, 4),
                Command::End,
            ]
        );
    }

    #[test]
    fn bad_lines_report_their_number() {
        let error = ScriptedProvider::new("end\nskill x\n").expect_err("bad index");
        assert!(matches!(error, RuntimeError::Script { line: 2, .. }));
        let error = ScriptedProvider::new("skill 0 purple").expect_err("bad color");
        assert!(matches!(error, RuntimeError::Script { line: 1, .. }));
    }
}
