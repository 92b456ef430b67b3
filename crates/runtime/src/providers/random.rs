use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use tcg_core::{GameState, Request, RequestKind, Response, ResponseKind};

use super::ResponseProvider;
use crate::error::Result;

/// Picks uniformly among the legal answers it can pay for.
///
/// Mulligans keep the hand and rerolls are skipped, so a random match
/// spends its time in the action phase.
#[derive(Clone, Debug)]
pub struct RandomProvider {
    rng: StdRng,
}

impl RandomProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn answer(&mut self, request: &Request, state: &GameState) -> Option<ResponseKind> {
        let pool = &state.table(request.player).dice;
        let kind = match &request.kind {
            RequestKind::SwitchCard => ResponseKind::SwitchCard { cards: Vec::new() },
            RequestKind::ChooseCharacter { candidates } if !candidates.is_empty() => {
                ResponseKind::ChooseCharacter {
                    character: self.rng.gen_range(0..candidates.len()),
                }
            }
            RequestKind::RerollDice { .. } => ResponseKind::RerollDice { dice: Vec::new() },
            RequestKind::SwitchCharacter { cost, .. } => ResponseKind::SwitchCharacter {
                dice: cost.select_dice(pool)?,
            },
            RequestKind::ElementalTuning { dice, cards }
                if !dice.is_empty() && !cards.is_empty() =>
            {
                ResponseKind::ElementalTuning {
                    die: self.rng.gen_range(0..dice.len()),
                    card: self.rng.gen_range(0..cards.len()),
                }
            }
            RequestKind::DeclareRoundEnd => ResponseKind::DeclareRoundEnd,
            RequestKind::UseSkill { cost, .. } => ResponseKind::UseSkill {
                dice: cost.select_dice(pool)?,
            },
            RequestKind::UseCard { cost, targets, .. } => ResponseKind::UseCard {
                dice: cost.select_dice(pool)?,
                target: (!targets.is_empty()).then(|| self.rng.gen_range(0..targets.len())),
            },
            RequestKind::ChooseCharacter { .. } | RequestKind::ElementalTuning { .. } => return None,
        };
        Some(kind)
    }
}

impl ResponseProvider for RandomProvider {
    fn respond(&mut self, player: usize, state: &GameState) -> Result<Option<Response>> {
        let mut requests: Vec<&Request> = state.requests_for(player).collect();
        requests.shuffle(&mut self.rng);
        for request in requests {
            if let Some(kind) = self.answer(request, state) {
                tracing::debug!(
                    target: "tcg::runtime",
                    player,
                    response = kind.as_ref(),
                    "random provider picked"
                );
                return Ok(Some(Response::new(request.clone(), kind)));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcg_core::{Cost, CostLabels, MatchConfig};

    #[test]
    fn unpayable_requests_are_skipped() {
        let mut state = GameState::new(MatchConfig::for_scenarios(), 3);
        state.requests = vec![
            Request::new(
                0,
                RequestKind::SwitchCharacter {
                    character: 1,
                    cost: Cost::new(CostLabels::SWITCH_CHARACTER).any(1),
                },
            ),
            Request::new(0, RequestKind::DeclareRoundEnd),
        ];
        let mut provider = RandomProvider::new(5);
        for _ in 0..8 {
            let response = provider.respond(0, &state).expect("answer").expect("some");
            assert_eq!(response.kind, ResponseKind::DeclareRoundEnd);
        }
    }

    #[test]
    fn silent_for_other_players() {
        let mut state = GameState::new(MatchConfig::for_scenarios(), 3);
        state.requests = vec![Request::new(1, RequestKind::DeclareRoundEnd)];
        let mut provider = RandomProvider::new(5);
        assert_eq!(provider.respond(0, &state).expect("answer"), None);
    }
}
