//! Gameplay response to contact begin/end events.
//!
//! Runs after the physics step has finished, so removals are only queued on
//! the scene and applied by the substep's sweep.

use gravity_engine::{CollisionPair, EntityId};

use crate::config::{CollectibleConfig, RulesConfig};
use crate::entity::{CollectibleKind, EntityKind, Payload};
use crate::round::RoundState;
use crate::scene::Scene;

/// The gameplay rule that fired for a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEffect {
    /// A planet touched the sun.
    SunPenalty { seconds: i32 },
    /// An enemy rammed the sun or a planet and was destroyed.
    EnemyStrike { enemy: EntityId, seconds: i32 },
    /// A collectible was picked up.
    Pickup {
        collectible: EntityId,
        kind: CollectibleKind,
        payload: Payload,
        by_planet: bool,
    },
}

/// Which rule an unordered pair of kinds falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairClass {
    PlanetSun,
    EnemyStrike { enemy_first: bool },
    CollectibleSun { collectible_first: bool },
    CollectiblePlanet { collectible_first: bool },
    Ignored,
}

fn classify(a: &EntityKind, b: &EntityKind) -> PairClass {
    use EntityKind::*;
    match (a, b) {
        (Planet, Sun { .. }) | (Sun { .. }, Planet) => PairClass::PlanetSun,
        (Enemy, Sun { .. }) | (Enemy, Planet) => PairClass::EnemyStrike { enemy_first: true },
        (Sun { .. }, Enemy) | (Planet, Enemy) => PairClass::EnemyStrike { enemy_first: false },
        (Collectible(_), Sun { .. }) => PairClass::CollectibleSun { collectible_first: true },
        (Sun { .. }, Collectible(_)) => PairClass::CollectibleSun { collectible_first: false },
        (Collectible(_), Planet) => PairClass::CollectiblePlanet { collectible_first: true },
        (Planet, Collectible(_)) => PairClass::CollectiblePlanet { collectible_first: false },
        _ => PairClass::Ignored,
    }
}

/// Applies contact rules to the round and scene.
#[derive(Debug, Default)]
pub struct ContactDispatcher {
    /// Set while a planet is touching the sun; suppresses repeat penalties.
    in_contact: bool,
}

impl ContactDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_contact(&self) -> bool {
        self.in_contact
    }

    pub fn reset(&mut self) {
        self.in_contact = false;
    }

    /// Restore the debounce flag (snapshot load).
    pub fn set_in_contact(&mut self, in_contact: bool) {
        self.in_contact = in_contact;
    }

    /// Apply one contact event. Returns the rule that fired, if any.
    pub fn dispatch(
        &mut self,
        pair: &CollisionPair,
        scene: &mut Scene,
        round: &mut RoundState,
        rules: &RulesConfig,
        collectibles: &CollectibleConfig,
    ) -> Option<ContactEffect> {
        let (Some(a), Some(b)) = (scene.get(pair.entity_a), scene.get(pair.entity_b)) else {
            log::trace!("contact with unknown entity {:?}/{:?}", pair.entity_a, pair.entity_b);
            return None;
        };
        let class = classify(&a.kind, &b.kind);
        let (kind_a, kind_b) = (a.kind, b.kind);

        if !pair.started {
            if class == PairClass::PlanetSun {
                self.in_contact = false;
            }
            return None;
        }

        // An entity already on its way out takes part in no further rules.
        if scene.is_marked(pair.entity_a) || scene.is_marked(pair.entity_b) {
            return None;
        }

        match class {
            PairClass::PlanetSun => {
                if self.in_contact {
                    return None;
                }
                self.in_contact = true;
                round.add_time(-rules.planet_sun_penalty);
                log::debug!("planet hit the sun: -{}s", rules.planet_sun_penalty);
                Some(ContactEffect::SunPenalty {
                    seconds: rules.planet_sun_penalty,
                })
            }
            PairClass::EnemyStrike { enemy_first } => {
                let enemy = if enemy_first { pair.entity_a } else { pair.entity_b };
                round.add_time(-rules.enemy_penalty);
                scene.mark_for_removal(enemy);
                log::debug!("enemy {:?} struck: -{}s", enemy, rules.enemy_penalty);
                Some(ContactEffect::EnemyStrike {
                    enemy,
                    seconds: rules.enemy_penalty,
                })
            }
            PairClass::CollectibleSun { collectible_first }
            | PairClass::CollectiblePlanet { collectible_first } => {
                let by_planet = matches!(class, PairClass::CollectiblePlanet { .. });
                let (collectible, kind) = if collectible_first {
                    (pair.entity_a, kind_a)
                } else {
                    (pair.entity_b, kind_b)
                };
                let EntityKind::Collectible(kind) = kind else {
                    return None;
                };

                let mut payload = kind.payload(collectibles);
                if by_planet {
                    payload = payload.amplified(rules.score_amplification, rules.time_amplification);
                }
                round.add_score(payload.score);
                round.add_time(payload.time);
                scene.mark_for_removal(collectible);
                log::debug!(
                    "collected {:?} (by planet: {}): score {:+}, time {:+}",
                    kind,
                    by_planet,
                    payload.score,
                    payload.time
                );
                Some(ContactEffect::Pickup {
                    collectible,
                    kind,
                    payload,
                    by_planet,
                })
            }
            PairClass::Ignored => None,
        }
    }
}
