//! Object addressing and relational predicates.
//!
//! A [`Position`] names an object by its owner, zone, character slot and id.
//! Rule content never holds references to other objects; it stores positions
//! and asks relational questions through [`PositionCheck`].

use super::GameState;

/// Stable identifier of a game object.
///
/// Ids are assigned monotonically by the match and never reused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Placeholder id used by positions that address a zone rather than an
    /// object (for example "create this in the summon zone").
    pub const UNASSIGNED: Self = Self(0);

    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl core::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Zone an object lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Area {
    Hand,
    Deck,
    /// A character, or equipment attached to it (weapon, artifact, talent).
    Character,
    Skill,
    CharacterStatus,
    TeamStatus,
    Summon,
    Support,
    /// Engine-originated effects such as reaction side damage.
    System,
    Invalid,
}

/// Address and relational subject for every object in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub player: usize,
    pub area: Area,
    /// Character slot, for objects that belong to one character.
    pub character: Option<usize>,
    pub id: ObjectId,
}

impl Position {
    pub const fn new(player: usize, area: Area, character: Option<usize>, id: ObjectId) -> Self {
        Self {
            player,
            area,
            character,
            id,
        }
    }

    /// Zone address without an object id.
    pub const fn zone(player: usize, area: Area) -> Self {
        Self::new(player, area, None, ObjectId::UNASSIGNED)
    }

    /// Zone address bound to a character slot.
    pub const fn character_zone(player: usize, area: Area, character: usize) -> Self {
        Self::new(player, area, Some(character), ObjectId::UNASSIGNED)
    }

    pub const fn system(player: usize) -> Self {
        Self::zone(player, Area::System)
    }

    #[must_use]
    pub const fn with_id(mut self, id: ObjectId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub const fn with_area(mut self, area: Area) -> Self {
        self.area = area;
        self
    }

    pub const fn opponent(&self) -> usize {
        1 - self.player
    }

    pub fn is_same_player(&self, other: &Position) -> bool {
        self.player == other.player
    }

    pub fn is_same_character(&self, other: &Position) -> bool {
        self.player == other.player && self.character.is_some() && self.character == other.character
    }

    /// True when the character slot of this position is its table's active
    /// character.
    pub fn is_active_character(&self, game: &GameState) -> bool {
        match (self.character, game.tables.get(self.player)) {
            (Some(slot), Some(table)) => table.active == Some(slot),
            _ => false,
        }
    }

    /// Evaluates a relational predicate with `self` as the source and
    /// `target` as the subject.
    pub fn check(&self, target: &Position, game: &GameState, check: PositionCheck) -> bool {
        if let Some(same) = check.same_player
            && self.is_same_player(target) != same
        {
            return false;
        }
        if let Some(same) = check.same_character
            && self.is_same_character(target) != same
        {
            return false;
        }
        if let Some(area) = check.source_area
            && self.area != area
        {
            return false;
        }
        if let Some(area) = check.target_area
            && target.area != area
        {
            return false;
        }
        if let Some(active) = check.source_is_active
            && self.is_active_character(game) != active
        {
            return false;
        }
        if let Some(active) = check.target_is_active
            && target.is_active_character(game) != active
        {
            return false;
        }
        true
    }
}

/// Relational predicate vocabulary rule content is written against.
///
/// Unset fields are not checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionCheck {
    pub same_player: Option<bool>,
    pub same_character: Option<bool>,
    pub source_area: Option<Area>,
    pub target_area: Option<Area>,
    pub source_is_active: Option<bool>,
    pub target_is_active: Option<bool>,
}

impl PositionCheck {
    /// Target belongs to the source's player.
    pub const SAME_PLAYER: Self = Self::new().same_player(true);
    /// Target belongs to the same character as the source.
    pub const SAME_CHARACTER: Self = Self::new().same_player(true).same_character(true);
    /// Target is the opposing active character.
    pub const ACTIVE_ENEMY: Self = Self::new().same_player(false).target_is_active(true);
    /// Target is the source player's own active character.
    pub const OWN_ACTIVE: Self = Self::new().same_player(true).target_is_active(true);

    pub const fn new() -> Self {
        Self {
            same_player: None,
            same_character: None,
            source_area: None,
            target_area: None,
            source_is_active: None,
            target_is_active: None,
        }
    }

    #[must_use]
    pub const fn same_player(mut self, same: bool) -> Self {
        self.same_player = Some(same);
        self
    }

    #[must_use]
    pub const fn same_character(mut self, same: bool) -> Self {
        self.same_character = Some(same);
        self
    }

    #[must_use]
    pub const fn source_area(mut self, area: Area) -> Self {
        self.source_area = Some(area);
        self
    }

    #[must_use]
    pub const fn target_area(mut self, area: Area) -> Self {
        self.target_area = Some(area);
        self
    }

    #[must_use]
    pub const fn source_is_active(mut self, active: bool) -> Self {
        self.source_is_active = Some(active);
        self
    }

    #[must_use]
    pub const fn target_is_active(mut self, active: bool) -> Self {
        self.target_is_active = Some(active);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::versus;

    #[test]
    fn relational_checks_follow_the_board() {
        let game = versus(&["Mona", "Bennett"], &["PyroMob", "CryoMob"]);
        let mona = game.table(0).characters[0].position;
        let bennett = game.table(0).characters[1].position;
        let enemy_active = game.table(1).characters[0].position;
        let enemy_bench = game.table(1).characters[1].position;
        let weapon_slot = Position::character_zone(0, Area::Character, 0).with_id(ObjectId(500));

        assert!(weapon_slot.check(&mona, &game, PositionCheck::SAME_CHARACTER));
        assert!(!weapon_slot.check(&bennett, &game, PositionCheck::SAME_CHARACTER));
        assert!(weapon_slot.check(&bennett, &game, PositionCheck::SAME_PLAYER));
        assert!(weapon_slot.check(&enemy_active, &game, PositionCheck::ACTIVE_ENEMY));
        assert!(!weapon_slot.check(&enemy_bench, &game, PositionCheck::ACTIVE_ENEMY));
        assert!(weapon_slot.check(&mona, &game, PositionCheck::OWN_ACTIVE));
        assert!(!weapon_slot.check(&bennett, &game, PositionCheck::OWN_ACTIVE));
    }

    #[test]
    fn zone_addresses_never_share_a_character() {
        let game = versus(&["Mona"], &["PyroMob"]);
        let team = Position::zone(0, Area::TeamStatus);
        let summons = Position::zone(0, Area::Summon);
        assert!(!team.check(&summons, &game, PositionCheck::SAME_CHARACTER));
        assert!(team.check(&summons, &game, PositionCheck::new().same_character(false)));
    }

    #[test]
    fn area_and_source_activity_are_checked() {
        let mut game = versus(&["Mona", "Bennett"], &["PyroMob"]);
        let skill = game.table(0).characters[0].skills[0].position;
        let enemy = game.table(1).characters[0].position;
        let check = PositionCheck::new().source_area(Area::Skill).source_is_active(true);
        assert!(skill.check(&enemy, &game, check));
        game.table_mut(0).active = Some(1);
        assert!(!skill.check(&enemy, &game, check));
        assert!(!skill.check(&enemy, &game, check.source_area(Area::Hand).source_is_active(false)));
    }
}
