//! Game zone: the set of characters a round is fought over.

use std::collections::BTreeMap;

use crate::character::Character;
use crate::error::StatError;
use crate::id::CharacterId;

/// Characters present in one zone.
///
/// Storage is a `BTreeMap`, so iteration is in ascending [`CharacterId`]
/// order. Callers must not rely on that order for game semantics; turn order
/// comes from the combat engine.
#[derive(Debug, Clone, Default)]
pub struct GameZone {
    characters: BTreeMap<CharacterId, Character>,
    next_id: u64,
}

impl GameZone {
    /// Creates an empty zone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a character under a freshly allocated identifier.
    ///
    /// `build` receives the identifier and returns the character to store.
    pub fn spawn(&mut self, build: impl FnOnce(CharacterId) -> Character) -> CharacterId {
        let mut id = CharacterId::new(self.next_id);
        while self.characters.contains_key(&id) {
            self.next_id += 1;
            id = CharacterId::new(self.next_id);
        }
        self.next_id += 1;
        self.characters.insert(id, build(id));
        id
    }

    /// Adds a character under its own identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::DuplicateCharacter`] if the identifier is taken.
    pub fn insert(&mut self, character: Character) -> Result<CharacterId, StatError> {
        let id = character.id();
        if self.characters.contains_key(&id) {
            return Err(StatError::DuplicateCharacter(id));
        }
        self.characters.insert(id, character);
        Ok(id)
    }

    /// Removes a character from the zone.
    pub fn remove(&mut self, id: CharacterId) -> Option<Character> {
        self.characters.remove(&id)
    }

    /// Returns a character by identifier.
    #[must_use]
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// Returns a mutable character by identifier.
    #[must_use]
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    /// All characters, in identifier order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Returns true if the zone holds no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
