//! Keyboard shortcut resolution
//!
//! Maps key chords to [`Action`]s so shortcuts reach the same handlers as the
//! toolbar buttons.

use crate::action::Action;
use crate::config::Keybinding;
use std::collections::HashMap;

/// A normalized key chord: lowercase key plus sorted, deduplicated modifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Chord {
    key: String,
    modifiers: Vec<String>,
}

impl Chord {
    fn new<S: AsRef<str>>(key: &str, modifiers: &[S]) -> Self {
        let mut modifiers: Vec<String> = modifiers
            .iter()
            .map(|m| m.as_ref().trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        modifiers.sort();
        modifiers.dedup();
        Self {
            key: key.trim().to_lowercase(),
            modifiers,
        }
    }
}

/// Resolves key chords to actions
#[derive(Debug, Clone, Default)]
pub struct KeybindingResolver {
    bindings: HashMap<Chord, Action>,
}

impl KeybindingResolver {
    /// Build a resolver; later bindings for the same chord win
    pub fn new(bindings: &[Keybinding]) -> Self {
        let mut resolved = HashMap::new();
        for binding in bindings {
            match Action::from_name(&binding.action) {
                Some(action) => {
                    resolved.insert(Chord::new(&binding.key, &binding.modifiers), action);
                }
                None => {
                    tracing::warn!(
                        "Ignoring keybinding {:?}+{}: unknown action '{}'",
                        binding.modifiers,
                        binding.key,
                        binding.action
                    );
                }
            }
        }
        Self { bindings: resolved }
    }

    /// Look up the action bound to a key chord
    pub fn resolve(&self, key: &str, modifiers: &[&str]) -> Option<&Action> {
        self.bindings.get(&Chord::new(key, modifiers))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
