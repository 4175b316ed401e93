use crate::input::data::WaterAction;
use bevy::prelude::*;
use shared::water::WaterSimulation;
use std::collections::BTreeMap;

#[derive(Resource, Debug, Clone)]
pub struct KeyMap {
    pub map: BTreeMap<WaterAction, Vec<KeyCode>>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            map: default_key_map(),
        }
    }
}

pub fn is_action_just_pressed(
    action: WaterAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    key_map
        .map
        .get(&action)
        .is_some_and(|keys| keys.iter().any(|key| keyboard_input.just_pressed(*key)))
}

pub(crate) fn default_key_map() -> BTreeMap<WaterAction, Vec<KeyCode>> {
    let mut map = BTreeMap::new();
    map.insert(WaterAction::ToggleHud, vec![KeyCode::F3]);
    map.insert(WaterAction::Restart, vec![KeyCode::KeyR]);
    map
}

pub fn restart_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    mut simulation: ResMut<WaterSimulation>,
) {
    if is_action_just_pressed(WaterAction::Restart, &keyboard_input, &key_map) {
        simulation.restart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_just_pressed_uses_bindings() {
        let key_map = KeyMap::default();
        let mut input = ButtonInput::<KeyCode>::default();
        assert!(!is_action_just_pressed(WaterAction::Restart, &input, &key_map));

        input.press(KeyCode::KeyR);
        assert!(is_action_just_pressed(WaterAction::Restart, &input, &key_map));
        assert!(!is_action_just_pressed(WaterAction::ToggleHud, &input, &key_map));

        input.clear();
        assert!(!is_action_just_pressed(WaterAction::Restart, &input, &key_map));
    }

    #[test]
    fn test_unbound_action_is_never_pressed() {
        let key_map = KeyMap {
            map: BTreeMap::new(),
        };
        let mut input = ButtonInput::<KeyCode>::default();
        input.press(KeyCode::F3);
        assert!(!is_action_just_pressed(WaterAction::ToggleHud, &input, &key_map));
    }
}
