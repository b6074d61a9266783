use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Per-lane-count key tables and the table currently in effect.
#[derive(Clone, Debug)]
pub struct KeyBindings {
    lane_maps: HashMap<usize, Vec<KeyCode>>,
    active: HashMap<KeyCode, usize>,
    lane_count: usize,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            lane_maps: Self::default_lane_maps(),
            active: HashMap::new(),
            lane_count: 0,
        }
    }

    /// Overrides tables from the `[keybinds]` config section.
    ///
    /// Keys are lane counts as strings, values are key names such as `"KeyD"`.
    /// A table with any unknown key name is skipped as a whole.
    pub fn reload_from_settings(&mut self, keybinds: &HashMap<String, Vec<String>>) {
        for (count_str, names) in keybinds {
            let Ok(lane_count) = count_str.parse::<usize>() else {
                log::warn!("INPUT: Ignoring keybinds for invalid lane count {count_str:?}");
                continue;
            };

            let keys: Option<Vec<KeyCode>> = names.iter().map(|s| parse_keycode(s)).collect();
            match keys {
                Some(keys) if keys.len() == lane_count => {
                    self.lane_maps.insert(lane_count, keys);
                }
                Some(keys) => log::warn!(
                    "INPUT: {lane_count}K table has {} keys, expected {lane_count}",
                    keys.len()
                ),
                None => log::warn!("INPUT: Unknown key name in {lane_count}K table: {names:?}"),
            }
        }

        if self.lane_count != 0 {
            self.apply_lane_bindings(self.lane_count);
        }
    }

    /// Activates the table for `lane_count`. Returns false if none exists.
    pub fn apply_lane_bindings(&mut self, lane_count: usize) -> bool {
        let Some(keys) = self.lane_maps.get(&lane_count) else {
            return false;
        };

        // Later lanes win if a key is listed twice.
        self.active = keys
            .iter()
            .enumerate()
            .map(|(lane, &code)| (code, lane))
            .collect();
        self.lane_count = lane_count;
        true
    }

    pub fn supports(&self, lane_count: usize) -> bool {
        self.lane_maps.contains_key(&lane_count)
    }

    /// Lane bound to `key` in the active table.
    pub fn resolve(&self, key: KeyCode) -> Option<usize> {
        self.active.get(&key).copied()
    }

    /// First key bound to `lane` in the table for `lane_count`.
    pub fn key_for_lane(&self, lane_count: usize, lane: usize) -> Option<KeyCode> {
        self.lane_maps.get(&lane_count)?.get(lane).copied()
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    fn default_lane_maps() -> HashMap<usize, Vec<KeyCode>> {
        use KeyCode::*;
        let mut map = HashMap::new();
        map.insert(1, vec![Space]);
        map.insert(2, vec![KeyF, KeyJ]);
        map.insert(3, vec![KeyF, Space, KeyJ]);
        map.insert(4, vec![KeyD, KeyF, KeyJ, KeyK]);
        map.insert(5, vec![KeyD, KeyF, Space, KeyJ, KeyK]);
        map.insert(6, vec![KeyS, KeyD, KeyF, KeyJ, KeyK, KeyL]);
        map.insert(7, vec![KeyS, KeyD, KeyF, Space, KeyJ, KeyK, KeyL]);
        map.insert(8, vec![KeyA, KeyS, KeyD, KeyF, KeyJ, KeyK, KeyL, Semicolon]);
        map
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a winit key name as written in config files.
pub fn parse_keycode(s: &str) -> Option<KeyCode> {
    use KeyCode::*;
    let code = match s {
        "KeyA" => KeyA, "KeyB" => KeyB, "KeyC" => KeyC, "KeyD" => KeyD,
        "KeyE" => KeyE, "KeyF" => KeyF, "KeyG" => KeyG, "KeyH" => KeyH,
        "KeyI" => KeyI, "KeyJ" => KeyJ, "KeyK" => KeyK, "KeyL" => KeyL,
        "KeyM" => KeyM, "KeyN" => KeyN, "KeyO" => KeyO, "KeyP" => KeyP,
        "KeyQ" => KeyQ, "KeyR" => KeyR, "KeyS" => KeyS, "KeyT" => KeyT,
        "KeyU" => KeyU, "KeyV" => KeyV, "KeyW" => KeyW, "KeyX" => KeyX,
        "KeyY" => KeyY, "KeyZ" => KeyZ,
        "Digit0" => Digit0, "Digit1" => Digit1, "Digit2" => Digit2, "Digit3" => Digit3,
        "Digit4" => Digit4, "Digit5" => Digit5, "Digit6" => Digit6, "Digit7" => Digit7,
        "Digit8" => Digit8, "Digit9" => Digit9,
        "Space" => Space, "Semicolon" => Semicolon, "Quote" => Quote,
        "Comma" => Comma, "Period" => Period, "Slash" => Slash,
        "ShiftLeft" => ShiftLeft, "ShiftRight" => ShiftRight,
        "ArrowLeft" => ArrowLeft, "ArrowDown" => ArrowDown,
        "ArrowUp" => ArrowUp, "ArrowRight" => ArrowRight,
        _ => return None,
    };
    Some(code)
}
