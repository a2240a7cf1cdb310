#![no_main]

use libfuzzer_sys::fuzz_target;
use numeric_input::{FieldConfig, KeyEvent, NumericField, PlainField, SelectionRange, names};

const KEYS: &[&str] = &[
    "0", "1", "5", "9", ",", ".", "-", "a", " ",
    names::BACKSPACE,
    names::DELETE,
    names::ARROW_LEFT,
    names::ARROW_RIGHT,
    names::HOME,
    names::END,
];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, script)) = data.split_first() else {
        return;
    };
    let config = FieldConfig {
        decimals: usize::from(selector % 4),
        locale: if selector & 0x80 == 0 { "es-ES" } else { "fr-FR" }.to_string(),
        ..FieldConfig::default()
    };
    let Ok(mut field) = NumericField::from_config(&config, PlainField::default()) else {
        return;
    };
    field.attach("");

    for &byte in script {
        if byte & 0xC0 == 0xC0 {
            // Jump the caret somewhere arbitrary, as a click would.
            field.select(SelectionRange::caret(usize::from(byte & 0x3F)));
        } else {
            let key = KEYS[usize::from(byte) % KEYS.len()];
            let mut event = KeyEvent::new(key);
            event.ctrl = key == "a" && byte & 0x20 != 0;
            field.press(&event);
        }

        let text = field.text();
        let sel = field.selection();
        assert!(sel.start <= sel.end && sel.end <= text.len(), "{text:?} {sel:?}");
        assert!(text.is_char_boundary(sel.start) && text.is_char_boundary(sel.end));
        assert!(text.matches(field.codec().separator()).count() <= 1, "{text:?}");
    }
});
