#![no_main]

use libfuzzer_sys::fuzz_target;
use numeric_input::{FormatSpec, NumberCodec};

const LOCALES: &[&str] = &["es-ES", "de-DE", "fr-FR", "en-US", "de-CH"];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let spec = FormatSpec {
        decimals: usize::from(selector % 5),
        locale: LOCALES[usize::from(selector / 5) % LOCALES.len()].to_string(),
    };
    let Some(codec) = NumberCodec::for_spec(&spec) else {
        return;
    };

    // Whatever parses must format, and the formatted text must read back
    // as the same canonical value.
    if let Some(value) = codec.parse(Some(text)) {
        assert!(value.is_finite());
        let shown = codec.format(Some(value)).expect("finite values format");
        assert_eq!(codec.parse(Some(&shown)), Some(value), "{text:?} -> {shown:?}");
    }
});
