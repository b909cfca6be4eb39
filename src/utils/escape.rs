//! Two-letter escaping of punctuation, spaces and digits.
//!
//! The machine only carries `A`..`Z`. Before encryption, free text is
//! upper-cased and each supported symbol is replaced by a fixed letter
//! pair; after decryption the pairs are turned back into symbols.
//!
//! The mapping is lossy: a plaintext that genuinely contains one of the
//! pairs (for example `AARDVARK`) will come back with
//! a symbol in its place (`1RDVARK`). It is a convenience for
//! demonstrations and sits outside the cipher's correctness guarantees.

/// Symbol to letter-pair table. Order matters for [`unescape`]: the first
/// matching pair wins.
const ESCAPES: [(char, &str); 17] = [
    ('.', "XX"),
    (',', "YY"),
    ('?', "ZZ"),
    ('!', "JC"),
    (':', "JA"),
    (';', "JB"),
    (' ', "QQ"),
    ('0', "QZ"),
    ('1', "AA"),
    ('2', "BB"),
    ('3', "CC"),
    ('4', "DD"),
    ('5', "EE"),
    ('6', "FF"),
    ('7', "GG"),
    ('8', "HH"),
    ('9', "II"),
];

/// Upper-cases `text` and replaces every supported symbol by its pair.
///
/// Characters that are neither letters nor supported symbols pass
/// through unchanged and will be rejected later by the machine.
///
/// # Examples
///
/// ```
/// use enigmacrypt::utils::escape::escape;
///
/// assert_eq!(escape("Hello, world."), "HELLOYYQQWORLDXX");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 12);
    for ch in text.chars().flat_map(char::to_uppercase) {
        match ESCAPES.iter().find(|(symbol, _)| *symbol == ch) {
            Some((_, pair)) => out.push_str(pair),
            None => out.push(ch),
        }
    }
    out
}

/// Replaces every recognised letter pair by its symbol, scanning left to
/// right without overlap.
///
/// # Examples
///
/// ```
/// use enigmacrypt::utils::escape::unescape;
///
/// assert_eq!(unescape("HELLOYYQQWORLDXX"), "HELLO, WORLD.");
/// ```
pub fn unescape(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let symbol = chars.get(i + 1).and_then(|&next| {
            ESCAPES.iter().find_map(|(symbol, pair)| {
                let mut p = pair.chars();
                (p.next() == Some(chars[i]) && p.next() == Some(next)).then_some(*symbol)
            })
        });
        match symbol {
            Some(symbol) => {
                out.push(symbol);
                i += 2;
            }
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }
    out
}
