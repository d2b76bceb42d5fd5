// params.rs - Query-string style construction parameters
//
// Parsing never fails: malformed numbers become `Params::INVALID` and the
// engine constructors reject them.

use tracing::debug;

use crate::seed::clock_seed;

pub const DEFAULT_ROWS: i64 = 10;
pub const DEFAULT_COLUMNS: i64 = 10;

/// Grid height, grid width and PRNG seed as read from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub rows: i64,
    pub columns: i64,
    pub seed: i64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            seed: clock_seed(),
        }
    }
}

impl Params {
    /// Value stored for a recognized key whose value is not a base-10 integer.
    pub const INVALID: i64 = -1;

    /// Parse a full URL or a bare query string on top of the defaults.
    pub fn parse(input: &str) -> Self {
        Self::parse_onto(Self::default(), input)
    }

    /// Parse `input`, overriding only the keys it names.
    ///
    /// The first occurrence of a key wins; later duplicates are ignored.
    pub fn parse_onto(mut base: Params, input: &str) -> Self {
        let mut seen = [false; 3];
        for (key, value) in query_pairs(input) {
            let slot = match key.as_str() {
                "rows" => 0,
                "columns" => 1,
                "seed" => 2,
                _ => {
                    debug!(key = %key, "ignoring unrecognized parameter");
                    continue;
                }
            };
            if seen[slot] {
                continue;
            }
            seen[slot] = true;

            let parsed = value.parse::<i64>().unwrap_or(Self::INVALID);
            match slot {
                0 => base.rows = parsed,
                1 => base.columns = parsed,
                _ => base.seed = parsed,
            }
        }
        base
    }
}

/// Decoded `key=value` pairs of the query component.
fn query_pairs(input: &str) -> impl Iterator<Item = (String, String)> + '_ {
    let without_fragment = input.split_once('#').map_or(input, |(head, _)| head);
    let query = match without_fragment.split_once('?') {
        Some((_, query)) => query,
        // A bare string with no '=' at all is a path, not a query.
        None if !without_fragment.contains('=') && !without_fragment.contains('&') => "",
        None => without_fragment,
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match (decode_component(key), decode_component(value)) {
                (Some(key), Some(value)) => Some((key, value)),
                _ => {
                    debug!(pair, "dropping parameter with a malformed escape");
                    None
                }
            }
        })
        .filter(|(key, _)| !key.is_empty())
}

/// `+` becomes a space and `%XX` becomes the byte it names. `None` when a
/// `%` is not followed by two hex digits.
fn decode_component(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let high = bytes.get(i + 1).copied().and_then(hex_value)?;
                let low = bytes.get(i + 2).copied().and_then(hex_value)?;
                out.push((high << 4) | low);
                i += 2;
            }
            byte => out.push(byte),
        }
        i += 1;
    }
    Some(String::from_utf8_lossy(&out).into_owned())
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed() -> Params {
        Params {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            seed: 7,
        }
    }

    #[test]
    fn empty_input_keeps_defaults() {
        assert_eq!(Params::parse_onto(fixed(), ""), fixed());
        assert_eq!(
            Params::parse_onto(fixed(), "http://localhost:8080/index.html"),
            fixed()
        );
    }

    #[test]
    fn reads_all_keys_from_url() {
        let params =
            Params::parse_onto(fixed(), "http://localhost/?rows=20&columns=30&seed=99#top");
        assert_eq!(
            params,
            Params {
                rows: 20,
                columns: 30,
                seed: 99
            }
        );
    }

    #[test]
    fn reads_bare_query() {
        let params = Params::parse_onto(fixed(), "rows=3&columns=4");
        assert_eq!((params.rows, params.columns, params.seed), (3, 4, 7));
        let params = Params::parse_onto(fixed(), "?seed=%2B12");
        assert_eq!(params.seed, 12);
        // A raw '+' is a space, which is not a number.
        let params = Params::parse_onto(fixed(), "?seed=+12");
        assert_eq!(params.seed, Params::INVALID);
    }

    #[test]
    fn malformed_numbers_become_sentinel() {
        let params = Params::parse_onto(fixed(), "?rows=ten&columns=&seed=1.5");
        assert_eq!(params.rows, Params::INVALID);
        assert_eq!(params.columns, Params::INVALID);
        assert_eq!(params.seed, Params::INVALID);

        let params = Params::parse_onto(fixed(), "?rows");
        assert_eq!(params.rows, Params::INVALID);
    }

    #[test]
    fn negative_numbers_are_kept_as_is() {
        let params = Params::parse_onto(fixed(), "?rows=-5");
        assert_eq!(params.rows, -5);
    }

    #[test]
    fn first_value_wins() {
        let params = Params::parse_onto(fixed(), "?rows=5&rows=9&rows=x");
        assert_eq!(params.rows, 5);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let params = Params::parse_onto(fixed(), "?speed=3&rows=4&theme=dark");
        assert_eq!(params.rows, 4);
        assert_eq!(params.columns, DEFAULT_COLUMNS);
    }

    #[test]
    fn percent_escapes_are_decoded() {
        let params = Params::parse_onto(fixed(), "?r%6Fws=%31%32");
        assert_eq!(params.rows, 12);
        assert_eq!(decode_component("a+b%2b").as_deref(), Some("a b+"));
    }

    #[test]
    fn malformed_escape_drops_the_pair() {
        let params = Params::parse_onto(fixed(), "?rows=%zz5&columns=6");
        assert_eq!(params.rows, DEFAULT_ROWS);
        assert_eq!(params.columns, 6);

        // A dropped pair does not claim the key, so a later one still counts.
        let params = Params::parse_onto(fixed(), "?rows=%4&rows=8&se%zd=3");
        assert_eq!(params.rows, 8);
        assert_eq!(params.seed, 7);

        assert_eq!(decode_component("%zz"), None);
        assert_eq!(decode_component("12%"), None);
    }
}
