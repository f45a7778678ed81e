use std::fmt::Display;

use crate::Error;

/// Extracts the part of `value` between the first `a` and the following `b`.
pub fn between<'a>(value: &'a str, a: &str, b: &str) -> Result<&'a str, Error> {
    let after = after(value, a)?;
    before(after, b)
}

/// Extracts the part of `value` before the first `a`.
pub fn before<'a>(value: &'a str, a: &str) -> Result<&'a str, Error> {
    match value.find(a) {
        Some(pos) => Ok(&value[..pos]),
        None => Err(Error::NotFound {
            needle: a.to_string(),
            haystack: value.to_string(),
        }),
    }
}

/// Extracts the part of `value` after the first `a`. Fails if nothing follows it.
pub fn after<'a>(value: &'a str, a: &str) -> Result<&'a str, Error> {
    let pos = value.find(a).ok_or_else(|| Error::NotFound {
        needle: a.to_string(),
        haystack: value.to_string(),
    })?;
    let adjusted = pos + a.len();
    if adjusted >= value.len() {
        return Err(Error::TooShort {
            needle: a.to_string(),
            haystack: value.to_string(),
        });
    }
    Ok(&value[adjusted..])
}

pub fn has_prefix_any(s: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| s.starts_with(prefix))
}

pub fn has_suffix_any(s: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| s.ends_with(suffix))
}

/// Strips each prefix once, in order.
pub fn trim_prefix_any<'a>(mut s: &'a str, prefixes: &[&str]) -> &'a str {
    for prefix in prefixes {
        s = s.strip_prefix(prefix).unwrap_or(s);
    }
    s
}

/// Strips each suffix once, in order.
pub fn trim_suffix_any<'a>(mut s: &'a str, suffixes: &[&str]) -> &'a str {
    for suffix in suffixes {
        s = s.strip_suffix(suffix).unwrap_or(s);
    }
    s
}

pub fn join<T: Display>(elems: &[T], sep: &str) -> String {
    elems.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(sep)
}

/// Case insensitive `starts_with`.
pub fn has_prefix_i(s: &str, prefix: &str) -> bool {
    s.to_lowercase().starts_with(&prefix.to_lowercase())
}

/// Case insensitive `ends_with`.
pub fn has_suffix_i(s: &str, suffix: &str) -> bool {
    s.to_lowercase().ends_with(&suffix.to_lowercase())
}

pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

pub fn contains_any(s: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| s.contains(needle))
}

pub fn equal_fold_any(s: &str, candidates: &[&str]) -> bool {
    let s = s.to_lowercase();
    candidates.iter().any(|candidate| candidate.to_lowercase() == s)
}

/// Byte offset of `sep` in `s`, searching from byte offset `n`.
pub fn index_at(s: &str, sep: &str, n: usize) -> Option<usize> {
    s.get(n..)?.find(sep).map(|idx| idx + n)
}

/// Splits on any character found in `seps`, dropping empty fields.
pub fn split_any<'a>(s: &'a str, seps: &[&str]) -> Vec<&'a str> {
    let seps: String = seps.concat();
    s.split(|c: char| seps.contains(c)).filter(|field| !field.is_empty()).collect()
}

/// Windows of `len` characters moving forward one character at a time.
///
/// The final window is whatever is left when fewer than `len` characters remain, and a string
/// shorter than `len` is yielded whole.
pub fn slide_with_length(s: &str, len: usize) -> Slide<'_> {
    let mut bounds: Vec<usize> = s.char_indices().map(|(i, _)| i).collect();
    bounds.push(s.len());
    Slide {
        s,
        bounds,
        len,
        pos: 0,
        done: false,
    }
}

pub struct Slide<'a> {
    s: &'a str,
    bounds: Vec<usize>,
    len: usize,
    pos: usize,
    done: bool,
}

impl<'a> Iterator for Slide<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let chars = self.bounds.len() - 1;
        if chars < self.len {
            self.done = true;
            return Some(self.s);
        }
        if self.pos >= chars {
            self.done = true;
            return None;
        }
        let start = self.bounds[self.pos];
        self.pos += 1;
        let end = self.pos - 1 + self.len;
        if end <= chars {
            Some(&self.s[start..self.bounds[end]])
        } else {
            self.done = true;
            Some(&self.s[start..])
        }
    }
}

/// Replaces every occurrence of each of `olds` with `new`, one after the other.
pub fn replace_all(s: &str, new: &str, olds: &[&str]) -> String {
    olds.iter().fold(s.to_string(), |acc, old| acc.replace(old, new))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongestSequence {
    pub sequence: String,
    pub count: usize,
}

/// Finds the longest repeating non-overlapping substring and how often it occurs.
pub fn longest_repeating_sequence(s: &str) -> LongestSequence {
    let chars: Vec<char> = s.chars().collect();
    let n = chars.len();
    let mut table = vec![vec![0usize; n + 1]; n + 1];
    let mut best = 0;
    let mut idx = 0;

    for i in 1..=n {
        for j in (i + 1)..=n {
            if chars[i - 1] == chars[j - 1] && table[i - 1][j - 1] < j - i {
                table[i][j] = table[i - 1][j - 1] + 1;
                if table[i][j] > best {
                    best = table[i][j];
                    idx = idx.max(i);
                }
            }
        }
    }

    if best == 0 {
        return LongestSequence::default();
    }
    let sequence: String = chars[idx - best..idx].iter().collect();
    let count = s.matches(sequence.as_str()).count();
    LongestSequence { sequence, count }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_before_after() {
        assert_eq!(between("key=[value];", "[", "]").unwrap(), "value");
        assert_eq!(before("host:port", ":").unwrap(), "host");
        assert_eq!(after("host:port", ":").unwrap(), "port");
        assert!(matches!(before("abc", "x"), Err(Error::NotFound { .. })));
        assert!(matches!(after("abc:", ":"), Err(Error::TooShort { .. })));
        assert_eq!(after("abc", "x").unwrap_err().to_string(), "x not found in abc");
    }

    #[test]
    fn test_prefix_suffix_helpers() {
        assert!(has_prefix_any("https://x", &["ftp://", "https://"]));
        assert!(!has_prefix_any("x", &[]));
        assert!(has_suffix_any("a.tar.gz", &[".zip", ".gz"]));
        assert_eq!(trim_prefix_any("www.example.com", &["http://", "www."]), "example.com");
        assert_eq!(trim_suffix_any("report.tar.gz", &[".gz", ".tar"]), "report");
        assert!(has_prefix_i("HTTP/1.1", "http"));
        assert!(has_suffix_i("IMAGE.PNG", ".png"));
    }

    #[test]
    fn test_join_and_reverse() {
        assert_eq!(join(&[1, 2, 3], ", "), "1, 2, 3");
        assert_eq!(join::<u8>(&[], ","), "");
        assert_eq!(reverse("héllo"), "olléh");
    }

    #[test]
    fn test_contains_and_fold() {
        assert!(contains_any("192.168.0.1", &[":", "."]));
        assert!(!contains_any("abc", &["d"]));
        assert!(equal_fold_any("GET", &["post", "get"]));
        assert!(!equal_fold_any("GET", &["put"]));
    }

    #[test]
    fn test_index_at() {
        assert_eq!(index_at("a-b-c", "-", 0), Some(1));
        assert_eq!(index_at("a-b-c", "-", 2), Some(3));
        assert_eq!(index_at("a-b-c", "-", 4), None);
        assert_eq!(index_at("abc", "a", 10), None);
    }

    #[test]
    fn test_split_any() {
        assert_eq!(split_any("a,b;;c d", &[",;", " "]), vec!["a", "b", "c", "d"]);
        assert!(split_any("", &[","]).is_empty());
    }

    #[test]
    fn test_slide_with_length() {
        assert_eq!(slide_with_length("abcd", 2).collect::<Vec<_>>(), vec!["ab", "bc", "cd", "d"]);
        assert_eq!(slide_with_length("ab", 5).collect::<Vec<_>>(), vec!["ab"]);
        assert_eq!(slide_with_length("äöü", 3).collect::<Vec<_>>(), vec!["äöü", "öü"]);
        assert_eq!(slide_with_length("äöü", 2).collect::<Vec<_>>(), vec!["äö", "öü", "ü"]);
    }

    #[test]
    fn test_replace_all() {
        assert_eq!(replace_all("a-b_c", " ", &["-", "_"]), "a b c");
    }

    #[test]
    fn test_longest_repeating_sequence() {
        let res = longest_repeating_sequence("abcXabcYabc");
        assert_eq!(res.sequence, "abc");
        assert_eq!(res.count, 3);
        assert_eq!(longest_repeating_sequence("abcd"), LongestSequence::default());
    }

    #[test]
    fn test_longest_repeating_sequence_multibyte() {
        let res = longest_repeating_sequence("éxéyé");
        assert_eq!(res.sequence, "é");
        assert_eq!(res.count, 3);
        assert_eq!(longest_repeating_sequence("éà"), LongestSequence::default());
        assert_eq!(longest_repeating_sequence("äöüäöü").sequence, "äöü");
    }
}
