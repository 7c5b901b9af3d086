// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::common::{escape_symbol, unescape_symbol};
use clap::ValueEnum;
use serde::Serialize;
use std::{collections::HashSet, fmt, str::FromStr};
use tracing::{instrument, trace};

const PREAMBLE: &str = "var searchData=";

/// Errors from reading a shard, offsets are byte positions in the text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// Text ended inside the table.
    UnexpectedEnd(usize),
    /// A different token was found.
    Expected {
        /// Byte offset of the token.
        offset: usize,
        /// What the reader was looking for.
        expected: &'static str,
        /// The character found instead.
        found: char,
    },
    /// Unknown backslash escape in a string literal.
    InvalidEscape(usize),
    /// The location flag is not an unsigned integer.
    InvalidNumber(usize),
    /// An entry key without the `_<index>` suffix.
    InvalidKey {
        /// Byte offset of the key literal.
        offset: usize,
        /// The key as written.
        key: String,
    },
    /// Something follows the closing `];`.
    TrailingData(usize),
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::fmt::Result {
        match self {
            ParseError::UnexpectedEnd(offset) => write!(f, "unexpected end of data at {}", offset),
            ParseError::Expected {
                offset,
                expected,
                found,
            } => write!(f, "expected {} at {}, found {:?}", expected, offset, found),
            ParseError::InvalidEscape(offset) => write!(f, "invalid escape at {}", offset),
            ParseError::InvalidNumber(offset) => write!(f, "invalid number at {}", offset),
            ParseError::InvalidKey { offset, key } => {
                write!(f, "invalid entry key {:?} at {}", key, offset)
            }
            ParseError::TrailingData(offset) => write!(f, "trailing data at {}", offset),
        }
    }
}

/// A file name that is not `<category>_<hex number>.js`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ShardNameError {
    /// Not a `.js` file.
    MissingExtension(String),
    /// No hex number after the last `_`.
    MissingNumber(String),
    /// Prefix is not an index section.
    UnknownCategory(String),
}

impl std::error::Error for ShardNameError {}

impl fmt::Display for ShardNameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::fmt::Result {
        match self {
            ShardNameError::MissingExtension(name) => write!(f, "not a .js shard: {}", name),
            ShardNameError::MissingNumber(name) => write!(f, "missing shard number: {}", name),
            ShardNameError::UnknownCategory(name) => write!(f, "unknown shard category: {}", name),
        }
    }
}

/// The index section a shard belongs to, the prefix of its file name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Every documented symbol.
    All,
    /// Classes and structs.
    Classes,
    /// Namespaces.
    Namespaces,
    /// Source and header files.
    Files,
    /// Functions.
    Functions,
    /// Variables and struct members.
    Variables,
    /// Typedefs.
    Typedefs,
    /// Enum types.
    Enums,
    /// Enum values.
    Enumvalues,
    /// Related functions.
    Related,
    /// Preprocessor macros.
    Defines,
    /// Groups.
    Groups,
    /// Related pages.
    Pages,
    /// C++ concepts.
    Concepts,
    /// Properties.
    Properties,
    /// Events.
    Events,
}

impl Category {
    /// Name used as the shard file prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Classes => "classes",
            Category::Namespaces => "namespaces",
            Category::Files => "files",
            Category::Functions => "functions",
            Category::Variables => "variables",
            Category::Typedefs => "typedefs",
            Category::Enums => "enums",
            Category::Enumvalues => "enumvalues",
            Category::Related => "related",
            Category::Defines => "defines",
            Category::Groups => "groups",
            Category::Pages => "pages",
            Category::Concepts => "concepts",
            Category::Properties => "properties",
            Category::Events => "events",
        }
    }
}

impl FromStr for Category {
    type Err = ShardNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::value_variants()
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| ShardNameError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shard identity taken from the file name. The number is the letter slot
/// written in hex, `functions_1a.js` is `(Functions, 26)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ShardId {
    /// Index section.
    pub category: Category,
    /// Letter slot within the section.
    pub number: u32,
}

impl ShardId {
    /// Parses `<category>_<hex>.js`.
    pub fn from_file_name(name: &str) -> Result<ShardId, ShardNameError> {
        let stem = name
            .strip_suffix(".js")
            .ok_or_else(|| ShardNameError::MissingExtension(name.to_string()))?;
        let (category, number) = stem
            .rsplit_once('_')
            .ok_or_else(|| ShardNameError::MissingNumber(name.to_string()))?;
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ShardNameError::MissingNumber(name.to_string()));
        }
        let number = u32::from_str_radix(number, 16)
            .map_err(|_| ShardNameError::MissingNumber(name.to_string()))?;
        Ok(ShardId {
            category: category.parse()?,
            number,
        })
    }

    /// File name doxygen gives this shard.
    pub fn file_name(&self) -> String {
        format!("{}.js", self)
    }
}

impl fmt::Display for ShardId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_{:x}", self.category, self.number)
    }
}

impl Serialize for ShardId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Entry key: escaped symbol plus the numeric suffix doxygen uses to keep
/// keys unique across the whole index.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EntryKey {
    /// Escaped, lower-cased symbol.
    pub symbol: String,
    /// Build-wide unique suffix.
    pub index: u32,
}

impl EntryKey {
    /// The lower-cased symbol name with escapes removed.
    pub fn name(&self) -> Option<String> {
        unescape_symbol(&self.symbol)
    }

    /// First character of the unescaped symbol, the letter doxygen shards by.
    pub fn first_char(&self) -> Option<char> {
        self.name().and_then(|name| name.chars().next())
    }
}

impl FromStr for EntryKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (symbol, index) = s.rsplit_once('_').ok_or(())?;
        if symbol.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(());
        }
        Ok(EntryKey {
            symbol: symbol.to_string(),
            index: index.parse().map_err(|_| ())?,
        })
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_{}", self.symbol, self.index)
    }
}

impl Serialize for EntryKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One place a symbol is documented.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Location {
    /// Page url relative to the search directory, with anchor.
    pub url: String,
    /// The integer doxygen writes between url and title, kept as is.
    pub flag: u32,
    /// Scope or file label, HTML entities left encoded.
    pub title: String,
}

/// One row of a shard: a symbol and where it is documented.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SearchEntry {
    /// Unique key within the shard.
    pub key: EntryKey,
    /// Display name as written in the docs.
    pub name: String,
    /// Declaration and definition pages, in generator order.
    pub locations: Vec<Location>,
}

/// A structural problem found while checking shards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum Issue {
    /// Key seen twice in one shard.
    DuplicateKey {
        /// The repeated key.
        key: EntryKey,
    },
    /// Entry with no locations.
    EmptyLocations {
        /// The entry key.
        key: EntryKey,
    },
    /// Key index not above the one before it.
    NonIncreasingIndex {
        /// The out of order key.
        key: EntryKey,
        /// Index of the preceding entry.
        previous: u32,
    },
    /// Key in a shard for another letter.
    MixedFirstChar {
        /// The misplaced key.
        key: EntryKey,
        /// Letter of the shard.
        expected: char,
    },
    /// Key does not encode the display name.
    NameMismatch {
        /// The entry key.
        key: EntryKey,
        /// The display name.
        name: String,
    },
    /// Key index used by two shards.
    ReusedIndex {
        /// The shared index.
        index: u32,
        /// Shard that used it first.
        first: ShardId,
        /// Shard that used it again.
        second: ShardId,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Issue::DuplicateKey { key } => write!(f, "duplicate key {}", key),
            Issue::EmptyLocations { key } => write!(f, "no locations for {}", key),
            Issue::NonIncreasingIndex { key, previous } => {
                write!(f, "index of {} does not follow {}", key, previous)
            }
            Issue::MixedFirstChar { key, expected } => {
                write!(f, "key {} does not start with {:?}", key, expected)
            }
            Issue::NameMismatch { key, name } => {
                write!(f, "key {} does not match name {:?}", key, name)
            }
            Issue::ReusedIndex {
                index,
                first,
                second,
            } => write!(f, "index {} used in both {} and {}", index, first, second),
        }
    }
}

/// A parsed shard file. Entries cannot be changed after parsing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Shard {
    /// Identity from the file name, when known.
    pub id: Option<ShardId>,
    entries: Vec<SearchEntry>,
}

impl Shard {
    /// Parses the `var searchData=[...];` text of a shard file.
    #[instrument(skip_all, fields(len = text.len()))]
    pub fn parse(text: &str) -> Result<Shard, ParseError> {
        let mut reader = Reader::new(text);
        let entries = reader.shard()?;
        trace!("parsed {} entries", entries.len());
        Ok(Shard { id: None, entries })
    }

    /// Sets the shard identity.
    pub fn with_id(mut self, id: ShardId) -> Self {
        self.id = Some(id);
        self
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The letter this shard holds, taken from its first entry.
    pub fn letter(&self) -> Option<char> {
        self.entries.first().and_then(|e| e.key.first_char())
    }

    /// Serializes the shard in the layout doxygen writes.
    pub fn to_js(&self) -> String {
        let mut out = String::with_capacity(self.entries.len() * 128);
        out.push_str(PREAMBLE);
        out.push_str("\n[\n");
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push_str(",\n");
            }
            out.push_str("  [");
            push_string(&mut out, &entry.key.to_string());
            out.push_str(",[");
            push_string(&mut out, &entry.name);
            for location in &entry.locations {
                out.push_str(",[");
                push_string(&mut out, &location.url);
                out.push(',');
                out.push_str(&location.flag.to_string());
                out.push(',');
                push_string(&mut out, &location.title);
                out.push(']');
            }
            out.push_str("]]");
        }
        out.push_str("\n];\n");
        out
    }

    /// Checks the invariants a generated shard holds: unique keys, at least
    /// one location per entry, increasing key indices, one leading letter
    /// and keys that encode the display name.
    pub fn check(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();
        let mut previous: Option<u32> = None;
        let letter = self.letter();

        for entry in &self.entries {
            let key = &entry.key;

            if !seen.insert(key) {
                issues.push(Issue::DuplicateKey { key: key.clone() });
            }

            if entry.locations.is_empty() {
                issues.push(Issue::EmptyLocations { key: key.clone() });
            }

            if let Some(previous) = previous {
                if key.index <= previous {
                    issues.push(Issue::NonIncreasingIndex {
                        key: key.clone(),
                        previous,
                    });
                }
            }
            previous = Some(key.index);

            if let Some(expected) = letter {
                if key.first_char() != Some(expected) {
                    issues.push(Issue::MixedFirstChar {
                        key: key.clone(),
                        expected,
                    });
                }
            }

            if escape_symbol(&entry.name) != key.symbol {
                issues.push(Issue::NameMismatch {
                    key: key.clone(),
                    name: entry.name.clone(),
                });
            }
        }

        issues
    }
}

fn push_string(out: &mut String, value: &str) {
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
}

/// Cursor over the shard text.
struct Reader<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        Reader { text, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn expect(&mut self, token: char, expected: &'static str) -> Result<(), ParseError> {
        self.skip_ws();
        match self.peek() {
            Some(ch) if ch == token => {
                self.pos += ch.len_utf8();
                Ok(())
            }
            Some(found) => Err(ParseError::Expected {
                offset: self.pos,
                expected,
                found,
            }),
            None => Err(ParseError::UnexpectedEnd(self.pos)),
        }
    }

    /// Consumes `token` if it is next, returns whether it did.
    fn accept(&mut self, token: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(token) {
            self.pos += token.len_utf8();
            true
        } else {
            false
        }
    }

    fn string(&mut self) -> Result<String, ParseError> {
        self.skip_ws();
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => q,
            Some(found) => {
                return Err(ParseError::Expected {
                    offset: self.pos,
                    expected: "string",
                    found,
                })
            }
            None => return Err(ParseError::UnexpectedEnd(self.pos)),
        };
        self.pos += 1;

        let text = self.text;
        let mut value = String::new();
        let mut chars = text[self.pos..].char_indices();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '\\' => {
                    let escaped = match chars.next() {
                        Some((_, 'n')) => '\n',
                        Some((_, 't')) => '\t',
                        Some((_, c @ ('\'' | '"' | '\\' | '/'))) => c,
                        Some(_) => return Err(ParseError::InvalidEscape(self.pos + i)),
                        None => return Err(ParseError::UnexpectedEnd(self.text.len())),
                    };
                    value.push(escaped);
                }
                c if c == quote => {
                    self.pos += i + 1;
                    return Ok(value);
                }
                c => value.push(c),
            }
        }

        Err(ParseError::UnexpectedEnd(self.text.len()))
    }

    fn number(&mut self) -> Result<u32, ParseError> {
        self.skip_ws();
        let start = self.pos;
        let len = self.text[start..]
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        self.pos += len;
        self.text[start..self.pos]
            .parse()
            .map_err(|_| ParseError::InvalidNumber(start))
    }

    fn location(&mut self) -> Result<Location, ParseError> {
        self.expect('[', "'[' opening a location")?;
        let url = self.string()?;
        self.expect(',', "','")?;
        let flag = self.number()?;
        self.expect(',', "','")?;
        let title = self.string()?;
        self.expect(']', "']' closing a location")?;
        Ok(Location { url, flag, title })
    }

    fn entry(&mut self) -> Result<SearchEntry, ParseError> {
        self.expect('[', "'[' opening an entry")?;
        self.skip_ws();
        let offset = self.pos;
        let raw = self.string()?;
        let key = raw
            .parse()
            .map_err(|_| ParseError::InvalidKey { offset, key: raw })?;
        self.expect(',', "','")?;
        self.expect('[', "'[' opening the entry body")?;
        let name = self.string()?;

        let mut locations = Vec::new();
        while self.accept(',') {
            locations.push(self.location()?);
        }

        self.expect(']', "']' closing the entry body")?;
        self.expect(']', "']' closing an entry")?;
        Ok(SearchEntry {
            key,
            name,
            locations,
        })
    }

    fn shard(&mut self) -> Result<Vec<SearchEntry>, ParseError> {
        self.skip_ws();
        if !self.text[self.pos..].starts_with(PREAMBLE) {
            return match self.peek() {
                Some(found) => Err(ParseError::Expected {
                    offset: self.pos,
                    expected: "var searchData=",
                    found,
                }),
                None => Err(ParseError::UnexpectedEnd(self.pos)),
            };
        }
        self.pos += PREAMBLE.len();
        self.expect('[', "'[' opening the table")?;

        let mut entries = Vec::new();
        if !self.accept(']') {
            loop {
                entries.push(self.entry()?);
                if self.accept(',') {
                    continue;
                }
                self.expect(']', "']' closing the table")?;
                break;
            }
        }

        self.accept(';');
        self.skip_ws();
        if self.pos != self.text.len() {
            return Err(ParseError::TrailingData(self.pos));
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "var searchData=\n[\n  ['cal_5fresult_3418',['cal_result',['../structacc__control__helper__t.html#a47b0',1,'acc_control_helper_t::cal_result()'],['../structref__app__parking__handle.html#a4c3a',1,'ref_app_parking_handle::cal_result()']]],\n  ['cal_5fsweeps_3420',['cal_sweeps',['../structacc__touchless__button__handle__t.html#ad64d',1,'acc_touchless_button_handle_t']]]\n];\n";

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("testdata/search/{}", name)).unwrap()
    }

    #[test]
    fn parse_small() {
        let shard = Shard::parse(SMALL).unwrap();
        assert_eq!(shard.len(), 2);

        let entry = &shard.entries()[0];
        assert_eq!(entry.key.symbol, "cal_5fresult");
        assert_eq!(entry.key.index, 3418);
        assert_eq!(entry.name, "cal_result");
        assert_eq!(entry.locations.len(), 2);
        assert_eq!(entry.locations[1].flag, 1);
        assert_eq!(
            entry.locations[1].title,
            "ref_app_parking_handle::cal_result()"
        );
        assert_eq!(shard.letter(), Some('c'));
        assert!(shard.check().is_empty());
    }

    #[test]
    fn roundtrip_fixtures() {
        for name in ["all_9.js", "functions_4.js", "variables_3.js"] {
            let text = fixture(name);
            let shard = Shard::parse(&text).unwrap();
            assert!(!shard.is_empty(), "{}", name);
            assert_eq!(shard.to_js(), text, "{}", name);
            assert_eq!(shard.check(), vec![], "{}", name);
        }
    }

    #[test]
    fn escaped_strings() {
        let text = "var searchData=\n[\n  ['o_27_5fb_1',['o\\'_b',['../a_8c.html',1,'a\\\\b.c']]]\n];\n";
        let shard = Shard::parse(text).unwrap();
        let entry = &shard.entries()[0];
        assert_eq!(entry.name, "o'_b");
        assert_eq!(entry.locations[0].title, "a\\b.c");
        assert_eq!(shard.to_js(), text);
    }

    #[test]
    fn non_ascii_names_check_clean() {
        let text = "var searchData=\n[\n  ['größe_5fmax_12',['Größe_max',['../units_8c.html#a9',1,'units.c']]]\n];\n";
        let shard = Shard::parse(text).unwrap();
        assert_eq!(shard.check(), vec![]);
        assert_eq!(shard.letter(), Some('g'));
        assert_eq!(shard.to_js(), text);
    }

    #[test]
    fn empty_table() {
        let shard = Shard::parse("var searchData=\n[\n];\n").unwrap();
        assert!(shard.is_empty());
        assert_eq!(shard.letter(), None);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            Shard::parse("var other=[];"),
            Err(ParseError::Expected { offset: 0, .. })
        ));
        assert!(matches!(
            Shard::parse("var searchData=[['nokey',['x',['a.html',1,'a']]]];"),
            Err(ParseError::InvalidKey { .. })
        ));
        assert!(matches!(
            Shard::parse("var searchData=[['a_1',['a',['a.html',1,'a"),
            Err(ParseError::UnexpectedEnd(_))
        ));
        assert!(matches!(
            Shard::parse("var searchData=[['a_1',['a',['a.html',x,'a']]]];"),
            Err(ParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            Shard::parse("var searchData=[];\nfoo"),
            Err(ParseError::TrailingData(_))
        ));
    }

    #[test]
    fn check_finds_issues() {
        let text = "var searchData=[\
            ['ab_2',['ab',['a.html',1,'a']]],\
            ['ab_2',['ab',['a.html',1,'a']]],\
            ['ac_1',['ac']],\
            ['b_5',['b',['b.html',1,'b']]],\
            ['ad_6',['ax',['a.html',1,'a']]]];";
        let shard = Shard::parse(text).unwrap();
        let issues = shard.check();

        let key = |s: &str| s.parse::<EntryKey>().unwrap();
        assert!(issues.contains(&Issue::DuplicateKey { key: key("ab_2") }));
        assert!(issues.contains(&Issue::NonIncreasingIndex {
            key: key("ab_2"),
            previous: 2
        }));
        assert!(issues.contains(&Issue::EmptyLocations { key: key("ac_1") }));
        assert!(issues.contains(&Issue::MixedFirstChar {
            key: key("b_5"),
            expected: 'a'
        }));
        assert!(issues.contains(&Issue::NameMismatch {
            key: key("ad_6"),
            name: "ax".to_string()
        }));
    }

    #[test]
    fn shard_names() {
        let id = ShardId::from_file_name("functions_4.js").unwrap();
        assert_eq!(id.category, Category::Functions);
        assert_eq!(id.number, 4);
        assert_eq!(id.file_name(), "functions_4.js");

        let id = ShardId::from_file_name("all_a.js").unwrap();
        assert_eq!(id.category, Category::All);
        assert_eq!(id.number, 10);
        assert_eq!(id.file_name(), "all_a.js");

        let id = ShardId::from_file_name("functions_1a.js").unwrap();
        assert_eq!(id.number, 26);
        assert_eq!(id.to_string(), "functions_1a");

        let id = ShardId {
            category: Category::All,
            number: 10,
        };
        assert_eq!(id.file_name(), "all_a.js");

        assert_eq!(
            ShardId::from_file_name("all_+a.js"),
            Err(ShardNameError::MissingNumber("all_+a.js".to_string()))
        );
        assert_eq!(
            ShardId::from_file_name("search.js"),
            Err(ShardNameError::MissingNumber("search.js".to_string()))
        );
        assert_eq!(
            ShardId::from_file_name("all_9.css"),
            Err(ShardNameError::MissingExtension("all_9.css".to_string()))
        );
        assert_eq!(
            ShardId::from_file_name("widgets_1.js"),
            Err(ShardNameError::UnknownCategory("widgets".to_string()))
        );
    }

    #[test]
    fn entry_keys() {
        let key: EntryKey = "i2c_5faddress_5fhigh_1240".parse().unwrap();
        assert_eq!(key.symbol, "i2c_5faddress_5fhigh");
        assert_eq!(key.index, 1240);
        assert_eq!(key.name().as_deref(), Some("i2c_address_high"));
        assert_eq!(key.first_char(), Some('i'));
        assert_eq!(key.to_string(), "i2c_5faddress_5fhigh_1240");
        assert!("_12".parse::<EntryKey>().is_err());
        assert!("abc_x".parse::<EntryKey>().is_err());
    }
}
