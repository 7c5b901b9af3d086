// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use serde::Serialize;
use std::fmt;

/// Escapes a symbol name the way doxygen writes search keys: lower-cased,
/// with every ASCII character outside `[a-z0-9]` written as `_` and two hex
/// digits. Non-ASCII characters are kept.
///
/// `I2C_ADDRESS_HIGH` becomes `i2c_5faddress_5fhigh`.
pub fn escape_symbol(name: &str) -> String {
    let mut out = String::with_capacity(name.len() * 2);
    for ch in name.to_lowercase().chars() {
        match ch {
            'a'..='z' | '0'..='9' => out.push(ch),
            _ if !ch.is_ascii() => out.push(ch),
            _ => out.push_str(&format!("_{:02x}", ch as u32)),
        }
    }
    out
}

/// Reverses [`escape_symbol`]. Returns `None` when an escape sequence is
/// truncated, is not hex, or the bytes are not valid UTF-8.
pub fn unescape_symbol(key: &str) -> Option<String> {
    let bytes = key.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'_' {
            let hex = key.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Replaces the HTML entities doxygen emits in titles with their text.
/// Unknown entities are left untouched.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let decoded = rest.find(';').and_then(|end| {
            let entity = &rest[1..end];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|ch| (ch, end))
        });

        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Splits a location title of the form `signature:&#160;file` into the
/// scoped signature and the defining file. Titles without the separator are
/// returned as the file with no signature.
pub fn split_title(title: &str) -> (Option<String>, String) {
    let decoded = decode_entities(title);
    match decoded.split_once(":\u{a0}") {
        Some((sig, file)) => (Some(sig.to_string()), file.to_string()),
        None => (None, decoded),
    }
}

/// The kind of documentation page a location points to, derived from the
/// prefix doxygen puts on compound page names.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// Source or header file.
    File,
    /// Struct.
    Struct,
    /// Class.
    Class,
    /// Union.
    Union,
    /// Namespace.
    Namespace,
    /// Group (module).
    Group,
    /// Directory, named by hash.
    Dir,
    /// Any other page.
    Page,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PageKind::File => write!(f, "file"),
            PageKind::Struct => write!(f, "struct"),
            PageKind::Class => write!(f, "class"),
            PageKind::Union => write!(f, "union"),
            PageKind::Namespace => write!(f, "namespace"),
            PageKind::Group => write!(f, "group"),
            PageKind::Dir => write!(f, "dir"),
            PageKind::Page => write!(f, "page"),
        }
    }
}

/// A decoded documentation page reference.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PageRef {
    /// What the page documents.
    pub kind: PageKind,
    /// Compound or file name with doxygen's file-name escaping removed.
    pub name: String,
    /// Member anchor within the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

/// Decodes a location url such as
/// `../structacc__touchless__button__handle__t.html#a637…` into a
/// [`PageRef`]. Returns `None` for urls that are not doxygen html pages.
pub fn decode_page_name(url: &str) -> Option<PageRef> {
    let (page, anchor) = match url.split_once('#') {
        Some((page, anchor)) => (page, Some(anchor.to_string())),
        None => (url, None),
    };
    let base = page.rsplit('/').next()?.strip_suffix(".html")?;

    // compound names never contain a '.', file pages always do
    let decoded = unescape_file_name(base);
    if let Some(name) = decoded.as_ref().filter(|name| name.contains('.')) {
        return Some(PageRef {
            kind: PageKind::File,
            name: name.clone(),
            anchor,
        });
    }

    const PREFIXES: [(&str, PageKind); 6] = [
        ("struct", PageKind::Struct),
        ("class", PageKind::Class),
        ("union", PageKind::Union),
        ("namespace", PageKind::Namespace),
        ("group__", PageKind::Group),
        ("dir_", PageKind::Dir),
    ];

    for (prefix, kind) in PREFIXES {
        if let Some(rest) = base.strip_prefix(prefix) {
            let name = match kind {
                // dir pages are named by hash
                PageKind::Dir => rest.to_string(),
                _ => unescape_file_name(rest)?,
            };
            return Some(PageRef { kind, name, anchor });
        }
    }

    Some(PageRef {
        kind: PageKind::Page,
        name: decoded?,
        anchor,
    })
}

/// Reverses doxygen's output file name escaping (`__` for `_`, `_8` for
/// `.`, `_1` for `:` and so on).
pub fn unescape_file_name(name: &str) -> Option<String> {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars();

    while let Some(ch) = chars.next() {
        if ch != '_' {
            out.push(ch);
            continue;
        }

        let decoded = match chars.next()? {
            '_' => '_',
            '1' => ':',
            '2' => '/',
            '3' => '<',
            '4' => '>',
            '5' => '*',
            '6' => '&',
            '7' => '|',
            '8' => '.',
            '9' => '!',
            '0' => match chars.next()? {
                '0' => ',',
                '1' => ' ',
                '2' => '{',
                '3' => '}',
                '4' => '?',
                '5' => '^',
                '6' => '%',
                '7' => '(',
                '8' => ')',
                '9' => '+',
                'a' => '=',
                'b' => '$',
                'c' => '\\',
                'd' => '@',
                'e' => ']',
                'f' => '[',
                'g' => '#',
                _ => return None,
            },
            // upper case letters are written as _ plus the lower case letter
            c if c.is_ascii_lowercase() => c.to_ascii_uppercase(),
            _ => return None,
        };
        out.push(decoded);
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape() {
        assert_eq!(escape_symbol("I2C_ADDRESS_HIGH"), "i2c_5faddress_5fhigh");
        assert_eq!(escape_symbol("DebugMon_Handler"), "debugmon_5fhandler");
        assert_eq!(escape_symbol("a::b"), "a_3a_3ab");
        assert_eq!(escape_symbol("Größe_max"), "größe_5fmax");
    }

    #[test]
    fn unescape() {
        assert_eq!(
            unescape_symbol("i2c_5faddress_5fhigh").as_deref(),
            Some("i2c_address_high")
        );
        assert_eq!(unescape_symbol("größe_5fmax").as_deref(), Some("größe_max"));
        assert_eq!(unescape_symbol("cal_5").as_deref(), None);
        assert_eq!(unescape_symbol("cal_zz").as_deref(), None);
    }

    #[test]
    fn entities() {
        assert_eq!(
            decode_entities("cal_temps():&#160;example.c"),
            "cal_temps():\u{a0}example.c"
        );
        assert_eq!(decode_entities("a &lt; b &amp;&amp; c"), "a < b && c");
        assert_eq!(decode_entities("x &bogus; y & z"), "x &bogus; y & z");
        assert_eq!(decode_entities("&#x41;"), "A");
    }

    #[test]
    fn title() {
        let (sig, file) = split_title("I2C2_EV_IRQHandler(void):&#160;stm32l4xx_it.c");
        assert_eq!(sig.as_deref(), Some("I2C2_EV_IRQHandler(void)"));
        assert_eq!(file, "stm32l4xx_it.c");

        let (sig, file) = split_title("main.h");
        assert_eq!(sig, None);
        assert_eq!(file, "main.h");
    }

    #[test]
    fn page_names() {
        let page =
            decode_page_name("../stm32l4xx__it_8h.html#abdb05db0781544b33e806a12940d062c").unwrap();
        assert_eq!(page.kind, PageKind::File);
        assert_eq!(page.name, "stm32l4xx_it.h");
        assert_eq!(
            page.anchor.as_deref(),
            Some("abdb05db0781544b33e806a12940d062c")
        );

        let page = decode_page_name("../structacc__touchless__button__handle__t.html#a637").unwrap();
        assert_eq!(page.kind, PageKind::Struct);
        assert_eq!(page.name, "acc_touchless_button_handle_t");

        let page = decode_page_name("../struct__utils_8c.html").unwrap();
        assert_eq!(page.kind, PageKind::File);
        assert_eq!(page.name, "struct_utils.c");

        let page = decode_page_name("../group__presence.html").unwrap();
        assert_eq!(page.kind, PageKind::Group);
        assert_eq!(page.name, "presence");

        let page = decode_page_name("../index.html").unwrap();
        assert_eq!(page.kind, PageKind::Page);
        assert_eq!(page.anchor, None);

        assert!(decode_page_name("../notes.txt").is_none());
    }

    #[test]
    fn file_names() {
        assert_eq!(
            unescape_file_name("i2c__application__system__stm32_8c").as_deref(),
            Some("i2c_application_system_stm32.c")
        );
        assert_eq!(unescape_file_name("a_1_1b").as_deref(), Some("a::b"));
        assert_eq!(unescape_file_name("_main").as_deref(), Some("Main"));
        assert_eq!(unescape_file_name("bad_"), None);
    }
}
