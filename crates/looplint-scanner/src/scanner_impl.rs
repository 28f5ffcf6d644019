//! Scanner state machine.
//!
//! Produces one token per `scan()` call and implements Go's automatic
//! semicolon insertion: a newline (or a block comment containing one, or EOF)
//! after an identifier, literal, one of `break continue fallthrough return`,
//! or one of `++ -- ) ] }` becomes a `SemicolonToken`.

use crate::syntax_kind::{SyntaxKind, keyword_kind};
use looplint_common::diagnostics::{diagnostic_codes, format_message, get_message_template};
use memchr::{memchr, memmem};
use std::sync::Arc;

/// A lexical error recorded while scanning. Scanning always continues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: String,
    pub code: u32,
}

/// Saved scanner position used for parser lookahead.
#[derive(Clone, Copy, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    insert_semicolon: bool,
    automatic_semicolon: bool,
    diagnostic_count: usize,
}

pub struct ScannerState {
    text: Arc<str>,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    insert_semicolon: bool,
    automatic_semicolon: bool,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: String) -> Self {
        ScannerState {
            text: Arc::from(text),
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            insert_semicolon: false,
            automatic_semicolon: false,
            diagnostics: Vec::new(),
        }
    }

    /// Capture the current position so a lookahead can be undone.
    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            insert_semicolon: self.insert_semicolon,
            automatic_semicolon: self.automatic_semicolon,
            diagnostic_count: self.diagnostics.len(),
        }
    }

    /// Rewind to a snapshot taken by `save_state`, dropping diagnostics
    /// reported during the lookahead.
    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.insert_semicolon = snapshot.insert_semicolon;
        self.automatic_semicolon = snapshot.automatic_semicolon;
        self.diagnostics.truncate(snapshot.diagnostic_count);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn get_token_start(&self) -> u32 {
        self.token_start as u32
    }

    #[inline]
    pub fn get_token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Raw source text of the current token. Empty for a semicolon inserted at EOF.
    pub fn get_token_text(&self) -> &str {
        self.text.get(self.token_start..self.pos).unwrap_or("")
    }

    /// True when the current `SemicolonToken` was inserted for a newline or EOF.
    #[inline]
    pub fn is_automatic_semicolon(&self) -> bool {
        self.automatic_semicolon
    }

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.automatic_semicolon = false;
        let text = Arc::clone(&self.text);
        let bytes = text.as_bytes();

        loop {
            self.token_start = self.pos;
            let Some(&byte) = bytes.get(self.pos) else {
                if self.insert_semicolon {
                    return self.finish_automatic_semicolon();
                }
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            };

            match byte {
                b'\n' => {
                    self.pos += 1;
                    if self.insert_semicolon {
                        return self.finish_automatic_semicolon();
                    }
                }
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'/' if bytes.get(self.pos + 1) == Some(&b'/') => {
                    // The newline itself is left for the next iteration.
                    self.pos = memchr(b'\n', &bytes[self.pos..])
                        .map_or(bytes.len(), |i| self.pos + i);
                }
                b'/' if bytes.get(self.pos + 1) == Some(&b'*') => {
                    let start = self.pos;
                    let body = start + 2;
                    match memmem::find(&bytes[body..], b"*/") {
                        Some(i) => self.pos = body + i + 2,
                        None => {
                            self.error(
                                start,
                                bytes.len() - start,
                                diagnostic_codes::UNTERMINATED_LITERAL,
                                &["comment"],
                            );
                            self.pos = bytes.len();
                        }
                    }
                    if self.insert_semicolon && memchr(b'\n', &bytes[start..self.pos]).is_some() {
                        self.token_start = start;
                        return self.finish_automatic_semicolon();
                    }
                }
                _ => break,
            }
        }

        let kind = self.scan_token();
        self.insert_semicolon = matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::IntLiteral
                | SyntaxKind::FloatLiteral
                | SyntaxKind::ImaginaryLiteral
                | SyntaxKind::RuneLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::BreakKeyword
                | SyntaxKind::ContinueKeyword
                | SyntaxKind::FallthroughKeyword
                | SyntaxKind::ReturnKeyword
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
        );
        self.token = kind;
        kind
    }

    fn finish_automatic_semicolon(&mut self) -> SyntaxKind {
        self.insert_semicolon = false;
        self.automatic_semicolon = true;
        self.token = SyntaxKind::SemicolonToken;
        self.token
    }

    fn scan_token(&mut self) -> SyntaxKind {
        let bytes = self.text.as_bytes();
        let byte = bytes[self.pos];
        let next = bytes.get(self.pos + 1).copied();

        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_identifier(),
            b'0'..=b'9' => self.scan_number(),
            b'.' if next.is_some_and(|b| b.is_ascii_digit()) => self.scan_number(),
            b'"' => self.scan_interpreted_string(),
            b'`' => self.scan_raw_string(),
            b'\'' => self.scan_rune(),
            0x80..=0xFF => {
                let ch = self.current_char().unwrap_or(char::REPLACEMENT_CHARACTER);
                if ch.is_alphabetic() {
                    self.scan_identifier()
                } else {
                    self.invalid_character(ch)
                }
            }
            _ => self.scan_operator(byte, next),
        }
    }

    fn scan_operator(&mut self, byte: u8, next: Option<u8>) -> SyntaxKind {
        let after = self.text.as_bytes().get(self.pos + 2).copied();
        match (byte, next) {
            (b'+', Some(b'+')) => self.op(2, SyntaxKind::PlusPlusToken),
            (b'+', Some(b'=')) => self.op(2, SyntaxKind::PlusEqualsToken),
            (b'+', _) => self.op(1, SyntaxKind::PlusToken),
            (b'-', Some(b'-')) => self.op(2, SyntaxKind::MinusMinusToken),
            (b'-', Some(b'=')) => self.op(2, SyntaxKind::MinusEqualsToken),
            (b'-', _) => self.op(1, SyntaxKind::MinusToken),
            (b'*', Some(b'=')) => self.op(2, SyntaxKind::AsteriskEqualsToken),
            (b'*', _) => self.op(1, SyntaxKind::AsteriskToken),
            (b'/', Some(b'=')) => self.op(2, SyntaxKind::SlashEqualsToken),
            (b'/', _) => self.op(1, SyntaxKind::SlashToken),
            (b'%', Some(b'=')) => self.op(2, SyntaxKind::PercentEqualsToken),
            (b'%', _) => self.op(1, SyntaxKind::PercentToken),
            (b'&', Some(b'&')) => self.op(2, SyntaxKind::AmpersandAmpersandToken),
            (b'&', Some(b'^')) if after == Some(b'=') => {
                self.op(3, SyntaxKind::AmpersandCaretEqualsToken)
            }
            (b'&', Some(b'^')) => self.op(2, SyntaxKind::AmpersandCaretToken),
            (b'&', Some(b'=')) => self.op(2, SyntaxKind::AmpersandEqualsToken),
            (b'&', _) => self.op(1, SyntaxKind::AmpersandToken),
            (b'|', Some(b'|')) => self.op(2, SyntaxKind::BarBarToken),
            (b'|', Some(b'=')) => self.op(2, SyntaxKind::BarEqualsToken),
            (b'|', _) => self.op(1, SyntaxKind::BarToken),
            (b'^', Some(b'=')) => self.op(2, SyntaxKind::CaretEqualsToken),
            (b'^', _) => self.op(1, SyntaxKind::CaretToken),
            (b'<', Some(b'<')) if after == Some(b'=') => {
                self.op(3, SyntaxKind::LessThanLessThanEqualsToken)
            }
            (b'<', Some(b'<')) => self.op(2, SyntaxKind::LessThanLessThanToken),
            (b'<', Some(b'=')) => self.op(2, SyntaxKind::LessThanEqualsToken),
            (b'<', Some(b'-')) => self.op(2, SyntaxKind::LessThanMinusToken),
            (b'<', _) => self.op(1, SyntaxKind::LessThanToken),
            (b'>', Some(b'>')) if after == Some(b'=') => {
                self.op(3, SyntaxKind::GreaterThanGreaterThanEqualsToken)
            }
            (b'>', Some(b'>')) => self.op(2, SyntaxKind::GreaterThanGreaterThanToken),
            (b'>', Some(b'=')) => self.op(2, SyntaxKind::GreaterThanEqualsToken),
            (b'>', _) => self.op(1, SyntaxKind::GreaterThanToken),
            (b'=', Some(b'=')) => self.op(2, SyntaxKind::EqualsEqualsToken),
            (b'=', _) => self.op(1, SyntaxKind::EqualsToken),
            (b'!', Some(b'=')) => self.op(2, SyntaxKind::ExclamationEqualsToken),
            (b'!', _) => self.op(1, SyntaxKind::ExclamationToken),
            (b':', Some(b'=')) => self.op(2, SyntaxKind::ColonEqualsToken),
            (b':', _) => self.op(1, SyntaxKind::ColonToken),
            (b'.', Some(b'.')) if after == Some(b'.') => self.op(3, SyntaxKind::DotDotDotToken),
            (b'.', _) => self.op(1, SyntaxKind::DotToken),
            (b'~', _) => self.op(1, SyntaxKind::TildeToken),
            (b'(', _) => self.op(1, SyntaxKind::OpenParenToken),
            (b')', _) => self.op(1, SyntaxKind::CloseParenToken),
            (b'[', _) => self.op(1, SyntaxKind::OpenBracketToken),
            (b']', _) => self.op(1, SyntaxKind::CloseBracketToken),
            (b'{', _) => self.op(1, SyntaxKind::OpenBraceToken),
            (b'}', _) => self.op(1, SyntaxKind::CloseBraceToken),
            (b',', _) => self.op(1, SyntaxKind::CommaToken),
            (b';', _) => self.op(1, SyntaxKind::SemicolonToken),
            _ => self.invalid_character(char::from(byte)),
        }
    }

    #[inline]
    fn op(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos..)?.chars().next()
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if ch == '_' || ch.is_alphanumeric() {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        keyword_kind(&self.text[start..self.pos]).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let text = Arc::clone(&self.text);
        let bytes = text.as_bytes();
        let mut kind = SyntaxKind::IntLiteral;
        let prefixed = bytes[self.pos] == b'0'
            && matches!(
                bytes.get(self.pos + 1),
                Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O')
            );

        if prefixed {
            let is_hex = matches!(bytes[self.pos + 1], b'x' | b'X');
            self.pos += 2;
            self.skip_while(|b| b.is_ascii_hexdigit() || b == b'_');
            if is_hex && bytes.get(self.pos) == Some(&b'.') {
                kind = SyntaxKind::FloatLiteral;
                self.pos += 1;
                self.skip_while(|b| b.is_ascii_hexdigit() || b == b'_');
            }
            if is_hex && matches!(bytes.get(self.pos), Some(b'p' | b'P')) {
                kind = SyntaxKind::FloatLiteral;
                self.scan_exponent();
            }
        } else {
            self.skip_while(|b| b.is_ascii_digit() || b == b'_');
            if bytes.get(self.pos) == Some(&b'.') {
                kind = SyntaxKind::FloatLiteral;
                self.pos += 1;
                self.skip_while(|b| b.is_ascii_digit() || b == b'_');
            }
            if matches!(bytes.get(self.pos), Some(b'e' | b'E')) {
                kind = SyntaxKind::FloatLiteral;
                self.scan_exponent();
            }
        }

        if bytes.get(self.pos) == Some(&b'i') {
            self.pos += 1;
            kind = SyntaxKind::ImaginaryLiteral;
        }
        kind
    }

    fn scan_exponent(&mut self) {
        self.pos += 1;
        if matches!(self.text.as_bytes().get(self.pos), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        self.skip_while(|b| b.is_ascii_digit() || b == b'_');
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        let bytes = self.text.as_bytes();
        while let Some(&b) = bytes.get(self.pos) {
            if !pred(b) {
                break;
            }
            self.pos += 1;
        }
    }

    fn scan_interpreted_string(&mut self) -> SyntaxKind {
        self.scan_quoted(b'"', "string literal");
        SyntaxKind::StringLiteral
    }

    fn scan_rune(&mut self) -> SyntaxKind {
        self.scan_quoted(b'\'', "rune literal");
        SyntaxKind::RuneLiteral
    }

    fn scan_quoted(&mut self, quote: u8, what: &str) {
        let text = Arc::clone(&self.text);
        let bytes = text.as_bytes();
        let start = self.pos;
        self.pos += 1;
        loop {
            match bytes.get(self.pos) {
                None | Some(b'\n') => {
                    let length = self.pos - start;
                    self.error(start, length, diagnostic_codes::UNTERMINATED_LITERAL, &[what]);
                    return;
                }
                Some(b'\\') => self.pos = (self.pos + 2).min(bytes.len()),
                Some(&b) if b == quote => {
                    self.pos += 1;
                    return;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn scan_raw_string(&mut self) -> SyntaxKind {
        let text = Arc::clone(&self.text);
        let bytes = text.as_bytes();
        let start = self.pos;
        match memchr(b'`', &bytes[start + 1..]) {
            Some(i) => self.pos = start + 1 + i + 1,
            None => {
                self.pos = bytes.len();
                let length = self.pos - start;
                self.error(
                    start,
                    length,
                    diagnostic_codes::UNTERMINATED_LITERAL,
                    &["raw string literal"],
                );
            }
        }
        SyntaxKind::StringLiteral
    }

    fn invalid_character(&mut self, ch: char) -> SyntaxKind {
        let start = self.pos;
        self.pos += ch.len_utf8();
        let shown = format!("{ch:?}");
        self.error(start, ch.len_utf8(), diagnostic_codes::INVALID_CHARACTER, &[&shown]);
        SyntaxKind::Unknown
    }

    fn error(&mut self, pos: usize, length: usize, code: u32, args: &[&str]) {
        let message = get_message_template(code)
            .map(|template| format_message(template, args))
            .unwrap_or_default();
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message,
            code,
        });
    }
}

/// Decode the value of a Go string literal (interpreted `"..."` or raw `` `...` ``).
///
/// Returns `None` if `raw` is not a well-formed string literal.
pub fn unquote_string(raw: &str) -> Option<String> {
    if raw.len() >= 2 && raw.starts_with('`') && raw.ends_with('`') {
        return Some(raw[1..raw.len() - 1].replace('\r', ""));
    }
    if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
        return None;
    }

    let body = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let escaped = match chars.next()? {
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0B}',
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            'x' => char::from(hex_value(&mut chars, 2)? as u8),
            'u' => char::from_u32(hex_value(&mut chars, 4)?)?,
            'U' => char::from_u32(hex_value(&mut chars, 8)?)?,
            d @ '0'..='7' => {
                let mut value = d.to_digit(8)?;
                for _ in 0..2 {
                    value = value * 8 + chars.next()?.to_digit(8)?;
                }
                char::from(u8::try_from(value).ok()?)
            }
            _ => return None,
        };
        out.push(escaped);
    }
    Some(out)
}

fn hex_value(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}
