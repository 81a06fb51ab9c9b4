//! Hand-written recursive-descent parser: tokens to a plain structured
//! [`ParsedFlute`]. Replaces the legacy Bison grammar; no global state.

use std::collections::HashMap;

use crate::ast::{ParsedEmbouchure, ParsedFlute, ParsedHole, ParsedHoleKind, ParsedNote, ParsedTermination};
use crate::error::LoaderError;
use crate::lexer::{tokenize, Spanned, Token};

const DEFAULT_EDGE_RC: f64 = 0.0005;

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    fn line(&self) -> usize {
        self.tokens[self.pos].line
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].token.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn syntax_error(&self, msg: impl Into<String>) -> LoaderError {
        LoaderError::Syntax {
            line: self.line(),
            msg: msg.into(),
        }
    }

    fn at_ident(&self, kw: &str) -> bool {
        matches!(self.peek(), Token::Ident(s) if s == kw)
    }

    fn expect_ident(&mut self, kw: &str) -> Result<(), LoaderError> {
        if self.at_ident(kw) {
            self.advance();
            Ok(())
        } else {
            Err(self.syntax_error(format!("expected \"{kw}\", found {:?}", self.peek())))
        }
    }

    fn expect(&mut self, token: Token) -> Result<(), LoaderError> {
        if *self.peek() == token {
            self.advance();
            Ok(())
        } else {
            Err(self.syntax_error(format!("expected {token:?}, found {:?}", self.peek())))
        }
    }

    fn ident(&mut self) -> Result<String, LoaderError> {
        match self.advance() {
            Token::Ident(s) => Ok(s),
            other => Err(self.syntax_error(format!("expected an identifier, found {other:?}"))),
        }
    }

    fn number(&mut self) -> Result<f64, LoaderError> {
        match self.advance() {
            Token::Number(n) => Ok(n),
            other => Err(self.syntax_error(format!("expected a number, found {other:?}"))),
        }
    }

    fn string(&mut self) -> Result<String, LoaderError> {
        match self.advance() {
            Token::Str(s) => Ok(s),
            other => Err(self.syntax_error(format!("expected a string literal, found {other:?}"))),
        }
    }

    fn parse_flute(&mut self) -> Result<ParsedFlute, LoaderError> {
        self.expect_ident("flute")?;
        self.expect(Token::LBrace)?;

        let mut flute = ParsedFlute::default();

        if self.at_ident("notes") {
            flute.notes = self.parse_notes()?;
        }

        let length_factor = self.parse_parameters(&mut flute)?;

        let mut length_refs = HashMap::new();
        if self.at_ident("length-ref") {
            self.parse_length_ref(&mut length_refs, length_factor)?;
        }

        self.parse_bore(&mut flute, &length_refs, length_factor)?;

        if self.at_ident("embouchure") {
            flute.embouchure = Some(self.parse_embouchure(length_factor)?);
        }

        if self.at_ident("termination") {
            self.parse_termination(&mut flute, length_factor)?;
        }

        if self.at_ident("holes") {
            flute.holes = self.parse_holes(length_factor)?;
        }

        self.expect(Token::RBrace)?;
        Ok(flute)
    }

    fn parse_notes(&mut self) -> Result<Vec<ParsedNote>, LoaderError> {
        self.expect_ident("notes")?;
        self.expect(Token::LBrace)?;
        let mut notes = Vec::new();
        while *self.peek() != Token::RBrace {
            let name = self.ident()?;
            let octave = if let Token::Number(n) = self.peek() {
                let n = *n as i32;
                self.advance();
                n
            } else {
                0
            };
            self.expect(Token::Equals)?;
            let hole_config = self.string()?;
            notes.push(ParsedNote { name, octave, hole_config });
        }
        self.expect(Token::RBrace)?;
        Ok(notes)
    }

    fn parse_parameters(&mut self, flute: &mut ParsedFlute) -> Result<f64, LoaderError> {
        self.expect_ident("parameters")?;
        self.expect(Token::LBrace)?;
        self.expect_ident("temp")?;
        self.expect(Token::Equals)?;
        flute.temp_c = self.number()?;
        self.expect_ident("length-units")?;
        self.expect(Token::Equals)?;
        let unit = self.ident()?;
        let factor = match unit.as_str() {
            "mm" => 0.001,
            "cm" => 0.01,
            "m" => 1.0,
            "in" => 0.0254,
            other => return Err(self.syntax_error(format!("unknown length unit \"{other}\""))),
        };
        self.expect(Token::RBrace)?;
        Ok(factor)
    }

    fn parse_length_ref(&mut self, refs: &mut HashMap<String, f64>, factor: f64) -> Result<(), LoaderError> {
        self.expect_ident("length-ref")?;
        self.expect(Token::LBrace)?;
        while *self.peek() != Token::RBrace {
            let label = self.ident()?;
            self.expect(Token::At)?;
            let pos = self.number()? * factor;
            refs.insert(label, pos);
        }
        self.expect(Token::RBrace)?;
        Ok(())
    }

    fn parse_bore(
        &mut self,
        flute: &mut ParsedFlute,
        length_refs: &HashMap<String, f64>,
        factor: f64,
    ) -> Result<(), LoaderError> {
        self.expect_ident("bore")?;
        self.expect(Token::LBrace)?;
        while self.at_ident("from") {
            self.advance();
            let current_ref = match self.peek().clone() {
                Token::Ident(label) => {
                    self.advance();
                    *length_refs
                        .get(&label)
                        .ok_or_else(|| LoaderError::UnknownLengthRef(label.clone()))?
                }
                _ => 0.0,
            };
            while *self.peek() == Token::LBracket {
                self.advance();
                let pos = self.number()? * factor + current_ref;
                self.expect(Token::Comma)?;
                let diam = self.number()? * factor;
                self.expect(Token::RBracket)?;
                flute.bore_points.push((pos, diam));
            }
        }
        self.expect(Token::RBrace)?;
        Ok(())
    }

    fn parse_embouchure(&mut self, factor: f64) -> Result<ParsedEmbouchure, LoaderError> {
        self.expect_ident("embouchure")?;
        self.expect(Token::At)?;
        let pos = self.number()? * factor;
        self.expect_ident("char-dim")?;
        self.expect(Token::Equals)?;
        let char_dim = self.number()? * factor;
        self.expect_ident("cav-length")?;
        self.expect(Token::Equals)?;
        let cav_length = self.number()? * factor;
        let diam = if self.at_ident("diam") {
            self.advance();
            self.expect(Token::Equals)?;
            Some(self.number()? * factor)
        } else {
            None
        };
        Ok(ParsedEmbouchure { pos, char_dim, cav_length, diam })
    }

    fn parse_termination(&mut self, flute: &mut ParsedFlute, factor: f64) -> Result<(), LoaderError> {
        self.expect_ident("termination")?;
        self.expect(Token::At)?;
        let _pos = self.number()? * factor;
        self.expect_ident("flange-diam")?;
        self.expect(Token::Equals)?;
        let flange_diam = self.number()? * factor;
        flute.termination = Some(ParsedTermination { flange_diam });
        Ok(())
    }

    fn parse_holes(&mut self, factor: f64) -> Result<Vec<ParsedHole>, LoaderError> {
        self.expect_ident("holes")?;
        self.expect(Token::LBrace)?;
        let mut holes = Vec::new();
        while *self.peek() != Token::RBrace {
            if self.at_ident("hole") {
                self.advance();
                self.expect(Token::At)?;
                let pos = self.number()? * factor;
                self.expect_ident("diam")?;
                self.expect(Token::Equals)?;
                let diam = self.number()? * factor;
                self.expect_ident("depth")?;
                self.expect(Token::Equals)?;
                let depth = self.number()? * factor;
                let edge_rc = self.parse_opt_edge_rc(factor)?;
                holes.push(ParsedHole { pos, diam, depth, edge_rc, kind: ParsedHoleKind::Plain });
            } else if self.at_ident("silver-flute-hole") {
                self.advance();
                self.expect(Token::At)?;
                let pos = self.number()? * factor;
                self.expect_ident("diam")?;
                self.expect(Token::Equals)?;
                let diam = self.number()? * factor;
                self.expect_ident("depth")?;
                self.expect(Token::Equals)?;
                let depth = self.number()? * factor;
                self.expect_ident("pad")?;
                self.expect(Token::LBrace)?;
                self.expect_ident("height")?;
                self.expect(Token::Equals)?;
                let pad_height = self.number()? * factor;
                self.expect_ident("diam")?;
                self.expect(Token::Equals)?;
                let pad_diam = self.number()? * factor;
                self.expect(Token::RBrace)?;
                let edge_rc = self.parse_opt_edge_rc(factor)?;
                holes.push(ParsedHole {
                    pos,
                    diam,
                    depth,
                    edge_rc,
                    kind: ParsedHoleKind::Silver { pad_height, pad_diam },
                });
            } else {
                return Err(self.syntax_error(format!("expected \"hole\" or \"silver-flute-hole\", found {:?}", self.peek())));
            }
        }
        self.expect(Token::RBrace)?;
        Ok(holes)
    }

    fn parse_opt_edge_rc(&mut self, factor: f64) -> Result<f64, LoaderError> {
        if self.at_ident("edge-rc") {
            self.advance();
            self.expect(Token::Equals)?;
            Ok(self.number()? * factor)
        } else {
            Ok(DEFAULT_EDGE_RC)
        }
    }
}

/// Parse a complete flute description from source text.
pub fn parse(input: &str) -> Result<ParsedFlute, LoaderError> {
    let tokens = tokenize(input)?;
    Parser::new(&tokens).parse_flute()
}
