use alloc::string::{String, ToString};

use crate::{ParseErrorKind, ParseError, io::Source};

/// A lexical unit of a JSON document.
#[derive(Clone, PartialEq, Debug)]
pub enum Token {
  /// `[`
  BeginArray,
  /// `]`
  EndArray,
  /// `{`
  BeginObject,
  /// `}`
  EndObject,
  /// `:`
  NameSeparator,
  /// `,`
  ValueSeparator,
  /// `true`
  True,
  /// `false`
  False,
  /// `null`
  Null,
  /// A string, with its escapes resolved.
  String(String),
  /// A number without a fractional part or an exponent, which fits within an `i64`.
  Integer(i64),
  /// Any other number.
  Float(f64),
  /// The source has ended.
  EndOfInput,
}

impl Token {
  /// A description of this token, as used within error messages.
  #[must_use]
  pub const fn describe(&self) -> &'static str {
    match self {
      Token::BeginArray => "`[`",
      Token::EndArray => "`]`",
      Token::BeginObject => "`{`",
      Token::EndObject => "`}`",
      Token::NameSeparator => "`:`",
      Token::ValueSeparator => "`,`",
      Token::True => "`true`",
      Token::False => "`false`",
      Token::Null => "`null`",
      Token::String(_) => "a string",
      Token::Integer(_) | Token::Float(_) => "a number",
      Token::EndOfInput => "the end of input",
    }
  }
}

/// A lexer, yielding the tokens within a character source.
///
/// The lexer holds a single character of lookahead. It does not recover from errors, so once
/// `scan` has returned an error, the lexer should be discarded.
#[derive(Debug)]
pub struct Lexer<S: Source> {
  source: S,
  /// The next character, if it's already been read from the source.
  peeked: Option<Option<char>>,
  /// The amount of characters consumed.
  offset: usize,
}

impl<S: Source> Lexer<S> {
  /// Create a new lexer over a source.
  pub fn new(source: S) -> Self {
    Self { source, peeked: None, offset: 0 }
  }

  /// The amount of characters consumed so far.
  #[must_use]
  pub fn offset(&self) -> usize {
    self.offset
  }

  /// Create an error at the current position.
  #[inline(always)]
  pub(crate) fn error(&self, kind: ParseErrorKind) -> ParseError {
    ParseError { kind, offset: self.offset }
  }

  /// Peek at the next character without consuming it.
  #[inline(always)]
  pub(crate) fn peek(&mut self) -> Result<Option<char>, ParseError> {
    if let Some(peeked) = self.peeked {
      return Ok(peeked);
    }
    let next = self
      .source
      .next_char()
      .map_err(|e| self.error(ParseErrorKind::Source(e.to_string())))?;
    self.peeked = Some(next);
    Ok(next)
  }

  /// Consume the next character.
  #[inline(always)]
  pub(crate) fn bump(&mut self) -> Result<Option<char>, ParseError> {
    let next = self.peek()?;
    self.peeked = None;
    if next.is_some() {
      self.offset += 1;
    }
    Ok(next)
  }

  /// Consume the next character, erroring if the source has ended.
  #[inline(always)]
  pub(crate) fn bump_or_end(&mut self) -> Result<char, ParseError> {
    self.bump()?.ok_or_else(|| self.error(ParseErrorKind::UnexpectedEnd))
  }

  /// Skip the whitespace RFC 8259 allows between tokens.
  fn skip_whitespace(&mut self) -> Result<(), ParseError> {
    // https://datatracker.ietf.org/doc/html/rfc8259#section-2 defines whitespace
    while let Some(' ' | '\t' | '\n' | '\r') = self.peek()? {
      self.bump()?;
    }
    Ok(())
  }

  /// Consume the remainder of a literal, after its first character.
  fn literal(&mut self, remainder: &str) -> Result<(), ParseError> {
    for expected in remainder.chars() {
      if self.bump_or_end()? != expected {
        Err(self.error(ParseErrorKind::InvalidLiteral))?;
      }
    }
    Ok(())
  }

  /// Scan the next token.
  ///
  /// Once the source has ended, this will continue to yield `Token::EndOfInput`.
  pub fn scan(&mut self) -> Result<Token, ParseError> {
    self.skip_whitespace()?;
    let Some(c) = self.bump()? else { return Ok(Token::EndOfInput) };
    Ok(match c {
      '[' => Token::BeginArray,
      ']' => Token::EndArray,
      '{' => Token::BeginObject,
      '}' => Token::EndObject,
      ':' => Token::NameSeparator,
      ',' => Token::ValueSeparator,
      't' => {
        self.literal("rue")?;
        Token::True
      }
      'f' => {
        self.literal("alse")?;
        Token::False
      }
      'n' => {
        self.literal("ull")?;
        Token::Null
      }
      '"' => Token::String(self.scan_string()?),
      '-' | '0' ..= '9' => self.scan_number(c)?,
      c => Err(self.error(ParseErrorKind::UnexpectedCharacter(c)))?,
    })
  }
}

#[cfg(test)]
fn tokens(str: &str) -> Result<Vec<Token>, ParseError> {
  let mut lexer = Lexer::new(str.chars());
  let mut res = vec![];
  loop {
    let token = lexer.scan()?;
    if token == Token::EndOfInput {
      break Ok(res);
    }
    res.push(token);
  }
}

#[test]
fn test_punctuation_and_literals() {
  assert_eq!(
    tokens(" [ {\t}\r\n] : , true false null ").unwrap(),
    vec![
      Token::BeginArray,
      Token::BeginObject,
      Token::EndObject,
      Token::EndArray,
      Token::NameSeparator,
      Token::ValueSeparator,
      Token::True,
      Token::False,
      Token::Null,
    ]
  );
  assert_eq!(tokens("").unwrap(), vec![]);
}

#[test]
fn test_invalid_literals() {
  assert_eq!(tokens("tru").unwrap_err().kind, ParseErrorKind::UnexpectedEnd);
  assert_eq!(tokens("trUe").unwrap_err().kind, ParseErrorKind::InvalidLiteral);
  assert_eq!(tokens("nil").unwrap_err().kind, ParseErrorKind::InvalidLiteral);
  assert_eq!(tokens("True").unwrap_err().kind, ParseErrorKind::UnexpectedCharacter('T'));
  // Form feed isn't JSON whitespace
  assert_eq!(tokens("\u{c}null").unwrap_err().kind, ParseErrorKind::UnexpectedCharacter('\u{c}'));
}

#[test]
fn test_offset() {
  let mut lexer = Lexer::new("  [ @".chars());
  assert_eq!(lexer.scan().unwrap(), Token::BeginArray);
  assert_eq!(lexer.offset(), 3);
  let e = lexer.scan().unwrap_err();
  assert_eq!(e.kind, ParseErrorKind::UnexpectedCharacter('@'));
  assert_eq!(e.offset, 5);
}

#[test]
fn test_end_of_input_repeats() {
  let mut lexer = Lexer::new("1".chars());
  assert_eq!(lexer.scan().unwrap(), Token::Integer(1));
  assert_eq!(lexer.scan().unwrap(), Token::EndOfInput);
  assert_eq!(lexer.scan().unwrap(), Token::EndOfInput);
}
