//! Type references: a raw type plus its ordered type arguments.
//!
//! `TypeRef` is what callers hand the registry when they need a codec for a
//! specific instantiation, e.g. `Pair<String, Integer>`. It is also the form in
//! which descriptors declare their field types, where a zero-argument reference
//! may name one of the descriptor's own parameter slots (`T`).
//!
//! # Textual Form
//!
//! ```text
//! type  := ident ( '<' type ( ',' type )* '>' )?
//! ident := [A-Za-z0-9_.$:]+
//! ```
//!
//! Whitespace between tokens is ignored. Argument lists may nest at most
//! [`MAX_TYPE_NESTING`] levels deep.

use std::fmt;

use crate::{InternError, Name, StringInterner, StringLookup};

/// Deepest argument-list nesting [`TypeRef::parse`] accepts.
pub const MAX_TYPE_NESTING: usize = 256;

/// A (possibly generic) type instantiation.
///
/// Two references are equal iff their raw types are equal and their argument
/// lists are equal elementwise, in order. References are never mutated after
/// construction; `substitute` builds a new tree.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeRef {
    raw: Name,
    args: Vec<TypeRef>,
}

impl TypeRef {
    /// A reference with no type arguments.
    #[inline]
    pub fn new(raw: Name) -> Self {
        TypeRef {
            raw,
            args: Vec::new(),
        }
    }

    /// A reference with type arguments.
    #[inline]
    pub fn with_args(raw: Name, args: Vec<TypeRef>) -> Self {
        TypeRef { raw, args }
    }

    /// The unparameterized type name.
    #[inline]
    pub fn raw(&self) -> Name {
        self.raw
    }

    /// The ordered type arguments.
    #[inline]
    pub fn args(&self) -> &[TypeRef] {
        &self.args
    }

    /// Number of type arguments supplied.
    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// True when no type arguments are supplied.
    #[inline]
    pub fn is_bare(&self) -> bool {
        self.args.is_empty()
    }

    /// Replace parameter-slot references with concrete arguments.
    ///
    /// A zero-argument reference whose raw name equals `params[i]` becomes
    /// `args[i]`. Slot names shadow real type names. `params` and `args` are
    /// paired positionally; extra entries on either side are ignored.
    #[must_use]
    pub fn substitute(&self, params: &[Name], args: &[TypeRef]) -> TypeRef {
        if self.args.is_empty() {
            if let Some(pos) = params.iter().position(|&p| p == self.raw) {
                if let Some(arg) = args.get(pos) {
                    return arg.clone();
                }
            }
            return self.clone();
        }

        TypeRef {
            raw: self.raw,
            args: self
                .args
                .iter()
                .map(|a| a.substitute(params, args))
                .collect(),
        }
    }

    /// Check whether any node in this reference names one of `params`.
    pub fn mentions_any(&self, params: &[Name]) -> bool {
        params.contains(&self.raw) || self.args.iter().any(|a| a.mentions_any(params))
    }

    /// Render this reference with names resolved through `names`.
    pub fn display<'a>(&'a self, names: &'a dyn StringLookup) -> TypeRefDisplay<'a> {
        TypeRefDisplay { ty: self, names }
    }

    /// Parse the textual form, interning every identifier.
    pub fn parse(text: &str, interner: &StringInterner) -> Result<TypeRef, TypeRefParseError> {
        let mut parser = Parser {
            src: text.as_bytes(),
            pos: 0,
            depth: 0,
            interner,
        };
        parser.skip_ws();
        if parser.at_end() {
            return Err(TypeRefParseError::Empty);
        }
        let ty = parser.parse_type()?;
        parser.skip_ws();
        if !parser.at_end() {
            return Err(TypeRefParseError::TrailingInput { offset: parser.pos });
        }
        Ok(ty)
    }
}

/// Display adapter returned by [`TypeRef::display`].
pub struct TypeRefDisplay<'a> {
    ty: &'a TypeRef,
    names: &'a dyn StringLookup,
}

impl fmt::Display for TypeRefDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.names.lookup(self.ty.raw))?;
        if self.ty.args.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (i, arg) in self.ty.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg.display(self.names))?;
        }
        f.write_str(">")
    }
}

/// Error produced by [`TypeRef::parse`].
///
/// Offsets are byte positions into the input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeRefParseError {
    /// Nothing but whitespace.
    #[error("empty type reference")]
    Empty,
    /// A character that cannot start or continue a type reference here.
    #[error("unexpected character `{found}` at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },
    /// Input ended inside an argument list.
    #[error("unexpected end of input at offset {offset}, expected `>` or another argument")]
    UnexpectedEnd { offset: usize },
    /// `Raw<>` with nothing between the brackets.
    #[error("empty type argument list at offset {offset}")]
    EmptyArguments { offset: usize },
    /// Input continues after a complete type reference.
    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },
    /// Argument lists nested deeper than [`MAX_TYPE_NESTING`].
    #[error("type arguments nested deeper than {limit} levels at offset {offset}")]
    TooDeep { offset: usize, limit: usize },
    /// The interner could not take another identifier.
    #[error(transparent)]
    Intern(#[from] InternError),
}

impl TypeRefParseError {
    /// Byte offset of the error, if it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            TypeRefParseError::Empty | TypeRefParseError::Intern(_) => None,
            TypeRefParseError::UnexpectedChar { offset, .. }
            | TypeRefParseError::UnexpectedEnd { offset }
            | TypeRefParseError::EmptyArguments { offset }
            | TypeRefParseError::TrailingInput { offset }
            | TypeRefParseError::TooDeep { offset, .. } => Some(*offset),
        }
    }
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
    /// Argument lists currently open.
    depth: usize,
    interner: &'a StringInterner,
}

impl Parser<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn is_ident_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'$' | b':')
    }

    fn unexpected(&self) -> TypeRefParseError {
        match std::str::from_utf8(&self.src[self.pos..])
            .ok()
            .and_then(|rest| rest.chars().next())
        {
            Some(found) => TypeRefParseError::UnexpectedChar {
                found,
                offset: self.pos,
            },
            None if self.at_end() => TypeRefParseError::UnexpectedEnd { offset: self.pos },
            // Mid-codepoint offsets only arise from non-ASCII input.
            None => TypeRefParseError::UnexpectedChar {
                found: char::REPLACEMENT_CHARACTER,
                offset: self.pos,
            },
        }
    }

    fn parse_ident(&mut self) -> Result<Name, TypeRefParseError> {
        let start = self.pos;
        while self.peek().is_some_and(Self::is_ident_byte) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.unexpected());
        }
        // Identifier bytes are ASCII, so this slice is valid UTF-8.
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or_default();
        self.interner
            .try_intern(text)
            .map_err(TypeRefParseError::from)
    }

    fn parse_type(&mut self) -> Result<TypeRef, TypeRefParseError> {
        self.skip_ws();
        let raw = self.parse_ident()?;
        self.skip_ws();
        if self.peek() != Some(b'<') {
            return Ok(TypeRef::new(raw));
        }

        let open = self.pos;
        self.pos += 1;
        self.skip_ws();
        if self.peek() == Some(b'>') {
            return Err(TypeRefParseError::EmptyArguments { offset: open });
        }
        if self.depth == MAX_TYPE_NESTING {
            return Err(TypeRefParseError::TooDeep {
                offset: open,
                limit: MAX_TYPE_NESTING,
            });
        }

        self.depth += 1;
        let args = self.parse_args()?;
        self.depth -= 1;
        Ok(TypeRef::with_args(raw, args))
    }

    fn parse_args(&mut self) -> Result<Vec<TypeRef>, TypeRefParseError> {
        let mut args = Vec::new();
        loop {
            args.push(self.parse_type()?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'>') => {
                    self.pos += 1;
                    return Ok(args);
                }
                _ => return Err(self.unexpected()),
            }
        }
    }
}
