//! Token provenance.
//!
//! Every token records where it came from: the raw argument vector, an
//! internal synthesis (root-command token), an implicit default value, or a
//! line of an expanded response file. Response-file locations chain outward
//! to the `@file` reference that produced them.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Typed by the user (argv element or command-line string).
    User,
    /// Synthesized by the tokenizer (e.g. the root command token).
    Internal,
    /// Injected by the pipeline (default values).
    Implicit,
    /// Expanded from a response file at the given path.
    Response(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub source: SourceKind,
    /// Element index for argv input, byte offset for string and file input.
    pub offset: u32,
    /// For response-file tokens: the location of the `@file` reference.
    /// Following `outer` always terminates at `User` or `Internal`.
    pub outer: Option<Box<Location>>,
}

impl Location {
    pub fn user(offset: u32) -> Self {
        Self {
            source: SourceKind::User,
            offset,
            outer: None,
        }
    }

    pub fn internal() -> Self {
        Self {
            source: SourceKind::Internal,
            offset: 0,
            outer: None,
        }
    }

    pub fn implicit() -> Self {
        Self {
            source: SourceKind::Implicit,
            offset: 0,
            outer: None,
        }
    }

    pub fn response(path: impl Into<String>, offset: u32, outer: Location) -> Self {
        Self {
            source: SourceKind::Response(path.into()),
            offset,
            outer: Some(Box::new(outer)),
        }
    }

    /// Follow the `outer` chain to the originating location.
    pub fn root(&self) -> &Location {
        let mut loc = self;
        while let Some(outer) = &loc.outer {
            loc = outer;
        }
        loc
    }
}
