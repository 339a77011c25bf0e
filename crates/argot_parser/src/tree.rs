//! The symbol-result tree.
//!
//! One mutable tree per parse: an arena of result nodes indexed by the
//! grammar's stable `SymbolId`s (at most one result per symbol per parse),
//! plus the accumulated diagnostics, the directive map, and the unmatched
//! and unparsed token lists. Owned by the parse operation while walking;
//! handed to the immutable `ParseResult` afterwards.
use argot_model::{Grammar, Value};
use argot_syntax::{ParseError, SymbolId, Token};

/// Outcome of converting an argument result's tokens to a typed value.
/// Computed at most once per result and cached; re-querying never re-runs
/// user conversion code.
#[derive(Clone, Debug, PartialEq)]
pub enum Conversion {
    /// Arity allowed zero values and none were supplied.
    NoArgument,
    Success(Value),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResultKind {
    Command,
    Option,
    Argument {
        conversion: Option<Conversion>,
        /// The tokens were injected from the default-value factory.
        default_used: bool,
    },
    Directive,
}

/// One node of the result tree: which tokens matched a given symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolResult {
    pub symbol: SymbolId,
    pub parent: Option<SymbolId>,
    pub tokens: Vec<Token>,
    pub kind: ResultKind,
}

impl SymbolResult {
    pub fn conversion(&self) -> Option<&Conversion> {
        match &self.kind {
            ResultKind::Argument { conversion, .. } => conversion.as_ref(),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self.conversion() {
            Some(Conversion::Success(v)) => Some(v),
            _ => None,
        }
    }

    pub fn default_used(&self) -> bool {
        matches!(
            self.kind,
            ResultKind::Argument {
                default_used: true,
                ..
            }
        )
    }

    pub(crate) fn set_conversion(&mut self, value: Conversion) {
        if let ResultKind::Argument { conversion, .. } = &mut self.kind {
            // First write wins; the cache is never recomputed.
            if conversion.is_none() {
                *conversion = Some(value);
            }
        }
    }

    pub(crate) fn mark_default(&mut self) {
        if let ResultKind::Argument { default_used, .. } = &mut self.kind {
            *default_used = true;
        }
    }
}

pub struct ResultTree {
    nodes: Vec<Option<SymbolResult>>,
    pub errors: Vec<ParseError>,
    /// Tokens no symbol claimed.
    pub unmatched: Vec<Token>,
    /// Operand tokens passed through after `--`.
    pub unparsed: Vec<Token>,
    /// Directive name -> ordered values, in first-seen order.
    pub directives: Vec<(String, Vec<String>)>,
    /// The active grammar scope; the innermost command once the walk ends.
    pub innermost: SymbolId,
}

impl ResultTree {
    pub fn new(grammar: &Grammar) -> Self {
        Self {
            nodes: vec![None; grammar.symbol_count()],
            errors: Vec::new(),
            unmatched: Vec::new(),
            unparsed: Vec::new(),
            directives: Vec::new(),
            innermost: grammar.root(),
        }
    }

    pub fn get(&self, symbol: SymbolId) -> Option<&SymbolResult> {
        self.nodes.get(symbol.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, symbol: SymbolId) -> Option<&mut SymbolResult> {
        self.nodes.get_mut(symbol.0 as usize)?.as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolResult> {
        self.nodes.iter().filter_map(|n| n.as_ref())
    }

    pub(crate) fn get_or_insert(
        &mut self,
        symbol: SymbolId,
        parent: Option<SymbolId>,
        kind: ResultKind,
    ) -> &mut SymbolResult {
        let slot = &mut self.nodes[symbol.0 as usize];
        slot.get_or_insert_with(|| SymbolResult {
            symbol,
            parent,
            tokens: Vec::new(),
            kind,
        })
    }

    pub(crate) fn get_or_insert_argument(
        &mut self,
        symbol: SymbolId,
        parent: Option<SymbolId>,
    ) -> &mut SymbolResult {
        self.get_or_insert(
            symbol,
            parent,
            ResultKind::Argument {
                conversion: None,
                default_used: false,
            },
        )
    }

    pub(crate) fn add_directive(&mut self, name: &str, value: Option<String>) {
        if let Some((_, values)) = self.directives.iter_mut().find(|(n, _)| n == name) {
            values.extend(value);
        } else {
            self.directives
                .push((name.to_string(), value.into_iter().collect()));
        }
    }

    pub fn directive_values(&self, name: &str) -> Option<&[String]> {
        self.directives
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }
}
