//! Table-driven predictive parser.
//!
//! The parser pops one symbol per iteration. A terminal must equal the current
//! token; a nonterminal is replaced by the production the table predicts for
//! the current lookahead, pushed in reverse. Once the input is exhausted the
//! lookahead is `$`, so only ε-capable cells can still fire. The sequence is
//! accepted iff the stack and the input run out together.
//!
//! Each stack entry remembers the nonterminals expanded at its input position
//! on the way down. Meeting one of them again before anything is matched means
//! the derivation loops, and the run is rejected.

use std::rc::Rc;
use tracing::{debug, trace};

use super::trace::{Action, ParseError, ParseOutcome, ParsingStep};
use crate::grammar::{Lookahead, ParseTable, Production, Symbol};

#[derive(Debug, Clone, Copy)]
pub struct PredictiveParser<'t> {
    table: &'t ParseTable,
}

struct Frame {
    symbol: Symbol,
    pushed_at: usize,
    /// Nonterminals expanded at `pushed_at` above this entry, root first.
    open: Rc<[String]>,
}

struct Run<'a, S> {
    tokens: &'a [S],
    stack: Vec<Frame>,
    position: usize,
    steps: Vec<ParsingStep>,
}

impl<S: AsRef<str>> Run<'_, S> {
    fn snapshot(&mut self, action: Action) {
        trace!(%action, position = self.position, "parser step");
        self.steps.push(ParsingStep {
            stack: self.stack.iter().map(|f| f.symbol.name().to_string()).collect(),
            remaining: self.tokens[self.position..]
                .iter()
                .map(|t| t.as_ref().to_string())
                .collect(),
            action,
        });
    }

    /// Replaces the popped `frame` (a nonterminal) with `production`'s body.
    /// Fails when the nonterminal is already open at the current position.
    fn expand(&mut self, frame: Frame, production: &Production) -> Result<(), ParseError> {
        let mut open: Vec<String> = if frame.pushed_at == self.position {
            frame.open.to_vec()
        } else {
            Vec::new()
        };
        if open.contains(&production.head) {
            let error = ParseError::LeftRecursion {
                nonterminal: production.head.clone(),
                position: self.position,
            };
            self.stack.push(frame);
            return Err(error);
        }
        open.push(production.head.clone());
        let open: Rc<[String]> = open.into();
        self.stack.extend(production.body.iter().rev().map(|symbol| Frame {
            symbol: symbol.clone(),
            pushed_at: self.position,
            open: Rc::clone(&open),
        }));
        self.snapshot(Action::expand(production));
        Ok(())
    }

    fn finish(mut self, error: Option<ParseError>) -> ParseOutcome {
        let accepted = error.is_none();
        match &error {
            None => self.snapshot(Action::Accept),
            Some(error) => self.snapshot(Action::Reject {
                error: error.clone(),
            }),
        }
        debug!(accepted, consumed = self.position, steps = self.steps.len(), "parse finished");
        ParseOutcome {
            accepted,
            steps: self.steps,
            error,
            consumed: self.position,
        }
    }
}

impl<'t> PredictiveParser<'t> {
    pub fn new(table: &'t ParseTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t ParseTable {
        self.table
    }

    /// Parses a sequence of category tags. Never fails with an `Err`: the
    /// outcome carries the full trace and, on rejection, the reason.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> ParseOutcome {
        let grammar = self.table.grammar();
        let mut run = Run {
            tokens,
            stack: vec![Frame {
                symbol: Symbol::NonTerminal(grammar.start().to_string()),
                pushed_at: 0,
                open: Rc::from(Vec::new()),
            }],
            position: 0,
            steps: Vec::new(),
        };
        run.snapshot(Action::Start);

        while let Some(frame) = run.stack.pop() {
            let Some(current) = tokens.get(run.position).map(AsRef::as_ref) else {
                // Input exhausted: only ε-capable `$` cells may still fire.
                let production = match &frame.symbol {
                    Symbol::NonTerminal(name) => self.table.predict(name, &Lookahead::End),
                    Symbol::Terminal(_) => None,
                };
                match production {
                    Some(production) => {
                        if let Err(error) = run.expand(frame, production) {
                            return run.finish(Some(error));
                        }
                        continue;
                    }
                    None => {
                        run.stack.push(frame);
                        let position = run.position;
                        return run.finish(Some(ParseError::IncompleteDerivation { position }));
                    }
                }
            };

            match &frame.symbol {
                Symbol::Terminal(expected) => {
                    if expected == current {
                        let terminal = expected.clone();
                        run.position += 1;
                        run.snapshot(Action::Match { terminal });
                    } else {
                        let error = ParseError::ExpectedTerminalMismatch {
                            expected: expected.clone(),
                            found: current.to_string(),
                            position: run.position,
                        };
                        run.stack.push(frame);
                        return run.finish(Some(error));
                    }
                }
                Symbol::NonTerminal(name) => {
                    let lookahead = Lookahead::terminal(current);
                    match self.table.predict(name, &lookahead) {
                        Some(production) => {
                            if let Err(error) = run.expand(frame, production) {
                                return run.finish(Some(error));
                            }
                        }
                        None => {
                            let error = ParseError::NoProductionForLookahead {
                                nonterminal: name.clone(),
                                lookahead: current.to_string(),
                                position: run.position,
                            };
                            run.stack.push(frame);
                            return run.finish(Some(error));
                        }
                    }
                }
            }
        }

        if run.position == tokens.len() {
            run.finish(None)
        } else {
            let position = run.position;
            run.finish(Some(ParseError::IncompleteDerivation { position }))
        }
    }
}
