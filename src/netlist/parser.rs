//! Parser for netlist files.

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{Result, TableauError};

/// Parser for netlists.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<NetlistAst> {
        let mut ast = NetlistAst::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            let component = self.parse_component()?;
            ast.components.push(component);

            // Consume newline or EOF
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Take the next word on the current line, or fail naming what was missing.
    fn expect_word(&mut self, name: &str, line: usize, what: &str) -> Result<Token> {
        if self.current.kind == TokenKind::Word {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(TableauError::invalid_component(
                name,
                line,
                format!("missing {}", what),
            ))
        }
    }

    fn parse_component(&mut self) -> Result<ComponentDef> {
        let name = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let first_char = name.chars().next().unwrap_or('?');
        let component_type = ComponentType::from_prefix(first_char).ok_or_else(|| {
            TableauError::UnknownComponentType {
                component_type: name.clone(),
                line,
            }
        })?;

        let source = self.expect_word(&name, line, "source node")?;
        let source_node = parse_node(&name, &source)?;

        let dest = self.expect_word(&name, line, "destination node")?;
        let dest_node = parse_node(&name, &dest)?;

        let value_tok = self.expect_word(&name, line, "value")?;
        let value = parse_value(&value_tok.text).ok_or_else(|| {
            TableauError::invalid_component(
                &name,
                line,
                format!("invalid value '{}'", value_tok.text),
            )
        })?;

        if self.current.kind == TokenKind::Word {
            return Err(TableauError::parse(
                line,
                format!("unexpected token '{}' after component '{}'", self.current.text, name),
            ));
        }

        Ok(ComponentDef {
            component_type,
            name,
            source_node,
            dest_node,
            value,
            line,
        })
    }
}

/// Parse a node token: a non-negative integer, or `GND` for ground.
fn parse_node(component: &str, tok: &Token) -> Result<usize> {
    if tok.text.eq_ignore_ascii_case("GND") {
        return Ok(0);
    }
    tok.text.parse::<usize>().map_err(|_| {
        TableauError::invalid_component(
            component,
            tok.line,
            format!(
                "node '{}' at column {} is not a non-negative integer",
                tok.text, tok.column
            ),
        )
    })
}
