//! Parser for tile descriptions
//!
//! Parses a token stream into a [`Program`].
//!
//! ```text
//! program      := module* (NAME ("," NAME)*)?
//! module       := "module" NAME "{" stmt* "}"
//! stmt         := lane "<->" lane ";"
//!               | xor ["sync"] "->" lane ";"
//! xor          := and ("~=" xor)?
//! and          := or ("&" and)?
//! or           := unary ("|" or)?
//! unary        := "~" unary | lane | "(" xor ")"
//! ```
//!
//! `|` binds tightest and `~=` loosest; all three are right associative.

use crate::ast::*;
use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::lane::Lane;
use crate::lexer::{LocatedToken, Location, Token};

pub struct Parser {
    tokens: Vec<LocatedToken>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<LocatedToken>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse(&mut self) -> Result<Program> {
        let mut program = Program::default();

        while matches!(self.peek_token(), Some(Token::Module)) {
            program.modules.push(self.parse_module()?);
        }

        if !self.is_at_end() {
            program.constructions = self.parse_constructions()?;
        }

        if !self.is_at_end() {
            return Err(self.error("Expected ',' or end of input"));
        }

        Ok(program)
    }

    /// Parse a lone expression, e.g. `w0 & ~n1`
    pub fn parse_expression(&mut self) -> Result<Expr> {
        let expr = self.parse_xor()?;
        if !self.is_at_end() {
            return Err(self.error("Expected end of expression"));
        }
        Ok(expr)
    }

    // ===== Item Parsing =====

    fn parse_module(&mut self) -> Result<ModuleDecl> {
        let loc = self.current_loc();
        self.expect(Token::Module)?;
        let name = self.expect_ident()?;
        self.expect(Token::LBrace)?;

        let mut stmts = Vec::new();
        while !matches!(self.peek_token(), Some(Token::RBrace)) && !self.is_at_end() {
            stmts.push(self.parse_stmt()?);
        }

        self.expect(Token::RBrace)?;

        Ok(ModuleDecl { name, stmts, loc })
    }

    fn parse_constructions(&mut self) -> Result<Vec<Construction>> {
        let mut constructions = Vec::new();

        loop {
            let loc = self.current_loc();
            let name = self.expect_ident()?;
            constructions.push(Construction { name, loc });

            if matches!(self.peek_token(), Some(Token::Comma)) {
                self.advance();
            } else {
                break;
            }
        }

        Ok(constructions)
    }

    // ===== Statement Parsing =====

    fn parse_stmt(&mut self) -> Result<Stmt> {
        let loc = self.current_loc();

        if let (Some(Token::Lane(a)), Some(Token::Passthrough)) = (self.peek_token(), self.peek_nth(1)) {
            let a = *a;
            self.advance();
            self.advance();
            let b = self.expect_lane()?;
            self.expect(Token::Semi)?;
            return Ok(Stmt::Passthrough(PassthroughDecl { a, b, loc }));
        }

        let expr = self.parse_xor()?;

        let sync = if matches!(self.peek_token(), Some(Token::Sync)) {
            self.advance();
            true
        } else {
            false
        };

        self.expect(Token::Arrow)?;
        let output = self.expect_lane()?;
        self.expect(Token::Semi)?;

        Ok(Stmt::Function(FunctionDecl { expr, sync, output, loc }))
    }

    // ===== Expression Parsing =====

    fn parse_xor(&mut self) -> Result<Expr> {
        let left = self.parse_and()?;

        if matches!(self.peek_token(), Some(Token::TildeEq)) {
            self.advance();
            let right = self.parse_xor()?;
            return Ok(Expr::xor(left, right));
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let left = self.parse_or()?;

        if matches!(self.peek_token(), Some(Token::Amp)) {
            self.advance();
            let right = self.parse_and()?;
            return Ok(Expr::and(left, right));
        }

        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let left = self.parse_unary()?;

        if matches!(self.peek_token(), Some(Token::Pipe)) {
            self.advance();
            let right = self.parse_or()?;
            return Ok(Expr::or(left, right));
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        match self.peek_token() {
            Some(Token::Tilde) => {
                self.advance();
                Ok(Expr::not(self.parse_unary()?))
            }
            Some(Token::Lane(lane)) => {
                let lane = *lane;
                self.advance();
                Ok(Expr::input(lane))
            }
            Some(Token::LParen) => {
                self.advance();
                let expr = self.parse_xor()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            _ => Err(self.error("Expected lane, '~' or '('")),
        }
    }

    // ===== Helpers =====

    fn peek_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|t| &t.token)
    }

    /// Location of the current token, or of the last token at end of input
    fn current_loc(&self) -> Location {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.loc)
            .unwrap_or_default()
    }

    fn advance(&mut self) -> Option<&LocatedToken> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        match self.peek_token() {
            Some(token) if std::mem::discriminant(token) == std::mem::discriminant(&expected) => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error(&format!("Expected {}", expected))),
        }
    }

    /// Module and construction names. Lane literals such as `w0` are valid names too.
    fn expect_ident(&mut self) -> Result<String> {
        let name = match self.peek_token() {
            Some(Token::Ident(name)) => name.clone(),
            Some(Token::Lane(lane)) => lane.to_string(),
            _ => return Err(self.error("Expected name")),
        };
        self.advance();
        Ok(name)
    }

    fn expect_lane(&mut self) -> Result<Lane> {
        match self.peek_token() {
            Some(Token::Lane(lane)) => {
                let lane = *lane;
                self.advance();
                Ok(lane)
            }
            _ => Err(self.error("Expected lane (w0, w1, n0, n1, e0, e1, s0 or s1)")),
        }
    }

    fn error(&self, message: &str) -> Error {
        let loc = self.current_loc();
        let found = match self.peek_token() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        };
        Error::Parse {
            message: format!("{}, found {}", message, found),
            line: loc.line,
            col: loc.col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(source: &str) -> Result<Program> {
        let tokens = Lexer::new(source).tokenize()?;
        Parser::new(tokens).parse()
    }

    fn parse_expr(source: &str) -> Expr {
        let tokens = Lexer::new(source).tokenize().unwrap();
        Parser::new(tokens).parse_expression().unwrap()
    }

    fn lane(l: Lane) -> Expr {
        Expr::input(l)
    }

    #[test]
    fn test_parse_empty() {
        let program = parse("").unwrap();
        assert!(program.modules.is_empty());
        assert!(program.constructions.is_empty());
    }

    #[test]
    fn test_parse_module() {
        let source = r#"
            module adder {
                w0 & n0 -> s0;
                w1 <-> e1;
            }
        "#;
        let program = parse(source).unwrap();
        assert_eq!(program.modules.len(), 1);
        let module = &program.modules[0];
        assert_eq!(module.name, "adder");
        assert_eq!(module.stmts.len(), 2);
        match &module.stmts[0] {
            Stmt::Function(f) => {
                assert_eq!(f.expr, Expr::and(lane(Lane::W0), lane(Lane::N0)));
                assert_eq!(f.output, Lane::S0);
                assert!(!f.sync);
                assert_eq!(f.loc.line, 3);
            }
            _ => panic!("Expected function"),
        }
        match &module.stmts[1] {
            Stmt::Passthrough(p) => {
                assert_eq!((p.a, p.b), (Lane::W1, Lane::E1));
                assert_eq!(p.loc.line, 4);
            }
            _ => panic!("Expected passthrough"),
        }
    }

    #[test]
    fn test_parse_sync_function() {
        let program = parse("module m { ~w0 sync -> e1; }").unwrap();
        let f = program.modules[0].functions().next().unwrap();
        assert!(f.sync);
        assert_eq!(f.output, Lane::E1);
        assert_eq!(f.expr, Expr::not(lane(Lane::W0)));
    }

    #[test]
    fn test_parse_constructions() {
        let source = "module a { } module b { } a, b, a";
        let program = parse(source).unwrap();
        assert_eq!(program.modules.len(), 2);
        let names: Vec<&str> = program.constructions.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_lane_literal_as_name() {
        let program = parse("module w0 { w0 -> s0; } w0, e1").unwrap();
        assert_eq!(program.modules[0].name, "w0");
        let names: Vec<&str> = program.constructions.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["w0", "e1"]);
    }

    #[test]
    fn test_error_names_found_token() {
        match parse("module m { w0 -> s0 n0 }").unwrap_err() {
            Error::Parse { message, .. } => assert_eq!(message, "Expected ';', found lane 'n0'"),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_module_after_constructions_is_error() {
        assert!(matches!(parse("a module b { }"), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_precedence() {
        // | binds tighter than &, which binds tighter than ~=
        assert_eq!(
            parse_expr("w0 & n0 | e0"),
            Expr::and(lane(Lane::W0), Expr::or(lane(Lane::N0), lane(Lane::E0)))
        );
        assert_eq!(
            parse_expr("w0 ~= n0 & e0"),
            Expr::xor(lane(Lane::W0), Expr::and(lane(Lane::N0), lane(Lane::E0)))
        );
        assert_eq!(
            parse_expr("(w0 ~= n0) & e0"),
            Expr::and(Expr::xor(lane(Lane::W0), lane(Lane::N0)), lane(Lane::E0))
        );
    }

    #[test]
    fn test_right_associative() {
        assert_eq!(
            parse_expr("w0 ~= n0 ~= e0"),
            Expr::xor(lane(Lane::W0), Expr::xor(lane(Lane::N0), lane(Lane::E0)))
        );
    }

    #[test]
    fn test_not_binds_to_operand() {
        assert_eq!(
            parse_expr("~w0 & n0"),
            Expr::and(Expr::not(lane(Lane::W0)), lane(Lane::N0))
        );
        assert_eq!(
            parse_expr("~(w0 & n0)"),
            Expr::not(Expr::and(lane(Lane::W0), lane(Lane::N0)))
        );
        assert_eq!(parse_expr("~~e1"), Expr::not(Expr::not(lane(Lane::E1))));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("module m {\n  w0 -> s0\n}").unwrap_err();
        match err {
            Error::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_output_lane() {
        assert!(matches!(parse("module m { w0 -> ; }"), Err(Error::Parse { .. })));
        assert!(matches!(parse("module m { w0 -> m; }"), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_unclosed_module() {
        assert!(matches!(parse("module m { w0 -> s0;"), Err(Error::Parse { .. })));
    }
}
