//! Formula parser
//!
//! A recursive descent parser for the table-function expression language.
//! The grammar is the common arithmetic subset of Python and Dart, so that
//! formulas written for either read the same way.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};

/// Parse an expression string into an AST
///
/// # Example
/// ```rust
/// use lutgen_formula::parse_formula;
///
/// let ast = parse_formula("args[0] * args[1]").unwrap();
/// let ast = parse_formula("math.sqrt(x ** 2 + y ** 2)").unwrap();
/// let ast = parse_formula("'high' if input[0] > 30 else 'low'").unwrap();
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    let formula = formula.trim();
    if formula.is_empty() {
        return Err(FormulaError::Parse("Empty expression".into()));
    }

    let mut parser = FormulaParser::new(formula);
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if !matches!(parser.current_token(), Token::Eof) {
        return Err(FormulaError::Parse(format!(
            "Unexpected {} after expression",
            parser.current_token().describe()
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    // Literals
    Number(f64),
    String(String),
    Boolean(bool),

    // Identifiers (may be dotted, e.g. math.sqrt)
    Identifier(String),

    // Keywords
    And,
    Or,
    Not,
    If,
    Else,

    // Operators
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    SlashSlash,
    TildeSlash,
    Percent,
    EqualEqual,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    AmpAmp,
    PipePipe,
    Bang,
    Question,
    Colon,
    Comma,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,

    // Anything the scanner could not make sense of
    Invalid(String),

    // End of input
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::String(s) => format!("string '{}'", s),
            Token::Identifier(name) => format!("'{}'", name),
            Token::Invalid(text) => format!("invalid input '{}'", text),
            Token::Eof => "end of input".to_string(),
            other => format!("{:?}", other),
        }
    }
}

/// Formula parser
struct FormulaParser<'a> {
    input: &'a str,
    pos: usize,
    current_token: Option<Token>,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> Self {
        let mut parser = Self {
            input,
            pos: 0,
            current_token: None,
        };
        parser.advance_token();
        parser
    }

    // === Token scanning ===

    fn advance_token(&mut self) {
        self.current_token = Some(self.scan_token());
    }

    fn scan_token(&mut self) -> Token {
        self.skip_whitespace();

        let c = match self.peek_char() {
            Some(c) => c,
            None => return Token::Eof,
        };

        // Single-character tokens
        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '%' => Some(Token::Percent),
            '?' => Some(Token::Question),
            ':' => Some(Token::Colon),
            ',' => Some(Token::Comma),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            '[' => Some(Token::LeftBracket),
            ']' => Some(Token::RightBracket),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return token;
        }

        // One- or two-character operators
        match c {
            '*' => return self.scan_pair('*', Token::StarStar, Token::Star),
            '/' => return self.scan_pair('/', Token::SlashSlash, Token::Slash),
            '<' => return self.scan_pair('=', Token::LessEqual, Token::LessThan),
            '>' => return self.scan_pair('=', Token::GreaterEqual, Token::GreaterThan),
            '!' => return self.scan_pair('=', Token::NotEqual, Token::Bang),
            '=' => {
                return self.scan_pair('=', Token::EqualEqual, Token::Invalid("=".into()))
            }
            '&' => return self.scan_pair('&', Token::AmpAmp, Token::Invalid("&".into())),
            '|' => return self.scan_pair('|', Token::PipePipe, Token::Invalid("|".into())),
            '~' => return self.scan_pair('/', Token::TildeSlash, Token::Invalid("~".into())),
            _ => {}
        }

        // String literal
        if c == '"' || c == '\'' {
            return self.scan_string(c);
        }

        // Number
        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        // Identifier or keyword
        if c.is_ascii_alphabetic() || c == '_' {
            return self.scan_identifier();
        }

        // Unknown character
        self.advance();
        Token::Invalid(c.to_string())
    }

    /// Consume the current character, then `second` if it follows
    fn scan_pair(&mut self, second: char, double: Token, single: Token) -> Token {
        self.advance();
        if self.peek_char() == Some(second) {
            self.advance();
            double
        } else {
            single
        }
    }

    fn scan_string(&mut self, quote: char) -> Token {
        self.advance(); // Skip opening quote

        let mut s = String::new();
        while let Some(c) = self.peek_char() {
            if c == quote {
                self.advance();
                return Token::String(s);
            }
            if c == '\\' {
                self.advance();
                match self.peek_char() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some(other) => s.push(other),
                    None => break,
                }
                self.advance();
            } else {
                s.push(c);
                self.advance();
            }
        }

        Token::Invalid(format!("{}{}", quote, s))
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;

        // Integer part
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent part
        if self.peek_char().map_or(false, |c| c == 'e' || c == 'E') {
            self.advance();
            if self.peek_char().map_or(false, |c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let num_str = &self.input[start..self.pos];
        match num_str.parse::<f64>() {
            Ok(num) => Token::Number(num),
            Err(_) => Token::Invalid(num_str.to_string()),
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;

        // Dotted names are allowed (math.sqrt) as long as a letter follows the dot
        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else if c == '.'
                && self
                    .peek_char_at(1)
                    .map_or(false, |n| n.is_ascii_alphabetic() || n == '_')
            {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.input[start..self.pos];
        match text {
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            "if" => Token::If,
            "else" => Token::Else,
            "True" | "true" => Token::Boolean(true),
            "False" | "false" => Token::Boolean(false),
            _ => Token::Identifier(text.to_string()),
        }
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn current_token(&self) -> &Token {
        self.current_token.as_ref().unwrap_or(&Token::Eof)
    }

    fn consume(&mut self) -> Token {
        let token = self.current_token.take().unwrap_or(Token::Eof);
        self.advance_token();
        token
    }

    fn expect(&mut self, expected: &Token) -> FormulaResult<()> {
        if self.current_token() == expected {
            self.consume();
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "Expected {}, got {}",
                expected.describe(),
                self.current_token().describe()
            )))
        }
    }

    fn binary(op: BinaryOperator, left: FormulaExpr, right: FormulaExpr) -> FormulaExpr {
        FormulaExpr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Conditional: a if c else b, c ? a : b
    // 2. Logical or: or, ||
    // 3. Logical and: and, &&
    // 4. Logical not: not
    // 5. Comparison: ==, !=, <, <=, >, >=
    // 6. Addition/Subtraction: +, -
    // 7. Multiplication/Division: *, /, //, ~/, %
    // 8. Unary: -, +, !
    // 9. Exponentiation: ** (right associative, binds tighter than unary on its left)
    // 10. Primary: literals, names, indexing, function calls, parentheses

    fn parse_expression(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_conditional()
    }

    fn parse_conditional(&mut self) -> FormulaResult<FormulaExpr> {
        let expr = self.parse_or()?;

        match self.current_token() {
            Token::Question => {
                self.consume();
                let then = self.parse_conditional()?;
                self.expect(&Token::Colon)?;
                let otherwise = self.parse_conditional()?;
                Ok(FormulaExpr::Conditional {
                    condition: Box::new(expr),
                    then: Box::new(then),
                    otherwise: Box::new(otherwise),
                })
            }
            Token::If => {
                self.consume();
                let condition = self.parse_or()?;
                self.expect(&Token::Else)?;
                let otherwise = self.parse_conditional()?;
                Ok(FormulaExpr::Conditional {
                    condition: Box::new(condition),
                    then: Box::new(expr),
                    otherwise: Box::new(otherwise),
                })
            }
            _ => Ok(expr),
        }
    }

    fn parse_or(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_and()?;

        while matches!(self.current_token(), Token::Or | Token::PipePipe) {
            self.consume();
            let right = self.parse_and()?;
            left = Self::binary(BinaryOperator::Or, left, right);
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_not()?;

        while matches!(self.current_token(), Token::And | Token::AmpAmp) {
            self.consume();
            let right = self.parse_not()?;
            left = Self::binary(BinaryOperator::And, left, right);
        }

        Ok(left)
    }

    fn parse_not(&mut self) -> FormulaResult<FormulaExpr> {
        if matches!(self.current_token(), Token::Not) {
            self.consume();
            let operand = self.parse_not()?;
            return Ok(FormulaExpr::UnaryOp {
                op: UnaryOperator::Not,
                operand: Box::new(operand),
            });
        }

        self.parse_comparison()
    }

    /// Comparisons chain like Python: `a < b < c` is `a < b and b < c`
    fn parse_comparison(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_additive()?;
        let mut chain: Option<FormulaExpr> = None;

        loop {
            let op = match self.current_token() {
                Token::EqualEqual => BinaryOperator::Equal,
                Token::NotEqual => BinaryOperator::NotEqual,
                Token::LessThan => BinaryOperator::LessThan,
                Token::LessEqual => BinaryOperator::LessEqual,
                Token::GreaterThan => BinaryOperator::GreaterThan,
                Token::GreaterEqual => BinaryOperator::GreaterEqual,
                _ => break,
            };

            self.consume();
            let right = self.parse_additive()?;
            let comparison = Self::binary(op, left, right.clone());
            chain = Some(match chain {
                Some(previous) => Self::binary(BinaryOperator::And, previous, comparison),
                None => comparison,
            });
            left = right;
        }

        Ok(chain.unwrap_or(left))
    }

    fn parse_additive(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume();
            let right = self.parse_multiplicative()?;
            left = Self::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                Token::SlashSlash => BinaryOperator::FloorDivide,
                Token::TildeSlash => BinaryOperator::TruncateDivide,
                Token::Percent => BinaryOperator::Modulo,
                _ => break,
            };

            self.consume();
            let right = self.parse_unary()?;
            left = Self::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<FormulaExpr> {
        let op = match self.current_token() {
            Token::Minus => UnaryOperator::Negate,
            Token::Bang => UnaryOperator::Not,
            Token::Plus => {
                // Prefix plus (no-op)
                self.consume();
                return self.parse_unary();
            }
            _ => return self.parse_power(),
        };

        self.consume();
        let operand = self.parse_unary()?;
        Ok(FormulaExpr::UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_power(&mut self) -> FormulaResult<FormulaExpr> {
        let left = self.parse_primary()?;

        if matches!(self.current_token(), Token::StarStar) {
            self.consume();
            // Right associative; the exponent may carry its own sign
            let right = self.parse_unary()?;
            return Ok(Self::binary(BinaryOperator::Power, left, right));
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> FormulaResult<FormulaExpr> {
        match self.current_token().clone() {
            Token::Number(n) => {
                self.consume();
                Ok(FormulaExpr::Number(n))
            }

            Token::String(s) => {
                self.consume();
                Ok(FormulaExpr::String(s))
            }

            Token::Boolean(b) => {
                self.consume();
                Ok(FormulaExpr::Boolean(b))
            }

            Token::LeftParen => {
                self.consume();
                let expr = self.parse_expression()?;
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            Token::Identifier(name) => {
                self.consume();
                match self.current_token() {
                    Token::LeftParen => self.parse_function_call(name),
                    Token::LeftBracket => self.parse_index(name),
                    _ => Ok(FormulaExpr::Name(name)),
                }
            }

            other => Err(FormulaError::Parse(format!(
                "Unexpected {}",
                other.describe()
            ))),
        }
    }

    fn parse_function_call(&mut self, name: String) -> FormulaResult<FormulaExpr> {
        self.expect(&Token::LeftParen)?;

        let mut args = Vec::new();

        // Parse arguments
        if !matches!(self.current_token(), Token::RightParen) {
            args.push(self.parse_expression()?);

            while matches!(self.current_token(), Token::Comma) {
                self.consume();
                args.push(self.parse_expression()?);
            }
        }

        self.expect(&Token::RightParen)?;

        Ok(FormulaExpr::Function { name, args })
    }

    fn parse_index(&mut self, name: String) -> FormulaResult<FormulaExpr> {
        self.expect(&Token::LeftBracket)?;

        let negative = matches!(self.current_token(), Token::Minus);
        if negative {
            self.consume();
        }

        let index = match self.consume() {
            Token::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => n as i64,
            other => {
                return Err(FormulaError::Parse(format!(
                    "Index into '{}' must be an integer literal, got {}",
                    name,
                    other.describe()
                )))
            }
        };

        self.expect(&Token::RightBracket)?;

        Ok(FormulaExpr::Index {
            name,
            index: if negative { -index } else { index },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index(name: &str, index: i64) -> FormulaExpr {
        FormulaExpr::Index {
            name: name.into(),
            index,
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_formula("42").unwrap(), FormulaExpr::Number(42.0));
        assert_eq!(parse_formula("3.14").unwrap(), FormulaExpr::Number(3.14));
        assert_eq!(parse_formula("1e10").unwrap(), FormulaExpr::Number(1e10));
        assert_eq!(parse_formula(".5").unwrap(), FormulaExpr::Number(0.5));
    }

    #[test]
    fn test_parse_string() {
        assert_eq!(
            parse_formula("'high'").unwrap(),
            FormulaExpr::String("high".into())
        );
        assert_eq!(
            parse_formula("\"it\\\"s\"").unwrap(),
            FormulaExpr::String("it\"s".into())
        );
        assert!(parse_formula("'unterminated").is_err());
    }

    #[test]
    fn test_parse_boolean() {
        assert_eq!(parse_formula("True").unwrap(), FormulaExpr::Boolean(true));
        assert_eq!(parse_formula("false").unwrap(), FormulaExpr::Boolean(false));
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_formula("args[0]").unwrap(), index("args", 0));
        assert_eq!(parse_formula("input[ 2 ]").unwrap(), index("input", 2));
        assert_eq!(parse_formula("args[-1]").unwrap(), index("args", -1));
        assert!(parse_formula("args[i]").is_err());
        assert!(parse_formula("args[1.5]").is_err());
    }

    #[test]
    fn test_parse_arithmetic_precedence() {
        // Should parse as a0+(a1*2)
        let ast = parse_formula("input[0] + input[1] * 2").unwrap();
        if let FormulaExpr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOperator::Add);
            assert_eq!(*left, index("input", 0));
            assert!(matches!(
                *right,
                FormulaExpr::BinaryOp {
                    op: BinaryOperator::Multiply,
                    ..
                }
            ));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_parse_division_operators() {
        for (text, expected) in [
            ("a / b", BinaryOperator::Divide),
            ("a // b", BinaryOperator::FloorDivide),
            ("a ~/ b", BinaryOperator::TruncateDivide),
            ("a % b", BinaryOperator::Modulo),
        ] {
            let ast = parse_formula(text).unwrap();
            assert!(
                matches!(ast, FormulaExpr::BinaryOp { op, .. } if op == expected),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_parse_power_binds_tighter_than_negation() {
        let ast = parse_formula("-2 ** 2").unwrap();
        if let FormulaExpr::UnaryOp { op, operand } = ast {
            assert_eq!(op, UnaryOperator::Negate);
            assert!(matches!(
                *operand,
                FormulaExpr::BinaryOp {
                    op: BinaryOperator::Power,
                    ..
                }
            ));
        } else {
            panic!("Expected UnaryOp");
        }
    }

    #[test]
    fn test_parse_power_right_associative() {
        let ast = parse_formula("2 ** 3 ** 2").unwrap();
        if let FormulaExpr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOperator::Power);
            assert_eq!(*left, FormulaExpr::Number(2.0));
            assert!(matches!(
                *right,
                FormulaExpr::BinaryOp {
                    op: BinaryOperator::Power,
                    ..
                }
            ));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_parse_comparison() {
        let ast = parse_formula("args[0] >= 5").unwrap();
        assert!(matches!(
            ast,
            FormulaExpr::BinaryOp {
                op: BinaryOperator::GreaterEqual,
                ..
            }
        ));

        let ast = parse_formula("args[0] != args[1]").unwrap();
        assert!(matches!(
            ast,
            FormulaExpr::BinaryOp {
                op: BinaryOperator::NotEqual,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_chained_comparison() {
        let ast = parse_formula("18.5 <= bmi < 25").unwrap();
        let expected = FormulaExpr::BinaryOp {
            op: BinaryOperator::And,
            left: Box::new(FormulaExpr::BinaryOp {
                op: BinaryOperator::LessEqual,
                left: Box::new(FormulaExpr::Number(18.5)),
                right: Box::new(FormulaExpr::Name("bmi".into())),
            }),
            right: Box::new(FormulaExpr::BinaryOp {
                op: BinaryOperator::LessThan,
                left: Box::new(FormulaExpr::Name("bmi".into())),
                right: Box::new(FormulaExpr::Number(25.0)),
            }),
        };
        assert_eq!(ast, expected);

        let ast = parse_formula("1 < 2 < 3 < 4").unwrap();
        let FormulaExpr::BinaryOp { op, left, .. } = ast else {
            panic!("Expected BinaryOp");
        };
        assert_eq!(op, BinaryOperator::And);
        assert!(matches!(
            *left,
            FormulaExpr::BinaryOp {
                op: BinaryOperator::And,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_logical_keywords_and_symbols() {
        let python = parse_formula("a > 1 and not b or c").unwrap();
        let dart = parse_formula("a > 1 && !b || c").unwrap();
        assert!(matches!(
            python,
            FormulaExpr::BinaryOp {
                op: BinaryOperator::Or,
                ..
            }
        ));
        assert!(matches!(
            dart,
            FormulaExpr::BinaryOp {
                op: BinaryOperator::Or,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_python_conditional() {
        let ast = parse_formula("'hi' if x > 1 else 'lo'").unwrap();
        if let FormulaExpr::Conditional {
            condition,
            then,
            otherwise,
        } = ast
        {
            assert!(matches!(*condition, FormulaExpr::BinaryOp { .. }));
            assert_eq!(*then, FormulaExpr::String("hi".into()));
            assert_eq!(*otherwise, FormulaExpr::String("lo".into()));
        } else {
            panic!("Expected Conditional");
        }
    }

    #[test]
    fn test_parse_dart_conditional() {
        let ast = parse_formula("x > 1 ? 1 : x < 0 ? -1 : 0").unwrap();
        if let FormulaExpr::Conditional { otherwise, .. } = ast {
            assert!(matches!(*otherwise, FormulaExpr::Conditional { .. }));
        } else {
            panic!("Expected Conditional");
        }
    }

    #[test]
    fn test_parse_function() {
        let ast = parse_formula("max(1, args[0], 3)").unwrap();
        if let FormulaExpr::Function { name, args } = ast {
            assert_eq!(name, "max");
            assert_eq!(args.len(), 3);
        } else {
            panic!("Expected Function");
        }

        let ast = parse_formula("math.sqrt(2)").unwrap();
        assert!(matches!(ast, FormulaExpr::Function { ref name, .. } if name == "math.sqrt"));

        let ast = parse_formula("pi()").unwrap();
        assert!(matches!(ast, FormulaExpr::Function { ref args, .. } if args.is_empty()));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            parse_formula("weight").unwrap(),
            FormulaExpr::Name("weight".into())
        );
        assert_eq!(
            parse_formula("math.pi").unwrap(),
            FormulaExpr::Name("math.pi".into())
        );
    }

    #[test]
    fn test_parse_parentheses() {
        let ast = parse_formula("(1 + 2) * 3").unwrap();
        if let FormulaExpr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOperator::Multiply);
            assert!(matches!(
                *left,
                FormulaExpr::BinaryOp {
                    op: BinaryOperator::Add,
                    ..
                }
            ));
            assert_eq!(*right, FormulaExpr::Number(3.0));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_formula("").is_err());
        assert!(parse_formula("1 +").is_err());
        assert!(parse_formula("(1 + 2").is_err());
        assert!(parse_formula("a = 1").is_err());
        assert!(parse_formula("a & b").is_err());
        assert!(parse_formula("1 2").is_err());
        assert!(parse_formula("x @ y").is_err());
        assert!(parse_formula("c ? a").is_err());
        assert!(parse_formula("a if c").is_err());
    }
}
