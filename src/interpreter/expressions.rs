//! Expression evaluation.
//!
//! Every `try_*` function answers "does this expression have a value of that
//! type, and if so which?". `Ok(None)` means the interpretation does not
//! apply; `Err` is reserved for faults that no other interpretation can fix
//! (undefined variables, division by zero, overflow).

use std::io::{BufRead, Write};

use crate::ast::{BinaryOp, Expr, ExprKind, VarType};

use super::{Interpreter, SemanticError, Value};

impl<R: BufRead, W: Write> Interpreter<R, W> {
    // ==================== Typed Evaluation ====================

    /// Evaluates `expr` as a value of `expected` type.
    ///
    /// A `string` context accepts any value and converts it to text.
    pub(super) fn eval_as(&self, expr: &Expr, expected: VarType) -> Result<Value, SemanticError> {
        let value = match expected {
            VarType::Int => self.try_int(expr)?.map(Value::Int),
            VarType::Bool => self.try_bool(expr)?.map(Value::Bool),
            VarType::Str => self.try_display(expr)?.map(Value::Str),
        };
        value.ok_or_else(|| self.type_error(expr, expected))
    }

    /// Evaluates `expr` as an integer.
    pub(super) fn eval_int(&self, expr: &Expr) -> Result<i64, SemanticError> {
        self.try_int(expr)?
            .ok_or_else(|| self.type_error(expr, VarType::Int))
    }

    /// Evaluates `expr` as a boolean.
    pub(super) fn eval_bool(&self, expr: &Expr) -> Result<bool, SemanticError> {
        self.try_bool(expr)?
            .ok_or_else(|| self.type_error(expr, VarType::Bool))
    }

    /// Evaluates `expr` as text, the way `print` shows it.
    pub(super) fn eval_string(&self, expr: &Expr) -> Result<String, SemanticError> {
        self.try_display(expr)?
            .ok_or_else(|| self.type_error(expr, VarType::Str))
    }

    /// Evaluates `expr` with the first type that fits: bool, int, then string.
    pub(super) fn value_of(&self, expr: &Expr) -> Result<Option<Value>, SemanticError> {
        if let Some(value) = self.try_bool(expr)? {
            return Ok(Some(Value::Bool(value)));
        }
        if let Some(value) = self.try_int(expr)? {
            return Ok(Some(Value::Int(value)));
        }
        Ok(self.try_string(expr)?.map(Value::Str))
    }

    /// Evaluates `expr` and converts the result to text.
    fn try_display(&self, expr: &Expr) -> Result<Option<String>, SemanticError> {
        Ok(self.value_of(expr)?.map(|value| value.to_string()))
    }

    // ==================== Interpretations ====================

    /// Integer interpretation: literals, `int` variables, arithmetic.
    fn try_int(&self, expr: &Expr) -> Result<Option<i64>, SemanticError> {
        match &expr.kind {
            ExprKind::IntLiteral(value) => Ok(Some(*value)),
            ExprKind::Variable(name) => match self.lookup(name, expr.span)? {
                Value::Int(value) => Ok(Some(*value)),
                _ => Ok(None),
            },
            ExprKind::Grouped(inner) => self.try_int(inner),
            ExprKind::Binary { left, op, right } => {
                let checked: fn(i64, i64) -> Option<i64> = match op {
                    BinaryOp::Add => i64::checked_add,
                    BinaryOp::Subtract => i64::checked_sub,
                    BinaryOp::Multiply => i64::checked_mul,
                    BinaryOp::Divide => i64::checked_div,
                    _ => return Ok(None),
                };
                let Some(left) = self.try_int(left)? else {
                    return Ok(None);
                };
                let Some(right) = self.try_int(right)? else {
                    return Ok(None);
                };

                if *op == BinaryOp::Divide && right == 0 {
                    return Err(SemanticError::DivisionByZero { span: expr.span });
                }
                checked(left, right)
                    .map(Some)
                    .ok_or(SemanticError::Overflow {
                        op: *op,
                        span: expr.span,
                    })
            }
            ExprKind::StringLiteral(_) | ExprKind::BoolLiteral(_) => Ok(None),
        }
    }

    /// Boolean interpretation: literals, `bool` variables, comparisons, `&`.
    fn try_bool(&self, expr: &Expr) -> Result<Option<bool>, SemanticError> {
        match &expr.kind {
            ExprKind::BoolLiteral(value) => Ok(Some(*value)),
            ExprKind::Variable(name) => match self.lookup(name, expr.span)? {
                Value::Bool(value) => Ok(Some(*value)),
                _ => Ok(None),
            },
            ExprKind::Grouped(inner) => self.try_bool(inner),
            ExprKind::Binary { left, op, right } => self.try_compare(left, *op, right),
            ExprKind::IntLiteral(_) | ExprKind::StringLiteral(_) => Ok(None),
        }
    }

    /// String interpretation: literals, `string` variables, concatenation.
    ///
    /// `+` concatenates when at least one side is not an integer; the other
    /// side is converted to text.
    fn try_string(&self, expr: &Expr) -> Result<Option<String>, SemanticError> {
        match &expr.kind {
            ExprKind::StringLiteral(value) => Ok(Some(value.clone())),
            ExprKind::Variable(name) => match self.lookup(name, expr.span)? {
                Value::Str(value) => Ok(Some(value.clone())),
                _ => Ok(None),
            },
            ExprKind::Grouped(inner) => self.try_string(inner),
            ExprKind::Binary {
                left,
                op: BinaryOp::Add,
                right,
            } => {
                if self.try_int(left)?.is_some() && self.try_int(right)?.is_some() {
                    return Ok(None);
                }
                let Some(left) = self.try_display(left)? else {
                    return Ok(None);
                };
                let Some(right) = self.try_display(right)? else {
                    return Ok(None);
                };
                Ok(Some(left + &right))
            }
            ExprKind::Binary { .. } | ExprKind::IntLiteral(_) | ExprKind::BoolLiteral(_) => {
                Ok(None)
            }
        }
    }

    // ==================== Operators ====================

    /// Applies a comparison or logical operator.
    fn try_compare(&self, left: &Expr, op: BinaryOp, right: &Expr) -> Result<Option<bool>, SemanticError> {
        if op.is_arithmetic() {
            return Ok(None);
        }

        match op {
            _ if op.is_ordering() => {
                let Some(left) = self.try_int(left)? else {
                    return Ok(None);
                };
                let Some(right) = self.try_int(right)? else {
                    return Ok(None);
                };
                Ok(Some(match op {
                    BinaryOp::LessThan => left < right,
                    BinaryOp::GreaterThan => left > right,
                    BinaryOp::LessEqual => left <= right,
                    _ => left >= right,
                }))
            }

            BinaryOp::Equal => self.try_equal(left, right),
            BinaryOp::NotEqual => Ok(self.try_equal(left, right)?.map(|equal| !equal)),

            // `&` is inequality of its operands (exclusive or), not conjunction
            BinaryOp::And => {
                let Some(left) = self.try_bool(left)? else {
                    return Ok(None);
                };
                let Some(right) = self.try_bool(right)? else {
                    return Ok(None);
                };
                Ok(Some(left != right))
            }

            _ => Ok(None),
        }
    }

    /// Equality over two values of the same type, tried as bool, int, then string.
    fn try_equal(&self, left: &Expr, right: &Expr) -> Result<Option<bool>, SemanticError> {
        if let Some(l) = self.try_bool(left)?
            && let Some(r) = self.try_bool(right)?
        {
            return Ok(Some(l == r));
        }
        if let Some(l) = self.try_int(left)?
            && let Some(r) = self.try_int(right)?
        {
            return Ok(Some(l == r));
        }
        if let Some(l) = self.try_string(left)?
            && let Some(r) = self.try_string(right)?
        {
            return Ok(Some(l == r));
        }
        Ok(None)
    }

    // ==================== Diagnosis ====================

    /// Builds the error for an expression with no value of type `expected`.
    fn type_error(&self, expr: &Expr, expected: VarType) -> SemanticError {
        match self.value_of(expr) {
            Ok(Some(value)) => SemanticError::type_mismatch(expected, value.var_type(), expr.span),
            Ok(None) => self.operand_error(expr, expected),
            Err(error) => error,
        }
    }

    /// Finds the innermost operator whose operands have no common type.
    fn operand_error(&self, expr: &Expr, expected: VarType) -> SemanticError {
        match &expr.kind {
            ExprKind::Grouped(inner) => self.operand_error(inner, expected),
            ExprKind::Binary { left, op, right } => {
                let left_type = match self.operand_type(left, expected) {
                    Ok(var_type) => var_type,
                    Err(error) => return error,
                };
                let right_type = match self.operand_type(right, expected) {
                    Ok(var_type) => var_type,
                    Err(error) => return error,
                };
                SemanticError::InvalidBinaryOp {
                    op: *op,
                    left_type,
                    right_type,
                    span: expr.span,
                }
            }
            // Leaves always have a value or fail with their own error
            _ => match self.value_of(expr) {
                Ok(Some(value)) => SemanticError::type_mismatch(expected, value.var_type(), expr.span),
                Ok(None) => SemanticError::type_mismatch(expected, expected, expr.span),
                Err(error) => error,
            },
        }
    }

    /// The type of one operand, or the error that explains why it has none.
    fn operand_type(&self, expr: &Expr, expected: VarType) -> Result<VarType, SemanticError> {
        match self.value_of(expr)? {
            Some(value) => Ok(value.var_type()),
            None => Err(self.operand_error(expr, expected)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Sink;

    use crate::ast::{Expr, StatementKind, VarType};
    use crate::interpreter::{Interpreter, SemanticError, Value};
    use crate::lexer::tokenize;
    use crate::parser::Parser;

    /// Declares `i = 7`, `b = true`, `s = "ab"` and evaluates `source` with `f`.
    fn eval<T>(
        source: &str,
        f: impl Fn(&Interpreter<&[u8], Sink>, &Expr) -> T,
    ) -> T {
        let line = format!(
            "var i : int := 7; var b : bool := true; var s : string := \"ab\"; print {source};"
        );
        let tokens = tokenize(&[line.as_str()]);
        let program = Parser::new(&tokens).parse().expect("test expression should parse");

        let mut interpreter = Interpreter::new(&b""[..], std::io::sink());
        let declarations = crate::ast::Statements::new(program.statements[..3].to_vec());
        interpreter.run(&declarations).unwrap();

        let StatementKind::Print { value } = &program.statements[3].kind else {
            panic!("expected print statement");
        };
        f(&interpreter, value)
    }

    fn value(source: &str) -> Option<Value> {
        eval(source, |interp, expr| interp.value_of(expr)).unwrap()
    }

    fn text(source: &str) -> Result<String, SemanticError> {
        eval(source, |interp, expr| interp.eval_string(expr))
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(value("(1 + 3) * (4 / 2)"), Some(Value::Int(8)));
        assert_eq!(value("i - 10"), Some(Value::Int(-3)));
        assert_eq!(value("7 / 2"), Some(Value::Int(3)));
        assert_eq!(value("0 - 7 "), Some(Value::Int(-7)));
        assert_eq!(value("(0 - 7) / 2"), Some(Value::Int(-3)));
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(value("i > 2"), Some(Value::Bool(true)));
        assert_eq!(value("i <= 6"), Some(Value::Bool(false)));
        assert_eq!(value("i = 7"), Some(Value::Bool(true)));
        assert_eq!(value("s = \"ab\""), Some(Value::Bool(true)));
        assert_eq!(value("s != \"ab\""), Some(Value::Bool(false)));
        assert_eq!(value("b != false"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_and_is_inequality() {
        assert_eq!(value("true & true"), Some(Value::Bool(false)));
        assert_eq!(value("true & false"), Some(Value::Bool(true)));
        assert_eq!(value("!true & true"), Some(Value::Bool(true)));
        assert_eq!(value("false & false"), Some(Value::Bool(false)));
    }

    #[test]
    fn test_concatenation() {
        assert_eq!(text("\"t\" + 2"), Ok("t2".to_string()));
        assert_eq!(text("s + b"), Ok("abtrue".to_string()));
        assert_eq!(text("1 + 2"), Ok("3".to_string()));
        assert_eq!(text("(1 < 2) + \"!\""), Ok("true!".to_string()));
        assert_eq!(value("(\"t\" + 2) = \"t2\""), Some(Value::Bool(true)));
    }

    #[test]
    fn test_print_conversion() {
        assert_eq!(text("b"), Ok("true".to_string()));
        assert_eq!(text("i"), Ok("7".to_string()));
        assert_eq!(text("\"a\\tb\""), Ok("a\\tb".to_string()));
    }

    #[test]
    fn test_invalid_operands() {
        let err = text("s - 1").unwrap_err();
        assert!(matches!(
            err,
            SemanticError::InvalidBinaryOp {
                op: crate::ast::BinaryOp::Subtract,
                left_type: VarType::Str,
                right_type: VarType::Int,
                ..
            }
        ));
        // Reported at the left operand
        assert_eq!(err.span().column, 71);
    }

    #[test]
    fn test_cross_type_equality_fails() {
        assert_eq!(value("i = \"7\""), None);
        assert!(matches!(
            text("i = \"7\""),
            Err(SemanticError::InvalidBinaryOp { left_type: VarType::Int, right_type: VarType::Str, .. })
        ));
    }

    #[test]
    fn test_nested_operand_error_is_innermost() {
        let err = text("(s * 2) + 1").unwrap_err();
        assert!(matches!(
            err,
            SemanticError::InvalidBinaryOp { op: crate::ast::BinaryOp::Multiply, .. }
        ));
    }

    #[test]
    fn test_type_mismatch() {
        let err = eval("i < 2", |interp, expr| interp.eval_int(expr)).unwrap_err();
        assert!(matches!(
            err,
            SemanticError::TypeMismatch { expected: VarType::Int, found: VarType::Bool, .. }
        ));
        let err = eval("\"x\"", |interp, expr| interp.eval_bool(expr)).unwrap_err();
        assert!(matches!(
            err,
            SemanticError::TypeMismatch { expected: VarType::Bool, found: VarType::Str, .. }
        ));
    }

    #[test]
    fn test_arithmetic_faults() {
        assert!(matches!(text("i / 0"), Err(SemanticError::DivisionByZero { .. })));
        assert!(matches!(
            text("9223372036854775807 + 1"),
            Err(SemanticError::Overflow { .. })
        ));
    }

    #[test]
    fn test_eval_as_declared_type() {
        let v = eval("\"n\" + i", |interp, expr| interp.eval_as(expr, VarType::Str));
        assert_eq!(v, Ok(Value::Str("n7".to_string())));
        let v = eval("i * 2", |interp, expr| interp.eval_as(expr, VarType::Int));
        assert_eq!(v, Ok(Value::Int(14)));
        let v = eval("i * 2", |interp, expr| interp.eval_as(expr, VarType::Str));
        assert_eq!(v, Ok(Value::Str("14".to_string())));
    }
}
