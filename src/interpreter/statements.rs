//! Statement execution.

use std::io::{BufRead, Write};

use crate::ast::{Expr, Span, Statement, StatementKind, Statements, VarType};

use super::{ExecError, Interpreter, SemanticError, Value};

impl<R: BufRead, W: Write> Interpreter<R, W> {
    // ==================== Sequences ====================

    /// Executes statements in order.
    ///
    /// A semantic error abandons only the statement it occurred in and is
    /// recorded. Assertion failures and I/O errors end the sequence.
    pub fn execute_statements(&mut self, statements: &Statements) -> Result<(), ExecError> {
        for statement in statements {
            log::trace!("executing statement on line {}", statement.span.line);
            match self.execute_statement(statement) {
                Ok(()) => {}
                Err(ExecError::Semantic(error)) => {
                    log::debug!("line {}: {error}", error.span().line);
                    self.errors.push(error);
                }
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    /// Executes a single statement.
    pub fn execute_statement(&mut self, statement: &Statement) -> Result<(), ExecError> {
        match &statement.kind {
            StatementKind::VarInit {
                name,
                var_type,
                init,
            } => {
                let value = match init {
                    Some(expr) => self.eval_as(expr, *var_type),
                    None => Ok(Value::zero(*var_type)),
                };
                match value {
                    Ok(value) => {
                        self.variables.insert(name.clone(), value);
                    }
                    Err(error) => {
                        // A failed initializer still declares the variable
                        self.variables.insert(name.clone(), Value::zero(*var_type));
                        return Err(error.into());
                    }
                }
            }

            StatementKind::Assign { name, value } => {
                let var_type = self.lookup(name, statement.span)?.var_type();
                let value = self.eval_as(value, var_type)?;
                self.variables.insert(name.clone(), value);
            }

            StatementKind::Read { name } => self.execute_read(name, statement.span)?,

            StatementKind::Print { value } => {
                let text = self.eval_string(value)?;
                self.output.write_all(text.as_bytes())?;
            }

            StatementKind::Assert { condition } => {
                if !self.eval_bool(condition)? {
                    return Err(ExecError::AssertionFailed {
                        span: statement.span,
                    });
                }
            }

            StatementKind::For {
                variable,
                start,
                end,
                body,
            } => self.execute_for(variable, start, end, body, statement.span)?,
        }
        Ok(())
    }

    // ==================== READ ====================

    /// Reads one line of input into `name`, parsed as the variable's type.
    fn execute_read(&mut self, name: &str, span: Span) -> Result<(), ExecError> {
        let var_type = self.lookup(name, span)?.var_type();

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(SemanticError::InputExhausted { span }.into());
        }
        let bytes = line.strip_suffix(b"\n").unwrap_or(&line);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);

        let invalid = |text: String| SemanticError::InvalidInput {
            text,
            expected: var_type,
            span,
        };
        let text = std::str::from_utf8(bytes)
            .map_err(|_| invalid(String::from_utf8_lossy(bytes).into_owned()))?;
        let value = parse_input(text, var_type).ok_or_else(|| invalid(text.to_string()))?;
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    // ==================== FOR Loop ====================

    /// Runs `body` once for each value of `variable` from `start` to `end`
    /// inclusive. Both bounds are evaluated once, before the first iteration.
    fn execute_for(
        &mut self,
        variable: &str,
        start: &Expr,
        end: &Expr,
        body: &Statements,
        span: Span,
    ) -> Result<(), ExecError> {
        let var_type = self.lookup(variable, span)?.var_type();
        if var_type != VarType::Int {
            return Err(SemanticError::type_mismatch(VarType::Int, var_type, span).into());
        }

        let first = self.eval_int(start)?;
        let last = self.eval_int(end)?;
        log::trace!("loop over `{variable}` from {first} to {last}");

        for counter in first..=last {
            self.variables.insert(variable.to_string(), Value::Int(counter));
            self.execute_statements(body)?;
        }
        Ok(())
    }
}

/// Parses a line of input as a value of `var_type`.
fn parse_input(text: &str, var_type: VarType) -> Option<Value> {
    match var_type {
        VarType::Int => text.trim().parse().ok().map(Value::Int),
        VarType::Bool => {
            let text = text.trim();
            if text.eq_ignore_ascii_case("true") {
                Some(Value::Bool(true))
            } else if text.eq_ignore_ascii_case("false") {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
        VarType::Str => Some(Value::Str(text.to_string())),
    }
}
