//! Expression evaluation against a record.

use chrono::{FixedOffset, Offset, Utc};
use quarry_ast::{BinaryOperator, Expr, UnaryOperator};
use quarry_types::compare::compare_non_null;
use quarry_types::{Ternary, Value};
use quarry_view::{Header, Record};

use crate::error::{ExecResult, ExecutorError};

/// Resolves expressions to values.
///
/// `row_ctx` is `None` for constant arguments such as a `listagg` separator;
/// field references then fail with `FieldNotFound`. Implementations must
/// surface lookup failures as `FieldNotFound` or `AmbiguousField`.
pub trait Evaluate {
    fn evaluate(&self, expr: &Expr, row_ctx: Option<(&Header, &Record)>) -> ExecResult<Value>;
}

/// The default evaluator.
#[derive(Debug, Clone)]
pub struct RecordEvaluator {
    location: FixedOffset,
}

impl RecordEvaluator {
    pub fn new(location: FixedOffset) -> Self {
        Self { location }
    }

    pub fn location(&self) -> FixedOffset {
        self.location
    }
}

impl Default for RecordEvaluator {
    fn default() -> Self {
        Self {
            location: Utc.fix(),
        }
    }
}

impl Evaluate for RecordEvaluator {
    fn evaluate(&self, expr: &Expr, row_ctx: Option<(&Header, &Record)>) -> ExecResult<Value> {
        eval_expr(expr, row_ctx, self.location)
    }
}

pub fn eval_expr(
    expr: &Expr,
    row_ctx: Option<(&Header, &Record)>,
    location: FixedOffset,
) -> ExecResult<Value> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::DatetimeLiteral(text) => Value::datetime_from_str(text, location)
            .ok_or_else(|| ExecutorError::evaluation(format!("invalid datetime literal '{text}'"))),
        Expr::Paren(inner) => eval_expr(inner, row_ctx, location),
        Expr::ColumnRef { table, column } => {
            let Some((header, record)) = row_ctx else {
                return Err(ExecutorError::FieldNotFound(expr.to_string()));
            };
            let idx = header.index_of(table.as_deref(), column)?;
            record
                .get(idx)
                .cloned()
                .ok_or_else(|| ExecutorError::evaluation(format!("record is missing field {expr}")))
        }
        Expr::AllColumns => Err(ExecutorError::evaluation(
            "'*' cannot be used as a scalar expression",
        )),
        Expr::UnaryOp { op, expr } => {
            let value = eval_expr(expr, row_ctx, location)?;
            match op {
                UnaryOperator::Negate => negate(value),
                UnaryOperator::Not => Ok(Value::Ternary(!value.as_ternary())),
            }
        }
        Expr::BinaryOp { left, op, right } => {
            let lhs = eval_expr(left, row_ctx, location)?;
            let rhs = eval_expr(right, row_ctx, location)?;
            eval_binary_op(&lhs, *op, &rhs)
        }
        Expr::IsNull { expr, negated } => {
            let value = eval_expr(expr, row_ctx, location)?;
            Ok(Value::Ternary(Ternary::from(value.is_null() != *negated)))
        }
    }
}

fn negate(value: Value) -> ExecResult<Value> {
    match value {
        Value::Integer(i) => Ok(i
            .checked_neg()
            .map(Value::Integer)
            .unwrap_or(Value::Float(-(i as f64)))),
        Value::Float(f) => Ok(Value::Float(-f)),
        Value::Null(_) => Ok(Value::NULL),
        other => other
            .as_f64()
            .map(|f| Value::Float(-f))
            .ok_or_else(|| ExecutorError::evaluation("cannot negate non-numeric value")),
    }
}

fn eval_binary_op(lhs: &Value, op: BinaryOperator, rhs: &Value) -> ExecResult<Value> {
    use BinaryOperator::*;

    match op {
        Add | Subtract | Multiply | Divide | Modulo => eval_numeric_binary(lhs, op, rhs),
        Eq => Ok(compare_ternary(lhs, rhs, |ord| ord.is_eq())),
        NotEq => Ok(compare_ternary(lhs, rhs, |ord| ord.is_ne())),
        Lt => Ok(compare_ternary(lhs, rhs, |ord| ord.is_lt())),
        LtEq => Ok(compare_ternary(lhs, rhs, |ord| ord.is_le())),
        Gt => Ok(compare_ternary(lhs, rhs, |ord| ord.is_gt())),
        GtEq => Ok(compare_ternary(lhs, rhs, |ord| ord.is_ge())),
        And => Ok(Value::Ternary(lhs.as_ternary().and(rhs.as_ternary()))),
        Or => Ok(Value::Ternary(lhs.as_ternary().or(rhs.as_ternary()))),
        Concat => match (lhs.as_text(), rhs.as_text()) {
            (Some(l), Some(r)) => Ok(Value::String(format!("{l}{r}"))),
            _ => Ok(Value::NULL),
        },
    }
}

/// Comparison with NULL is UNKNOWN.
fn compare_ternary(lhs: &Value, rhs: &Value, test: impl Fn(std::cmp::Ordering) -> bool) -> Value {
    if lhs.is_null() || rhs.is_null() {
        return Value::Ternary(Ternary::Unknown);
    }
    Value::Ternary(Ternary::from(test(compare_non_null(lhs, rhs))))
}

fn eval_numeric_binary(lhs: &Value, op: BinaryOperator, rhs: &Value) -> ExecResult<Value> {
    if lhs.is_null() || rhs.is_null() {
        return Ok(Value::NULL);
    }

    if let (Value::Integer(a), Value::Integer(b)) = (lhs, rhs) {
        if let Some(out) = eval_integer_binary(*a, op, *b)? {
            return Ok(out);
        }
    }

    let (left, right) = numeric_operands(lhs, rhs)?;
    let out = match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Subtract => left - right,
        BinaryOperator::Multiply => left * right,
        BinaryOperator::Divide => {
            if right == 0.0 {
                return Err(ExecutorError::evaluation("division by zero"));
            }
            left / right
        }
        BinaryOperator::Modulo => {
            if right == 0.0 {
                return Err(ExecutorError::evaluation("modulo by zero"));
            }
            left % right
        }
        _ => unreachable!("non-arithmetic operator passed to eval_numeric_binary"),
    };
    Ok(Value::Float(out))
}

/// Integer arithmetic; `None` when the result does not fit and the float path
/// should be used instead.
fn eval_integer_binary(a: i64, op: BinaryOperator, b: i64) -> ExecResult<Option<Value>> {
    let out = match op {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Subtract => a.checked_sub(b),
        BinaryOperator::Multiply => a.checked_mul(b),
        BinaryOperator::Divide => {
            if b == 0 {
                return Err(ExecutorError::evaluation("division by zero"));
            }
            match a.checked_rem(b) {
                Some(0) => a.checked_div(b),
                Some(_) => return Ok(Some(Value::Float(a as f64 / b as f64))),
                None => None,
            }
        }
        BinaryOperator::Modulo => {
            if b == 0 {
                return Err(ExecutorError::evaluation("modulo by zero"));
            }
            a.checked_rem(b)
        }
        _ => unreachable!("non-arithmetic operator passed to eval_integer_binary"),
    };
    Ok(out.map(Value::Integer))
}

fn numeric_operands(lhs: &Value, rhs: &Value) -> ExecResult<(f64, f64)> {
    let left = lhs
        .as_f64()
        .ok_or_else(|| ExecutorError::evaluation(format!("expected numeric value, got {lhs}")))?;
    let right = rhs
        .as_f64()
        .ok_or_else(|| ExecutorError::evaluation(format!("expected numeric value, got {rhs}")))?;
    Ok((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Value {
        Value::Integer(v)
    }

    fn col(name: &str) -> Expr {
        Expr::column(name)
    }

    fn bin(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
        Expr::binary(left, op, right)
    }

    fn eval(expr: &Expr) -> ExecResult<Value> {
        RecordEvaluator::default().evaluate(expr, None)
    }

    #[test]
    fn arithmetic_and_comparison() {
        let expr = bin(
            bin(Expr::literal(7i64), BinaryOperator::Subtract, Expr::literal(2i64)),
            BinaryOperator::Eq,
            Expr::literal(5i64),
        );
        assert_eq!(eval(&expr).unwrap(), Value::Ternary(Ternary::True));

        let div = bin(Expr::literal(7i64), BinaryOperator::Divide, Expr::literal(2i64));
        assert_eq!(eval(&div).unwrap(), Value::Float(3.5));
        let div = bin(Expr::literal(8i64), BinaryOperator::Divide, Expr::literal(2i64));
        assert_eq!(eval(&div).unwrap(), int(4));
        let mixed = bin(Expr::literal("1.5"), BinaryOperator::Add, Expr::literal(1i64));
        assert_eq!(eval(&mixed).unwrap(), Value::Float(2.5));
    }

    #[test]
    fn overflow_falls_back_to_float() {
        let expr = bin(Expr::literal(i64::MAX), BinaryOperator::Add, Expr::literal(1i64));
        assert!(matches!(eval(&expr).unwrap(), Value::Float(_)));
    }

    #[test]
    fn division_by_zero_errors() {
        let expr = bin(Expr::literal(1i64), BinaryOperator::Divide, Expr::literal(0i64));
        assert_eq!(eval(&expr).unwrap_err().to_string(), "division by zero");
    }

    #[test]
    fn nulls_propagate_through_three_valued_logic() {
        let cmp = bin(Expr::null(), BinaryOperator::Eq, Expr::literal(1i64));
        assert_eq!(eval(&cmp).unwrap(), Value::Ternary(Ternary::Unknown));

        let and = bin(cmp.clone(), BinaryOperator::And, Expr::literal(false));
        assert_eq!(eval(&and).unwrap(), Value::Ternary(Ternary::False));

        let or = bin(cmp, BinaryOperator::Or, Expr::literal(true));
        assert_eq!(eval(&or).unwrap(), Value::Ternary(Ternary::True));

        let sum = bin(Expr::null(), BinaryOperator::Add, Expr::literal(1i64));
        assert!(eval(&sum).unwrap().is_null());

        let not = Expr::UnaryOp {
            op: UnaryOperator::Not,
            expr: Box::new(Expr::null()),
        };
        assert_eq!(eval(&not).unwrap(), Value::Ternary(Ternary::Unknown));
    }

    #[test]
    fn resolves_fields_from_row_context() {
        let header = Header::new("t", &["a", "b"]);
        let record = Record::new(vec![int(3), int(4)]);
        let expr = bin(col("a"), BinaryOperator::Multiply, Expr::qualified("t", "b"));
        let out = RecordEvaluator::default()
            .evaluate(&expr, Some((&header, &record)))
            .unwrap();
        assert_eq!(out, int(12));
    }

    #[test]
    fn unknown_and_ambiguous_fields() {
        let header = quarry_view::Header::from_fields(vec![
            quarry_view::HeaderField::new("t1", "id"),
            quarry_view::HeaderField::new("t2", "id"),
        ]);
        let record = Record::new(vec![int(1), int(2)]);
        let evaluator = RecordEvaluator::default();

        let err = evaluator
            .evaluate(&col("missing"), Some((&header, &record)))
            .unwrap_err();
        assert_eq!(err, ExecutorError::FieldNotFound("missing".to_string()));

        let err = evaluator.evaluate(&col("id"), Some((&header, &record))).unwrap_err();
        assert_eq!(err, ExecutorError::AmbiguousField("id".to_string()));

        let err = evaluator.evaluate(&col("id"), None).unwrap_err();
        assert_eq!(err, ExecutorError::FieldNotFound("id".to_string()));
    }

    #[test]
    fn wildcard_is_not_a_scalar() {
        let err = eval(&Expr::AllColumns).unwrap_err();
        assert_eq!(err.to_string(), "'*' cannot be used as a scalar expression");
    }

    #[test]
    fn concat_and_is_null() {
        let expr = bin(Expr::literal("a"), BinaryOperator::Concat, Expr::literal(1i64));
        assert_eq!(eval(&expr).unwrap(), Value::string("a1"));

        let expr = Expr::IsNull {
            expr: Box::new(Expr::null()),
            negated: false,
        };
        assert_eq!(eval(&expr).unwrap(), Value::Ternary(Ternary::True));
    }

    #[test]
    fn datetime_literals_use_location() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let evaluator = RecordEvaluator::new(tokyo);
        let value = evaluator
            .evaluate(&Expr::DatetimeLiteral("2012-01-01 00:00:00".to_string()), None)
            .unwrap();
        match value {
            Value::Datetime(dt) => assert_eq!(dt.offset(), &tokyo),
            other => panic!("expected datetime, got {other}"),
        }
        assert!(evaluator
            .evaluate(&Expr::DatetimeLiteral("garbage".to_string()), None)
            .is_err());
    }
}
