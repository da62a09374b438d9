use std::fmt::{Display, Formatter};

use quarry_types::{NullsOrder, SortDirection, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    /// Datetime text, interpreted in the evaluator's location.
    DatetimeLiteral(String),
    ColumnRef {
        table: Option<String>,
        column: String,
    },
    /// `*`, only meaningful as the argument of `count`.
    AllColumns,
    Paren(Box<Expr>),
    UnaryOp {
        op: UnaryOperator,
        expr: Box<Expr>,
    },
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    IsNull {
        expr: Box<Expr>,
        negated: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Concat,
}

impl Expr {
    pub fn column(column: impl Into<String>) -> Self {
        Expr::ColumnRef {
            table: None,
            column: column.into(),
        }
    }

    pub fn qualified(table: impl Into<String>, column: impl Into<String>) -> Self {
        Expr::ColumnRef {
            table: Some(table.into()),
            column: column.into(),
        }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn null() -> Self {
        Expr::Literal(Value::NULL)
    }

    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Expr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// One ORDER BY item. `nulls: None` defers to the engine default.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub expr: Expr,
    pub direction: SortDirection,
    pub nulls: Option<NullsOrder>,
}

impl OrderItem {
    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            direction: SortDirection::Asc,
            nulls: None,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            direction: SortDirection::Desc,
            nulls: None,
        }
    }

    pub fn nulls(mut self, nulls: NullsOrder) -> Self {
        self.nulls = Some(nulls);
        self
    }
}

/// The `OVER (...)` part of an analytic function call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticClause {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticFunction {
    pub name: String,
    pub distinct: bool,
    pub args: Vec<Expr>,
    pub ignore_nulls: bool,
    pub clause: AnalyticClause,
}

impl AnalyticFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            distinct: false,
            args: Vec::new(),
            ignore_nulls: false,
            clause: AnalyticClause::default(),
        }
    }

    pub fn args(mut self, args: Vec<Expr>) -> Self {
        self.args = args;
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn ignore_nulls(mut self) -> Self {
        self.ignore_nulls = true;
        self
    }

    pub fn partition_by(mut self, exprs: Vec<Expr>) -> Self {
        self.clause.partition_by = exprs;
        self
    }

    pub fn order_by(mut self, items: Vec<OrderItem>) -> Self {
        self.clause.order_by = items;
        self
    }
}

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{value}"),
            Expr::DatetimeLiteral(text) => write!(f, "'{text}'"),
            Expr::ColumnRef {
                table: Some(table),
                column,
            } => write!(f, "{table}.{column}"),
            Expr::ColumnRef {
                table: None,
                column,
            } => f.write_str(column),
            Expr::AllColumns => f.write_str("*"),
            Expr::Paren(inner) => write!(f, "({inner})"),
            Expr::UnaryOp {
                op: UnaryOperator::Negate,
                expr,
            } => write!(f, "-{expr}"),
            Expr::UnaryOp {
                op: UnaryOperator::Not,
                expr,
            } => write!(f, "NOT {expr}"),
            Expr::BinaryOp { left, op, right } => write!(f, "{left} {op} {right}"),
            Expr::IsNull {
                expr,
                negated: false,
            } => write!(f, "{expr} IS NULL"),
            Expr::IsNull {
                expr,
                negated: true,
            } => write!(f, "{expr} IS NOT NULL"),
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Eq => "=",
            BinaryOperator::NotEq => "<>",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Concat => "||",
        };
        f.write_str(s)
    }
}

impl Display for OrderItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expr)?;
        if self.direction == SortDirection::Desc {
            f.write_str(" DESC")?;
        }
        match self.nulls {
            Some(NullsOrder::First) => f.write_str(" NULLS FIRST"),
            Some(NullsOrder::Last) => f.write_str(" NULLS LAST"),
            Some(NullsOrder::Low) | None => Ok(()),
        }
    }
}

impl Display for AnalyticClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.partition_by.is_empty() {
            f.write_str("PARTITION BY ")?;
            write_list(f, &self.partition_by)?;
        }
        if !self.order_by.is_empty() {
            if !self.partition_by.is_empty() {
                f.write_str(" ")?;
            }
            f.write_str("ORDER BY ")?;
            write_list(f, &self.order_by)?;
        }
        Ok(())
    }
}

impl Display for AnalyticFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write_list(f, &self.args)?;
        f.write_str(")")?;
        if self.ignore_nulls {
            f.write_str(" IGNORE NULLS")?;
        }
        write!(f, " OVER ({})", self.clause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_expressions() {
        let expr = Expr::binary(
            Expr::qualified("t", "a"),
            BinaryOperator::Add,
            Expr::Paren(Box::new(Expr::literal(1i64))),
        );
        assert_eq!(expr.to_string(), "t.a + (1)");
        assert_eq!(Expr::literal("x").to_string(), "'x'");
        assert_eq!(
            Expr::IsNull {
                expr: Box::new(Expr::column("c")),
                negated: true
            }
            .to_string(),
            "c IS NOT NULL"
        );
    }

    #[test]
    fn renders_bare_function() {
        let func = AnalyticFunction::new("row_number");
        assert_eq!(func.to_string(), "row_number() OVER ()");
    }

    #[test]
    fn renders_full_function() {
        let func = AnalyticFunction::new("listagg")
            .distinct()
            .args(vec![Expr::column("column2"), Expr::literal(",")])
            .partition_by(vec![Expr::column("column1")])
            .order_by(vec![
                OrderItem::desc(Expr::column("column2")).nulls(NullsOrder::Last),
                OrderItem::asc(Expr::column("column3")),
            ]);
        assert_eq!(
            func.to_string(),
            "listagg(DISTINCT column2, ',') OVER (PARTITION BY column1 ORDER BY column2 DESC NULLS LAST, column3)"
        );
    }

    #[test]
    fn renders_ignore_nulls_and_wildcard() {
        let func = AnalyticFunction::new("first_value")
            .args(vec![Expr::column("v")])
            .ignore_nulls()
            .order_by(vec![OrderItem::asc(Expr::column("k"))]);
        assert_eq!(func.to_string(), "first_value(v) IGNORE NULLS OVER (ORDER BY k)");

        let count = AnalyticFunction::new("count").args(vec![Expr::AllColumns]);
        assert_eq!(count.to_string(), "count(*) OVER ()");
    }
}
