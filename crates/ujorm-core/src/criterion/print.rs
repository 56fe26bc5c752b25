use super::Operand;
use crate::meta::Value;
use std::fmt;

/// Renders the right-hand side of a criterion.
///
/// Strings are quoted, list items are comma joined and an entity shows its
/// first key, `Person[name="Pavel"]`. Keys print their name unquoted.
pub(crate) struct PrintOperand<'a>(pub(crate) &'a Operand);

/// Renders the raw text of a native SQL condition.
pub(crate) struct RawSql<'a>(&'a Operand);

pub(crate) fn raw_sql(operand: &Operand) -> RawSql<'_> {
    RawSql(operand)
}

impl fmt::Display for PrintOperand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Operand::Value(value) => print_value(value, f),
            Operand::Key(key) => fmt::Display::fmt(key, f),
            Operand::Lazy(lazy) => print_value(&lazy.get(), f),
            Operand::Template(template) => f.write_str(template.template()),
        }
    }
}

impl fmt::Display for RawSql<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Operand::Value(Value::String(sql)) => f.write_str(sql),
            Operand::Template(template) => f.write_str(template.template()),
            operand => fmt::Display::fmt(&PrintOperand(operand), f),
        }
    }
}

fn print_value(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::String(text) => write!(f, "\"{text}\""),
        Value::List(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                print_value(item, f)?;
            }
            Ok(())
        }
        Value::Entity(entity) => {
            f.write_str(entity.domain().simple_name())?;
            f.write_str("[")?;
            if let Some(first) = entity.keys().first() {
                write!(f, "{first}=")?;
                print_value(&first.get_value(&**entity), f)?;
            }
            f.write_str("]")
        }
        value => fmt::Display::fmt(value, f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_strings_and_joins_lists() {
        let operand = Operand::Value(Value::from(vec!["a", "b"]));
        assert_eq!(PrintOperand(&operand).to_string(), r#""a", "b""#);

        let operand = Operand::Value(Value::I64(7));
        assert_eq!(PrintOperand(&operand).to_string(), "7");

        let operand = Operand::Value(Value::Null);
        assert_eq!(PrintOperand(&operand).to_string(), "null");
    }

    #[test]
    fn raw_sql_is_not_quoted() {
        let operand = Operand::Value(Value::from("a.b = 1"));
        assert_eq!(raw_sql(&operand).to_string(), "a.b = 1");
    }
}
