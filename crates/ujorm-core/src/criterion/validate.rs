use super::Criterion;
use crate::{meta::AsEntity, Error, Result};
use std::fmt;

impl<E: ?Sized + AsEntity> Criterion<E> {
    /// Fails with a condition failed error when the entity does not satisfy
    /// the criterion.
    pub fn validate(&self, entity: &E) -> Result<()> {
        if self.evaluate(entity)? {
            return Ok(());
        }

        Err(Error::condition_failed(format!(
            "Invalid condition ({self}) for the {:?}",
            entity.as_entity()
        )))
    }

    /// Like [`Criterion::validate`] with a custom message. Each `{}` of the
    /// template takes the next argument.
    pub fn validate_with(
        &self,
        entity: &E,
        template: &str,
        args: &[&dyn fmt::Display],
    ) -> Result<()> {
        if self.evaluate(entity)? {
            return Ok(());
        }

        Err(Error::condition_failed(format_template(template, args)))
    }
}

/// Placeholders without an argument are kept verbatim.
fn format_template(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut ret = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;

    while let Some(pos) = rest.find("{}") {
        ret.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => ret.push_str(&arg.to_string()),
            None => ret.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }

    ret.push_str(rest);
    ret
}

#[cfg(test)]
mod tests {
    use super::format_template;

    #[test]
    fn fills_placeholders_in_order() {
        assert_eq!(
            format_template("cash {} must be below {}", &[&25, &"limit"]),
            "cash 25 must be below limit"
        );
    }

    #[test]
    fn keeps_unmatched_placeholders() {
        assert_eq!(format_template("{} and {}", &[&1]), "1 and {}");
        assert_eq!(format_template("no placeholder", &[&1]), "no placeholder");
    }
}
