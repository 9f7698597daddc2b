//! Header and configuration checks that report every problem at once.

use crate::error::IoError;

/// Problems found so far; becomes one [`IoError::Validation`].
#[derive(Debug, Default)]
pub(crate) struct Problems(Vec<String>);

impl Problems {
    pub(crate) fn note(&mut self, msg: impl Into<String>) {
        self.0.push(msg.into());
    }

    /// Notes `msg()` unless `ok` holds.
    pub(crate) fn check(&mut self, ok: bool, msg: impl FnOnce() -> String) {
        if !ok {
            self.0.push(msg());
        }
    }

    pub(crate) fn into_result(self) -> Result<(), IoError> {
        match self.0.len() {
            0 => Ok(()),
            count => Err(IoError::Validation {
                count,
                details: self.0.join("; "),
            }),
        }
    }
}

/// Every name of `required` absent from `header`.
pub(crate) fn require_columns(header: &[String], required: &[&str]) -> Problems {
    let mut p = Problems::default();
    for name in required {
        p.check(header.iter().any(|h| h == name), || {
            format!("missing required column '{name}'")
        });
    }
    p
}
