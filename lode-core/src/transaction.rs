use crate::{Error, usage_error};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// Locking behavior of a transaction, see <https://www.sqlite.org/lang_transaction.html>.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// No lock is acquired until the database is first accessed.
    #[default]
    Deferred,
    /// A write transaction is started immediately.
    Immediate,
    /// Like `Immediate`, and prevents other connections from reading (outside WAL mode).
    Exclusive,
}

impl TransactionType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deferred => "DEFERRED",
            TransactionType::Immediate => "IMMEDIATE",
            TransactionType::Exclusive => "EXCLUSIVE",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DEFERRED" => Ok(TransactionType::Deferred),
            "IMMEDIATE" => Ok(TransactionType::Immediate),
            "EXCLUSIVE" => Ok(TransactionType::Exclusive),
            _ => Err(usage_error(format!("Invalid transaction type `{}`", value))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TransactionType;
    use crate::is_usage_error;

    #[test]
    fn parse_transaction_type() {
        assert_eq!(
            "deferred".parse::<TransactionType>().unwrap(),
            TransactionType::Deferred
        );
        assert_eq!(
            " Immediate ".parse::<TransactionType>().unwrap(),
            TransactionType::Immediate
        );
        assert_eq!(
            "EXCLUSIVE".parse::<TransactionType>().unwrap(),
            TransactionType::Exclusive
        );
        let error = "serializable".parse::<TransactionType>().unwrap_err();
        assert!(is_usage_error(&error));
    }

    #[test]
    fn default_is_deferred() {
        assert_eq!(TransactionType::default(), TransactionType::Deferred);
        assert_eq!(TransactionType::Exclusive.to_string(), "EXCLUSIVE");
    }
}
