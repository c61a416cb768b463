use crate::TransactionType;

/// Renders the fixed statements the library dispatches on behalf of the caller.
///
/// Drivers can override any method to match the dialect of their engine.
pub trait SqlWriter {
    /// Emit BEGIN statement.
    fn write_transaction_begin(&self, out: &mut String, kind: TransactionType) {
        out.push_str("BEGIN ");
        out.push_str(kind.as_str());
        out.push_str(" TRANSACTION;");
    }

    /// Emit COMMIT statement.
    fn write_transaction_commit(&self, out: &mut String) {
        out.push_str("COMMIT TRANSACTION;");
    }

    /// Emit ROLLBACK statement.
    fn write_transaction_rollback(&self, out: &mut String) {
        out.push_str("ROLLBACK TRANSACTION;");
    }
}

#[cfg(test)]
mod tests {
    use super::SqlWriter;
    use crate::TransactionType;

    struct Writer;
    impl SqlWriter for Writer {}

    #[test]
    fn transaction_statements() {
        let writer = Writer;
        let mut out = String::new();
        writer.write_transaction_begin(&mut out, TransactionType::Immediate);
        assert_eq!(out, "BEGIN IMMEDIATE TRANSACTION;");
        out.clear();
        writer.write_transaction_begin(&mut out, TransactionType::default());
        assert_eq!(out, "BEGIN DEFERRED TRANSACTION;");
        out.clear();
        writer.write_transaction_commit(&mut out);
        assert_eq!(out, "COMMIT TRANSACTION;");
        out.clear();
        writer.write_transaction_rollback(&mut out);
        assert_eq!(out, "ROLLBACK TRANSACTION;");
    }
}
