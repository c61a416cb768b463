//! Lode binds strongly typed host values to the positional parameters of a compiled
//! SQLite statement and reads strongly typed values back from its result rows.
//!
//! ```rust
//! use lode::{Connection, TransactionType};
//! # fn main() -> lode::Result<()> {
//! let connection = Connection::open_in_memory()?;
//! connection.execute_batch("CREATE TABLE book(title TEXT NOT NULL, year INTEGER);")?;
//! let transaction = connection.transaction(TransactionType::Immediate)?;
//! {
//!     let mut insert = transaction.prepare("INSERT INTO book VALUES (?, ?)")?;
//!     insert.execute(("Dune", 1965))?;
//!     insert.execute(("Untitled", None::<i32>))?;
//! }
//! transaction.commit()?;
//! let mut select = connection.prepare("SELECT title, year FROM book ORDER BY title")?;
//! select.execute(())?;
//! let books = select.rows::<(String, Option<i32>)>().collect::<lode::Result<Vec<_>>>()?;
//! assert_eq!(
//!     books,
//!     vec![(String::from("Dune"), Some(1965)), (String::from("Untitled"), None)]
//! );
//! # Ok(())
//! # }
//! ```
pub use lode_core::*;
pub use lode_sqlite::*;
