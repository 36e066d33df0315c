//! Unit of work: one database transaction around a group of repository calls.
//!
//! The closure runs against the transaction; `Ok` commits, `Err` rolls back
//! and the closure's own error is returned unchanged.

use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionError, TransactionTrait};
use tracing::debug;

use crate::errors::ServiceError;

pub type UowFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, ServiceError>> + Send + 'c>>;

pub async fn run<F, T>(db: &DatabaseConnection, work: F) -> Result<T, ServiceError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> UowFuture<'c, T> + Send,
    T: Send,
{
    let res = db.transaction::<_, T, ServiceError>(work).await;
    match res {
        Ok(v) => Ok(v),
        Err(TransactionError::Connection(e)) => Err(ServiceError::Db(e.to_string())),
        Err(TransactionError::Transaction(e)) => {
            debug!(error = %e, "unit of work rolled back");
            Err(e)
        }
    }
}
