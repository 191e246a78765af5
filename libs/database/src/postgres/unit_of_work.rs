use sea_orm::{DatabaseTransaction, DbErr, TransactionTrait};
use tracing::warn;

/// One atomic scope of writes.
///
/// Begun per operation and consumed by [`UnitOfWork::finish`], so it is
/// committed or rolled back exactly once. Dropping it without finishing
/// rolls back as well.
///
/// ```ignore
/// let uow = UnitOfWork::begin(&db).await?;
/// let outcome = insert_lease(uow.conn(), new_lease).await;
/// uow.finish(outcome).await
/// ```
pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    pub async fn begin<C>(db: &C) -> Result<Self, DbErr>
    where
        C: TransactionTrait<Transaction = DatabaseTransaction>,
    {
        Ok(Self {
            txn: db.begin().await?,
        })
    }

    /// Connection to run guard queries and writes on.
    pub fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Commit on `Ok`, roll back on `Err`. A failed commit is returned as the error.
    pub async fn finish<T, E>(self, outcome: Result<T, E>) -> Result<T, E>
    where
        E: From<DbErr>,
    {
        match outcome {
            Ok(value) => {
                self.txn.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.txn.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }
}
