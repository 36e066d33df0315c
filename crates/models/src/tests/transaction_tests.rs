use anyhow::Result;
use chrono::Utc;
use sea_orm::{EntityTrait, TransactionTrait};

use crate::post::PostFields;
use crate::{post, tag};

use super::{test_db, unique};

fn fields(url: &str) -> PostFields {
    PostFields {
        title: "Tx".into(),
        author: "tester".into(),
        url: url.into(),
        content: "content".into(),
        creation_time: Utc::now().into(),
        category_id: None,
    }
}

/// Test basic transaction commit
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };

    let txn = db.begin().await?;
    let created = post::create(&txn, fields(&unique("tx-commit"))).await?;
    txn.commit().await?;

    let found = post::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());

    post::delete(&db, created.id).await?;
    Ok(())
}

/// Test transaction rollback
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };

    let txn = db.begin().await?;
    let created = post::create(&txn, fields(&unique("tx-rollback"))).await?;
    let t = tag::create(&txn, &unique("tx-tag"), &unique("TxTag")).await?;
    txn.rollback().await?;

    assert!(post::Entity::find_by_id(created.id).one(&db).await?.is_none());
    assert!(tag::Entity::find_by_id(t.id).one(&db).await?.is_none());
    Ok(())
}

/// A failing statement inside the transaction leaves nothing behind once dropped
#[tokio::test]
async fn test_transaction_dropped_on_error() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };

    let url = unique("tx-dup");
    let first_id = {
        let txn = db.begin().await?;
        let first = post::create(&txn, fields(&url)).await?;
        // same url violates the unique index
        assert!(post::create(&txn, fields(&url)).await.is_err());
        first.id
        // txn dropped without commit -> rollback
    };

    assert!(post::Entity::find_by_id(first_id).one(&db).await?.is_none());
    Ok(())
}
