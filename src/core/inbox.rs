//! Inbox business logic - Contact requests and abuse reports.
//!
//! Both arrive from the storefront; staff only move them through their
//! status and delete them. The `record_*`/`file_*` functions are what the
//! storefront side calls.

use crate::{
    entities::{ContactRequest, ContactStatus, Report, ReportStatus, contact_request, report},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Stores a contact form submission.
///
/// # Errors
/// Returns an error if the message is empty or the insert fails.
pub async fn record_contact_request(
    db: &DatabaseConnection,
    name: &str,
    phone: &str,
    message: &str,
) -> Result<contact_request::Model> {
    if message.trim().is_empty() {
        return Err(Error::validation("Contact message cannot be empty"));
    }
    let request = contact_request::ActiveModel {
        name: Set(name.trim().to_string()),
        phone: Set(crate::core::user::normalize_phone(phone)),
        message: Set(message.trim().to_string()),
        status: Set(ContactStatus::New),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    request.insert(db).await.map_err(Into::into)
}

/// Lists contact requests, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_contact_requests(
    db: &DatabaseConnection,
) -> Result<Vec<contact_request::Model>> {
    ContactRequest::find()
        .order_by_desc(contact_request::Column::CreatedAt)
        .order_by_desc(contact_request::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Moves a contact request to `status`.
///
/// # Errors
/// Returns an error if the request does not exist or the update fails.
pub async fn set_contact_status(
    db: &DatabaseConnection,
    id: i64,
    status: ContactStatus,
) -> Result<contact_request::Model> {
    let mut request: contact_request::ActiveModel = ContactRequest::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("contact request", id))?
        .into();
    request.status = Set(status);
    request.update(db).await.map_err(Into::into)
}

/// Deletes a contact request.
///
/// # Errors
/// Returns an error if no request has this id or the delete fails.
pub async fn delete_contact_request(db: &DatabaseConnection, id: i64) -> Result<()> {
    let deleted = ContactRequest::delete_by_id(id).exec(db).await?;
    if deleted.rows_affected == 0 {
        return Err(Error::not_found("contact request", id));
    }
    Ok(())
}

/// Files an abuse report against a product.
///
/// # Errors
/// Returns an error if the reason is empty or the insert fails.
pub async fn file_report(
    db: &DatabaseConnection,
    reporter_id: i64,
    product_id: i64,
    reason: &str,
) -> Result<report::Model> {
    if reason.trim().is_empty() {
        return Err(Error::validation("Report reason cannot be empty"));
    }
    let report = report::ActiveModel {
        reporter_id: Set(reporter_id),
        product_id: Set(product_id),
        reason: Set(reason.trim().to_string()),
        status: Set(ReportStatus::Open),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let filed = report.insert(db).await?;
    info!("Report {} filed against product {}", filed.id, product_id);
    Ok(filed)
}

/// Lists reports newest first, optionally only those in `status`.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_reports(
    db: &DatabaseConnection,
    status: Option<ReportStatus>,
) -> Result<Vec<report::Model>> {
    let mut query = Report::find();
    if let Some(status) = status {
        query = query.filter(report::Column::Status.eq(status));
    }
    query
        .order_by_desc(report::Column::CreatedAt)
        .order_by_desc(report::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Closes a report as resolved or dismissed.
///
/// # Errors
/// Returns an error if `outcome` is `Open`, the report does not exist, or the
/// update fails.
pub async fn close_report(
    db: &DatabaseConnection,
    id: i64,
    outcome: ReportStatus,
) -> Result<report::Model> {
    if outcome == ReportStatus::Open {
        return Err(Error::validation(
            "A report can only be closed as resolved or dismissed",
        ));
    }
    let mut report: report::ActiveModel = Report::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("report", id))?
        .into();
    report.status = Set(outcome);
    let closed = report.update(db).await?;
    info!("Report {id} closed as {outcome:?}");
    Ok(closed)
}

/// Deletes a report.
///
/// # Errors
/// Returns an error if no report has this id or the delete fails.
pub async fn delete_report(db: &DatabaseConnection, id: i64) -> Result<()> {
    let deleted = Report::delete_by_id(id).exec(db).await?;
    if deleted.rows_affected == 0 {
        return Err(Error::not_found("report", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_contact_request_lifecycle() -> Result<()> {
        let db = setup_test_db().await?;
        let first = record_contact_request(
            &db,
            "Meera",
            "+91 99999 11111",
            "Is the lehenga free on the 5th?",
        )
        .await?;
        let second = record_contact_request(&db, "Kabir", "9888877777", "Pickup in Pune?").await?;
        assert_eq!(first.status, ContactStatus::New);
        assert_eq!(first.phone, "+919999911111");

        let ids: Vec<i64> = list_contact_requests(&db).await?.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let closed = set_contact_status(&db, first.id, ContactStatus::Closed).await?;
        assert_eq!(closed.status, ContactStatus::Closed);

        delete_contact_request(&db, second.id).await?;
        assert_eq!(list_contact_requests(&db).await?.len(), 1);

        let blank = record_contact_request(&db, "x", "1", "  ").await;
        assert!(matches!(blank, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_report_lifecycle() -> Result<()> {
        let (db, owner, product) = setup_with_product().await?;
        let report = file_report(&db, owner.id, product.id, "Photos are not of this item").await?;
        file_report(&db, owner.id, product.id, "Price is wrong").await?;

        assert_eq!(list_reports(&db, Some(ReportStatus::Open)).await?.len(), 2);

        let resolved = close_report(&db, report.id, ReportStatus::Resolved).await?;
        assert_eq!(resolved.status, ReportStatus::Resolved);
        assert_eq!(list_reports(&db, Some(ReportStatus::Open)).await?.len(), 1);
        assert_eq!(list_reports(&db, None).await?.len(), 2);

        let reopen = close_report(&db, report.id, ReportStatus::Open).await;
        assert!(matches!(reopen, Err(Error::Validation { .. })));

        delete_report(&db, report.id).await?;
        assert!(matches!(
            delete_report(&db, report.id).await,
            Err(Error::NotFound { .. })
        ));

        Ok(())
    }
}
