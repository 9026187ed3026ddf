//! Report service
//!
//! Accepts expense report uploads from fundraiser owners and persists them
//! where the ranking service will look for them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::domain::entities::{missing_columns, Address, FundraiserId, EXPECTED_COLUMNS};
use crate::domain::ports::{FundraiserSource, ReportStore};
use crate::error::{AppError, DomainError};

/// An upload as received from the client, before validation
#[derive(Debug, Default)]
pub struct ReportSubmission {
    pub fundraiser_id: Option<String>,
    pub submitter: Option<String>,
    pub contents: Option<Vec<u8>>,
}

/// Acknowledgement of a stored report
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub fundraiser_id: FundraiserId,
    pub bytes: usize,
    pub sha256: String,
    pub stored_at: DateTime<Utc>,
    /// Expected header columns the report lacks (informational, not enforced)
    pub missing_columns: Vec<&'static str>,
}

/// Service for ingesting expense reports
pub struct ReportService<FS, RS>
where
    FS: FundraiserSource + ?Sized,
    RS: ReportStore + ?Sized,
{
    fundraisers: Arc<FS>,
    reports: Arc<RS>,
    max_report_bytes: usize,
}

impl<FS, RS> ReportService<FS, RS>
where
    FS: FundraiserSource + ?Sized,
    RS: ReportStore + ?Sized,
{
    pub fn new(fundraisers: Arc<FS>, reports: Arc<RS>, max_report_bytes: usize) -> Self {
        Self {
            fundraisers,
            reports,
            max_report_bytes,
        }
    }

    pub fn max_report_bytes(&self) -> usize {
        self.max_report_bytes
    }

    /// Store an expense report for a fundraiser
    ///
    /// Checks, in order:
    /// 1. A non-empty file is attached and within the size limit
    /// 2. The fundraiser ID and submitter address are well formed
    /// 3. The fundraiser exists and the submitter owns it
    ///
    /// Any previous report for the fundraiser is replaced.
    pub async fn upload(&self, submission: ReportSubmission) -> Result<UploadReceipt, AppError> {
        let contents = submission
            .contents
            .filter(|c| !c.is_empty())
            .ok_or(AppError::MissingFile)?;

        if contents.len() > self.max_report_bytes {
            return Err(AppError::FileTooLarge {
                limit: self.max_report_bytes,
            });
        }

        let fundraiser_id = submission
            .fundraiser_id
            .ok_or_else(|| AppError::BadRequest("fundraiserId is required".to_string()))?;
        let fundraiser_id = FundraiserId::parse(&fundraiser_id)?;

        let submitter = submission
            .submitter
            .ok_or_else(|| AppError::BadRequest("ngoAddress is required".to_string()))?;
        let submitter = Address::parse(&submitter)?;

        let fundraiser = self
            .fundraisers
            .find_fundraiser(&fundraiser_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("Fundraiser {} not found", fundraiser_id))
            })?;

        if !fundraiser.is_owned_by(&submitter) {
            tracing::warn!(
                fundraiser_id = %fundraiser_id,
                submitter = %submitter,
                "Rejected expense report from non-owner"
            );
            return Err(DomainError::Forbidden(
                "Only the fundraiser owner can upload its expense report".to_string(),
            )
            .into());
        }

        let missing = missing_columns(&contents).unwrap_or_else(|e| {
            tracing::debug!(fundraiser_id = %fundraiser_id, error = %e, "Report header unreadable");
            EXPECTED_COLUMNS.to_vec()
        });

        self.reports.save(&fundraiser_id, &contents).await?;

        tracing::info!(
            fundraiser_id = %fundraiser_id,
            submitter = %submitter,
            bytes = contents.len(),
            missing_columns = missing.len(),
            "Expense report stored"
        );

        Ok(UploadReceipt {
            fundraiser_id,
            bytes: contents.len(),
            sha256: hex::encode(Sha256::digest(&contents)),
            stored_at: Utc::now(),
            missing_columns: missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        expense_csv, test_address, test_fundraiser, InMemoryFundraiserSource, InMemoryReportStore,
    };

    const LIMIT: usize = 1024;

    fn create_service(
        source: InMemoryFundraiserSource,
        store: Arc<InMemoryReportStore>,
    ) -> ReportService<InMemoryFundraiserSource, InMemoryReportStore> {
        ReportService::new(Arc::new(source), store, LIMIT)
    }

    fn submission(id: &str, owner: u8, contents: Vec<u8>) -> ReportSubmission {
        ReportSubmission {
            fundraiser_id: Some(id.to_string()),
            submitter: Some(test_address(owner).to_string()),
            contents: Some(contents),
        }
    }

    fn id(raw: &str) -> FundraiserId {
        FundraiserId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn upload_success() {
        let store = Arc::new(InMemoryReportStore::new());
        let service = create_service(
            InMemoryFundraiserSource::new().with_fundraiser(test_fundraiser("42", 1, 100)),
            store.clone(),
        );
        let csv = expense_csv(&[("10", "5", "0", "5")]);

        let receipt = service
            .upload(submission("42", 1, csv.clone().into_bytes()))
            .await
            .unwrap();

        assert_eq!(receipt.fundraiser_id.as_str(), "42");
        assert_eq!(receipt.bytes, csv.len());
        assert_eq!(receipt.sha256.len(), 64);
        assert!(receipt.missing_columns.is_empty());
        assert_eq!(
            store.load(&id("42")).await.unwrap(),
            Some(csv.into_bytes())
        );
    }

    #[tokio::test]
    async fn upload_without_file_is_missing_file() {
        let service = create_service(
            InMemoryFundraiserSource::new().with_fundraiser(test_fundraiser("42", 1, 100)),
            Arc::new(InMemoryReportStore::new()),
        );

        let mut no_file = submission("42", 1, Vec::new());
        no_file.contents = None;
        assert!(matches!(
            service.upload(no_file).await,
            Err(AppError::MissingFile)
        ));

        assert!(matches!(
            service.upload(submission("42", 1, Vec::new())).await,
            Err(AppError::MissingFile)
        ));
    }

    #[tokio::test]
    async fn oversized_upload_leaves_existing_report_untouched() {
        let store = Arc::new(InMemoryReportStore::new().with_report("42", "name\nold\n"));
        let service = create_service(
            InMemoryFundraiserSource::new().with_fundraiser(test_fundraiser("42", 1, 100)),
            store.clone(),
        );

        let result = service
            .upload(submission("42", 1, vec![b'x'; LIMIT + 1]))
            .await;

        assert!(matches!(
            result,
            Err(AppError::FileTooLarge { limit: LIMIT })
        ));
        assert_eq!(
            store.load(&id("42")).await.unwrap(),
            Some(b"name\nold\n".to_vec())
        );
    }

    #[tokio::test]
    async fn upload_at_exact_limit_is_accepted() {
        let store = Arc::new(InMemoryReportStore::new());
        let service = create_service(
            InMemoryFundraiserSource::new().with_fundraiser(test_fundraiser("42", 1, 100)),
            store.clone(),
        );

        let receipt = service
            .upload(submission("42", 1, vec![b'x'; LIMIT]))
            .await
            .unwrap();

        assert_eq!(receipt.bytes, LIMIT);
        assert_eq!(receipt.missing_columns.len(), EXPECTED_COLUMNS.len());
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let store = Arc::new(InMemoryReportStore::new());
        let service = create_service(
            InMemoryFundraiserSource::new().with_fundraiser(test_fundraiser("42", 1, 100)),
            store.clone(),
        );

        let result = service
            .upload(submission("42", 2, b"name\n".to_vec()))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::Forbidden(_)))
        ));
        assert!(store.load(&id("42")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_fundraiser_is_not_found() {
        let service = create_service(
            InMemoryFundraiserSource::new(),
            Arc::new(InMemoryReportStore::new()),
        );

        let result = service
            .upload(submission("42", 1, b"name\n".to_vec()))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn malformed_identifiers_are_rejected() {
        let service = create_service(
            InMemoryFundraiserSource::new().with_fundraiser(test_fundraiser("42", 1, 100)),
            Arc::new(InMemoryReportStore::new()),
        );

        let traversal = submission("../42", 1, b"name\n".to_vec());
        assert!(matches!(
            service.upload(traversal).await,
            Err(AppError::Domain(DomainError::Validation(_)))
        ));

        let mut bad_address = submission("42", 1, b"name\n".to_vec());
        bad_address.submitter = Some("not-an-address".to_string());
        assert!(matches!(
            service.upload(bad_address).await,
            Err(AppError::Domain(DomainError::Validation(_)))
        ));

        let mut no_id = submission("42", 1, b"name\n".to_vec());
        no_id.fundraiser_id = None;
        assert!(matches!(
            service.upload(no_id).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn owner_match_ignores_address_case() {
        let service = create_service(
            InMemoryFundraiserSource::new().with_fundraiser(test_fundraiser("42", 0xab, 100)),
            Arc::new(InMemoryReportStore::new()),
        );

        let mut upper = submission("42", 0xab, b"name\n".to_vec());
        upper.submitter = Some(format!("0x{}", "AB".repeat(20)));

        assert!(service.upload(upper).await.is_ok());
    }

    #[tokio::test]
    async fn ledger_outage_surfaces_as_source_unavailable() {
        let store = Arc::new(InMemoryReportStore::new());
        let service = create_service(InMemoryFundraiserSource::failing(), store.clone());

        let result = service
            .upload(submission("42", 1, b"name\n".to_vec()))
            .await;

        assert!(matches!(result, Err(AppError::SourceUnavailable(_))));
        assert!(store.load(&id("42")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_report_error() {
        let service = create_service(
            InMemoryFundraiserSource::new().with_fundraiser(test_fundraiser("42", 1, 100)),
            Arc::new(InMemoryReportStore::new().failing_for("42")),
        );

        let result = service
            .upload(submission("42", 1, b"name\n".to_vec()))
            .await;

        assert!(matches!(result, Err(AppError::Report(_))));
    }

    #[tokio::test]
    async fn reports_missing_header_columns() {
        let service = create_service(
            InMemoryFundraiserSource::new().with_fundraiser(test_fundraiser("42", 1, 100)),
            Arc::new(InMemoryReportStore::new()),
        );

        let receipt = service
            .upload(submission("42", 1, b"name,relief_work\nx,1\n".to_vec()))
            .await
            .unwrap();

        assert_eq!(
            receipt.missing_columns,
            vec!["total_received", "admin_expenses", "fundraising", "salaries"]
        );
    }
}
