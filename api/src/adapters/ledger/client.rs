//! Ledger gateway client implementation

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use urlencoding::encode;

use crate::domain::entities::{Address, Donation, Fundraiser, FundraiserId, Visibility};
use crate::domain::ports::FundraiserSource;
use crate::error::LedgerError;

/// Implementation of the ledger gateway client
pub struct LedgerClient {
    http: Client,
    base_url: String,
    api_token: Option<String>,
}

impl LedgerClient {
    pub fn new(base_url: String, api_token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.http.get(self.url(path));
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, LedgerError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| LedgerError::Deserialization(e.to_string()))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(LedgerError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn fetch_fundraisers(&self, path: &str) -> Result<Vec<Fundraiser>, LedgerError> {
        let response = self.get(path).send().await?;
        let values: Vec<serde_json::Value> = self.handle_response(response).await?;
        Ok(decode_records::<LedgerFundraiser, Fundraiser>(values, "fundraiser"))
    }
}

/// A ledger value that may arrive as a JSON string or number.
///
/// Numbers keep their exact digits (serde_json `arbitrary_precision`), so
/// amounts beyond `u64` decode without loss.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
struct LedgerScalar(serde_json::Value);

impl LedgerScalar {
    fn to_text(&self) -> Result<String, String> {
        match &self.0 {
            serde_json::Value::String(s) => Ok(s.clone()),
            serde_json::Value::Number(n) => Ok(n.to_string()),
            other => Err(format!("expected string or number, got {}", other)),
        }
    }

    fn to_amount(&self) -> Result<u128, String> {
        let text = self.to_text()?;
        text.trim()
            .parse::<u128>()
            .map_err(|e| format!("invalid amount {:?}: {}", text, e))
    }
}

/// Fundraiser record as served by the ledger gateway
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerFundraiser {
    #[serde(alias = "serial")]
    id: LedgerScalar,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    goal: Option<LedgerScalar>,
    amount_raised: LedgerScalar,
    owner: String,
    fundraiser_type: Visibility,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    people_affected: Option<LedgerScalar>,
}

impl TryFrom<LedgerFundraiser> for Fundraiser {
    type Error = String;

    fn try_from(raw: LedgerFundraiser) -> Result<Self, Self::Error> {
        let id = FundraiserId::parse(&raw.id.to_text()?).map_err(|e| e.to_string())?;
        let owner = Address::parse(&raw.owner).map_err(|e| e.to_string())?;
        let goal = match raw.goal {
            Some(goal) => goal.to_amount()?,
            None => 0,
        };
        let people_affected = match raw.people_affected {
            Some(count) => Some(
                u64::try_from(count.to_amount()?).map_err(|e| e.to_string())?,
            ),
            None => None,
        };

        Ok(Fundraiser {
            id,
            name: raw.name,
            description: raw.description,
            goal,
            amount_raised: raw.amount_raised.to_amount()?,
            owner,
            visibility: raw.fundraiser_type,
            category: raw.category.filter(|c| !c.is_empty()),
            people_affected,
        })
    }
}

/// Donation event as served by the ledger gateway
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerDonation {
    tx_hash: String,
    donor: String,
    fundraiser_id: LedgerScalar,
    amount: LedgerScalar,
    block_number: u64,
}

impl TryFrom<LedgerDonation> for Donation {
    type Error = String;

    fn try_from(raw: LedgerDonation) -> Result<Self, Self::Error> {
        Ok(Donation {
            tx_hash: raw.tx_hash,
            donor: Address::parse(&raw.donor).map_err(|e| e.to_string())?,
            fundraiser_id: FundraiserId::parse(&raw.fundraiser_id.to_text()?)
                .map_err(|e| e.to_string())?,
            amount: raw.amount.to_amount()?,
            block_number: raw.block_number,
        })
    }
}

/// Decode records one by one, dropping (and logging) any with an unexpected shape
fn decode_records<R, T>(values: Vec<serde_json::Value>, kind: &str) -> Vec<T>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = String>,
{
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let decoded = serde_json::from_value::<R>(value)
                .map_err(|e| e.to_string())
                .and_then(T::try_from);
            match decoded {
                Ok(record) => Some(record),
                Err(error) => {
                    tracing::warn!(kind, index, error = %error, "Dropping malformed ledger record");
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl FundraiserSource for LedgerClient {
    async fn list_fundraisers(&self) -> Result<Vec<Fundraiser>, LedgerError> {
        self.fetch_fundraisers("/fundraisers").await
    }

    async fn find_fundraiser(&self, id: &FundraiserId) -> Result<Option<Fundraiser>, LedgerError> {
        let response = self
            .get(&format!("/fundraisers/{}", encode(id.as_str())))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let raw: LedgerFundraiser = self.handle_response(response).await?;
        Fundraiser::try_from(raw)
            .map(Some)
            .map_err(LedgerError::Deserialization)
    }

    async fn list_by_owner(&self, owner: &Address) -> Result<Vec<Fundraiser>, LedgerError> {
        self.fetch_fundraisers(&format!("/fundraisers?owner={}", encode(owner.as_str())))
            .await
    }

    async fn donations_by_donor(&self, donor: &Address) -> Result<Vec<Donation>, LedgerError> {
        let response = self
            .get(&format!("/donations?donor={}", encode(donor.as_str())))
            .send()
            .await?;
        let values: Vec<serde_json::Value> = self.handle_response(response).await?;
        Ok(decode_records::<LedgerDonation, Donation>(values, "donation"))
    }
}
