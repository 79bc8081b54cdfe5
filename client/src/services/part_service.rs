//! Spare-part operations, including the stock ledger.
//!
//! The quantity of a part is only ever changed through entry and exit
//! postings; create and update payloads never carry it.

use chrono::Utc;
use serde::Serialize;
use validator::Validate;

use crate::api::ApiClient;
use crate::errors::{ClientError, ClientResult};
use crate::models::{NewPart, Part, PartUpdate, StockEntry, StockExit};

pub struct PartService<'a> {
    client: &'a ApiClient,
}

/// Body for `POST /parts`: new parts start with an empty stock.
#[derive(Debug, Serialize)]
struct CreatePartBody<'a> {
    #[serde(flatten)]
    part: &'a NewPart,
    quantity: u32,
}

impl<'a> PartService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Part>> {
        self.client.get_list(&["parts"], &[]).await
    }

    pub async fn get(&self, code: &str) -> ClientResult<Part> {
        self.client.get(&["parts", code]).await
    }

    pub async fn create(&self, part: NewPart) -> ClientResult<Part> {
        if let Err(errors) = part.validate() {
            return Err(ClientError::from_validation(errors));
        }

        let body = CreatePartBody {
            part: &part,
            quantity: 0,
        };
        self.client.post(&["parts"], &body).await
    }

    /// Updates name, supplier or price. The quantity has no place here.
    pub async fn update(&self, code: &str, update: PartUpdate) -> ClientResult<Part> {
        self.client.put(&["parts", code], &update).await
    }

    pub async fn delete(&self, code: &str) -> ClientResult<()> {
        self.client.delete(&["parts", code]).await
    }

    /// Records received stock, stamped with the current date.
    pub async fn register_entry(&self, code: &str, quantity: u32) -> ClientResult<StockEntry> {
        if quantity == 0 {
            return Err(ClientError::validation("Entry quantity must be positive"));
        }

        let entry = StockEntry {
            quantity,
            entry_date: Utc::now().date_naive(),
        };
        self.client.post(&["parts", code, "entry"], &entry).await
    }

    /// Records consumed stock. An exit larger than the current stock is
    /// rejected before any request is issued, so the quantity can never go
    /// negative from this client.
    pub async fn register_exit(&self, code: &str, quantity: u32) -> ClientResult<StockExit> {
        if quantity == 0 {
            return Err(ClientError::validation("Exit quantity must be positive"));
        }

        let part = self.get(code).await?;
        if quantity > part.quantity {
            return Err(ClientError::validation(format!(
                "Exit of {} exceeds current stock of {} for part {}",
                quantity, part.quantity, part.code
            )));
        }

        let exit = StockExit {
            quantity,
            exit_date: Utc::now().date_naive(),
        };
        self.client.post(&["parts", code, "exit"], &exit).await
    }
}
