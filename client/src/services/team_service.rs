//! Repair team operations.

use validator::Validate;

use crate::api::ApiClient;
use crate::errors::{ClientError, ClientResult};
use crate::models::{NewTeam, Team, TeamUpdate};

pub struct TeamService<'a> {
    client: &'a ApiClient,
}

impl<'a> TeamService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Team>> {
        self.client.get_list(&["teams"], &[]).await
    }

    pub async fn get(&self, name: &str) -> ClientResult<Team> {
        self.client.get(&["teams", name]).await
    }

    pub async fn create(&self, team: NewTeam) -> ClientResult<Team> {
        if let Err(errors) = team.validate() {
            return Err(ClientError::from_validation(errors));
        }
        self.client.post(&["teams"], &team).await
    }

    /// The name is the key; only members and specializations can change.
    pub async fn update(&self, name: &str, update: TeamUpdate) -> ClientResult<Team> {
        self.client.put(&["teams", name], &update).await
    }

    pub async fn delete(&self, name: &str) -> ClientResult<()> {
        self.client.delete(&["teams", name]).await
    }
}
