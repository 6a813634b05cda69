//! User-directory adapter over the workspace Admin Directory REST API.
//!
//! Transport only: one paged GET loop for the user query, one PATCH
//! per staged update. The bearer token is acquired out-of-band and
//! passed in; token refresh and delegation are not this adapter's
//! concern.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use idlink_connector::error::{ConnectorError, ConnectorResult};
use idlink_connector::traits::UserDirectory;
use idlink_connector::types::{AccountId, DirectoryUser};

/// User directory backed by the Admin Directory REST API.
pub struct RestUserDirectory {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Deserialize)]
struct UsersPage {
    #[serde(default)]
    users: Vec<UserRecord>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct UserRecord {
    #[serde(rename = "primaryEmail")]
    primary_email: String,
    #[serde(rename = "customSchemas", default)]
    custom_schemas: Value,
}

impl RestUserDirectory {
    /// Create an adapter for the directory at `base_url`.
    pub fn new(base_url: &str, token: &str) -> ConnectorResult<Self> {
        let client = Client::builder().build().map_err(|e| {
            ConnectorError::internal_with_source("failed to construct HTTP client", e)
        })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl UserDirectory for RestUserDirectory {
    async fn query_users(
        &self,
        customer: &str,
        page_size: u32,
        sort_key: &str,
    ) -> ConnectorResult<Vec<DirectoryUser>> {
        let mut users = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(format!("{}/users", self.base_url))
                .bearer_auth(&self.token)
                .query(&[
                    ("customer", customer),
                    ("projection", "full"),
                    ("orderBy", sort_key),
                ])
                .query(&[("maxResults", page_size)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| ConnectorError::network_with_source("directory query failed", e))?;
            if !response.status().is_success() {
                return Err(status_error("query users", response.status()));
            }

            let page: UsersPage = response.json().await.map_err(|e| {
                ConnectorError::serialization(format!("invalid directory response: {e}"))
            })?;
            debug!(fetched = page.users.len(), "Fetched directory page");

            users.extend(page.users.into_iter().map(UserRecord::into_directory_user));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(users)
    }

    async fn update_user(&self, id: &AccountId, attribute_patch: &Value) -> ConnectorResult<()> {
        let response = self
            .client
            .patch(format!("{}/users/{}", self.base_url, id))
            .bearer_auth(&self.token)
            .json(attribute_patch)
            .send()
            .await
            .map_err(|e| {
                ConnectorError::network_with_source(format!("update for user {id} failed"), e)
            })?;

        if !response.status().is_success() {
            return Err(status_error(&format!("update user {id}"), response.status()));
        }
        Ok(())
    }
}

impl UserRecord {
    fn into_directory_user(self) -> DirectoryUser {
        // The sync core expects the attribute tree rooted at
        // `customSchemas`, matching the patch shape it writes back.
        let custom_attributes = if self.custom_schemas.is_null() {
            Value::Null
        } else {
            serde_json::json!({ "customSchemas": self.custom_schemas })
        };
        DirectoryUser::with_attributes(self.primary_email, custom_attributes)
    }
}

fn status_error(operation: &str, status: StatusCode) -> ConnectorError {
    match status {
        StatusCode::UNAUTHORIZED => ConnectorError::AuthenticationFailed,
        StatusCode::FORBIDDEN => ConnectorError::AuthorizationFailed {
            operation: operation.to_string(),
        },
        StatusCode::NOT_FOUND => ConnectorError::ObjectNotFound {
            identifier: operation.to_string(),
        },
        status if status.is_server_error() => ConnectorError::TargetUnavailable {
            message: format!("{operation} returned HTTP {status}"),
        },
        status => ConnectorError::operation_failed(format!("{operation} returned HTTP {status}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_wraps_schemas_under_custom_schemas() {
        let record: UserRecord = serde_json::from_str(
            r#"{
                "primaryEmail": "alice@example.com",
                "customSchemas": {"AWS-SSO": {"role": []}}
            }"#,
        )
        .unwrap();

        let user = record.into_directory_user();
        assert_eq!(user.id, AccountId::from("alice@example.com"));
        assert!(user.custom_attributes.get("customSchemas").is_some());
    }

    #[test]
    fn test_user_record_without_schemas_has_null_attributes() {
        let record: UserRecord =
            serde_json::from_str(r#"{"primaryEmail": "bob@example.com"}"#).unwrap();
        assert!(record.into_directory_user().custom_attributes.is_null());
    }

    #[test]
    fn test_status_error_classification() {
        assert!(matches!(
            status_error("op", StatusCode::UNAUTHORIZED),
            ConnectorError::AuthenticationFailed
        ));
        assert!(status_error("op", StatusCode::BAD_GATEWAY).is_transient());
        assert!(status_error("op", StatusCode::CONFLICT).is_permanent());
    }
}
