//! Remote user source.
//!
//! The listing screen reads a fixed collection of users from a public read-only
//! endpoint. The request carries no parameters and the response is consumed as
//! is; fields beyond the ones modeled here are ignored.
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Context, Result, simple_error};

/// Public demo endpoint queried when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Default request timeout for [`HttpUserSource`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Address {
    pub city: String,
}

/// One user as returned by the remote listing source. Read-only.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

/// Anything that can produce the user collection in one shot.
pub trait UserSource: Send {
    fn fetch_users(&self) -> Result<Vec<UserRecord>>;
}

/// Blocking HTTP source backed by `reqwest`.
pub struct HttpUserSource {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpUserSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .with_ctx(|| "build http client".to_string())?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl UserSource for HttpUserSource {
    fn fetch_users(&self) -> Result<Vec<UserRecord>> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .with_ctx(|| format!("GET {}", self.endpoint))?;
        let status = response.status();
        if !status.is_success() {
            return Err(simple_error(format!(
                "GET {} returned HTTP {}",
                self.endpoint, status
            )));
        }
        response
            .json::<Vec<UserRecord>>()
            .with_ctx(|| format!("decode users from {}", self.endpoint))
    }
}

/// Run `source.fetch_users()` on a worker thread.
///
/// The result arrives on the returned channel exactly once. If the receiver is
/// dropped before the fetch settles the result is discarded.
pub fn spawn_fetch<S>(source: S) -> Receiver<Result<Vec<UserRecord>>>
where
    S: UserSource + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = source.fetch_users();
        // receiver gone means the screen was left
        let _ = tx.send(result);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<UserRecord>);

    impl UserSource for Fixed {
        fn fetch_users(&self) -> Result<Vec<UserRecord>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn decodes_nested_city_and_ignores_extra_fields() {
        let body = r#"[{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "address": {"street": "Kulas Light", "city": "Gwenborough", "zipcode": "92998-3874"}
        }]"#;
        let users: Vec<UserRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].address.city, "Gwenborough");
        assert_eq!(users[0].phone, "1-770-736-8031 x56442");
    }

    #[test]
    fn spawn_fetch_delivers_once() {
        let rx = spawn_fetch(Fixed(Vec::new()));
        let first = rx.recv().unwrap();
        assert!(first.unwrap().is_empty());
        assert!(rx.recv().is_err());
    }
}
