// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use crate::domain::errors::{ExportError, Result};
use log::debug;
use oracle::{Connection, Connector};
use std::time::Duration;

/// Opens independent Oracle connections on demand.
///
/// There is no pool: every caller gets its own `Connection`, so concurrent
/// export workers never share a session.
#[derive(Debug, Clone)]
pub struct OracleConnector {
    user: String,
    pass: String,
    conn_str: String,
    call_timeout: Option<Duration>,
}

impl OracleConnector {
    pub fn new(user: &str, pass: &str, conn_str: &str) -> Self {
        Self {
            user: user.to_string(),
            pass: pass.to_string(),
            conn_str: conn_str.to_string(),
            call_timeout: None,
        }
    }

    /// Bounds every round trip made on connections from this connector.
    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn conn_str(&self) -> &str {
        &self.conn_str
    }

    /// No username means OS authentication, like a trusted connection.
    pub fn uses_external_auth(&self) -> bool {
        self.user.is_empty()
    }

    pub fn connect(&self) -> Result<Connection> {
        debug!("Connecting to {}", self.conn_str);
        let conn = Connector::new(self.user.as_str(), self.pass.as_str(), self.conn_str.as_str())
            .external_auth(self.uses_external_auth())
            .connect()
            .map_err(|e| {
                ExportError::ConnectionError(format!("{}: {}", self.conn_str, e))
            })?;

        if self.call_timeout.is_some() {
            conn.set_call_timeout(self.call_timeout)?;
        }
        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_auth_without_username() {
        assert!(OracleConnector::new("", "", "//h/db").uses_external_auth());
        assert!(!OracleConnector::new("scott", "tiger", "//h/db").uses_external_auth());
    }

    #[test]
    fn test_call_timeout_builder() {
        let c = OracleConnector::new("u", "p", "//h/db")
            .with_call_timeout(Some(Duration::from_secs(30)));
        assert_eq!(c.call_timeout, Some(Duration::from_secs(30)));
        assert_eq!(c.conn_str(), "//h/db");
    }
}
