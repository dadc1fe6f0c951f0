//! Value objects.

use std::fmt;

use super::error::ValueObjectError;

/// Sender id used for notices generated by the relay itself
pub const SERVER_CLIENT_ID: &str = "SERVER";

/// Client identifier: registry key and routing address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(String);

impl ClientId {
    pub const MAX_LEN: usize = 64;

    /// Validate and wrap a client id.
    ///
    /// The id must be non-empty, at most [`ClientId::MAX_LEN`] characters and
    /// free of whitespace. The reserved [`SERVER_CLIENT_ID`] passes validation;
    /// rejecting it at registration is the join use case's job.
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyClientId);
        }
        let len = value.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValueObjectError::ClientIdTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ValueObjectError::InvalidClientIdCharacter);
        }
        Ok(Self(value))
    }

    /// The reserved sender of relay-generated notices
    pub fn server() -> Self {
        Self(SERVER_CLIENT_ID.to_string())
    }

    pub fn is_server(&self) -> bool {
        self.0 == SERVER_CLIENT_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_accepts_plain_name() {
        // テスト項目: 通常の名前から ClientId を生成できる
        // given (前提条件):
        let value = "alice".to_string();

        // when (操作):
        let result = ClientId::new(value);

        // then (期待する結果):
        assert_eq!(result.map(ClientId::into_string), Ok("alice".to_string()));
    }

    #[test]
    fn test_client_id_rejects_empty_string() {
        // テスト項目: 空文字列の ClientId はエラーになる
        // given (前提条件):
        let value = String::new();

        // when (操作):
        let result = ClientId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyClientId));
    }

    #[test]
    fn test_client_id_rejects_whitespace() {
        // テスト項目: 空白を含む ClientId はエラーになる（/private の区切り文字と衝突するため）
        // given (前提条件):
        let value = "alice smith".to_string();

        // when (操作):
        let result = ClientId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::InvalidClientIdCharacter));
    }

    #[test]
    fn test_client_id_length_limit() {
        // テスト項目: 上限ちょうどの長さは許可され、超えるとエラーになる
        // given (前提条件):
        let at_limit = "a".repeat(ClientId::MAX_LEN);
        let over_limit = "a".repeat(ClientId::MAX_LEN + 1);

        // when (操作):
        let ok = ClientId::new(at_limit);
        let err = ClientId::new(over_limit);

        // then (期待する結果):
        assert!(ok.is_ok());
        assert_eq!(
            err,
            Err(ValueObjectError::ClientIdTooLong {
                max: ClientId::MAX_LEN,
                actual: ClientId::MAX_LEN + 1,
            })
        );
    }

    #[test]
    fn test_server_client_id_is_reserved_marker() {
        // テスト項目: SERVER の ClientId は is_server で判別できる
        // given (前提条件):
        let server = ClientId::server();
        let alice = ClientId::new("alice".to_string()).unwrap();

        // when (操作):

        // then (期待する結果):
        assert!(server.is_server());
        assert_eq!(server.as_str(), SERVER_CLIENT_ID);
        assert!(!alice.is_server());
    }
}
