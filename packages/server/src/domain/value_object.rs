//! Value objects.

use std::fmt;

use super::error::ValueObjectError;

/// 参加者の識別子（表示名）
///
/// クライアントが自由に選ぶ不透明な文字列。空文字列以外は全て受け入れ、
/// 大文字小文字や空白の正規化は行わない。同一性は完全一致で判定する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(String);

impl Identity {
    /// 新しい Identity を作成
    ///
    /// # Errors
    ///
    /// 空文字列の場合は `ValueObjectError::EmptyIdentity` を返す
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyIdentity);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Identity {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Identity {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
