//! Security Module
//!
//! 入力ファイルに対するセキュリティ制限を定義するモジュール。

use std::io::Read;

use crate::error::Iv3Error;

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

impl SecurityConfig {
    /// 入力全体をメモリに読み込み、サイズ上限を検証する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - 読み込んだバイト列
    /// * `Err(Iv3Error::SecurityViolation)` - サイズ上限を超えた場合
    pub fn read_limited<R: Read>(&self, reader: R) -> Result<Vec<u8>, Iv3Error> {
        // 上限+1バイトまで読めば超過を判定できる
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > self.max_input_file_size {
            return Err(Iv3Error::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes_read, self.max_input_file_size
            )));
        }

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_default_limit() {
        assert_eq!(SecurityConfig::default().max_input_file_size, 2_147_483_648);
    }

    #[test]
    fn test_read_within_limit() {
        let config = SecurityConfig {
            max_input_file_size: 8,
        };
        let data = config.read_limited(Cursor::new(vec![1u8; 8])).unwrap();
        assert_eq!(data.len(), 8);
    }

    #[test]
    fn test_read_exceeding_limit() {
        let config = SecurityConfig {
            max_input_file_size: 8,
        };
        let result = config.read_limited(Cursor::new(vec![1u8; 9]));
        match result {
            Err(Iv3Error::SecurityViolation(msg)) => assert!(msg.contains("max: 8 bytes")),
            _ => panic!("Expected SecurityViolation"),
        }
    }
}
