//! Credential Commands - 凭证命令

/// 更新本地保存的凭证
///
/// 非空白时写入，空白时删除
#[derive(Debug, Clone)]
pub struct UpdateCredential {
    pub raw: String,
}
