/*
 * Responsibility
 * - Handler から見える「認可済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - トークン検証・permission チェックは middleware/services 側の責務
 * - ここは「型（契約）」として固定化する
 */

/// 認可済みのリクエストに付与されるコンテキスト
///
/// - `sub` は identity provider が発行する opaque な subject 文字列
/// - `permissions` は検証済みトークンの permission set（監査・ログ用）
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub sub: String,
    pub permissions: Vec<String>,
}

impl AuthCtx {
    pub fn new(sub: String, permissions: Vec<String>) -> Self {
        Self { sub, permissions }
    }
}
