/// 読み取り側の制限設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderLimits {
    /// 読み取りバッファの初期サイズ (デフォルト: 2KB)
    ///
    /// バッファが埋まるたびに 2 倍に拡張される。
    pub initial_buffer_size: usize,
    /// 最大バッファサイズ (デフォルト: 1MB)
    ///
    /// 未パースのデータがこのサイズを超えて溜まった場合はエラーになる。
    /// 1 行 (リクエストラインまたはヘッダー行) がこのサイズに収まらない場合が該当する。
    pub max_buffer_size: usize,
    /// 最大ヘッダー数 (デフォルト: 100)
    ///
    /// 同じ名前のヘッダーは連結されて 1 つと数える。
    pub max_headers_count: usize,
    /// 最大ボディサイズ (デフォルト: 10MB)
    pub max_body_size: usize,
}

impl Default for ReaderLimits {
    fn default() -> Self {
        Self {
            initial_buffer_size: 2048,       // 2KB
            max_buffer_size: 1024 * 1024,    // 1MB
            max_headers_count: 100,
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl ReaderLimits {
    /// 制限なしの設定を作成
    pub fn unlimited() -> Self {
        Self {
            initial_buffer_size: 2048,
            max_buffer_size: usize::MAX,
            max_headers_count: usize::MAX,
            max_body_size: usize::MAX,
        }
    }

    /// 初期バッファサイズを指定 (ビルダーパターン)
    pub fn initial_buffer_size(mut self, size: usize) -> Self {
        self.initial_buffer_size = size;
        self
    }
}
