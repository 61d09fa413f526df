use thiserror::Error;

#[derive(Error, Debug)]
pub enum IgenBenchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("入力が不正です: {0}")]
    InvalidInput(String),

    #[error("評価質問がありません: {0}")]
    NoQuestions(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("AI呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("AIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

/// 一時的エラーの判定キーワード（レート制限・一時障害系）
const TRANSIENT_KEYWORDS: &[&str] = &[
    "rate limit",
    "timeout",
    "timed out",
    "connection",
    "temporary",
    "quota exceeded",
    "service unavailable",
    "429",
    "502",
    "503",
];

impl IgenBenchError {
    /// 一時的なエラーかどうか（呼び出し側のリトライ候補）
    ///
    /// リトライ自体はこのコアでは行わない。Not-Found / Invalid-Input は
    /// 常に恒久エラーとして扱う。
    pub fn is_transient(&self) -> bool {
        match self {
            IgenBenchError::ApiCall(msg) => {
                let lower = msg.to_lowercase();
                TRANSIENT_KEYWORDS.iter().any(|k| lower.contains(k))
            }
            _ => false,
        }
    }

    /// CLIの終了コード（2: ファイル不在, 3: 入力不正, 1: その他）
    pub fn exit_code(&self) -> i32 {
        match self {
            IgenBenchError::FileNotFound(_) => 2,
            IgenBenchError::InvalidInput(_) | IgenBenchError::NoQuestions(_) => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, IgenBenchError>;
