//! T2I生成エンジン
//!
//! 純粋なアルゴリズム層。ファイルI/Oや状態管理はワークフロー側の責務。

use crate::engine::client::LlmClient;
use crate::error::Result;
use crate::item::VisItem;
use crate::prompts;

/// テキストから画像を生成するエンジン
pub struct GenEngine {
    client: Box<dyn LlmClient>,
    model: String,
}

impl GenEngine {
    pub fn new(client: Box<dyn LlmClient>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// T2Iプロンプトから画像バイト列を生成する
    ///
    /// `t2i_prompt` が未設定の場合はエラー。
    pub async fn text2image(&self, item: &VisItem) -> Result<Vec<u8>> {
        let prompt = prompts::build_text2image_prompt(item)?;
        self.client.generate_image(&self.model, &prompt)
    }
}
