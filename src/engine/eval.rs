//! 評価エンジン
//!
//! 質問1件をAIに判定させ、Judgmentを組み立てる。完了チェックは
//! レコードの読み取りAPIへの委譲で、副作用はない。

use crate::engine::client::LlmClient;
use crate::error::{IgenBenchError, Result};
use crate::item::{EvalEntry, Judgment, VisItem};
use crate::prompts;
use std::path::Path;

/// 画像判定を行う評価エンジン
pub struct EvalEngine {
    client: Box<dyn LlmClient>,
    model: String,
}

impl EvalEngine {
    pub fn new(client: Box<dyn LlmClient>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// このエントリが指定モデルの組で判定済みか
    pub fn check_entry_judged(&self, entry: &EvalEntry, gen_model: &str, eval_model: &str) -> bool {
        entry.has_judgment(gen_model, eval_model)
    }

    /// 全質問が判定済みか
    pub fn check_fully_evaluated(&self, item: &VisItem, gen_model: &str, eval_model: &str) -> bool {
        item.check_evaluation_complete(gen_model, eval_model)
    }

    /// 質問1件を判定してJudgmentを返す
    ///
    /// 質問が空の場合はエラー。
    pub async fn judge_entry(
        &self,
        entry: &EvalEntry,
        gen_model: &str,
        image_path: &Path,
    ) -> Result<Judgment> {
        if entry.question.is_empty() {
            return Err(IgenBenchError::InvalidInput("質問が空です".into()));
        }

        let prompt = prompts::build_factual_qa_prompt(&entry.question);
        let response = self.client.judge_image(&self.model, image_path, &prompt)?;

        Ok(Judgment {
            eval_model: self.model.clone(),
            gen_model: gen_model.to_string(),
            analysis: response.analysis,
            answer: response.answer,
        })
    }
}
