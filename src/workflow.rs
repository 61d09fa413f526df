//! パイプラインドライバ（生成・評価）
//!
//! エンジン呼び出し・パス解決・完了判定・逐次保存をつなぐ薄い層。
//! 保存は作業単位ごと（生成は1回、評価は質問ごと）に行い、途中終了時の
//! 損失を最大1作業単位に抑える。

use crate::engine::{EvalEngine, GenEngine, LlmClient};
use crate::error::{IgenBenchError, Result};
use crate::item::VisItem;
use crate::paths;
use crate::state::StateManager;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// T2I生成ワークフロー
pub struct GenWorkflow {
    engine: GenEngine,
    state: StateManager,
    model: String,
    output_dir: PathBuf,
    resume: bool,
}

impl GenWorkflow {
    pub fn new(client: Box<dyn LlmClient>, model: &str, output_dir: &Path, resume: bool) -> Self {
        Self {
            engine: GenEngine::new(client, model),
            state: StateManager::new(output_dir),
            model: model.to_string(),
            output_dir: output_dir.to_path_buf(),
            resume,
        }
    }

    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// 生成を実行する
    ///
    /// レジューム時に生成済み（マップにあり、画像ファイルも実在）なら
    /// 何もせず返す。それ以外は外部能力を1回だけ呼び、画像をPNGとして
    /// 保存し、生成マップを更新して永続化する。
    pub async fn run(&self, mut item: VisItem) -> Result<VisItem> {
        if self.resume && self.state.is_generation_complete(&item, &self.model) {
            println!("✅ 生成済みのためスキップ: {}/{}", item.id, self.model);
            return Ok(item);
        }

        println!("🎨 画像生成中: {} ({})", item.id, self.model);

        let bytes = self.engine.text2image(&item).await?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| IgenBenchError::ImageLoad(format!("生成画像のデコード失敗: {}", e)))?;

        let image_path = paths::resolve_image_path(&item.id, &self.model, &self.output_dir);
        if let Some(parent) = image_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        decoded
            .save(&image_path)
            .map_err(|e| IgenBenchError::ImageLoad(format!("画像保存失敗: {}", e)))?;

        // 生成マップのキーは正規化しない生のモデル名
        item.update_generation(&self.model, &image_path.display().to_string());
        self.state.save_item(&item)?;

        println!("✅ 画像を保存: {}", image_path.display());
        Ok(item)
    }
}

/// 評価ワークフロー
pub struct EvalWorkflow {
    engine: EvalEngine,
    state: StateManager,
    eval_model: String,
    output_dir: PathBuf,
    resume: bool,
}

impl EvalWorkflow {
    pub fn new(
        client: Box<dyn LlmClient>,
        eval_model: &str,
        output_dir: &Path,
        resume: bool,
    ) -> Self {
        Self {
            engine: EvalEngine::new(client, eval_model),
            state: StateManager::new(output_dir),
            eval_model: eval_model.to_string(),
            output_dir: output_dir.to_path_buf(),
            resume,
        }
    }

    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// 全質問の評価を実行する
    ///
    /// 画像パスは明示指定が無ければ規約パスから解決する。質問が1件も
    /// 無い場合はハードエラー。質問ごとに判定→追記→保存を繰り返す。
    pub async fn run(
        &self,
        mut item: VisItem,
        gen_model: &str,
        image_path: Option<PathBuf>,
    ) -> Result<VisItem> {
        let image_path = image_path
            .unwrap_or_else(|| paths::resolve_image_path(&item.id, gen_model, &self.output_dir));

        if self.resume
            && self
                .engine
                .check_fully_evaluated(&item, gen_model, &self.eval_model)
        {
            println!(
                "✅ 評価済みのためスキップ: {} ({} on {})",
                item.id, self.eval_model, gen_model
            );
            return Ok(item);
        }

        if item.evaluation.is_empty() {
            return Err(IgenBenchError::NoQuestions(format!(
                "{} には評価質問がありません。評価前に質問を用意してください",
                item.id
            )));
        }

        println!(
            "🔍 評価中: {} ({} on {})",
            item.id, self.eval_model, gen_model
        );

        let total = item.evaluation.len();
        let pb = ProgressBar::new(total as u64);

        for i in 0..total {
            if self.resume
                && self
                    .engine
                    .check_entry_judged(&item.evaluation[i], gen_model, &self.eval_model)
            {
                pb.println(format!("⏭️  質問 {}/{} は判定済み", i + 1, total));
                pb.inc(1);
                continue;
            }

            let judgment = self
                .engine
                .judge_entry(&item.evaluation[i], gen_model, &image_path)
                .await?;
            item.evaluation[i].judgments.push(judgment);

            // 質問ごとに保存（途中終了しても進捗が残る）
            self.state.save_item(&item)?;
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(item)
    }
}
