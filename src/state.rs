//! 項目レコードの状態管理（ロード・保存・レジューム・完了判定）
//!
//! レジューム時は出力ディレクトリの保存済みレコードを丸ごと優先する
//! （フィールド単位のマージはしない）。保存は作業単位ごとに呼ばれ、
//! 途中で落ちても失うのは最大1作業単位。

use crate::error::Result;
use crate::item::VisItem;
use crate::paths;
use std::path::{Path, PathBuf};

/// 項目レコードの状態管理
pub struct StateManager {
    output_dir: PathBuf,
}

impl StateManager {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 項目をロードする
    ///
    /// - `resume = false`: シードをそのまま返す
    /// - `resume = true`: シードを先に読んでIDを確定し、
    ///   `{output_dir}/{id}/{id}.json` があればそちらを丸ごと返す。
    ///   無ければシードを返す。
    pub fn load_item(&self, source_path: &Path, resume: bool) -> Result<VisItem> {
        let seed = VisItem::load(source_path)?;

        if !resume {
            return Ok(seed);
        }

        let output_path = paths::resolve_item_json_path(&seed.id, &self.output_dir);
        if output_path.exists() {
            VisItem::load(&output_path)
        } else {
            Ok(seed)
        }
    }

    /// 項目を `{output_dir}/{id}/{id}.json` へ保存する
    pub fn save_item(&self, item: &VisItem) -> Result<()> {
        let save_path = item.build_save_path(&self.output_dir);
        item.save(&save_path)
    }

    /// 生成が完了しているか
    ///
    /// 生成マップにエントリがあり、かつ参照先の画像ファイルが実在する
    /// 場合のみ完了。パスだけ残ってファイルが消えていれば再生成対象。
    pub fn is_generation_complete(&self, item: &VisItem, model: &str) -> bool {
        if !item.check_generation_exists(model) {
            return false;
        }
        item.generation
            .get(model)
            .is_some_and(|p| Path::new(p).exists())
    }

    /// 評価が完了しているか（全質問が指定モデルの組で判定済み）
    pub fn is_evaluation_complete(&self, item: &VisItem, gen_model: &str, eval_model: &str) -> bool {
        item.check_evaluation_complete(gen_model, eval_model)
    }
}
