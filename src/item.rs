//! ベンチマーク項目（VisItem）の永続化レコード
//!
//! 1項目 = 1枚のインフォグラフィック（T2Iプロンプト + 生成・評価履歴）。
//! JSONファイルとの相互変換、生成マップ・評価エントリの更新APIを提供する。

use crate::error::{IgenBenchError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 1つの評価質問に対する1件の判定結果
///
/// (gen_model, eval_model) の組ごとに論理的には1件。重複チェックは
/// 呼び出し側（ワークフロー）の責務で、ここでは追記のみを行う。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    #[serde(default)]
    pub eval_model: String,

    #[serde(default)]
    pub gen_model: String,

    /// 判定根拠（自由記述）
    #[serde(default)]
    pub analysis: String,

    /// "0" または "1" を想定（このコアでは検証しない）
    #[serde(default)]
    pub answer: String,
}

/// 評価エントリ（質問1件 + その判定履歴）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalEntry {
    /// 質問の由来（"prompt" / "seed" 等、自由記述）
    #[serde(default)]
    pub source: String,

    /// 期待回答の根拠（プロンプト構築用。プログラム比較はしない）
    #[serde(default)]
    pub ground: String,

    #[serde(default)]
    pub question: String,

    #[serde(default)]
    pub question_type: String,

    #[serde(default, deserialize_with = "de_judgments")]
    pub judgments: Vec<Judgment>,
}

impl EvalEntry {
    /// 指定モデルの組の判定が既に存在するか（完全一致・大文字小文字区別）
    pub fn has_judgment(&self, gen_model: &str, eval_model: &str) -> bool {
        self.judgments
            .iter()
            .any(|j| j.gen_model == gen_model && j.eval_model == eval_model)
    }

    /// 判定を追記する（重複チェックは行わない）
    pub fn add_judgment(&mut self, gen_model: &str, eval_model: &str, analysis: &str, answer: &str) {
        self.judgments.push(Judgment {
            eval_model: eval_model.to_string(),
            gen_model: gen_model.to_string(),
            analysis: analysis.to_string(),
            answer: answer.to_string(),
        });
    }
}

/// judgments配列の寛容デコード
///
/// - オブジェクト: 欠けたフィールドは空文字で補完
/// - オブジェクト以外の要素: 読み飛ばす（エラーにしない）
fn de_judgments<'de, D>(deserializer: D) -> std::result::Result<Vec<Judgment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::Object(_) => {
                Some(serde_json::from_value(value).unwrap_or_default())
            }
            _ => None,
        })
        .collect())
}

/// ベンチマーク項目レコード
///
/// `id` のみ必須。他フィールドはロード時に空コンテナ/Noneで補完され、
/// 保存時はロードと同じ形（round-trip安定）で書き出される。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisItem {
    /// 項目ID（作成後は不変）
    pub id: String,

    #[serde(default)]
    pub reference_image_url: Option<String>,

    /// T2I生成用プロンプト
    #[serde(default)]
    pub t2i_prompt: Option<String>,

    #[serde(default)]
    pub chart_type: Option<String>,

    /// 生成結果: モデル名 → 画像パス（単調増加、削除は未サポート）
    #[serde(default)]
    pub generation: BTreeMap<String, String>,

    /// 評価エントリ（質問順。順序は保存・イテレーションで保持される）
    #[serde(default)]
    pub evaluation: Vec<EvalEntry>,
}

impl VisItem {
    /// JSONファイルからロードする
    ///
    /// `id` が無い場合はパースエラー。
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IgenBenchError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let item: VisItem = serde_json::from_str(&content)?;
        Ok(item)
    }

    /// JSONファイルへ保存する
    ///
    /// `output_path` が `.json` で終わる場合はそのパスへ、ディレクトリの
    /// 場合は `{output_path}/{id}/{id}.json` へ書き出す。親ディレクトリは
    /// 自動作成する。上書きは非アトミック（単一プロセス前提の割り切り）。
    pub fn save(&self, output_path: &Path) -> Result<()> {
        let save_path = if output_path.extension().is_some_and(|e| e == "json") {
            output_path.to_path_buf()
        } else {
            self.build_save_path(output_path)
        };

        if let Some(parent) = save_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&save_path, json)?;
        Ok(())
    }

    /// 項目の出力ディレクトリ `{output_dir}/{id}`
    pub fn build_save_dir(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.id)
    }

    /// 項目JSONの保存先 `{output_dir}/{id}/{id}.json`
    pub fn build_save_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.id).join(format!("{}.json", self.id))
    }

    /// 生成結果を記録する（同一モデルは後勝ち）
    pub fn update_generation(&mut self, model: &str, image_path: &str) {
        self.generation
            .insert(model.to_string(), image_path.to_string());
    }

    /// 生成マップにエントリがあるか（ファイル存在チェックはしない）
    pub fn check_generation_exists(&self, model: &str) -> bool {
        self.generation.get(model).is_some_and(|p| !p.is_empty())
    }

    /// 全質問が指定モデルの組で判定済みか
    ///
    /// 質問が1件も無い場合は未完了扱い（空の評価は「完了」にならない）。
    /// 未判定エントリが見つかった時点で打ち切る。
    pub fn check_evaluation_complete(&self, gen_model: &str, eval_model: &str) -> bool {
        if self.evaluation.is_empty() {
            return false;
        }
        self.evaluation
            .iter()
            .all(|entry| entry.has_judgment(gen_model, eval_model))
    }

    /// sourceで評価エントリを絞り込む
    pub fn evaluation_by_source(&self, source: &str) -> Vec<&EvalEntry> {
        self.evaluation
            .iter()
            .filter(|entry| entry.source == source)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_judgment_exact_match() {
        let mut entry = EvalEntry {
            question: "タイトルはあるか".to_string(),
            ..Default::default()
        };
        entry.add_judgment("gen-a", "eval-b", "タイトルが見える", "1");

        assert!(entry.has_judgment("gen-a", "eval-b"));
        // 完全一致のみ（正規化なし・大文字小文字区別）
        assert!(!entry.has_judgment("Gen-A", "eval-b"));
        assert!(!entry.has_judgment("gen-a", "Eval-B"));
        assert!(!entry.has_judgment("gen_a", "eval-b"));
    }

    #[test]
    fn test_add_judgment_no_dedup() {
        let mut entry = EvalEntry::default();
        entry.add_judgment("g", "e", "1回目", "0");
        entry.add_judgment("g", "e", "2回目", "1");

        // 重複排除はしない（後勝ち読み取りは呼び出し側の責務）
        assert_eq!(entry.judgments.len(), 2);
        assert_eq!(entry.judgments[1].analysis, "2回目");
    }

    #[test]
    fn test_check_evaluation_complete_empty_is_incomplete() {
        let item = VisItem {
            id: "0".to_string(),
            ..Default::default()
        };
        assert!(!item.check_evaluation_complete("g", "e"));
    }

    #[test]
    fn test_check_generation_exists_ignores_empty_path() {
        let mut item = VisItem {
            id: "0".to_string(),
            ..Default::default()
        };
        item.update_generation("m1", "");
        assert!(!item.check_generation_exists("m1"));

        item.update_generation("m1", "outputs/0/0_m1.png");
        assert!(item.check_generation_exists("m1"));
    }

    #[test]
    fn test_evaluation_by_source() {
        let item = VisItem {
            id: "0".to_string(),
            evaluation: vec![
                EvalEntry {
                    source: "prompt".to_string(),
                    ..Default::default()
                },
                EvalEntry {
                    source: "seed".to_string(),
                    ..Default::default()
                },
                EvalEntry {
                    source: "prompt".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        assert_eq!(item.evaluation_by_source("prompt").len(), 2);
        assert_eq!(item.evaluation_by_source("seed").len(), 1);
        assert_eq!(item.evaluation_by_source("other").len(), 0);
    }
}
