//! パス解決・モデル名正規化ユーティリティ
//!
//! 正規化はファイル名生成のためだけのもの。完了判定・生成マップのキーは
//! 常に呼び出し元が渡した生のモデル名を使う。

use std::path::{Path, PathBuf};

/// モデル名をファイルシステム安全な形式に変換する
///
/// `-` と `.` を `_` に置換し、`provider/model` 形式は最後の `/` 以降のみを
/// 残す。例: "gemini-2.5-pro" → "gemini_2_5_pro"、"openai/gpt-4" → "gpt_4"
pub fn normalize_model_name(model_name: &str) -> String {
    let normalized = model_name.replace(['-', '.'], "_");
    match normalized.rsplit_once('/') {
        Some((_, tail)) => tail.to_string(),
        None => normalized,
    }
}

/// 生成画像のファイル名 `{item_id}_{normalizedModel}.png`
pub fn build_image_filename(item_id: &str, model_name: &str) -> String {
    format!("{}_{}.png", item_id, normalize_model_name(model_name))
}

/// 生成画像の保存先 `{output_dir}/{item_id}/{item_id}_{normalizedModel}.png`
pub fn resolve_image_path(item_id: &str, model_name: &str, output_dir: &Path) -> PathBuf {
    output_dir
        .join(item_id)
        .join(build_image_filename(item_id, model_name))
}

/// 項目JSONの保存先 `{output_dir}/{item_id}/{item_id}.json`
pub fn resolve_item_json_path(item_id: &str, output_dir: &Path) -> PathBuf {
    output_dir.join(item_id).join(format!("{}.json", item_id))
}
