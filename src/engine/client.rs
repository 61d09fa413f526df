//! AI CLI連携クライアント
//!
//! 外部能力（画像生成・画像判定）の境界。`LlmClient` トレイトが契約で、
//! 実装はAI CLI（gemini/claude/codex）をサブプロセス起動する。
//! 呼び出しは同期ブロッキングで、結果か失敗のどちらかを返す。

use crate::ai_provider::AiProvider;
use crate::error::{IgenBenchError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// 画像判定のレスポンス
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JudgeResponse {
    #[serde(default)]
    pub analysis: String,

    #[serde(default)]
    pub answer: String,
}

/// 外部AI能力のインターフェース
///
/// プロンプト不正は Invalid-Input、画像不在は Not-Found として
/// 区別可能なエラーを返すこと。
pub trait LlmClient {
    /// テキストプロンプトから画像バイト列を生成する
    fn generate_image(&self, model: &str, prompt: &str) -> Result<Vec<u8>>;

    /// 画像に対して質問プロンプトで判定を行う
    fn judge_image(&self, model: &str, image_path: &Path, prompt: &str) -> Result<JudgeResponse>;
}

lazy_static! {
    /// ```lang ... ``` 形式のフェンスブロック
    static ref RE_FENCE: Regex = Regex::new(r"(?s)```(?:\w+)?\s*(.*?)\s*```").unwrap();
}

/// レスポンスからフェンスブロック内のペイロードを抽出する
///
/// ブロックが無い場合はレスポンス全体をトリムして返す。
pub fn extract_fenced_payload(response: &str) -> &str {
    match RE_FENCE.captures(response) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => response.trim(),
    }
}

/// レスポンスからJSONオブジェクト部分を抽出する
///
/// 抽出優先順位:
/// 1. フェンスブロック内
/// 2. 生の {...} オブジェクト
pub fn extract_json_object(response: &str) -> Result<&str> {
    let payload = extract_fenced_payload(response);
    if payload.starts_with('{') {
        return Ok(payload);
    }

    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if end >= start {
            return Ok(&response[start..=end]);
        }
    }

    Err(IgenBenchError::ApiParse(
        "JSONオブジェクトが見つかりません".into(),
    ))
}

/// 判定レスポンスをパースする（欠けたフィールドは空文字で補完）
pub fn parse_judge_response(response: &str) -> Result<JudgeResponse> {
    let json_str = extract_json_object(response)?;
    serde_json::from_str(json_str)
        .map_err(|e| IgenBenchError::ApiParse(format!("判定JSONパースエラー: {}", e)))
}

/// 生成レスポンスから画像バイト列をデコードする
///
/// フェンスブロック内のbase64ペイロードを想定。
pub fn decode_image_payload(response: &str) -> Result<Vec<u8>> {
    let payload = extract_fenced_payload(response);
    if payload.is_empty() {
        return Err(IgenBenchError::ApiParse(
            "画像ペイロードが空です".into(),
        ));
    }

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64
        .decode(compact.as_bytes())
        .map_err(|e| IgenBenchError::ApiParse(format!("base64デコードエラー: {}", e)))
}

/// AI CLIをサブプロセス起動するクライアント
pub struct CliLlmClient {
    provider: AiProvider,
    verbose: bool,
}

impl CliLlmClient {
    pub fn new(provider: AiProvider, verbose: bool) -> Self {
        Self { provider, verbose }
    }

    fn run_cli(&self, model: &str, prompt: &str) -> Result<String> {
        let command = self.provider.command_name();
        let flat_prompt = prompt.replace('\n', " ");

        if self.verbose {
            println!("  [{}] プロンプト長: {} chars", command, flat_prompt.len());
        }

        // CLI呼び出し（Windowsではcmd /c経由）
        #[cfg(windows)]
        let output = Command::new("cmd")
            .args([
                "/c", command, "-p", &flat_prompt, "--model", model, "--output-format", "text",
            ])
            .output()
            .map_err(|e| IgenBenchError::ApiCall(format!("{} CLI実行エラー: {}", command, e)))?;

        #[cfg(not(windows))]
        let output = Command::new(command)
            .args(["-p", &flat_prompt, "--model", model, "--output-format", "text"])
            .output()
            .map_err(|e| IgenBenchError::ApiCall(format!("{} CLI実行エラー: {}", command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(IgenBenchError::ApiCall(format!(
                "{} CLI failed (code {:?}): {}",
                command,
                output.status.code(),
                stderr
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();

        if self.verbose {
            println!("  [{}] レスポンス長: {} chars", command, response.len());
        }

        Ok(response)
    }
}

impl LlmClient for CliLlmClient {
    fn generate_image(&self, model: &str, prompt: &str) -> Result<Vec<u8>> {
        if prompt.trim().is_empty() {
            return Err(IgenBenchError::InvalidInput(
                "生成プロンプトが空です".into(),
            ));
        }

        let full_prompt = format!(
            "Generate an image for the following request and output the PNG bytes as a base64 fenced code block only.\n\n{}",
            prompt
        );
        let response = self.run_cli(model, &full_prompt)?;
        decode_image_payload(&response)
    }

    fn judge_image(&self, model: &str, image_path: &Path, prompt: &str) -> Result<JudgeResponse> {
        if !image_path.exists() {
            return Err(IgenBenchError::FileNotFound(
                image_path.display().to_string(),
            ));
        }

        let full_prompt = format!(
            "Read the image file at {} and follow the instructions below.\n\n{}",
            image_path.display().to_string().replace('\\', "/"),
            prompt
        );
        let response = self.run_cli(model, &full_prompt)?;
        parse_judge_response(&response)
    }
}
