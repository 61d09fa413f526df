//! プロンプト生成モジュール
//!
//! - build_text2image_prompt: T2I生成用プロンプト
//! - build_factual_qa_prompt: 事実確認QA判定用プロンプト

use crate::error::{IgenBenchError, Result};
use crate::item::VisItem;

/// T2I生成用プロンプトを構築する
///
/// `t2i_prompt` が未設定または空の場合はエラー。
pub fn build_text2image_prompt(item: &VisItem) -> Result<String> {
    let draft = item
        .t2i_prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            IgenBenchError::InvalidInput(format!("t2i_promptが設定されていません: {}", item.id))
        })?;

    Ok(format!(
        r#"
"""{draft}"""

**Requirements**:
1. Follow the layout, structure, and visual intent implied by the design draft, including charts, text, and any suggested icons.
2. Use the dataset exactly as given; do not change or invent values.
3. Maintain a clean, modern, readable aesthetic with clear data encoding.

**Output**:
A polished infographic image that reflects both the dataset and the design draft.
"#
    ))
}

/// 事実確認QA判定用プロンプトを構築する
pub fn build_factual_qa_prompt(question: &str) -> String {
    format!(
        r#"
You are a strict factual evaluator.

Your task:
Inspect the infographic image (provided separately) and answer the binary factual question below.

Rules:
- Answer **1** ONLY if the requirement is clearly satisfied in the image.
- Answer **0** if the requirement is NOT satisfied, unclear, ambiguous, partially met, or cannot be confirmed.
- No partial credit. Ambiguity = 0.
- Base your judgment ONLY on visible evidence in the infographic.
- Even if the image is empty, blank, corrupted, unreadable, or clearly incorrect, you MUST still output a valid JSON object following the required format. In such cases, the answer should be 0.

-------------------------------------
FACTUAL QUESTION:
{question}
-------------------------------------

**Output Format (JSON ONLY)**:
```json
{{
  "analysis": "<your reasoning based strictly on what is visible>",
  "answer": "<0 or 1>"
}}
```
The response must contain only valid JSON.
"#
    )
}
